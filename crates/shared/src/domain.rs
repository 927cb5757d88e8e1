use serde::{Deserialize, Serialize};

/// One inventory record. The item name is the storage key; there is no
/// surrogate id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub name: String,
    pub quantity: u32,
    pub cost: f64,
}

impl InventoryItem {
    pub fn new(name: impl Into<String>, quantity: u32, cost: f64) -> Self {
        Self {
            name: name.into(),
            quantity,
            cost,
        }
    }
}
