//! Backend commands queued from UI to the store worker.

pub enum BackendCommand {
    Refresh,
    AddItem {
        name: String,
        quantity: u32,
        cost: f64,
    },
    UpdateItem {
        name: String,
        quantity: u32,
        cost: f64,
    },
    RemoveItem {
        name: String,
    },
}
