//! UI/backend events and error modeling for the inventory controller.

use shared::domain::InventoryItem;

pub enum UiEvent {
    StoreReady,
    InventoryRefreshed(Vec<InventoryItem>),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Store,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    Startup,
    Refresh,
    AddItem,
    UpdateItem,
    RemoveItem,
}

impl UiErrorContext {
    pub fn label(self) -> &'static str {
        match self {
            Self::Startup => "starting the store worker",
            Self::Refresh => "refreshing the inventory",
            Self::AddItem => "adding the item",
            Self::UpdateItem => "updating the item",
            Self::RemoveItem => "removing the item",
        }
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("unavailable")
            || message_lower.contains("connect")
            || message_lower.contains("migrat")
            || message_lower.contains("operation")
            || message_lower.contains("sqlite")
            || message_lower.contains("database")
        {
            UiErrorCategory::Store
        } else if message_lower.contains("invalid")
            || message_lower.contains("empty")
            || message_lower.contains("missing")
        {
            UiErrorCategory::Validation
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn validation(context: UiErrorContext, message: impl Into<String>) -> Self {
        Self {
            category: UiErrorCategory::Validation,
            context,
            message: message.into(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
