use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Error,
    Info,
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub text: Option<String>,
    /// Auto-dismiss delay; `None` waits for the user
    pub timer: Option<Duration>,
}

impl Notification {
    pub fn added_to_cart() -> Self {
        Self {
            level: NotificationLevel::Success,
            title: "Added to cart".to_string(),
            text: None,
            timer: Some(Duration::from_millis(1500)),
        }
    }

    pub fn add_to_cart_failed() -> Self {
        Self {
            level: NotificationLevel::Error,
            title: "Oops...".to_string(),
            text: Some("Failed to add to cart.".to_string()),
            timer: None,
        }
    }

    pub fn stock_ceiling(max_quantity: u64) -> Self {
        Self {
            level: NotificationLevel::Info,
            title: stock_ceiling_message(max_quantity),
            text: None,
            timer: Some(Duration::from_millis(2000)),
        }
    }
}

pub(crate) fn stock_ceiling_message(max_quantity: u64) -> String {
    format!("Only {} in stock", max_quantity)
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.level {
            NotificationLevel::Success => "success",
            NotificationLevel::Error => "error",
            NotificationLevel::Info => "info",
        };
        write!(f, "[{}] {}", level, self.title)?;
        if let Some(text) = &self.text {
            write!(f, ": {}", text)?;
        }
        Ok(())
    }
}
