use std::fmt;
use std::sync::Arc;

use owo_colors::OwoColorize;
use parking_lot::Mutex;

use cart_sync::{
    ApiClient, ApiError, CartError, CartSyncController, Config, ConfigError, Document,
    NotificationLevel,
};

pub struct OpContext {
    pub config: Config,
    pub client: ApiClient,
}

impl OpContext {
    /// A page seeded with the header elements and the configured cookies.
    pub fn page(&self) -> Document {
        Document::cart_page().with_cookies(self.config.cookies.clone().unwrap_or_default())
    }

    pub fn controller(&self, page: Document) -> CartSyncController<ApiClient, Document> {
        CartSyncController::new(
            self.client.clone(),
            Arc::new(Mutex::new(page)),
            self.config.settings(),
        )
    }
}

#[async_trait::async_trait]
pub trait Op {
    async fn execute(&self, ctx: &OpContext) -> Result<PageReport, OpError>;
}

#[derive(Debug, thiserror::Error)]
pub enum OpError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("API error: {0}")]
    Api(#[from] ApiError),
    #[error("{0}")]
    Cart(#[from] CartError),
}

/// What a command did, and the page as it looks afterwards.
#[derive(Debug)]
pub struct PageReport {
    pub summary: String,
    pub page: Document,
}

impl PageReport {
    pub fn new(summary: impl Into<String>, controller: &CartSyncController<ApiClient, Document>) -> Self {
        Self {
            summary: summary.into(),
            page: controller.view().lock().clone(),
        }
    }
}

impl fmt::Display for PageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.summary.bold())?;

        let page = self.page.to_string();
        for line in page.lines() {
            writeln!(f, "  {}", line.dimmed())?;
        }

        let notifications = self.page.notifications();
        if !notifications.is_empty() {
            writeln!(f)?;
        }
        for notification in notifications {
            let line = notification.to_string();
            match notification.level {
                NotificationLevel::Success => writeln!(f, "{}", line.green())?,
                NotificationLevel::Error => writeln!(f, "{}", line.red())?,
                NotificationLevel::Info => writeln!(f, "{}", line.cyan())?,
            }
        }
        Ok(())
    }
}
