use std::fmt;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use url::Url;

use cart_sync::{ApiClient, Config, StalePolicy};

pub mod op;
pub mod ops;

use op::{Op, OpContext, OpError, PageReport};

/// Drive a storefront's cart routes from the terminal.
#[derive(Parser, Debug)]
#[command(name = "cartsync", version, about)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true, env = "CART_SYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Storefront base URL
    #[arg(long, global = true, env = "CART_SYNC_URL")]
    pub url: Option<Url>,

    /// Cookie string to read the `csrftoken` cookie from
    #[arg(long, global = true, env = "CART_SYNC_COOKIES")]
    pub cookies: Option<String>,

    /// How to treat quantity replies that arrive out of order
    #[arg(long, global = true, value_enum)]
    pub stale_policy: Option<StalePolicy>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Merge the config file with flags; flags win.
    pub fn context(&self) -> Result<OpContext, OpError> {
        let mut config = Config::load(self.config.as_deref())?;
        if let Some(url) = &self.url {
            config.base_url = url.clone();
        }
        if let Some(cookies) = &self.cookies {
            config.cookies = Some(cookies.clone());
        }
        if let Some(policy) = self.stale_policy {
            config.stale_policy = policy;
        }

        let client = ApiClient::new(&config.base_url)?;
        Ok(OpContext { config, client })
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Fetch the cart item count
    Count(ops::Count),
    /// Fetch the mini-cart preview
    Preview(ops::Preview),
    /// Add one unit of a line item
    Increase(ops::Increase),
    /// Remove one unit of a line item
    Decrease(ops::Decrease),
    /// Submit an add-to-cart form
    Add(ops::Add),
}

impl Command {
    pub async fn execute(&self, ctx: &OpContext) -> Result<PageReport, OpError> {
        match self {
            Command::Count(op) => op.execute(ctx).await,
            Command::Preview(op) => op.execute(ctx).await,
            Command::Increase(op) => op.execute(ctx).await,
            Command::Decrease(op) => op.execute(ctx).await,
            Command::Add(op) => op.execute(ctx).await,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Count(_) => write!(f, "count"),
            Command::Preview(_) => write!(f, "preview"),
            Command::Increase(op) => write!(f, "increase {}", op.line.product_id),
            Command::Decrease(op) => write!(f, "decrease {}", op.line.product_id),
            Command::Add(op) => write!(f, "add {}", op.action),
        }
    }
}
