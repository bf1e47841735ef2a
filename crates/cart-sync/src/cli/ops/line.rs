//! `increase` and `decrease` against a single rendered line item.

use clap::Args;

use cart_sync::{Document, ProductId};

use crate::cli::op::{Op, OpContext, OpError, PageReport};

/// The line item as the page currently shows it.
#[derive(Args, Debug, Clone)]
pub struct LineItem {
    /// Product id, as in `data-product-id`
    pub product_id: String,

    /// Quantity currently displayed
    #[arg(long, default_value = "1")]
    pub quantity: u64,

    /// Stock ceiling (`data-max`); unbounded when omitted
    #[arg(long)]
    pub max: Option<u64>,
}

impl LineItem {
    fn page(&self, ctx: &OpContext) -> Document {
        ctx.page()
            .with_line_item(self.product_id.as_str(), self.quantity, "", self.max)
    }

    fn id(&self) -> ProductId {
        ProductId::from(self.product_id.as_str())
    }
}

#[derive(Args, Debug, Clone)]
pub struct Increase {
    #[command(flatten)]
    pub line: LineItem,
}

#[async_trait::async_trait]
impl Op for Increase {
    async fn execute(&self, ctx: &OpContext) -> Result<PageReport, OpError> {
        let controller = ctx.controller(self.line.page(ctx));
        let outcome = controller.increase(&self.line.id()).await?;
        Ok(PageReport::new(
            format!("increase {}: {}", self.line.product_id, outcome),
            &controller,
        ))
    }
}

#[derive(Args, Debug, Clone)]
pub struct Decrease {
    #[command(flatten)]
    pub line: LineItem,
}

#[async_trait::async_trait]
impl Op for Decrease {
    async fn execute(&self, ctx: &OpContext) -> Result<PageReport, OpError> {
        let controller = ctx.controller(self.line.page(ctx));
        let outcome = controller.decrease(&self.line.id()).await?;
        Ok(PageReport::new(
            format!("decrease {}: {}", self.line.product_id, outcome),
            &controller,
        ))
    }
}
