use clap::Args;

use crate::cli::op::{Op, OpContext, OpError, PageReport};

#[derive(Args, Debug, Clone)]
pub struct Count;

#[async_trait::async_trait]
impl Op for Count {
    async fn execute(&self, ctx: &OpContext) -> Result<PageReport, OpError> {
        let controller = ctx.controller(ctx.page());
        let count = controller.refresh_count().await?;
        Ok(PageReport::new(format!("{} item(s) in cart", count), &controller))
    }
}
