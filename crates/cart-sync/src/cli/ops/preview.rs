use clap::Args;

use crate::cli::op::{Op, OpContext, OpError, PageReport};

#[derive(Args, Debug, Clone)]
pub struct Preview {
    /// Stay until the preview auto-hides
    #[arg(long)]
    pub wait: bool,
}

#[async_trait::async_trait]
impl Op for Preview {
    async fn execute(&self, ctx: &OpContext) -> Result<PageReport, OpError> {
        let controller = ctx.controller(ctx.page());
        controller.refresh_preview().await?;

        if self.wait {
            let delay = controller.settings().mini_cart_hide_after;
            tracing::info!("waiting {:?} for the preview to hide", delay);
            tokio::time::sleep(delay).await;
            // let the hide timer run before the snapshot
            tokio::task::yield_now().await;
        }

        Ok(PageReport::new("mini-cart preview", &controller))
    }
}
