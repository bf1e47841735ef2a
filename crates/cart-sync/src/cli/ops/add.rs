use clap::Args;

use cart_sync::api::cart::add::{AddToCartForm, CSRF_FIELD};

use crate::cli::op::{Op, OpContext, OpError, PageReport};

#[derive(Args, Debug, Clone)]
pub struct Add {
    /// Form action URL, e.g. /cart/add/42/
    pub action: String,

    /// Form field as name=value (repeatable)
    #[arg(short = 'f', long = "field", value_parser = parse_field)]
    pub fields: Vec<(String, String)>,

    /// Value for the hidden anti-forgery field
    #[arg(long, env = "CART_SYNC_CSRF_TOKEN")]
    pub csrf: Option<String>,
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected name=value, got `{}`", raw))
}

impl Add {
    fn form(&self) -> AddToCartForm {
        let mut form = AddToCartForm::new(self.action.clone());
        if let Some(token) = &self.csrf {
            form = form.field(CSRF_FIELD, token.clone());
        }
        form.fields.extend(self.fields.iter().cloned());
        form
    }
}

#[async_trait::async_trait]
impl Op for Add {
    async fn execute(&self, ctx: &OpContext) -> Result<PageReport, OpError> {
        let controller = ctx.controller(ctx.page());
        let summary = match controller.submit(&self.form()).await {
            Ok(()) => format!("added via {}", self.action),
            Err(e) => format!("add via {} failed: {}", self.action, e),
        };
        Ok(PageReport::new(summary, &controller))
    }
}
