use clap::Parser;

mod cli;

use cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let ctx = cli.context()?;
    tracing::debug!("running `{}` against {}", cli.command, ctx.client.base_url());

    let output = cli.command.execute(&ctx).await?;
    println!("{}", output);
    Ok(())
}
