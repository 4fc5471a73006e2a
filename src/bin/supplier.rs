use clap::Parser;
use tracing_subscriber::EnvFilter;

use supplier_hub::cli::utils::output_error;
use supplier_hub::cli::{Cli, OutputFormat};
use supplier_hub::client::ClientError;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output_format = OutputFormat::from_cli(&cli);

    if let Err(e) = supplier_hub::cli::run(cli).await {
        let status = e
            .downcast_ref::<ClientError>()
            .and_then(ClientError::status)
            .map(|s| s.as_u16());

        match std::env::var("CLI_VERBOSE").as_deref() {
            Ok("true") | Ok("1") => eprintln!("Error: {e:?}"),
            _ => output_error(&output_format, &e.to_string(), status)?,
        }
        std::process::exit(1);
    }

    Ok(())
}
