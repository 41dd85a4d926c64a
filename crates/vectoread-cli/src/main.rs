mod chat_loop;
mod cli;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use vectoread_client::{ChatSession, DocumentPayload, DocumentUploader, ServiceConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = match &cli.base_url {
        Some(url) => ServiceConfig::new(url),
        None => ServiceConfig::from_env(),
    };

    let payload = DocumentPayload::from_path(&cli.document)?;
    println!(
        "{}",
        "Processing your document... This may take a moment.".dimmed()
    );

    let uploader = DocumentUploader::new(config.clone());
    let receipt = match uploader.upload(payload).await {
        Ok(receipt) => receipt,
        Err(err) => {
            eprintln!("{}", err.to_string().red());
            std::process::exit(1);
        }
    };

    tracing::debug!(session_id = %receipt.session_id, "session established");
    if let Some(message) = &receipt.message {
        println!("{}", message.green());
    }
    println!(
        "Session {} ready. Ask a question about the document (Ctrl-D or /quit to exit).",
        receipt.session_id.as_str().bold()
    );

    let session = ChatSession::new(config, receipt.session_id);
    chat_loop::run(session).await
}
