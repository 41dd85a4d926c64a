use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(name = "vectoread")]
#[command(version, about = "VectoRead - chat with a PDF document")]
pub struct Cli {
    /// PDF document to ingest
    pub document: PathBuf,

    /// Base URL of the VectoRead API (defaults to http://127.0.0.1:8000)
    #[arg(long, env = "VECTOREAD_API_BASE_URL")]
    pub base_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
