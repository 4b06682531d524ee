mod config;
mod error;
mod generate;
mod pipeline;
mod store;
mod stt;
mod tts;

use std::path::PathBuf;

use anyhow::Context;
use structopt::StructOpt;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::pipeline::Pipeline;
use crate::store::FileStore;

#[derive(StructOpt, Debug)]
#[structopt(
    name = "voice-ai-chat",
    about = "Voice chat agent: transcribe a recording, reply, and speak the reply back"
)]
struct Args {
    /// Path to the input audio file (e.g. a .wav or .mp3 file)
    #[structopt(short, long)]
    audio: PathBuf,

    /// Where the synthesized reply is written
    #[structopt(long, default_value = "ai_reply.mp3")]
    output: PathBuf,

    /// Path of the persisted conversation history
    #[structopt(long, default_value = "chat_context.json")]
    context: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::from_args();
    anyhow::ensure!(
        args.audio.is_file(),
        "input audio file {} does not exist or is not a regular file",
        args.audio.display()
    );

    let config = Config::from_env().context("Failed to read configuration from environment")?;
    if config.mock {
        tracing::warn!("no provider API keys configured, running in mock mode");
    }

    let pipeline = Pipeline::new(&config, FileStore::new(args.context), args.output);
    let reply = pipeline.process(&args.audio).await?;

    println!("{}", serde_json::to_string_pretty(&reply)?);

    Ok(())
}
