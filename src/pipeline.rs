use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::Config;
use crate::error::Result;
use crate::generate::Generator;
use crate::store::ConversationStore;
use crate::stt::Transcriber;
use crate::tts::Synthesizer;

/// Outcome of one processed voice message.
#[derive(Debug, Serialize)]
pub struct PipelineReply {
    pub text: String,
    pub audio_path: PathBuf,
}

/// Runs one voice exchange end to end: transcribe, consult history, generate
/// a reply, persist the turn, synthesize, and write the audio file.
pub struct Pipeline<S> {
    transcriber: Transcriber,
    generator: Generator,
    synthesizer: Synthesizer,
    store: S,
    output_path: PathBuf,
}

impl<S: ConversationStore> Pipeline<S> {
    pub fn new(config: &Config, store: S, output_path: PathBuf) -> Self {
        Self {
            transcriber: Transcriber::new(config),
            generator: Generator::new(config),
            synthesizer: Synthesizer::new(config),
            store,
            output_path,
        }
    }

    /// Strict sequence, no branching. A failure aborts the remaining stages;
    /// a turn already appended to the store is not rolled back.
    pub async fn process(&self, audio_path: &Path) -> Result<PipelineReply> {
        tracing::info!(path = %audio_path.display(), "processing voice message");

        let user_text = self.transcriber.transcribe(audio_path).await?;
        tracing::info!(text = %user_text, "user said");

        let history = self.store.load().await?;
        let reply = self.generator.generate(&user_text, &history).await?;
        tracing::info!(reply = %reply, "generated reply");

        self.store.append(&user_text, &reply).await?;

        let audio = self.synthesizer.synthesize(&reply).await?;
        tokio::fs::write(&self.output_path, &audio).await?;
        tracing::info!(path = %self.output_path.display(), bytes = audio.len(), "saved synthesized reply");

        Ok(PipelineReply {
            text: reply,
            audio_path: self.output_path.clone(),
        })
    }
}
