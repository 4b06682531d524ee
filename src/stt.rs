use std::path::Path;

use serde::Deserialize;

use crate::config::Config;
use crate::error::{Error, Result};

const TRANSCRIPTION_URL: &str = "https://api.openai.com/v1/audio/transcriptions";
const TRANSCRIPTION_MODEL: &str = "whisper-1";

/// Transcript returned when no transcription credentials are configured.
pub const MOCK_TRANSCRIPT: &str = "Hello AI, how are you today?";

#[derive(Deserialize)]
struct TranscriptionResponse {
    text: String,
}

/// Converts an audio file to text via the Whisper API.
pub struct Transcriber {
    client: reqwest::Client,
    api_key: String,
    mock: bool,
}

impl Transcriber {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.openai_api_key.clone(),
            mock: config.mock,
        }
    }

    pub async fn transcribe(&self, audio_path: &Path) -> Result<String> {
        if self.mock || self.api_key.is_empty() {
            tracing::info!("transcription running in mock mode");
            return Ok(MOCK_TRANSCRIPT.to_owned());
        }

        let audio = tokio::fs::read(audio_path).await?;
        let file_name = audio_path
            .file_name()
            .map_or_else(|| "audio.wav".to_owned(), |name| name.to_string_lossy().into_owned());

        tracing::debug!(bytes = audio.len(), file = %file_name, "submitting audio for transcription");

        let form = reqwest::multipart::Form::new()
            .part(
                "file",
                reqwest::multipart::Part::bytes(audio)
                    .file_name(file_name)
                    .mime_str("audio/wav")
                    .map_err(|error| Error::Transcription(error.to_string()))?,
            )
            .text("model", TRANSCRIPTION_MODEL);

        let response = self
            .client
            .post(TRANSCRIPTION_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .multipart(form)
            .send()
            .await
            .map_err(|error| Error::Transcription(error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Transcription(format!(
                "transcription API error {status}: {body}"
            )));
        }

        let transcript: TranscriptionResponse = response
            .json()
            .await
            .map_err(|error| Error::Transcription(error.to_string()))?;

        Ok(transcript.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_config() -> Config {
        Config {
            openai_api_key: String::new(),
            openai_model: "gpt-4o-mini".to_owned(),
            gemini_api_key: String::new(),
            eleven_api_key: String::new(),
            eleven_voice_id: "21m00Tcm4TlvDq8ikWAM".to_owned(),
            mock: true,
        }
    }

    #[tokio::test]
    async fn mock_mode_returns_fixed_transcript_without_touching_the_path() {
        let transcriber = Transcriber::new(&mock_config());

        // The path does not exist; mock mode must never read it.
        let text = transcriber
            .transcribe(Path::new("no/such/recording.wav"))
            .await
            .unwrap();

        assert_eq!(text, "Hello AI, how are you today?");
    }

    #[tokio::test]
    async fn missing_transcription_key_falls_back_to_mock_transcript() {
        let config = Config {
            eleven_api_key: "el-test".to_owned(),
            mock: false,
            ..mock_config()
        };
        let transcriber = Transcriber::new(&config);

        let text = transcriber
            .transcribe(Path::new("no/such/recording.wav"))
            .await
            .unwrap();

        assert_eq!(text, MOCK_TRANSCRIPT);
    }
}
