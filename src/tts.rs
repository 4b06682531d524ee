use serde::Serialize;

use crate::config::Config;
use crate::error::{Error, Result};

const VOICE_STABILITY: f32 = 0.3;
const VOICE_SIMILARITY_BOOST: f32 = 0.7;

/// Placeholder audio returned when no synthesis credentials are configured.
pub const MOCK_AUDIO: &[u8] = b"FAKEAUDIOBYTES";

#[derive(Debug, Serialize)]
struct SpeechRequest {
    text: String,
    voice_settings: VoiceSettings,
}

#[derive(Debug, Serialize)]
struct VoiceSettings {
    stability: f32,
    similarity_boost: f32,
}

/// Converts reply text to audio bytes via the ElevenLabs API.
pub struct Synthesizer {
    client: reqwest::Client,
    api_key: String,
    voice_id: String,
    mock: bool,
}

impl Synthesizer {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.eleven_api_key.clone(),
            voice_id: config.eleven_voice_id.clone(),
            mock: config.mock,
        }
    }

    pub async fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        if self.mock || self.api_key.is_empty() {
            tracing::info!("synthesis running in mock mode");
            return Ok(MOCK_AUDIO.to_vec());
        }

        let request = SpeechRequest {
            text: text.to_owned(),
            voice_settings: VoiceSettings {
                stability: VOICE_STABILITY,
                similarity_boost: VOICE_SIMILARITY_BOOST,
            },
        };

        let response = self
            .client
            .post(format!(
                "https://api.elevenlabs.io/v1/text-to-speech/{}",
                self.voice_id
            ))
            .header("xi-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|error| Error::Synthesis(error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Synthesis(format!(
                "ElevenLabs API error {status}: {body}"
            )));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|error| Error::Synthesis(error.to_string()))?;

        tracing::debug!(bytes = audio.len(), voice = %self.voice_id, "synthesis complete");
        Ok(audio.to_vec())
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
    async fn mock_mode_returns_placeholder_bytes() {
        let synthesizer = Synthesizer::new(&mock_config());

        let audio = synthesizer.synthesize("any reply").await.unwrap();
        assert_eq!(audio, b"FAKEAUDIOBYTES");
    }

    #[tokio::test]
    async fn missing_synthesis_key_falls_back_to_placeholder_bytes() {
        let config = Config {
            gemini_api_key: "g-test".to_owned(),
            mock: false,
            ..mock_config()
        };
        let synthesizer = Synthesizer::new(&config);

        let audio = synthesizer.synthesize("any reply").await.unwrap();
        assert_eq!(audio, MOCK_AUDIO);
    }
}
