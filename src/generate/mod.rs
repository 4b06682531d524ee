pub(crate) mod gemini;
pub(crate) mod openai;

use itertools::Itertools;
use strum::Display;

use crate::config::Config;
use crate::error::Result;
use crate::store::Turn;

/// Reply returned when running in mock mode.
pub const MOCK_REPLY: &str = "I'm great! How can I assist you today?";

/// Inline reply when no generation backend is configured. Surfaced as text,
/// never raised.
const UNCONFIGURED_REPLY: &str = "[Error] No language model API configured.";

/// Turns included in the prompt; older history is invisible to the model.
const HISTORY_WINDOW: usize = 5;

/// Generation backend, selected once from configuration. Gemini takes
/// priority when both providers are configured; there is no fallback between
/// providers on failure.
#[derive(Debug, Clone, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Backend {
    Gemini { api_key: String },
    OpenAi { api_key: String, model: String },
    Unconfigured,
}

impl Backend {
    pub fn from_config(config: &Config) -> Self {
        if !config.gemini_api_key.is_empty() {
            Backend::Gemini {
                api_key: config.gemini_api_key.clone(),
            }
        } else if !config.openai_api_key.is_empty() {
            Backend::OpenAi {
                api_key: config.openai_api_key.clone(),
                model: config.openai_model.clone(),
            }
        } else {
            Backend::Unconfigured
        }
    }
}

/// Produces a conversational reply from the user's utterance and recent
/// history.
pub struct Generator {
    client: reqwest::Client,
    backend: Backend,
    mock: bool,
}

impl Generator {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            backend: Backend::from_config(config),
            mock: config.mock,
        }
    }

    pub async fn generate(&self, user_text: &str, history: &[Turn]) -> Result<String> {
        if self.mock {
            tracing::info!("generation running in mock mode");
            return Ok(MOCK_REPLY.to_owned());
        }

        let prompt = build_prompt(user_text, history);

        match &self.backend {
            Backend::Gemini { api_key } => {
                tracing::info!(backend = %self.backend, "requesting completion");
                gemini::complete(&self.client, api_key, &prompt).await
            }
            Backend::OpenAi { api_key, model } => {
                tracing::info!(backend = %self.backend, model = %model, "requesting completion");
                openai::complete(&self.client, api_key, model, &prompt).await
            }
            Backend::Unconfigured => {
                tracing::warn!("no generation backend configured");
                Ok(UNCONFIGURED_REPLY.to_owned())
            }
        }
    }
}

/// Renders the most recent turns (oldest first) as alternating Human/AI
/// lines, followed by the new utterance and the cue the model completes.
fn build_prompt(user_text: &str, history: &[Turn]) -> String {
    let window_start = history.len().saturating_sub(HISTORY_WINDOW);
    let rendered = history[window_start..]
        .iter()
        .map(|turn| format!("Human: {}\nAI: {}", turn.human, turn.ai))
        .join("\n");

    format!(
        "The following is a conversation between a human and an AI assistant.\n\
         Previous conversation:\n\
         {rendered}\n\
         \n\
         Human: {user_text}\n\
         AI:"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

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

    fn turn(index: usize) -> Turn {
        Turn {
            timestamp: Utc::now(),
            human: format!("question-{index}"),
            ai: format!("answer-{index}"),
        }
    }

    #[test]
    fn backend_prefers_gemini_when_both_providers_are_configured() {
        let config = Config {
            openai_api_key: "sk-test".to_owned(),
            gemini_api_key: "g-test".to_owned(),
            mock: false,
            ..mock_config()
        };

        assert!(matches!(Backend::from_config(&config), Backend::Gemini { .. }));
    }

    #[test]
    fn backend_falls_back_to_openai_when_only_provider_a_is_configured() {
        let config = Config {
            openai_api_key: "sk-test".to_owned(),
            mock: false,
            ..mock_config()
        };

        match Backend::from_config(&config) {
            Backend::OpenAi { model, .. } => assert_eq!(model, "gpt-4o-mini"),
            other => panic!("expected the OpenAI backend, got {other}"),
        }
    }

    #[test]
    fn backend_is_unconfigured_without_generation_keys() {
        let config = Config {
            eleven_api_key: "el-test".to_owned(),
            mock: false,
            ..mock_config()
        };

        assert!(matches!(
            Backend::from_config(&config),
            Backend::Unconfigured
        ));
    }

    #[tokio::test]
    async fn mock_mode_returns_canned_reply() {
        let generator = Generator::new(&mock_config());

        let reply = generator.generate("anything", &[]).await.unwrap();
        assert_eq!(reply, "I'm great! How can I assist you today?");
    }

    #[tokio::test]
    async fn unconfigured_backend_replies_with_inline_configuration_error() {
        let config = Config {
            eleven_api_key: "el-test".to_owned(),
            mock: false,
            ..mock_config()
        };
        let generator = Generator::new(&config);

        let reply = generator.generate("anything", &[]).await.unwrap();
        assert_eq!(reply, UNCONFIGURED_REPLY);
    }

    #[test]
    fn prompt_windows_history_to_the_last_five_turns() {
        let history: Vec<Turn> = (1..=7).map(turn).collect();

        let prompt = build_prompt("latest question", &history);

        assert!(!prompt.contains("question-1"));
        assert!(!prompt.contains("question-2"));
        for index in 3..=7 {
            assert!(prompt.contains(&format!("question-{index}")));
            assert!(prompt.contains(&format!("answer-{index}")));
        }
        assert!(prompt.contains("Human: latest question"));
        assert!(prompt.ends_with("AI:"));
    }

    #[test]
    fn prompt_renders_window_oldest_first() {
        let history: Vec<Turn> = (1..=7).map(turn).collect();

        let prompt = build_prompt("latest question", &history);

        let earlier = prompt.find("question-3").unwrap();
        let later = prompt.find("question-7").unwrap();
        assert!(earlier < later);
    }

    #[test]
    fn prompt_includes_full_short_history() {
        let history: Vec<Turn> = (1..=2).map(turn).collect();

        let prompt = build_prompt("latest question", &history);

        assert!(prompt.contains("Human: question-1\nAI: answer-1"));
        assert!(prompt.contains("Human: question-2\nAI: answer-2"));
    }
}
