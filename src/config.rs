use serde::Deserialize;

/// Chat model used when `OPENAI_MODEL` is not set.
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
/// Voice used when `ELEVEN_VOICE_ID` is not set ("Rachel").
const DEFAULT_ELEVEN_VOICE_ID: &str = "21m00Tcm4TlvDq8ikWAM";

#[derive(Deserialize, Debug)]
struct Environment {
    #[serde(default)]
    openai_api_key: String,
    #[serde(default = "default_openai_model")]
    openai_model: String,
    #[serde(default)]
    gemini_api_key: String,
    #[serde(default)]
    eleven_api_key: String,
    #[serde(default = "default_eleven_voice_id")]
    eleven_voice_id: String,
}

fn default_openai_model() -> String {
    DEFAULT_OPENAI_MODEL.to_owned()
}

fn default_eleven_voice_id() -> String {
    DEFAULT_ELEVEN_VOICE_ID.to_owned()
}

/// Resolved once at startup and passed by reference into every component
/// constructor. Missing keys are not an error: with no credentials at all
/// the pipeline runs in mock mode end to end.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_model: String,
    pub gemini_api_key: String,
    pub eleven_api_key: String,
    pub eleven_voice_id: String,
    pub mock: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, envy::Error> {
        Ok(Self::resolve(envy::from_env::<Environment>()?))
    }

    fn resolve(environment: Environment) -> Self {
        let mock = environment.openai_api_key.is_empty()
            && environment.gemini_api_key.is_empty()
            && environment.eleven_api_key.is_empty();

        Self {
            openai_api_key: environment.openai_api_key,
            openai_model: environment.openai_model,
            gemini_api_key: environment.gemini_api_key,
            eleven_api_key: environment.eleven_api_key,
            eleven_voice_id: environment.eleven_voice_id,
            mock,
        }
    }
}
