use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
const SYSTEM_PROMPT: &str = "You are a helpful voice AI assistant.";
const TEMPERATURE: f32 = 0.7;

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
}

#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

pub(crate) async fn complete(
    client: &reqwest::Client,
    api_key: &str,
    model: &str,
    prompt: &str,
) -> Result<String> {
    let request = ChatRequest {
        model: model.to_owned(),
        messages: vec![
            Message {
                role: "system".to_owned(),
                content: SYSTEM_PROMPT.to_owned(),
            },
            Message {
                role: "user".to_owned(),
                content: prompt.to_owned(),
            },
        ],
        temperature: TEMPERATURE,
    };

    let response = client
        .post(CHAT_COMPLETIONS_URL)
        .header("Authorization", format!("Bearer {api_key}"))
        .header("Content-Type", "application/json")
        .json(&request)
        .send()
        .await
        .map_err(|error| Error::Generation(error.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Generation(format!("OpenAI API error {status}: {body}")));
    }

    let api_response: ChatResponse = response
        .json()
        .await
        .map_err(|error| Error::Generation(error.to_string()))?;

    let reply = api_response
        .choices
        .first()
        .map(|choice| choice.message.content.trim().to_owned())
        .ok_or_else(|| Error::Generation("no choices in completion response".to_owned()))?;

    Ok(reply)
}
