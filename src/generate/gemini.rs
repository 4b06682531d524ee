use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const GENERATE_CONTENT_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent";

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
}

#[derive(Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: String,
}

pub(crate) async fn complete(
    client: &reqwest::Client,
    api_key: &str,
    prompt: &str,
) -> Result<String> {
    let request = GenerateContentRequest {
        contents: vec![RequestContent {
            parts: vec![RequestPart {
                text: prompt.to_owned(),
            }],
        }],
    };

    let response = client
        .post(GENERATE_CONTENT_URL)
        .header("Authorization", format!("Bearer {api_key}"))
        .header("Content-Type", "application/json")
        .json(&request)
        .send()
        .await
        .map_err(|error| Error::Generation(error.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Generation(format!("Gemini API error {status}: {body}")));
    }

    let api_response: GenerateContentResponse = response
        .json()
        .await
        .map_err(|error| Error::Generation(error.to_string()))?;

    let reply = api_response
        .candidates
        .first()
        .and_then(|candidate| candidate.content.parts.first())
        .map(|part| part.text.clone())
        .ok_or_else(|| Error::Generation("no candidates in Gemini response".to_owned()))?;

    Ok(reply)
}
