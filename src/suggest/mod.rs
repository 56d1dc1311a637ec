use actix_web::{post, HttpResponse};
use anyhow::Result;
use serde_json::json;
use tracing::error;

use crate::secrets::SECRETS;

const OPENAI_CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
const SUGGESTION_MODEL: &str = "gpt-3.5-turbo";

const SUGGESTION_PROMPT: &str = "Create a list of three open-ended and engaging questions formatted as a single string. Each question should be separated by '||'. These questions are for an anonymous social messaging platform, like Qooh.me, and should be suitable for a diverse audience. Avoid personal or sensitive topics, focusing instead on universal themes that encourage friendly interaction. For example, your output should be structured like this: 'What's a hobby you've recently started?||If you could have dinner with any historical figure, who would it be?||What's a simple thing that makes you happy?'. Ensure the questions are intriguing, foster curiosity, and contribute to a positive and welcoming conversational environment.";

/// Stateless relay: one fixed prompt per invocation, upstream bytes
/// forwarded to the caller as they arrive. Single attempt, no retries.
#[post("/suggest-messages")]
pub async fn suggest_messages() -> HttpResponse {
    match request_suggestions().await {
        Ok(upstream) => HttpResponse::Ok()
            .content_type("text/event-stream")
            .streaming(upstream.bytes_stream()),
        Err(e) => {
            error!("suggestion upstream call failed: {}", e);
            HttpResponse::InternalServerError().json(json!({
                "error": "Something went wrong while generating the questions.",
                "details": e.to_string(),
            }))
        }
    }
}

async fn request_suggestions() -> Result<reqwest::Response> {
    let api_key = SECRETS
        .get("OPENAI_API_KEY")
        .ok_or_else(|| anyhow::anyhow!("OPENAI_API_KEY not configured"))?;

    let client = reqwest::Client::new();
    let response = client
        .post(OPENAI_CHAT_COMPLETIONS_URL)
        .bearer_auth(api_key)
        .json(&json!({
            "model": SUGGESTION_MODEL,
            "stream": true,
            "messages": [{ "role": "user", "content": SUGGESTION_PROMPT }],
        }))
        .send()
        .await;

    match response {
        Ok(resp) => {
            if resp.status().is_success() {
                Ok(resp)
            } else {
                Err(anyhow::anyhow!(format!("upstream returned: {}", resp.status())))
            }
        }
        Err(e) => Err(e.into()),
    }
}
