//! Blocking chat client for the local assistant service.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Service address, fixed at process start.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:11434";

const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";
const MODEL: &str = "qwen2.5-coder";

const SYSTEM_PROMPT: &str = "You are a reasoning assistant for coding tasks. \
Think in explicit steps, evaluate your own conclusions critically, and keep \
answers concrete.";

/// Request/response seam for the pipeline phases.
pub trait Assistant {
    fn complete(&self, prompt: &str) -> Result<String, Error>;
}

/// Chat client bound to one endpoint; one agent reused across all calls.
pub struct AssistantClient {
    agent: ureq::Agent,
    endpoint: String,
    model: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

impl AssistantClient {
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }

    pub fn with_endpoint(endpoint: &str) -> Self {
        AssistantClient {
            agent: ureq::Agent::new_with_defaults(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model: MODEL.to_string(),
        }
    }
}

impl Default for AssistantClient {
    fn default() -> Self {
        Self::new()
    }
}

impl Assistant for AssistantClient {
    /// Send one prompt and return the first choice's message content.
    ///
    /// No retry and no timeout: a failing or hanging service is fatal to
    /// the run.
    fn complete(&self, prompt: &str) -> Result<String, Error> {
        let url = format!("{}{}", self.endpoint, CHAT_COMPLETIONS_PATH);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            stream: false,
        };

        let started = Instant::now();
        let mut response = self
            .agent
            .post(&url)
            .send_json(&request)
            .map_err(|err| Error::Assistant(format!("request {url}: {err}")))?;
        let parsed: ChatResponse = response
            .body_mut()
            .read_json()
            .map_err(|err| Error::Assistant(format!("decode response: {err}")))?;

        tracing::info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            prompt_bytes = prompt.len(),
            "assistant call complete"
        );

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::Assistant("response contained no choices".to_string()))?;
        Ok(choice.message.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_trailing_slash_is_normalized() {
        let client = AssistantClient::with_endpoint("http://127.0.0.1:11434/");
        assert_eq!(client.endpoint, "http://127.0.0.1:11434");
    }

    #[test]
    fn response_shape_parses() {
        let raw = r#"{"choices": [{"message": {"role": "assistant", "content": "plan"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(raw).expect("parse");
        assert_eq!(parsed.choices[0].message.content, "plan");
    }
}
