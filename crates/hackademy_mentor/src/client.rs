//! Mentor model clients.

use crate::config::MentorConfig;
use crate::error::MentorError;
use crate::prompt::{chat_context, review_prompt, CHAT_TEMPERATURE, SYSTEM_INSTRUCTION};
use crate::protocol::{ChatMessage, ChatRole};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// A source of mentor replies. Implementations may block.
pub trait MentorClient: Send {
    /// Review code that just solved `mission`.
    ///
    /// # Errors
    /// Any failure to obtain non-empty reply text.
    fn review(&self, code: &str, mission: &str) -> Result<String, MentorError>;

    /// Reply to the last message in `history`.
    ///
    /// # Errors
    /// Any failure to obtain non-empty reply text.
    fn chat(&self, history: &[ChatMessage], code: &str, stage: &str)
        -> Result<String, MentorError>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Part {
    #[serde(default)]
    pub(crate) text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) role: Option<String>,
    #[serde(default)]
    pub(crate) parts: Vec<Part>,
}

impl Content {
    fn text(role: Option<&str>, text: impl Into<String>) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![Part { text: text.into() }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerationConfig {
    pub(crate) temperature: f32,
}

/// Body of a `generateContent` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateRequest {
    pub(crate) contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

pub(crate) fn review_request(code: &str, mission: &str) -> GenerateRequest {
    GenerateRequest {
        contents: vec![Content::text(Some("user"), review_prompt(code, mission))],
        system_instruction: None,
        generation_config: None,
    }
}

/// Context first, then the conversation. Everything but model turns is sent
/// with the user role.
pub(crate) fn chat_request(history: &[ChatMessage], code: &str, stage: &str) -> GenerateRequest {
    let mut contents = Vec::with_capacity(history.len() + 1);
    contents.push(Content::text(Some("user"), chat_context(stage, code)));
    contents.extend(history.iter().map(|message| {
        let role = match message.role {
            ChatRole::Model => "model",
            ChatRole::User | ChatRole::System => "user",
        };
        Content::text(Some(role), message.content.clone())
    }));
    GenerateRequest {
        contents,
        system_instruction: Some(Content::text(None, SYSTEM_INSTRUCTION)),
        generation_config: Some(GenerationConfig {
            temperature: CHAT_TEMPERATURE,
        }),
    }
}

/// Concatenated text of the first candidate.
pub(crate) fn reply_text(body: &str) -> Result<String, MentorError> {
    let response: GenerateResponse =
        serde_json::from_str(body).map_err(|err| MentorError::Api {
            status: 200,
            message: format!("unreadable response: {}", err),
        })?;
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts.into_iter().map(|part| part.text).collect())
        .unwrap_or_default();
    if text.trim().is_empty() {
        return Err(MentorError::EmptyReply);
    }
    Ok(text)
}

/// Human-readable message from an error body.
pub(crate) fn error_message_for_response(status: reqwest::StatusCode, body: &str) -> String {
    if body.trim().is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string();
    }

    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(message) = value
            .get("error")
            .and_then(|error| error.get("message").or(Some(error)))
            .and_then(Value::as_str)
        {
            return message.to_string();
        }
    }

    body.to_string()
}

/// Blocking client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    http: reqwest::blocking::Client,
    config: MentorConfig,
}

impl GeminiClient {
    /// # Errors
    /// Returns [`MentorError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: MentorConfig) -> Result<Self, MentorError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { http, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }

    fn generate(&self, request: &GenerateRequest) -> Result<String, MentorError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(MentorError::MissingApiKey)?;
        let endpoint = self.endpoint();
        debug!(endpoint = endpoint.as_str(), turns = request.contents.len(), "mentor request");
        let res = self
            .http
            .post(&endpoint)
            .header("x-goog-api-key", api_key)
            .json(request)
            .send()?;
        let status = res.status();
        let body = res.text()?;
        if !status.is_success() {
            return Err(MentorError::Api {
                status: status.as_u16(),
                message: error_message_for_response(status, &body),
            });
        }
        reply_text(&body)
    }
}

impl MentorClient for GeminiClient {
    fn review(&self, code: &str, mission: &str) -> Result<String, MentorError> {
        self.generate(&review_request(code, mission))
    }

    fn chat(
        &self,
        history: &[ChatMessage],
        code: &str,
        stage: &str,
    ) -> Result<String, MentorError> {
        self.generate(&chat_request(history, code, stage))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn chat_request_maps_roles_and_sets_temperature() {
        let history = vec![
            ChatMessage::user("what is a div?"),
            ChatMessage::model("a box"),
            ChatMessage {
                role: ChatRole::System,
                content: "stage changed".to_string(),
            },
        ];
        let body = serde_json::to_value(chat_request(&history, "<div>", "intro")).expect("json");
        let roles: Vec<&str> = body["contents"]
            .as_array()
            .expect("contents")
            .iter()
            .map(|c| c["role"].as_str().expect("role"))
            .collect();
        assert_eq!(roles, vec!["user", "user", "model", "user"]);
        assert_eq!(body["contents"][1]["parts"][0]["text"], "what is a div?");
        assert_eq!(body["generationConfig"]["temperature"], json!(0.7f32));
        assert_eq!(
            body["systemInstruction"]["parts"][0]["text"],
            SYSTEM_INSTRUCTION
        );
        assert!(body["systemInstruction"].get("role").is_none());
    }

    #[test]
    fn review_request_is_a_single_turn() {
        let body = serde_json::to_value(review_request("<p>hi</p>", "Add a paragraph")).expect("json");
        assert_eq!(body["contents"].as_array().map(Vec::len), Some(1));
        assert!(body.get("generationConfig").is_none());
        assert!(body["contents"][0]["parts"][0]["text"]
            .as_str()
            .is_some_and(|text| text.contains("Add a paragraph")));
    }

    #[test]
    fn reply_text_joins_parts_of_first_candidate() {
        let body = json!({
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "Nice "}, {"text": "work."}]}},
                {"content": {"role": "model", "parts": [{"text": "ignored"}]}}
            ]
        })
        .to_string();
        assert_eq!(reply_text(&body).expect("text"), "Nice work.");
    }

    #[test]
    fn reply_text_reports_empty_replies() {
        for body in [r#"{}"#, r#"{"candidates":[]}"#, r#"{"candidates":[{"content":{"parts":[{"text":"  "}]}}]}"#] {
            assert!(matches!(reply_text(body), Err(MentorError::EmptyReply)), "body: {}", body);
        }
        assert!(matches!(reply_text("not json"), Err(MentorError::Api { .. })));
    }

    #[test]
    fn error_message_prefers_nested_api_message() {
        let status = reqwest::StatusCode::BAD_REQUEST;
        let body = r#"{"error":{"code":400,"message":"API key not valid"}}"#;
        assert_eq!(error_message_for_response(status, body), "API key not valid");
        assert_eq!(error_message_for_response(status, r#"{"error":"flat"}"#), "flat");
        assert_eq!(error_message_for_response(status, ""), "Bad Request");
        assert_eq!(error_message_for_response(status, "plain"), "plain");
    }

    #[test]
    fn missing_key_fails_without_network() {
        let client = GeminiClient::new(MentorConfig::default()).expect("client");
        assert!(matches!(
            client.review("<p>x</p>", "mission"),
            Err(MentorError::MissingApiKey)
        ));
        assert!(matches!(
            client.chat(&[ChatMessage::user("hi")], "", "intro"),
            Err(MentorError::MissingApiKey)
        ));
    }
}
