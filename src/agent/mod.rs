pub mod prompts;

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::config::ChatSettings;
use crate::errors::RelayError;
use crate::models::{ChatReply, ChatRequest};
use crate::transport::{OutboundHttpClient, OutboundRequest};

pub const NO_REPLY_FALLBACK: &str = "Sorry, no reply from AI.";

/// Picks the reply text out of a `generateContent` response: first candidate's
/// first part, then the provider's error message, then the fixed fallback.
/// Any JSON value is accepted; shape mismatches just fall through.
pub fn extract_reply(response: &Value) -> String {
    let non_empty = |pointer: &str| {
        response
            .pointer(pointer)
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
    };

    non_empty("/candidates/0/content/parts/0/text")
        .or_else(|| non_empty("/error/message"))
        .unwrap_or_else(|| NO_REPLY_FALLBACK.to_string())
}

/// Single-turn relay to the Gemini `generateContent` endpoint.
/// Nothing is kept between calls.
pub struct ChatRelay {
    client: Arc<dyn OutboundHttpClient>,
    settings: ChatSettings,
}

impl ChatRelay {
    pub fn new(client: Arc<dyn OutboundHttpClient>, settings: ChatSettings) -> Self {
        Self { client, settings }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.model
        )
    }

    pub fn assemble_prompt(&self, request: &ChatRequest) -> String {
        let system = prompts::system_context(
            request.mode(),
            &self.settings.owner_name,
            &self.settings.developer_profile,
        );
        prompts::build_prompt(&system, &request.message)
    }

    pub async fn reply(&self, request: &ChatRequest) -> Result<ChatReply, RelayError> {
        let prompt = self.assemble_prompt(request);
        let body = json!({ "contents": [{ "parts": [{ "text": prompt }] }] });

        let endpoint = self.endpoint();
        let key = self.settings.api_key.expose_secret();
        let outbound = OutboundRequest::new(format!("{endpoint}?key={key}"), body)
            .header("X-goog-api-key", key);

        info!("Sending request to {endpoint}");
        let response = self
            .client
            .post_json(outbound)
            .await
            .map_err(RelayError::Transport)?;
        info!("Gemini API responded with status: {}", response.status);

        let data: Value = serde_json::from_str(&response.body).map_err(RelayError::InvalidBody)?;
        if data.get("candidates").is_none() {
            warn!(
                "No candidates field in Gemini response: {}",
                serde_json::to_string_pretty(&data).unwrap_or_default()
            );
        }

        let reply = extract_reply(&data);
        info!("AI reply generated ({} chars)", reply.chars().count());
        Ok(ChatReply { reply })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::testing::ScriptedClient;

    fn settings() -> ChatSettings {
        ChatSettings {
            api_key: secrecy::SecretString::from("g-key"),
            base_url: "https://gemini.test/v1beta/".into(),
            model: "gemini-2.0-flash".into(),
            owner_name: "Ada".into(),
            developer_profile: "About the Developer:\n- Writes Rust.".into(),
        }
    }

    fn request(message: &str, mode: Option<&str>) -> ChatRequest {
        ChatRequest { message: message.into(), mode: mode.map(str::to_string) }
    }

    #[test]
    fn first_candidate_text_wins() {
        let data = json!({
            "candidates": [
                { "content": { "parts": [{ "text": "  Hello!\n" }, { "text": "ignored" }] } },
                { "content": { "parts": [{ "text": "second" }] } }
            ],
            "error": { "message": "ignored too" }
        });
        assert_eq!(extract_reply(&data), "  Hello!\n");
    }

    #[test]
    fn provider_error_message_becomes_reply() {
        let data = json!({ "error": { "code": 400, "message": "API key not valid." } });
        assert_eq!(extract_reply(&data), "API key not valid.");
    }

    #[test]
    fn empty_candidate_falls_through_to_error() {
        let data = json!({
            "candidates": [{ "content": { "parts": [{ "text": "" }] } }],
            "error": { "message": "quota exceeded" }
        });
        assert_eq!(extract_reply(&data), "quota exceeded");
    }

    #[test]
    fn unusable_shapes_yield_fallback() {
        for data in [
            json!({}),
            json!({ "candidates": [] }),
            json!({ "candidates": [{ "finishReason": "SAFETY" }] }),
            json!({ "error": {} }),
            json!([1, 2, 3]),
            json!("plain string"),
            json!(null),
        ] {
            assert_eq!(extract_reply(&data), NO_REPLY_FALLBACK, "for {data}");
        }
    }

    #[tokio::test]
    async fn reply_posts_prompt_with_key_and_returns_text() {
        let client = Arc::new(ScriptedClient::new().respond(
            200,
            r#"{"candidates":[{"content":{"parts":[{"text":"Hello!"}]}}]}"#,
        ));
        let relay = ChatRelay::new(client.clone(), settings());

        let reply = relay.reply(&request("hi", Some("short"))).await.unwrap();
        assert_eq!(reply, ChatReply { reply: "Hello!".into() });

        let sent = client.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0].url,
            "https://gemini.test/v1beta/models/gemini-2.0-flash:generateContent?key=g-key"
        );
        assert!(sent[0]
            .headers
            .contains(&("X-goog-api-key".to_string(), "g-key".to_string())));

        let text = sent[0].body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(text.contains(prompts::SHORT_MARKER));
        assert!(text.contains("About the Developer:"));
        assert!(text.ends_with("\n\nUser: hi"));
    }

    #[tokio::test]
    async fn detailed_mode_reaches_the_provider() {
        let client = Arc::new(ScriptedClient::new().respond(200, "{}"));
        let relay = ChatRelay::new(client.clone(), settings());

        let reply = relay.reply(&request("tell me more", Some("detailed"))).await.unwrap();
        assert_eq!(reply.reply, NO_REPLY_FALLBACK);

        let sent = client.requests();
        let text = sent[0].body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(text.contains(prompts::DETAILED_MARKER));
    }

    #[tokio::test]
    async fn provider_errors_are_not_relay_errors() {
        let client = Arc::new(ScriptedClient::new().respond(
            403,
            r#"{"error":{"code":403,"message":"Permission denied","status":"PERMISSION_DENIED"}}"#,
        ));
        let relay = ChatRelay::new(client, settings());

        let reply = relay.reply(&request("hi", None)).await.unwrap();
        assert_eq!(reply.reply, "Permission denied");
    }

    #[tokio::test]
    async fn non_json_body_is_a_relay_error() {
        let client = Arc::new(ScriptedClient::new().respond(502, "<html>Bad Gateway</html>"));
        let relay = ChatRelay::new(client, settings());

        let err = relay.reply(&request("hi", None)).await.unwrap_err();
        assert!(matches!(err, RelayError::InvalidBody(_)));
    }

    #[tokio::test]
    async fn network_failure_is_a_relay_error() {
        let client = Arc::new(ScriptedClient::new().fail("connection refused"));
        let relay = ChatRelay::new(client, settings());

        let err = relay.reply(&request("hi", None)).await.unwrap_err();
        assert!(matches!(err, RelayError::Transport(_)));
        assert_eq!(err.to_string(), "AI backend error");
    }
}
