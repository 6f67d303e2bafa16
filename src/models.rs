use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ── Contact form ──────────────────────────────────────────────────────────────

/// Browser/OS metadata the contact form attaches to a submission.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    pub user_agent: Option<String>,
    pub platform: Option<String>,
    pub language: Option<String>,
    pub screen_resolution: Option<String>,
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub client_info: Option<DeviceInfo>,
}

#[derive(Debug, Serialize)]
pub struct SendEmailResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ── Outgoing email ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailBody {
    Text(String),
    Html(String),
}

impl EmailBody {
    pub fn as_str(&self) -> &str {
        match self {
            EmailBody::Text(s) | EmailBody::Html(s) => s,
        }
    }
}

/// A single message handed to the email provider. Built per request, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub from: String,
    pub to: String,
    pub cc: Option<String>,
    pub subject: String,
    pub body: EmailBody,
}

// ── Chat ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatMode {
    #[default]
    Short,
    Detailed,
}

impl ChatMode {
    /// Only the exact label `"detailed"` selects the long template.
    pub fn from_label(label: Option<&str>) -> Self {
        match label {
            Some("detailed") => ChatMode::Detailed,
            _ => ChatMode::Short,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChatMode::Short => "short",
            ChatMode::Detailed => "detailed",
        }
    }
}

impl std::fmt::Display for ChatMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keeps string labels and drops anything else, so an odd `mode` falls back
/// to short instead of failing the request.
fn lenient_label<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(label) => Some(label),
        _ => None,
    })
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default, deserialize_with = "lenient_label")]
    pub mode: Option<String>,
}

impl ChatRequest {
    pub fn mode(&self) -> ChatMode {
        ChatMode::from_label(self.mode.as_deref())
    }

    /// Resolved mode for logs, marked when the caller did not pick it.
    pub fn mode_description(&self) -> String {
        let mode = self.mode();
        match self.mode.as_deref() {
            Some(label) if label == mode.as_str() => mode.to_string(),
            Some(label) => format!("{mode} (unrecognized {label:?})"),
            None => format!("{mode} (default)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatReply {
    pub reply: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
