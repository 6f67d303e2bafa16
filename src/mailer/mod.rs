pub mod templates;

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde_json::{json, Value};
use tracing::{debug, error, info};

use crate::config::MailSettings;
use crate::errors::DispatchError;
use crate::models::{ContactSubmission, EmailBody, EmailMessage};
use crate::transport::{OutboundHttpClient, OutboundRequest, OutboundResponse};

/// Resend `POST /emails` payload for one message.
fn resend_payload(message: &EmailMessage) -> Value {
    let mut payload = json!({
        "from": message.from,
        "to": [message.to],
        "subject": message.subject,
    });
    match &message.body {
        EmailBody::Text(text) => payload["text"] = json!(text),
        EmailBody::Html(html) => payload["html"] = json!(html),
    }
    if let Some(cc) = &message.cc {
        payload["cc"] = json!([cc]);
    }
    payload
}

/// Best human-readable message from a rejected send: the provider's `message`
/// field, else the raw body, else the status line.
fn provider_message(response: &OutboundResponse) -> String {
    serde_json::from_str::<Value>(&response.body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .filter(|m| !m.is_empty())
        .or_else(|| Some(response.body.trim().to_string()).filter(|b| !b.is_empty()))
        .unwrap_or_else(|| format!("email provider returned HTTP {}", response.status))
}

/// Sends contact-form mail through the Resend HTTP API.
pub struct EmailDispatcher {
    client: Arc<dyn OutboundHttpClient>,
    settings: MailSettings,
}

impl EmailDispatcher {
    pub fn new(client: Arc<dyn OutboundHttpClient>, settings: MailSettings) -> Self {
        Self { client, settings }
    }

    pub fn compose_messages(
        &self,
        submission: &ContactSubmission,
    ) -> Result<Vec<EmailMessage>, DispatchError> {
        templates::compose_messages(submission, &self.settings).map_err(|e| {
            error!("Failed to render contact email: {e}");
            DispatchError::Render(e)
        })
    }

    /// Sends each composed message in order, stopping at the first failure.
    /// Messages already delivered stay delivered.
    pub async fn send(&self, submission: &ContactSubmission) -> Result<(), DispatchError> {
        for message in self.compose_messages(submission)? {
            self.deliver(&message).await?;
        }
        Ok(())
    }

    async fn deliver(&self, message: &EmailMessage) -> Result<(), DispatchError> {
        let url = format!("{}/emails", self.settings.base_url.trim_end_matches('/'));
        let request = OutboundRequest::new(url, resend_payload(message)).header(
            "Authorization",
            format!("Bearer {}", self.settings.api_key.expose_secret()),
        );

        debug!(
            "Sending \"{}\" to {} ({} byte body)",
            message.subject,
            message.to,
            message.body.as_str().len()
        );
        let response = self.client.post_json(request).await.map_err(|e| {
            error!("Email provider unreachable while sending to {}: {e}", message.to);
            DispatchError::from(e)
        })?;

        if !response.is_success() {
            let message_text = provider_message(&response);
            error!(
                "Email provider rejected message to {} (HTTP {}): {message_text}",
                message.to, response.status
            );
            return Err(DispatchError::Rejected { status: response.status, message: message_text });
        }

        let id = serde_json::from_str::<Value>(&response.body)
            .ok()
            .and_then(|v| v.get("id").and_then(Value::as_str).map(str::to_string))
            .unwrap_or_default();
        match &message.cc {
            Some(cc) => info!("Email sent to {} (cc {cc}) id={id}", message.to),
            None => info!("Email sent to {} id={id}", message.to),
        }
        Ok(())
    }
}
