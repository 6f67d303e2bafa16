//! Pure rendering of the contact-form emails.

use askama::Template;

use crate::config::{MailSettings, OwnerProfile};
use crate::models::{ContactSubmission, DeviceInfo, EmailBody, EmailMessage};

const UNKNOWN: &str = "Unknown";

/// Labelled device fields in display order. Missing or empty values become `Unknown`.
pub fn device_fields(info: Option<&DeviceInfo>) -> [(&'static str, &str); 5] {
    fn or_unknown(value: Option<&String>) -> &str {
        value.map(String::as_str).filter(|v| !v.is_empty()).unwrap_or(UNKNOWN)
    }
    [
        ("User Agent", or_unknown(info.and_then(|i| i.user_agent.as_ref()))),
        ("Platform", or_unknown(info.and_then(|i| i.platform.as_ref()))),
        ("Language", or_unknown(info.and_then(|i| i.language.as_ref()))),
        ("Screen Resolution", or_unknown(info.and_then(|i| i.screen_resolution.as_ref()))),
        ("Timezone", or_unknown(info.and_then(|i| i.timezone.as_ref()))),
    ]
}

pub fn device_info_block(info: Option<&DeviceInfo>) -> String {
    let lines: String = device_fields(info)
        .iter()
        .map(|(label, value)| format!("- {label}: {value}\n"))
        .collect();
    format!("Device Info:\n{lines}")
}

pub fn admin_subject(submission: &ContactSubmission) -> String {
    format!("Portfolio Contact: {}", submission.subject)
}

pub fn acknowledgment_subject(submission: &ContactSubmission) -> String {
    format!("Thanks for contacting me, {}!", submission.name)
}

pub fn admin_body(submission: &ContactSubmission) -> String {
    format!(
        "New message from your portfolio contact form.\n\n\
         Name: {}\n\
         Email: {}\n\
         Subject: {}\n\n\
         Message:\n{}\n\n\
         {}",
        submission.name,
        submission.email,
        submission.subject,
        submission.message,
        device_info_block(submission.client_info.as_ref()),
    )
}

// ── Acknowledgment (HTML) ─────────────────────────────────────────────────────

struct DeviceRow<'a> {
    label: &'static str,
    value: &'a str,
}

struct LinkView<'a> {
    label: &'static str,
    url: &'a str,
}

#[derive(Template)]
#[template(path = "acknowledgment.html")]
struct AcknowledgmentTemplate<'a> {
    name: &'a str,
    subject: &'a str,
    message: &'a str,
    email: &'a str,
    device_rows: Vec<DeviceRow<'a>>,
    owner: &'a OwnerProfile,
    /// Empty when the owner has no location configured.
    location: &'a str,
    links: Vec<LinkView<'a>>,
}

/// Styled HTML acknowledgment for the submitter. Every interpolated value is
/// escaped by the template engine.
pub fn acknowledgment_body(
    submission: &ContactSubmission,
    owner: &OwnerProfile,
) -> Result<String, askama::Error> {
    let device_rows = device_fields(submission.client_info.as_ref())
        .into_iter()
        .map(|(label, value)| DeviceRow { label, value })
        .collect();
    let links = [("GitHub", &owner.github_url), ("LinkedIn", &owner.linkedin_url)]
        .into_iter()
        .filter_map(|(label, url)| url.as_deref().map(|url| LinkView { label, url }))
        .collect();

    AcknowledgmentTemplate {
        name: &submission.name,
        subject: &submission.subject,
        message: &submission.message,
        email: &submission.email,
        device_rows,
        owner,
        location: owner.location.as_deref().unwrap_or_default(),
        links,
    }
    .render()
}

/// Every message one submission produces, in dispatch order: the admin
/// notification (unless disabled) followed by the acknowledgment to the sender.
pub fn compose_messages(
    submission: &ContactSubmission,
    settings: &MailSettings,
) -> Result<Vec<EmailMessage>, askama::Error> {
    let mut messages = Vec::with_capacity(2);
    if settings.notify_admin {
        messages.push(EmailMessage {
            from: settings.from.clone(),
            to: settings.admin_email.clone(),
            cc: None,
            subject: admin_subject(submission),
            body: EmailBody::Text(admin_body(submission)),
        });
    }
    messages.push(EmailMessage {
        from: settings.from.clone(),
        to: submission.email.clone(),
        cc: settings.cc_admin.then(|| settings.admin_email.clone()),
        subject: acknowledgment_subject(submission),
        body: EmailBody::Html(acknowledgment_body(submission, &settings.owner)?),
    });
    Ok(messages)
}
