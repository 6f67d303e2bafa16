use secrecy::SecretString;

use crate::agent::prompts;
use crate::errors::ConfigError;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_RESEND_BASE_URL: &str = "https://api.resend.com";
const DEFAULT_FROM: &str = "Portfolio <onboarding@resend.dev>";

/// Who the site belongs to. Feeds the email signature and the chat prompts.
#[derive(Debug, Clone)]
pub struct OwnerProfile {
    pub name: String,
    pub title: String,
    pub location: Option<String>,
    pub email: String,
    pub github_url: Option<String>,
    pub linkedin_url: Option<String>,
}

#[derive(Debug)]
pub struct MailSettings {
    pub api_key: SecretString,
    pub base_url: String,
    pub from: String,
    pub admin_email: String,
    pub notify_admin: bool,
    pub cc_admin: bool,
    pub owner: OwnerProfile,
}

#[derive(Debug)]
pub struct ChatSettings {
    pub api_key: SecretString,
    pub base_url: String,
    pub model: String,
    pub owner_name: String,
    /// Identity document appended to every system prompt.
    pub developer_profile: String,
}

/// Immutable process configuration, built once at startup.
#[derive(Debug)]
pub struct AppConfig {
    pub port: u16,
    pub mail: MailSettings,
    pub chat: ChatSettings,
    missing: Vec<&'static str>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut missing = Vec::new();
        let mut secret = |key: &'static str| match get(key) {
            Some(value) => SecretString::from(value),
            None => {
                missing.push(key);
                SecretString::from(String::new())
            }
        };

        let gemini_key = secret("GEMINI_API_KEY");
        let resend_key = secret("RESEND_API_KEY");

        let admin_email = get("CONTACT_ADMIN_EMAIL").unwrap_or_else(|| {
            missing.push("CONTACT_ADMIN_EMAIL");
            String::new()
        });

        let port = get("PORT").and_then(|p| p.parse().ok()).unwrap_or(DEFAULT_PORT);

        let owner = OwnerProfile {
            name: get("OWNER_NAME").unwrap_or_else(|| "the site owner".to_string()),
            title: get("OWNER_TITLE").unwrap_or_else(|| "Full Stack Developer".to_string()),
            location: get("OWNER_LOCATION"),
            email: get("OWNER_EMAIL").unwrap_or_else(|| admin_email.clone()),
            github_url: get("OWNER_GITHUB_URL"),
            linkedin_url: get("OWNER_LINKEDIN_URL"),
        };

        let developer_profile = match get("DEVELOPER_PROFILE_PATH") {
            Some(path) => std::fs::read_to_string(&path)
                .map_err(|source| ConfigError::ProfileUnreadable { path, source })?,
            None => prompts::default_profile(&owner),
        };

        Ok(Self {
            port,
            mail: MailSettings {
                api_key: resend_key,
                base_url: get("RESEND_BASE_URL").unwrap_or_else(|| DEFAULT_RESEND_BASE_URL.to_string()),
                from: get("CONTACT_FROM").unwrap_or_else(|| DEFAULT_FROM.to_string()),
                admin_email,
                notify_admin: get("CONTACT_NOTIFY_ADMIN").map_or(true, |v| parse_flag(&v)),
                cc_admin: get("CONTACT_CC_ADMIN").map_or(false, |v| parse_flag(&v)),
                owner: owner.clone(),
            },
            chat: ChatSettings {
                api_key: gemini_key,
                base_url: get("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
                model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
                owner_name: owner.name,
                developer_profile,
            },
            missing,
        })
    }

    /// Required keys that were absent from the environment.
    pub fn missing_keys(&self) -> &[&'static str] {
        &self.missing
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
