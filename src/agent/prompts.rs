//! Prompt templates for the portfolio chatbot. Everything here is a pure
//! function of its inputs.

use crate::config::OwnerProfile;
use crate::models::ChatMode;

pub const SHORT_MARKER: &str = "Keep your replies short, casual, and friendly (around 20–30 words).";
pub const DETAILED_MARKER: &str = "Provide well-explained, structured, and detailed responses.";

pub fn short_template(owner_name: &str) -> String {
    format!(
        "You are a friendly AI chatbot integrated into {owner_name}'s personal portfolio website.\n\
         {SHORT_MARKER}"
    )
}

pub fn detailed_template(owner_name: &str) -> String {
    format!(
        "You are the AI assistant for {owner_name}'s portfolio website.\n\
         {DETAILED_MARKER}\n\
         Be professional, informative, and accurate."
    )
}

pub fn template_for(mode: ChatMode, owner_name: &str) -> String {
    match mode {
        ChatMode::Detailed => detailed_template(owner_name),
        ChatMode::Short => short_template(owner_name),
    }
}

/// Verbosity template followed by the identity document.
pub fn system_context(mode: ChatMode, owner_name: &str, developer_profile: &str) -> String {
    format!("{}\n\n{}", template_for(mode, owner_name), developer_profile.trim())
}

/// Full single-turn prompt: system context, then the user's message as the last turn.
pub fn build_prompt(system_context: &str, user_message: &str) -> String {
    format!("{system_context}\n\nUser: {user_message}")
}

/// Identity document used when no profile file is configured.
pub fn default_profile(owner: &OwnerProfile) -> String {
    let intro = match &owner.location {
        Some(location) => format!("- {} is a {} based in {location}.", owner.name, owner.title),
        None => format!("- {} is a {}.", owner.name, owner.title),
    };

    let mut links = Vec::new();
    if let Some(github) = &owner.github_url {
        links.push(format!("GitHub: {github}"));
    }
    if let Some(linkedin) = &owner.linkedin_url {
        links.push(format!("LinkedIn: {linkedin}"));
    }
    links.push(format!("Email: {}", owner.email));

    format!(
        "About the Developer:\n\
         {intro}\n\
         - Answer questions about their work, skills, and experience.\n\
         - If something is not covered here, say so instead of guessing.\n\
         - Format the output nicely.\n\
         \n\
         Links:\n\
         {}\n",
        links.join("\n")
    )
}
