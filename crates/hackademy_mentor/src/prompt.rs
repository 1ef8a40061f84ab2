//! Prompt text and fallback replies.

use crate::error::MentorError;
use crate::protocol::ReplyKind;

/// System instruction attached to chat requests.
pub const SYSTEM_INSTRUCTION: &str =
    "You are a friendly programming mentor helping beginners learn web development.";

/// Sampling temperature for chat replies.
pub const CHAT_TEMPERATURE: f32 = 0.7;

/// Context block sent ahead of the conversation.
pub fn chat_context(stage: &str, code: &str) -> String {
    format!(
        "You are the AI mentor (codename: Oracle) in a game called \"H5 Hacker Academy\".\n\
         The player is learning the basics of HTML5, Tailwind CSS and React.\n\
         \n\
         Current stage: {stage}\n\
         Player's current code:\n\
         ```tsx\n\
         {code}\n\
         ```\n\
         \n\
         Your duties:\n\
         1. Answer questions about the code as briefly as possible.\n\
         2. If the player is stuck, give a gentle hint, but never the full answer unless they explicitly ask for it.\n\
         3. Keep the tone encouraging with a touch of cyberpunk humor.\n\
         4. Explain concepts with simple metaphors.\n\
         \n\
         Reply in English."
    )
}

/// One-shot review of code that solved `mission`.
pub fn review_prompt(code: &str, mission: &str) -> String {
    format!(
        "Mission: {mission}\n\
         Code: {code}\n\
         \n\
         In 50 words or fewer, say whether this code completes the mission and point out one strength."
    )
}

/// Text shown instead of a reply that could not be produced.
pub fn placeholder(kind: ReplyKind, err: &MentorError) -> &'static str {
    match (kind, err) {
        (ReplyKind::Chat, MentorError::MissingApiKey) => {
            "Error: no API key detected. Set HACKADEMY_API_KEY in the environment."
        }
        (ReplyKind::Chat, MentorError::EmptyReply) => "System link unstable, please retry...",
        (ReplyKind::Chat, _) => {
            "Connection to the AI mentor was interrupted. Check the API key configuration."
        }
        (ReplyKind::Review, MentorError::MissingApiKey) => "API key not configured.",
        (ReplyKind::Review, MentorError::EmptyReply) => "Code analysis complete.",
        (ReplyKind::Review, _) => "Code analysis module offline.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompts_embed_their_inputs() {
        let context = chat_context("css-styling", "<button className=\"\">");
        assert!(context.contains("Current stage: css-styling"));
        assert!(context.contains("```tsx\n<button className=\"\">\n```"));

        let review = review_prompt("<h1>x</h1>", "Wrap it");
        assert!(review.starts_with("Mission: Wrap it\nCode: <h1>x</h1>"));
        assert!(review.contains("50 words"));
    }

    #[test]
    fn placeholders_differ_by_kind_and_cause() {
        let api = MentorError::Api {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(placeholder(ReplyKind::Review, &api), "Code analysis module offline.");
        assert_eq!(
            placeholder(ReplyKind::Review, &MentorError::EmptyReply),
            "Code analysis complete."
        );
        assert_ne!(
            placeholder(ReplyKind::Chat, &MentorError::MissingApiKey),
            placeholder(ReplyKind::Review, &MentorError::MissingApiKey)
        );
    }
}
