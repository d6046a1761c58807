//! Chat surfaces and their transcripts
//!
//! A session owns two independent surfaces: the report chat, which injects
//! the serialized report as a system message on every turn, and the general
//! chat, which forwards the transcript alone. A provider failure never
//! escapes a turn; it is recorded as an assistant message instead.

use crate::prompts::{
    Suggestion, GENERAL_GREETING, GENERAL_SUGGESTIONS, REPORT_GREETING, REPORT_SUGGESTIONS,
};
use crate::providers::{Message, Provider, Role};

use chrono::{DateTime, Utc};
use std::fmt;

/// Prefix of the assistant message recorded when a completion fails
pub const ERROR_REPLY_PREFIX: &str = "Error generating response:";

/// One entry of a chat transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// Who sent the message
    pub role: Role,
    /// Message text
    pub text: String,
    /// When the message was appended
    pub sent_at: DateTime<Utc>,
    failed: bool,
}

impl ChatMessage {
    fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            sent_at: Utc::now(),
            failed: false,
        }
    }

    fn failure(error: &anyhow::Error) -> Self {
        Self {
            failed: true,
            ..Self::new(Role::Assistant, format!("{} {}", ERROR_REPLY_PREFIX, error))
        }
    }

    /// Returns true if this message stands in for a failed turn
    pub fn is_error(&self) -> bool {
        self.failed
    }
}

/// Which chat surface a transcript belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    /// Answers from the consolidated report
    Report,
    /// General purpose assistant
    General,
}

impl fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Report => write!(f, "report"),
            Self::General => write!(f, "general"),
        }
    }
}

/// Turn-taking state of a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    /// Ready for user input
    Idle,
    /// A user message was appended and the provider has not answered yet
    AwaitingReply,
}

/// An ordered, append-only conversation with one completion provider
///
/// # Examples
///
/// ```
/// use societyreport::chat::{ChatSurface, SurfaceKind, TurnState};
///
/// let surface = ChatSurface::general();
/// assert_eq!(surface.kind(), SurfaceKind::General);
/// assert_eq!(surface.state(), TurnState::Idle);
/// assert_eq!(surface.transcript().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ChatSurface {
    kind: SurfaceKind,
    transcript: Vec<ChatMessage>,
    state: TurnState,
}

impl ChatSurface {
    fn with_greeting(kind: SurfaceKind, greeting: &str) -> Self {
        Self {
            kind,
            transcript: vec![ChatMessage::new(Role::Assistant, greeting)],
            state: TurnState::Idle,
        }
    }

    /// Creates the report chat, opened with its greeting
    pub fn report() -> Self {
        Self::with_greeting(SurfaceKind::Report, REPORT_GREETING)
    }

    /// Creates the general chat, opened with its greeting
    pub fn general() -> Self {
        Self::with_greeting(SurfaceKind::General, GENERAL_GREETING)
    }

    /// Surface kind
    pub fn kind(&self) -> SurfaceKind {
        self.kind
    }

    /// Messages in send order, greeting first
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Current turn state
    pub fn state(&self) -> TurnState {
        self.state
    }

    /// Most recent message
    pub fn last(&self) -> Option<&ChatMessage> {
        self.transcript.last()
    }

    /// Suggested prompts for this surface
    pub fn suggestions(&self) -> &'static [Suggestion] {
        match self.kind {
            SurfaceKind::Report => REPORT_SUGGESTIONS,
            SurfaceKind::General => GENERAL_SUGGESTIONS,
        }
    }

    /// Builds the provider request for the current transcript
    ///
    /// A system message carrying `system_prompt` comes first when given.
    pub fn request_messages(&self, system_prompt: Option<&str>) -> Vec<Message> {
        let mut messages = Vec::with_capacity(self.transcript.len() + 1);
        if let Some(prompt) = system_prompt {
            messages.push(Message::system(prompt));
        }
        messages.extend(self.transcript.iter().map(|m| Message {
            role: m.role,
            content: m.text.clone(),
        }));
        messages
    }

    /// Runs one turn: appends the user text, asks the provider, appends the reply
    ///
    /// Blank input is ignored and returns `None`. Otherwise the returned
    /// message is the appended assistant reply, which on provider failure
    /// carries the error description.
    ///
    /// # Arguments
    ///
    /// * `provider` - Completion backend
    /// * `text` - User input
    /// * `system_prompt` - Optional instructions placed ahead of the transcript
    pub async fn submit(
        &mut self,
        provider: &dyn Provider,
        text: &str,
        system_prompt: Option<&str>,
    ) -> Option<&ChatMessage> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        self.transcript.push(ChatMessage::new(Role::User, text));
        self.state = TurnState::AwaitingReply;

        let messages = self.request_messages(system_prompt);
        tracing::debug!(
            "Submitting {} chat turn to {} ({} messages)",
            self.kind,
            provider.name(),
            messages.len()
        );

        let reply = match provider.complete(&messages).await {
            Ok(response) => {
                if let Some(usage) = response.usage {
                    tracing::debug!("Token usage: {} total", usage.total_tokens);
                }
                ChatMessage::new(Role::Assistant, response.message.content)
            }
            Err(e) => {
                tracing::warn!("{} chat turn failed: {}", self.kind, e);
                ChatMessage::failure(&e)
            }
        };

        self.transcript.push(reply);
        self.state = TurnState::Idle;
        self.transcript.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Result, SocietyReportError};
    use crate::providers::CompletionResponse;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingProvider {
        reply: Option<String>,
        seen: Mutex<Vec<Vec<Message>>>,
    }

    impl RecordingProvider {
        fn replying(text: &str) -> Self {
            Self {
                reply: Some(text.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                reply: None,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Provider for RecordingProvider {
        fn name(&self) -> &str {
            "recording"
        }

        fn model(&self) -> String {
            "test".to_string()
        }

        async fn complete(&self, messages: &[Message]) -> Result<CompletionResponse> {
            self.seen.lock().unwrap().push(messages.to_vec());
            match &self.reply {
                Some(text) => Ok(CompletionResponse::new(Message::assistant(text.clone()))),
                None => Err(SocietyReportError::Provider("service unavailable".into()).into()),
            }
        }
    }

    #[test]
    fn test_surfaces_open_with_greeting() {
        let report = ChatSurface::report();
        assert_eq!(report.transcript()[0].text, REPORT_GREETING);
        assert_eq!(report.transcript()[0].role, Role::Assistant);
        assert_eq!(ChatSurface::general().transcript()[0].text, GENERAL_GREETING);
    }

    #[test]
    fn test_suggestions_follow_surface_kind() {
        assert_eq!(ChatSurface::report().suggestions().len(), 3);
        assert_eq!(ChatSurface::general().suggestions().len(), 6);
    }

    #[tokio::test]
    async fn test_submit_appends_user_and_reply() {
        let provider = RecordingProvider::replying("Four societies.");
        let mut chat = ChatSurface::general();

        let reply = chat.submit(&provider, "How many?", None).await.unwrap();
        assert_eq!(reply.text, "Four societies.");

        let transcript = chat.transcript();
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[1].role, Role::User);
        assert_eq!(transcript[1].text, "How many?");
        assert_eq!(chat.state(), TurnState::Idle);
    }

    #[tokio::test]
    async fn test_submit_prefixes_system_prompt() {
        let provider = RecordingProvider::replying("ok");
        let mut chat = ChatSurface::report();
        chat.submit(&provider, "question", Some("context here")).await;

        let seen = provider.seen.lock().unwrap();
        let request = &seen[0];
        assert_eq!(request[0].role, Role::System);
        assert_eq!(request[0].content, "context here");
        assert_eq!(request.last().unwrap().content, "question");
    }

    #[tokio::test]
    async fn test_submit_sends_full_transcript() {
        let provider = RecordingProvider::replying("ok");
        let mut chat = ChatSurface::general();
        chat.submit(&provider, "first", None).await;
        chat.submit(&provider, "second", None).await;

        let seen = provider.seen.lock().unwrap();
        // greeting, first, reply, second
        assert_eq!(seen[1].len(), 4);
    }

    #[tokio::test]
    async fn test_failed_turn_becomes_error_message() {
        let provider = RecordingProvider::failing();
        let mut chat = ChatSurface::report();

        let reply = chat.submit(&provider, "anything", Some("ctx")).await.unwrap();
        assert!(reply.is_error());
        assert!(reply.text.contains("service unavailable"));

        let last = chat.last().unwrap();
        assert_eq!(last.role, Role::Assistant);
        assert!(last.text.starts_with(ERROR_REPLY_PREFIX));
        assert_eq!(chat.state(), TurnState::Idle);
    }

    #[tokio::test]
    async fn test_reply_quoting_error_prefix_is_not_a_failure() {
        let text = format!("{} is what the app prints when the model is down.", ERROR_REPLY_PREFIX);
        let provider = RecordingProvider::replying(&text);
        let mut chat = ChatSurface::general();

        let reply = chat.submit(&provider, "What does a failure look like?", None).await.unwrap();
        assert_eq!(reply.text, text);
        assert!(!reply.is_error());
    }

    #[test]
    fn test_greeting_and_user_messages_are_not_failures() {
        let chat = ChatSurface::report();
        assert!(!chat.transcript()[0].is_error());
        assert!(!ChatMessage::new(Role::User, ERROR_REPLY_PREFIX).is_error());
    }

    #[tokio::test]
    async fn test_blank_input_is_ignored() {
        let provider = RecordingProvider::replying("ok");
        let mut chat = ChatSurface::general();
        assert!(chat.submit(&provider, "   ", None).await.is_none());
        assert_eq!(chat.transcript().len(), 1);
        assert!(provider.seen.lock().unwrap().is_empty());
    }
}
