use kb_core::Result;
use tracing::warn;
use crate::conversation::{Conversation, Message};
use crate::webhook::Webhook;

/// Runs a [`Conversation`] against a live webhook.
pub struct IntakeSession<W: Webhook> {
    conversation: Conversation,
    webhook: W,
}

impl<W: Webhook> IntakeSession<W> {
    pub fn new(webhook: W) -> Self {
        Self {
            conversation: Conversation::new(),
            webhook,
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn messages(&self) -> &[Message] {
        self.conversation.messages()
    }

    pub fn choose(&mut self, choice: &str) -> Result<()> {
        self.conversation.choose(choice)
    }

    /// Sends one line of input, waiting for the webhook when the step calls it.
    pub async fn send(&mut self, input: &str) {
        let Some(request) = self.conversation.send(input) else {
            return;
        };
        let outcome = self.webhook.submit(&request).await;
        if let Err(e) = &outcome {
            warn!("Webhook call failed: {}", e);
        }
        self.conversation.complete(outcome);
    }

    pub fn reset(&mut self) {
        self.conversation.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::{Step, CHAT_FAILED};
    use crate::webhook::WebhookRequest;
    use async_trait::async_trait;
    use kb_core::Error;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingWebhook {
        reply: Option<String>,
        requests: Mutex<Vec<WebhookRequest>>,
    }

    #[async_trait]
    impl Webhook for RecordingWebhook {
        async fn submit(&self, request: &WebhookRequest) -> Result<String> {
            self.requests.lock().unwrap().push(request.clone());
            self.reply
                .clone()
                .ok_or_else(|| Error::Webhook("unreachable".to_string()))
        }
    }

    #[tokio::test]
    async fn test_session_forwards_chat() {
        let webhook = RecordingWebhook {
            reply: Some("\"Here is a blog matching your question: https://help.reveel.net/a/7\"".to_string()),
            ..Default::default()
        };
        let mut session = IntakeSession::new(webhook);
        session.choose("general_inquiry").unwrap();
        session.send("user@example.com").await;
        session.choose("viewer").unwrap();
        session.send("What is Reveel?").await;

        assert!(!session.conversation().is_loading());
        assert!(session
            .messages()
            .iter()
            .any(|m| m.link.as_deref() == Some("https://help.reveel.net/a/7")));

        let requests = session.webhook.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].get("user-role"), Some("viewer"));
    }

    #[tokio::test]
    async fn test_session_reports_failure() {
        let mut session = IntakeSession::new(RecordingWebhook::default());
        session.choose("General Inquiry").unwrap();
        session.send("user@example.com").await;
        session.choose("affiliate").unwrap();
        session.send("how do payouts work?").await;

        assert_eq!(session.messages().last().unwrap().text, CHAT_FAILED);
        assert_eq!(session.conversation().step(), Step::Chat);

        session.reset();
        assert_eq!(session.conversation().step(), Step::Initial);
    }
}
