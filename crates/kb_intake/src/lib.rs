//! Bug-report / general-inquiry intake conversation.
//!
//! [`Conversation`] is a pure, forward-only state machine: it records the
//! transcript and hands back a [`WebhookRequest`] whenever a step needs the
//! automation webhook. [`IntakeSession`] drives it against a [`Webhook`].

pub mod conversation;
pub mod options;
pub mod reply;
pub mod session;
pub mod webhook;

pub use conversation::{Conversation, IntakeKind, Message, QuickReply, Sender, Step, UserInfo};
pub use options::{BugType, Role};
pub use reply::{extract_link, BotReply};
pub use session::IntakeSession;
pub use webhook::{HttpWebhook, Webhook, WebhookRequest};
