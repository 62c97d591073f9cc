use kb_core::{Error, Result};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use crate::options::{BugType, Role};
use crate::reply::BotReply;
use crate::webhook::WebhookRequest;

lazy_static! {
    static ref EMAIL: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

pub const GREETING: &str = "Hi there! How can I help you today?";
pub const ASK_EMAIL: &str = "Please enter your email so we can get in touch if needed.";
pub const INVALID_EMAIL: &str = "Please enter a valid email address (e.g. user@example.com).";
pub const ASK_DEVICE: &str = "What device(s) are you facing this bug on? (e.g., iPhone 12, MacBook Pro)";
pub const ASK_ROLE: &str = "Great! To help you better, what kind of account do you have with us?";
pub const READY_TO_CHAT: &str = "All set! Feel free to type your questions in the box below.";
pub const ASK_BUG_TYPE: &str = "What type of bug are you experiencing?";
pub const ASK_OS_VERSION: &str = "Please provide your OS version.";
pub const ASK_APP_VERSION: &str = "Please provide your app version.";
pub const ASK_BROWSER: &str = "Please provide the name and version of the browser you were using.";
pub const ASK_DESCRIPTION: &str = "Please describe the bug in detail.";
pub const FOLLOW_UP: &str = "feel free to ask further questions";
pub const CHAT_FAILED: &str = "Sorry, there was an error getting a response.";
pub const REPORT_FAILED: &str = "Sorry, something went wrong while submitting your report.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Initial,
    Email,
    Role,
    Device,
    BugType,
    Browser,
    OsVersion,
    AppVersion,
    Description,
    Chat,
    Submitted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakeKind {
    BugReport,
    GeneralInquiry,
}

impl IntakeKind {
    pub const ALL: [IntakeKind; 2] = [IntakeKind::BugReport, IntakeKind::GeneralInquiry];

    pub fn key(self) -> &'static str {
        match self {
            IntakeKind::BugReport => "bug_report",
            IntakeKind::GeneralInquiry => "general_inquiry",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            IntakeKind::BugReport => "Report a bug",
            IntakeKind::GeneralInquiry => "General Inquiry",
        }
    }

    /// What the user "says" when picking this option.
    fn echo(self) -> &'static str {
        match self {
            IntakeKind::BugReport => "I would like to report a bug",
            IntakeKind::GeneralInquiry => "I have a few questions about reveel",
        }
    }

    pub fn lookup(choice: &str) -> Option<IntakeKind> {
        let choice = choice.trim();
        Self::ALL
            .into_iter()
            .find(|k| k.key().eq_ignore_ascii_case(choice) || k.label().eq_ignore_ascii_case(choice))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    Bot,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuickReply {
    pub key: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub quick_replies: Vec<QuickReply>,
}

impl Message {
    fn bot(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
            link: None,
            quick_replies: Vec::new(),
        }
    }

    fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            ..Self::bot(text)
        }
    }

    fn with_quick_replies(mut self, replies: Vec<QuickReply>) -> Self {
        self.quick_replies = replies;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserInfo {
    pub email: Option<String>,
    pub role: Option<Role>,
    pub device: Option<String>,
    pub bug_type: Option<BugType>,
    pub browser: Option<String>,
    pub os_version: Option<String>,
    pub app_version: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Chat,
    Report,
}

/// One intake dialogue, from greeting to submission.
#[derive(Debug, Clone)]
pub struct Conversation {
    step: Step,
    kind: Option<IntakeKind>,
    info: UserInfo,
    messages: Vec<Message>,
    pending: Option<Pending>,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    pub fn new() -> Self {
        let greeting = Message::bot(GREETING).with_quick_replies(
            IntakeKind::ALL
                .into_iter()
                .map(|k| QuickReply {
                    key: k.key(),
                    label: k.label(),
                })
                .collect(),
        );
        Self {
            step: Step::Initial,
            kind: None,
            info: UserInfo::default(),
            messages: vec![greeting],
            pending: None,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn kind(&self) -> Option<IntakeKind> {
        self.kind
    }

    pub fn info(&self) -> &UserInfo {
        &self.info
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Free text is accepted outside the pick-an-option steps and while idle.
    pub fn input_enabled(&self) -> bool {
        !self.is_loading() && !matches!(self.step, Step::Initial | Step::Role | Step::BugType)
    }

    /// Options currently on offer, if any.
    pub fn quick_replies(&self) -> &[QuickReply] {
        self.messages
            .iter()
            .rev()
            .find(|m| !m.quick_replies.is_empty())
            .map(|m| m.quick_replies.as_slice())
            .unwrap_or(&[])
    }

    /// Picks one of the offered quick replies, by key or label.
    pub fn choose(&mut self, choice: &str) -> Result<()> {
        if self.is_loading() {
            return Err(Error::Intake("still waiting for the last reply".to_string()));
        }
        match self.step {
            Step::Initial => {
                let kind = IntakeKind::lookup(choice).ok_or_else(|| unknown_option(choice))?;
                self.clear_quick_replies();
                self.kind = Some(kind);
                self.messages.push(Message::user(kind.echo()));
                self.messages.push(Message::bot(ASK_EMAIL));
                self.step = Step::Email;
            }
            Step::Role => {
                let role = Role::lookup(choice).ok_or_else(|| unknown_option(choice))?;
                self.clear_quick_replies();
                self.info.role = Some(role);
                self.messages.push(Message::user(role.label()));
                self.messages.push(Message::bot(READY_TO_CHAT));
                self.step = Step::Chat;
            }
            Step::BugType => {
                let bug_type = BugType::lookup(choice).ok_or_else(|| unknown_option(choice))?;
                self.clear_quick_replies();
                self.info.bug_type = Some(bug_type);
                self.messages.push(Message::user(bug_type.label()));
                let (next, prompt) = match bug_type {
                    BugType::App => (Step::OsVersion, ASK_OS_VERSION),
                    BugType::Website => (Step::Browser, ASK_BROWSER),
                    BugType::ViewingExperience | BugType::Other => (Step::Description, ASK_DESCRIPTION),
                };
                self.messages.push(Message::bot(prompt));
                self.step = next;
            }
            step => {
                return Err(Error::Intake(format!("no options to choose from at step {:?}", step)));
            }
        }
        Ok(())
    }

    /// Feeds one line of free text. Returns the webhook call the caller must
    /// make, after which [`Conversation::complete`] is due.
    pub fn send(&mut self, input: &str) -> Option<WebhookRequest> {
        let input = input.trim();
        if input.is_empty() || !self.input_enabled() {
            return None;
        }

        match self.step {
            Step::Email => {
                self.messages.push(Message::user(input));
                if !EMAIL.is_match(input) {
                    self.messages.push(Message::bot(INVALID_EMAIL));
                    return None;
                }
                self.info.email = Some(input.to_string());
                if self.kind == Some(IntakeKind::BugReport) {
                    self.messages.push(Message::bot(ASK_DEVICE));
                    self.step = Step::Device;
                } else {
                    let roles = Role::ALL
                        .into_iter()
                        .map(|r| QuickReply {
                            key: r.key(),
                            label: r.label(),
                        })
                        .collect();
                    self.messages.push(Message::bot(ASK_ROLE).with_quick_replies(roles));
                    self.step = Step::Role;
                }
                None
            }
            Step::Device => {
                self.info.device = Some(input.to_string());
                self.messages.push(Message::user(input));
                let bug_types = BugType::ALL
                    .into_iter()
                    .map(|b| QuickReply {
                        key: b.key(),
                        label: b.label(),
                    })
                    .collect();
                self.messages.push(Message::bot(ASK_BUG_TYPE).with_quick_replies(bug_types));
                self.step = Step::BugType;
                None
            }
            Step::Browser => {
                self.info.browser = Some(input.to_string());
                self.ask(input, ASK_DESCRIPTION, Step::Description);
                None
            }
            Step::OsVersion => {
                self.info.os_version = Some(input.to_string());
                self.ask(input, ASK_APP_VERSION, Step::AppVersion);
                None
            }
            Step::AppVersion => {
                self.info.app_version = Some(input.to_string());
                self.ask(input, ASK_DESCRIPTION, Step::Description);
                None
            }
            Step::Description => {
                self.info.description = Some(input.to_string());
                self.messages.push(Message::user(input));
                self.step = Step::Submitted;
                self.pending = Some(Pending::Report);
                Some(self.report_request())
            }
            Step::Chat => {
                self.messages.push(Message::user(input));
                self.pending = Some(Pending::Chat);
                Some(self.chat_request(input))
            }
            Step::Initial | Step::Role | Step::BugType | Step::Submitted => None,
        }
    }

    /// Records the outcome of the webhook call requested by [`Conversation::send`].
    pub fn complete(&mut self, outcome: Result<String>) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        match (pending, outcome) {
            (Pending::Chat, Ok(raw)) => {
                let reply = BotReply::parse(&raw);
                let has_link = reply.link.is_some();
                self.messages.push(Message {
                    link: reply.link,
                    ..Message::bot(reply.text)
                });
                if has_link {
                    self.messages.push(Message::bot(FOLLOW_UP));
                }
            }
            (Pending::Chat, Err(_)) => self.messages.push(Message::bot(CHAT_FAILED)),
            (Pending::Report, Ok(raw)) => self.messages.push(Message::bot(raw)),
            (Pending::Report, Err(_)) => self.messages.push(Message::bot(REPORT_FAILED)),
        }
    }

    /// Drops everything and starts over at the greeting.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn ask(&mut self, input: &str, prompt: &str, next: Step) {
        self.messages.push(Message::user(input));
        self.messages.push(Message::bot(prompt));
        self.step = next;
    }

    fn clear_quick_replies(&mut self) {
        for message in &mut self.messages {
            message.quick_replies.clear();
        }
    }

    fn email(&self) -> &str {
        self.info.email.as_deref().unwrap_or_default()
    }

    fn chat_request(&self, input: &str) -> WebhookRequest {
        let bug_report = self.kind == Some(IntakeKind::BugReport);
        WebhookRequest::new()
            .field("response", input)
            .field("email", self.email())
            .field("bug-report", bug_report.to_string())
            .field("user-role", self.info.role.map(Role::key).unwrap_or_default())
    }

    fn report_request(&self) -> WebhookRequest {
        let info = &self.info;
        WebhookRequest::new()
            .field("response", info.description.as_deref().unwrap_or_default())
            .field("email", self.email())
            .field("bug-report", "true")
            .optional_field("device", info.device.as_deref())
            .optional_field("bug-type", info.bug_type.map(BugType::key))
            .optional_field("browser", info.browser.as_deref())
            .optional_field("os-version", info.os_version.as_deref())
            .optional_field("app-version", info.app_version.as_deref())
    }
}

fn unknown_option(choice: &str) -> Error {
    Error::Intake(format!("unknown option: {}", choice))
}
