use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Viewer,
    Subscriber,
    Filmmaker,
    Advertiser,
    Affiliate,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Viewer,
        Role::Subscriber,
        Role::Filmmaker,
        Role::Advertiser,
        Role::Affiliate,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Role::Viewer => "viewer",
            Role::Subscriber => "subscriber",
            Role::Filmmaker => "filmmaker",
            Role::Advertiser => "advertiser",
            Role::Affiliate => "affiliate",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Viewer => "Free user",
            Role::Subscriber => "Premium/VIP Subscriber",
            Role::Filmmaker => "Filmmaker",
            Role::Advertiser => "Advertiser",
            Role::Affiliate => "Affiliate",
        }
    }

    /// Accepts a key or a label, case-insensitively.
    pub fn lookup(choice: &str) -> Option<Role> {
        let choice = choice.trim();
        Self::ALL
            .into_iter()
            .find(|r| r.key().eq_ignore_ascii_case(choice) || r.label().eq_ignore_ascii_case(choice))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BugType {
    Website,
    App,
    ViewingExperience,
    Other,
}

impl BugType {
    pub const ALL: [BugType; 4] = [
        BugType::Website,
        BugType::App,
        BugType::ViewingExperience,
        BugType::Other,
    ];

    pub fn key(self) -> &'static str {
        match self {
            BugType::Website => "website",
            BugType::App => "app",
            BugType::ViewingExperience => "viewing_experience",
            BugType::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BugType::Website => "Website Bug",
            BugType::App => "App Bug",
            BugType::ViewingExperience => "Viewing Experience Bug",
            BugType::Other => "Other",
        }
    }

    pub fn lookup(choice: &str) -> Option<BugType> {
        let choice = choice.trim();
        Self::ALL
            .into_iter()
            .find(|b| b.key().eq_ignore_ascii_case(choice) || b.label().eq_ignore_ascii_case(choice))
    }
}
