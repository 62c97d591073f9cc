use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref LINK: Regex = Regex::new(r"https?://[^\s]+").unwrap();
}

/// Returns the first http(s) link in `text`.
pub fn extract_link(text: &str) -> Option<&str> {
    LINK.find(text).map(|m| m.as_str())
}

/// A webhook reply split into its prose and the article link it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotReply {
    pub text: String,
    pub link: Option<String>,
}

impl BotReply {
    /// Strips JSON quoting from the raw body and pulls out the first link.
    pub fn parse(raw: &str) -> Self {
        let data = raw.replace('"', "");
        match extract_link(&data) {
            Some(link) => Self {
                text: data.replacen(link, "", 1).trim().to_string(),
                link: Some(link.to_string()),
            },
            None => Self { text: data, link: None },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_link() {
        assert_eq!(
            extract_link("see https://help.reveel.net/a/1 now"),
            Some("https://help.reveel.net/a/1")
        );
        assert_eq!(extract_link("http://x.y"), Some("http://x.y"));
        assert_eq!(extract_link("no links here"), None);
    }

    #[test]
    fn test_parse_with_link() {
        let reply = BotReply::parse(
            r#""Here is a blog matching your question: https://help.reveel.net/support/solutions/articles/7""#,
        );
        assert_eq!(reply.text, "Here is a blog matching your question:");
        assert_eq!(
            reply.link.as_deref(),
            Some("https://help.reveel.net/support/solutions/articles/7")
        );
    }

    #[test]
    fn test_parse_without_link() {
        let reply = BotReply::parse(r#""I can only answer questions""#);
        assert_eq!(reply.text, "I can only answer questions");
        assert_eq!(reply.link, None);
    }
}
