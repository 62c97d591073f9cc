use async_trait::async_trait;
use kb_core::{Article, Result};

pub mod solutions;

pub use solutions::{CrawlConfig, SolutionsCrawler};

#[async_trait]
pub trait Scraper: Send + Sync {
    /// Returns the name of the help centre
    fn source(&self) -> &str;

    /// Returns true if this scraper can handle the given URL
    fn can_handle(&self, url: &str) -> bool;

    /// Walks the help centre and returns every article found, in discovery order
    async fn crawl(&self) -> Result<Vec<Article>>;

    /// Returns a list of CLI shorthand names for this scraper
    fn cli_names(&self) -> Vec<&str> {
        vec![]
    }
}

/// Returns every built-in help-centre scraper
pub fn get_scrapers() -> Vec<Box<dyn Scraper>> {
    vec![Box::new(SolutionsCrawler::new(CrawlConfig::reveel()))]
}

/// Common utilities for scrapers
pub(crate) mod utils {
    use kb_core::{Error, Result};
    use scraper::{ElementRef, Selector};
    use url::Url;

    pub fn parse_url(url: &str) -> Result<Url> {
        Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{}: {}", url, e)))
    }

    pub fn parse_selector(selector: &str) -> Result<Selector> {
        Selector::parse(selector)
            .map_err(|e| Error::Scraping(format!("Invalid selector {}: {}", selector, e)))
    }

    /// Joins a site-relative href onto `base_url`; absolute hrefs pass through.
    pub fn absolute_url(base_url: &str, href: &str) -> String {
        if href.starts_with("http") {
            href.to_string()
        } else {
            format!("{}{}", base_url.trim_end_matches('/'), href)
        }
    }

    pub fn element_text(element: &ElementRef<'_>) -> String {
        element.text().collect::<String>().trim().to_string()
    }

    /// Concatenated text of every descendant matching `selector`, trimmed
    pub fn descendant_text(element: &ElementRef<'_>, selector: &Selector) -> String {
        element
            .select(selector)
            .map(|el| el.text().collect::<String>())
            .collect::<String>()
            .trim()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::utils;
    use scraper::Html;

    #[test]
    fn test_parse_url() {
        assert!(utils::parse_url("https://example.com").is_ok());
        assert!(utils::parse_url("invalid-url").is_err());
    }

    #[test]
    fn test_absolute_url() {
        assert_eq!(
            utils::absolute_url("https://help.reveel.net", "/support/solutions/articles/1"),
            "https://help.reveel.net/support/solutions/articles/1"
        );
        assert_eq!(
            utils::absolute_url("https://help.reveel.net/", "/support/solutions/articles/1"),
            "https://help.reveel.net/support/solutions/articles/1"
        );
        assert_eq!(
            utils::absolute_url("https://help.reveel.net", "https://other.net/a"),
            "https://other.net/a"
        );
    }

    #[test]
    fn test_descendant_text() {
        let html = Html::parse_fragment(
            r#"<a href="/x"> <span class="line-clamp-2"> Title </span><span>meta</span></a>"#,
        );
        let anchor = utils::parse_selector("a").unwrap();
        let clamp = utils::parse_selector(".line-clamp-2").unwrap();
        let link = html.select(&anchor).next().unwrap();
        assert_eq!(utils::descendant_text(&link, &clamp), "Title");
        assert_eq!(utils::element_text(&link), "Title meta");
    }

    #[test]
    fn test_invalid_selector() {
        assert!(utils::parse_selector("a[href^=").is_err());
    }

    #[test]
    fn test_get_scrapers() {
        let scrapers = get_scrapers();
        assert!(!scrapers.is_empty());
        assert!(scrapers.iter().any(|s| s.cli_names().contains(&"reveel")));
        assert!(scrapers.iter().any(|s| s.can_handle("https://help.reveel.net/support/solutions")));
    }
}
