use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use kb_core::{Article, Result};
use reqwest::Client;
use scraper::{Html, Selector};
use std::collections::HashSet;
use tracing::{debug, info, warn};

use super::utils;
use super::Scraper;

/// Where and how to crawl a "solutions" style help centre.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub name: String,
    pub base_url: String,
    pub start_path: String,
    pub folder_selector: String,
    pub article_selector: String,
    pub title_selector: String,
    /// Pages fetched at once within one BFS level
    pub concurrency: usize,
    /// Log and skip pages that fail to load instead of aborting the crawl
    pub skip_failed_pages: bool,
}

impl CrawlConfig {
    pub const REVEEL_BASE_URL: &'static str = "https://help.reveel.net";

    pub fn reveel() -> Self {
        Self {
            name: "Reveel Help Center".to_string(),
            base_url: Self::REVEEL_BASE_URL.to_string(),
            start_path: "/support/solutions".to_string(),
            folder_selector: "a[href^='/support/solutions/folders/']".to_string(),
            article_selector: "a[href^='/support/solutions/articles/']".to_string(),
            title_selector: ".line-clamp-2".to_string(),
            concurrency: 4,
            skip_failed_pages: false,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn start_url(&self) -> String {
        utils::absolute_url(&self.base_url, &self.start_path)
    }
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self::reveel()
    }
}

/// Links found on a single page, before deduplication.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PageLinks {
    pub folders: Vec<String>,
    pub articles: Vec<Article>,
}

struct Selectors {
    folder: Selector,
    article: Selector,
    title: Selector,
}

impl Selectors {
    fn new(config: &CrawlConfig) -> Result<Self> {
        Ok(Self {
            folder: utils::parse_selector(&config.folder_selector)?,
            article: utils::parse_selector(&config.article_selector)?,
            title: utils::parse_selector(&config.title_selector)?,
        })
    }
}

/// Breadth-first crawler over folder pages of a help centre.
#[derive(Debug, Clone)]
pub struct SolutionsCrawler {
    client: Client,
    config: CrawlConfig,
}

impl SolutionsCrawler {
    pub fn new(config: CrawlConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: CrawlConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    /// Only transport failures are errors; an error page is still parsed,
    /// usually yielding no links.
    async fn fetch_html(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("⚠️ {} answered {}", url, status);
        }
        Ok(response.text().await?)
    }

    /// Extracts folder links and titled article links from one page.
    pub fn parse_page(&self, html: &str) -> Result<PageLinks> {
        let selectors = Selectors::new(&self.config)?;
        Ok(parse_with(&selectors, &self.config.base_url, html))
    }

    async fn crawl_from(&self, start_url: String) -> Result<Vec<Article>> {
        // Fail on a bad selector before any request goes out.
        Selectors::new(&self.config)?;
        let mut seen_folders = HashSet::from([start_url.clone()]);
        let mut seen_articles = HashSet::new();
        let mut articles = Vec::new();
        let mut level = vec![start_url];
        let mut depth = 0usize;

        while !level.is_empty() {
            debug!("📂 Crawling {} folder page(s) at depth {}", level.len(), depth);

            // `buffered` keeps results in queue order, so discovery order is
            // the same as a one-page-at-a-time BFS.
            let pages: Vec<(String, Result<String>)> = stream::iter(level)
                .map(|url| async move {
                    let page = self.fetch_html(&url).await;
                    (url, page)
                })
                .buffered(self.config.concurrency.max(1))
                .collect()
                .await;

            let selectors = Selectors::new(&self.config)?;
            let mut next_level = Vec::new();
            for (url, page) in pages {
                let html = match page {
                    Ok(html) => html,
                    Err(e) if self.config.skip_failed_pages => {
                        warn!("⚠️ Skipping {}: {}", url, e);
                        continue;
                    }
                    Err(e) => return Err(e),
                };

                let links = parse_with(&selectors, &self.config.base_url, &html);
                debug!(
                    "{} -> {} folder link(s), {} article link(s)",
                    url,
                    links.folders.len(),
                    links.articles.len()
                );

                for folder in links.folders {
                    if seen_folders.insert(folder.clone()) {
                        next_level.push(folder);
                    }
                }
                for article in links.articles {
                    if seen_articles.insert(article.link.clone()) {
                        articles.push(article);
                    }
                }
            }

            level = next_level;
            depth += 1;
        }

        info!(
            "🦗 {}: visited {} folder page(s), found {} article(s)",
            self.config.name,
            seen_folders.len(),
            articles.len()
        );
        Ok(articles)
    }
}

fn parse_with(selectors: &Selectors, base_url: &str, html: &str) -> PageLinks {
    let document = Html::parse_document(html);
    let mut links = PageLinks::default();

    for link in document.select(&selectors.folder) {
        if let Some(href) = link.value().attr("href") {
            links.folders.push(utils::absolute_url(base_url, href));
        }
    }

    for link in document.select(&selectors.article) {
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        let mut title = utils::descendant_text(&link, &selectors.title);
        if title.is_empty() {
            title = utils::element_text(&link);
        }
        if !title.is_empty() {
            links.articles.push(Article::new(title, utils::absolute_url(base_url, href)));
        }
    }

    links
}

#[async_trait]
impl Scraper for SolutionsCrawler {
    fn source(&self) -> &str {
        &self.config.name
    }

    fn can_handle(&self, url: &str) -> bool {
        url.starts_with(self.config.base_url.trim_end_matches('/'))
    }

    fn cli_names(&self) -> Vec<&str> {
        vec!["reveel"]
    }

    async fn crawl(&self) -> Result<Vec<Article>> {
        let start_url = self.config.start_url();
        utils::parse_url(&start_url)?;
        info!("🦗 Crawling {} from {}", self.config.name, start_url);
        self.crawl_from(start_url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn page(body: &str) -> ResponseTemplate {
        ResponseTemplate::new(200)
            .insert_header("content-type", "text/html")
            .set_body_string(format!("<html><body>{}</body></html>", body))
    }

    async fn mount(server: &MockServer, route: &str, body: &str, hits: u64) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(page(body))
            .expect(hits)
            .mount(server)
            .await;
    }

    fn crawler_for(server: &MockServer) -> SolutionsCrawler {
        SolutionsCrawler::new(CrawlConfig::reveel().with_base_url(server.uri()))
    }

    #[test]
    fn test_parse_page() {
        let crawler = SolutionsCrawler::new(CrawlConfig::reveel());
        let html = r#"
            <a href="/support/solutions/folders/10">Account</a>
            <a href="/support/solutions/articles/1-reset">
                <div class="line-clamp-2"> How to reset your password </div>
                <span>Updated yesterday</span>
            </a>
            <a href="/support/solutions/articles/2-what">What is Reveel?</a>
            <a href="/support/solutions/articles/3-empty"><img src="x.png"></a>
            <a href="/support/tickets/new">Submit a ticket</a>
            <a>no href</a>
        "#;

        let links = crawler.parse_page(html).unwrap();
        assert_eq!(
            links.folders,
            vec!["https://help.reveel.net/support/solutions/folders/10"]
        );
        assert_eq!(
            links.articles,
            vec![
                Article::new(
                    "How to reset your password",
                    "https://help.reveel.net/support/solutions/articles/1-reset"
                ),
                Article::new(
                    "What is Reveel?",
                    "https://help.reveel.net/support/solutions/articles/2-what"
                ),
            ]
        );
    }

    #[test]
    fn test_can_handle() {
        let crawler = SolutionsCrawler::new(CrawlConfig::reveel());
        assert!(crawler.can_handle("https://help.reveel.net/support/solutions"));
        assert!(!crawler.can_handle("https://support.example.com/support/solutions"));
    }

    #[tokio::test]
    async fn test_crawl_is_breadth_first_and_deduplicated() {
        let server = MockServer::start().await;

        mount(
            &server,
            "/support/solutions",
            r#"
            <a href="/support/solutions/folders/1">Getting started</a>
            <a href="/support/solutions/folders/2">Billing</a>
            <a href="/support/solutions/articles/100"><p class="line-clamp-2">Root article</p></a>
            "#,
            1,
        )
        .await;
        // Answers after its sibling, so completion order differs from queue order.
        Mock::given(method("GET"))
            .and(path("/support/solutions/folders/1"))
            .respond_with(
                page(
                    r#"
                    <a href="/support/solutions">All</a>
                    <a href="/support/solutions/folders/2">Billing</a>
                    <a href="/support/solutions/folders/3">Deep</a>
                    <a href="/support/solutions/articles/101">What is Reveel?</a>
                    <a href="/support/solutions/articles/100">Root article again</a>
                    "#,
                )
                .set_delay(Duration::from_millis(300)),
            )
            .expect(1)
            .mount(&server)
            .await;
        mount(
            &server,
            "/support/solutions/folders/2",
            r#"
            <a href="/support/solutions/articles/201">Payment methods</a>
            <a href="/support/solutions/folders/1">Getting started</a>
            "#,
            1,
        )
        .await;
        mount(
            &server,
            "/support/solutions/folders/3",
            r#"<a href="/support/solutions/articles/301">Uploading in 4K</a>"#,
            1,
        )
        .await;

        let articles = crawler_for(&server).crawl().await.unwrap();
        let titles: Vec<_> = articles.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Root article", "What is Reveel?", "Payment methods", "Uploading in 4K"]
        );
        assert_eq!(
            articles[0].link,
            format!("{}/support/solutions/articles/100", server.uri())
        );
    }

    #[tokio::test]
    async fn test_crawl_parses_error_pages() {
        let server = MockServer::start().await;
        mount(
            &server,
            "/support/solutions",
            r#"
            <a href="/support/solutions/folders/9">Broken</a>
            <a href="/support/solutions/articles/1">Still here</a>
            "#,
            1,
        )
        .await;
        Mock::given(method("GET"))
            .and(path("/support/solutions/folders/9"))
            .respond_with(ResponseTemplate::new(404).set_body_string("<h1>Not found</h1>"))
            .expect(1)
            .mount(&server)
            .await;

        let articles = crawler_for(&server).crawl().await.unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "Still here");
    }

    #[tokio::test]
    async fn test_crawl_aborts_on_unreachable_site() {
        // Nothing listens on port 1.
        let config = CrawlConfig::reveel().with_base_url("http://127.0.0.1:1");
        let result = SolutionsCrawler::new(config).crawl().await;
        assert!(matches!(result, Err(kb_core::Error::Http(_))));
    }

    #[tokio::test]
    async fn test_crawl_can_skip_failed_pages() {
        let server = MockServer::start().await;
        mount(
            &server,
            "/support/solutions",
            r#"
            <a href="/support/solutions/folders/9">Slow</a>
            <a href="/support/solutions/articles/1">Still here</a>
            "#,
            1,
        )
        .await;
        Mock::given(method("GET"))
            .and(path("/support/solutions/folders/9"))
            .respond_with(page("").set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let client = Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .unwrap();
        let mut config = CrawlConfig::reveel().with_base_url(server.uri());

        let result = SolutionsCrawler::with_client(client.clone(), config.clone())
            .crawl()
            .await;
        assert!(matches!(result, Err(kb_core::Error::Http(_))));

        config.skip_failed_pages = true;
        let articles = SolutionsCrawler::with_client(client, config)
            .crawl()
            .await
            .unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "Still here");
    }
}
