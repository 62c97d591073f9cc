use std::sync::Arc;
use clap::{Args, Subcommand};
use kb_core::{Error, KnowledgeBaseStorage, Result};
use crate::scrapers::{self, CrawlConfig, Scraper, SolutionsCrawler};

#[derive(Args, Debug, Clone)]
pub struct ScraperArgs {
    #[command(subcommand)]
    pub command: ScraperCommands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ScraperCommands {
    /// Crawl a help centre and replace the knowledge base with what was found
    Crawl {
        /// Built-in help centre to crawl
        #[arg(default_value = "reveel")]
        source: String,
        /// Override the site root (e.g. a staging mirror)
        #[arg(long)]
        base_url: Option<String>,
        /// Override the path of the root folder page
        #[arg(long)]
        start_path: Option<String>,
        /// Folder pages fetched at once
        #[arg(long, default_value_t = 4)]
        concurrency: usize,
        /// Log and skip folder pages that fail to load
        #[arg(long)]
        skip_failed_pages: bool,
    },
    /// List available help centres
    List,
}

pub async fn handle_command(args: ScraperArgs, storage: Arc<dyn KnowledgeBaseStorage>) -> Result<()> {
    match args.command {
        ScraperCommands::Crawl {
            source,
            base_url,
            start_path,
            concurrency,
            skip_failed_pages,
        } => {
            let mut config = config_for(&source)?;
            if let Some(base_url) = base_url {
                config.base_url = base_url;
            }
            if let Some(start_path) = start_path {
                config.start_path = start_path;
            }
            config.concurrency = concurrency;
            config.skip_failed_pages = skip_failed_pages;

            let crawler = SolutionsCrawler::new(config);
            let count = crawl_into(&crawler, storage.as_ref()).await?;
            println!("Saved {} articles to {}", count, storage.location());
        }
        ScraperCommands::List => {
            println!("Available help centres:");
            for scraper in scrapers::get_scrapers() {
                println!("  {} ({})", scraper.cli_names().join(", "), scraper.source());
            }
        }
    }
    Ok(())
}

/// Runs a crawl and stores the result, returning the number of articles saved.
pub async fn crawl_into(scraper: &dyn Scraper, storage: &dyn KnowledgeBaseStorage) -> Result<usize> {
    let articles = scraper.crawl().await?;
    storage.save(&articles).await?;
    Ok(articles.len())
}

fn config_for(source: &str) -> Result<CrawlConfig> {
    match source.to_lowercase().as_str() {
        "reveel" => Ok(CrawlConfig::reveel()),
        other => Err(Error::Scraping(format!("Scraper not found: {}", other))),
    }
}
