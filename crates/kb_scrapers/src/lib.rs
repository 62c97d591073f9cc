pub mod scrapers;
pub mod cli;

pub use cli::{handle_command, ScraperArgs, ScraperCommands};
pub use scrapers::{get_scrapers, CrawlConfig, Scraper, SolutionsCrawler};

pub mod prelude {
    pub use super::scrapers::Scraper;
    pub use kb_core::{Article, Error, Result};
}
