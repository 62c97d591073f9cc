use clap::Parser;
use kb_core::{numbered_titles, KnowledgeBaseStorage, Result};
use kb_inference::{Classifier, Config};
use kb_scrapers::ScraperArgs;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

mod chat;

#[derive(Parser, Debug)]
#[command(author, version, about = "Help-centre knowledge base, question classifier and intake chat", long_about = None)]
pub struct Cli {
    /// Knowledge base backend: json or memory
    #[arg(long, default_value = "json", global = true)]
    storage: String,
    /// Knowledge base file used by the json backend
    #[arg(long, default_value = kb_storage::DEFAULT_KB_PATH, env = "KB_PATH", global = true)]
    kb_path: PathBuf,
    #[arg(long, default_value = "openai", global = true, help = "Model to use for classification. Available models: openai (default), dummy")]
    model: String,
    /// Model name sent to the completion API
    #[arg(long, default_value = kb_inference::DEFAULT_MODEL_NAME, global = true)]
    model_name: String,
    /// Root of an OpenAI-compatible API
    #[arg(long, env = "OPENAI_BASE_URL", global = true)]
    model_url: Option<String>,
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Crawl a help centre into the knowledge base
    Scrape(ScraperArgs),
    /// Print the knowledge base as the classifier sees it
    List,
    /// Classify one question and print the JSON answer
    Ask {
        query: String,
    },
    /// Serve the question endpoint over HTTP
    Serve {
        #[arg(long, env = "KB_ADDR", default_value = "0.0.0.0:8888")]
        addr: SocketAddr,
    },
    /// Run the bug-report / inquiry intake conversation in the terminal
    Chat {
        #[arg(long, env = "INTAKE_WEBHOOK_URL")]
        webhook_url: String,
    },
}

impl Cli {
    fn classifier(&self) -> Result<Classifier> {
        let config = Config {
            api_key: self.api_key.clone(),
            model_name: Some(self.model_name.clone()),
            model_url: self.model_url.clone(),
        };
        let model = kb_inference::create_model(&self.model, config)?;
        info!("🧠 Inference model initialized successfully (using {})", model.name());
        Ok(Classifier::new(model))
    }
}

async fn ask(classifier: &Classifier, storage: &dyn KnowledgeBaseStorage, query: &str) -> Result<serde_json::Value> {
    if let Some(answer) = Classifier::screen(query) {
        return Ok(answer.to_json());
    }
    let articles = storage.load().await?;
    Ok(classifier.answer(query, &articles).await?.to_json())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    kb_core::logging::init_logging(cli.verbose);

    let storage: Arc<dyn KnowledgeBaseStorage> =
        kb_storage::create_storage(&cli.storage, Some(cli.kb_path.as_path()))?;
    info!("💾 Knowledge base at {} (using {})", storage.location(), cli.storage);

    match &cli.command {
        Commands::Scrape(args) => {
            kb_scrapers::handle_command(args.clone(), storage).await?;
        }
        Commands::List => {
            let articles = storage.load().await?;
            println!("{}", numbered_titles(&articles));
            println!("{} articles", articles.len());
        }
        Commands::Ask { query } => {
            let classifier = cli.classifier()?;
            let answer = ask(&classifier, storage.as_ref(), query).await?;
            println!("{}", answer);
        }
        Commands::Serve { addr } => {
            let state = kb_web::AppState {
                classifier: cli.classifier()?,
                storage,
            };
            kb_web::serve(*addr, state).await?;
        }
        Commands::Chat { webhook_url } => {
            let webhook = kb_intake::HttpWebhook::new(webhook_url)?;
            chat::run(webhook).await?;
        }
    }

    Ok(())
}
