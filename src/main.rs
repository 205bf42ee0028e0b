use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use medinsight::config::Config;
use medinsight::i18n::{Locale, Strings};
use medinsight::models::Article;
use medinsight::search::{MedInsightClient, SearchController, SearchForm, SearchPhase};
use medinsight::utils::{init_logger, LogTarget};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

/// MedInsight - search biomedical literature and read AI-generated summaries
#[derive(Parser, Debug)]
#[command(name = "medinsight")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Search biomedical literature and read AI-generated summaries", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (-v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Backend origin, overrides the configured one
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Interface language
    #[arg(long, value_enum, global = true)]
    locale: Option<Locale>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Output format for search results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
enum OutputFormat {
    /// Human-readable cards
    #[default]
    Plain,
    /// The article list as returned by the backend
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive terminal UI (default)
    Tui,

    /// Run one search and print the analyzed articles
    #[command(alias = "s")]
    Search {
        /// Search keyword, e.g. "diabetic retinopathy treatment"
        keyword: String,

        /// Number of articles to analyze (1-50)
        #[arg(short = 'n', long, value_parser = clap::value_parser!(u32).range(1..=50))]
        count: Option<u32>,

        /// Only articles from the last N years (1-20)
        #[arg(short = 'y', long, value_parser = clap::value_parser!(u32).range(1..=20))]
        years: Option<u32>,

        /// Output format
        #[arg(long, short, value_enum, default_value_t = OutputFormat::Plain)]
        output: OutputFormat,
    },

    /// Check that the backend is reachable
    Health,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(base_url) = cli.base_url {
        config = config.with_base_url(base_url)?;
    }
    if let Some(locale) = cli.locale {
        config.ui.locale = locale;
    }

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            let log_dir = config.log_directory();
            let _guard = init_logger(&config.logging.filter, cli.verbose, LogTarget::File(&log_dir))?;
            info!(log_dir = %log_dir.display(), "Logging to file");

            medinsight::tui::run(config).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Search {
            keyword,
            count,
            years,
            output,
        } => {
            init_logger(&config.logging.filter, cli.verbose, LogTarget::Stderr)?;
            run_search(&config, keyword, count, years, output).await
        }
        Commands::Health => {
            init_logger(&config.logging.filter, cli.verbose, LogTarget::Stderr)?;
            let client = MedInsightClient::from_config(&config.api)?;
            match client.health().await {
                Ok(()) => {
                    println!("{} is healthy", client.base_url());
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    error!(base_url = client.base_url(), error = %e, "Health check failed");
                    eprintln!("{} is unreachable: {}", client.base_url(), e);
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}

async fn run_search(
    config: &Config,
    keyword: String,
    count: Option<u32>,
    years: Option<u32>,
    output: OutputFormat,
) -> Result<ExitCode> {
    let strings = config.ui.locale.strings();

    let mut form = SearchForm::new(count.unwrap_or(config.search.article_count));
    form.set_keyword(keyword);
    form.set_years_text(years.map(|y| y.to_string()).unwrap_or_default());
    let request = form
        .to_request()
        .map_err(|e| anyhow::anyhow!(strings.form_error(&e)))?;

    let client = MedInsightClient::from_config(&config.api)?;
    let mut controller = SearchController::new(Arc::new(client));
    let state = controller.search(request).await;

    match state.phase() {
        SearchPhase::Loaded => {
            match output {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(state.articles())?);
                }
                OutputFormat::Plain => print_plain(state.articles(), strings),
            }
            Ok(ExitCode::SUCCESS)
        }
        _ => {
            let message = state
                .error_message(strings.fallback_error)
                .unwrap_or(strings.fallback_error);
            eprintln!("{} {}", strings.error_heading, message);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn print_plain(articles: &[Article], strings: &Strings) {
    if articles.is_empty() {
        println!("{}", strings.no_results);
        return;
    }

    println!("{}\n", strings.results_banner(articles.len()));
    for (index, article) in articles.iter().enumerate() {
        let or_unknown = |value: &str| {
            if value.trim().is_empty() {
                strings.unknown.to_string()
            } else {
                value.to_string()
            }
        };

        println!("{}. {}", index + 1, or_unknown(article.display_title()));
        if let Some(original) = article.original_title() {
            println!("   {}", original);
        }
        println!("   {}: {}", strings.authors, or_unknown(&article.authors.join(", ")));
        println!("   {}: {}", strings.published, or_unknown(&article.publication_date));
        if let Some(doi) = article.doi() {
            println!("   {}: {}", strings.doi, doi);
        }
        println!("   {}: {} {}", strings.identifier, article.pmid, article.pubmed_url);
        println!("\n   {}:\n   {}", strings.summary, or_unknown(&article.summary_tr));
        if !article.key_takeaways_tr.is_empty() {
            println!("\n   {}:", strings.key_takeaways);
            for takeaway in &article.key_takeaways_tr {
                println!("   • {}", takeaway);
            }
        }
        if !article.abstract_tr.trim().is_empty() {
            println!("\n   {}", article.abstract_tr);
        }
        println!();
    }
}
