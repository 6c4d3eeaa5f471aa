use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

use contract_appraiser::apis::{ContractPriceSource, TypeIdLookup};
use contract_appraiser::app::ports::HttpClientPort;
use contract_appraiser::app::{AppraiseUseCase, ResolveUseCase};
use contract_appraiser::config::Config;
use contract_appraiser::infra::ReqwestHttp;
use contract_appraiser::logging;
use contract_appraiser::parser::SuffixTokenExtractor;
use contract_appraiser::report::format_isk_millions;

#[derive(Parser)]
#[command(name = "contract_appraiser")]
#[command(about = "Resolve EVE item TypeIDs and appraise them against contract prices")]
#[command(version)]
struct Cli {
    /// Config file (defaults to ./appraiser.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve item names from the input list to TypeIDs
    Resolve,
    /// Appraise the resolved items and write the report
    Appraise {
        /// Exit without waiting for Enter
        #[arg(long)]
        no_pause: bool,
    },
    /// Run resolve then appraise (default)
    Run {
        /// Exit without waiting for Enter
        #[arg(long)]
        no_pause: bool,
    },
}

fn wait_for_enter() {
    print!("Done! Press Enter to exit...");
    let _ = io::stdout().flush();
    let mut line = String::new();
    let _ = io::stdin().lock().read_line(&mut line);
}

async fn resolve(config: &Config, http: Arc<dyn HttpClientPort>) -> anyhow::Result<()> {
    let lookup = TypeIdLookup::new(http, &config.lookup.base_url)?;
    ResolveUseCase::new(lookup)
        .run(&config.files.input, &config.files.intermediate)
        .await
        .with_context(|| format!("resolving {}", config.files.input.display()))?;
    Ok(())
}

async fn appraise(config: &Config, http: Arc<dyn HttpClientPort>, no_pause: bool) -> anyhow::Result<()> {
    let prices = ContractPriceSource::new(http, Box::new(SuffixTokenExtractor::new()), &config.market)?;
    let appraisal = AppraiseUseCase::new(prices, config.market.delay())
        .run(&config.files.intermediate, &config.files.report)
        .await
        .with_context(|| format!("appraising {}", config.files.intermediate.display()))?;

    println!("\nTotal value: {}", format_isk_millions(appraisal.grand_total));
    println!("Report written to {}", config.files.report.display());

    if config.app.pause_on_exit && !no_pause {
        wait_for_enter();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let http: Arc<dyn HttpClientPort> = Arc::new(ReqwestHttp::new()?);

    let result = match cli.command.unwrap_or(Commands::Run { no_pause: false }) {
        Commands::Resolve => {
            info!("Running resolver");
            resolve(&config, http).await
        }
        Commands::Appraise { no_pause } => {
            info!("Running appraiser");
            appraise(&config, http, no_pause).await
        }
        Commands::Run { no_pause } => {
            info!("Running resolver and appraiser");
            async {
                resolve(&config, http.clone()).await?;
                appraise(&config, http, no_pause).await
            }
            .await
        }
    };

    if let Err(e) = &result {
        error!("Run failed: {:#}", e);
    }
    result
}
