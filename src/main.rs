use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use sports_tools::config::Config;
use sports_tools::feed::{DashboardClient, EspnClient, KeyRing, OddsApiClient};
use sports_tools::teams;
use sports_tools::tools::{ToolContext, ToolRegistry};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Sports odds, scores and betting-dashboard tools.
#[derive(Parser, Debug)]
#[command(name = "sports-tools", version)]
struct Cli {
    /// TOML config file; missing means built-in defaults
    #[arg(long, global = true, env = "SPORTS_TOOLS_CONFIG", default_value = "config.toml")]
    config: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every tool with its input schema (JSON)
    List,
    /// Run a tool and print its result (JSON)
    Call {
        tool: String,
        /// Tool arguments as a JSON object
        args: Option<String>,
    },
    /// Print the team reference table for nfl, nba or nhl
    Teams { league: String },
}

fn parse_tool_args(raw: Option<&str>) -> Result<Value> {
    match raw {
        Some(raw) => serde_json::from_str(raw)
            .with_context(|| format!("tool arguments are not valid JSON: {}", raw)),
        None => Ok(Value::Object(Default::default())),
    }
}

fn build_registry(config: &Config) -> Result<ToolRegistry> {
    let keys = Config::odds_api_keys();
    let odds = if keys.is_empty() {
        tracing::warn!("ODDS_API_KEY not set; odds tools will report not configured");
        None
    } else {
        let ring = KeyRing::new(&keys)?;
        Some(OddsApiClient::new(
            ring,
            &config.odds_api.base_url,
            config.odds_api.bookmaker_filter(),
            config.odds_api.timeout(),
        )?)
    };
    let espn = EspnClient::new(
        &config.espn.site_api,
        &config.espn.web_api,
        config.espn.timeout(),
    )?;
    let mut ctx = ToolContext::new(odds, espn);
    match Config::dashboard_api_key() {
        Some(key) => {
            let dashboard = DashboardClient::new(
                &key,
                &config.dashboard.base_url(),
                config.dashboard.timeout(),
            )?;
            ctx = ctx.with_dashboard(dashboard);
        }
        None => tracing::debug!("DASHBOARD_API_KEY not set; dashboard tools disabled"),
    }
    Ok(ToolRegistry::new(ctx))
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("sports_tools=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Load saved keys from .env (real env vars take precedence)
    Config::load_env_file();
    let config = Config::load_or_default(&cli.config)?;

    match cli.command {
        Command::Teams { league } => println!("{}", teams::reference_table(&league)),
        Command::List => {
            let registry = build_registry(&config)?;
            println!("{}", serde_json::to_string_pretty(&registry.descriptors())?);
        }
        Command::Call { tool, args } => {
            let args = parse_tool_args(args.as_deref())?;
            let registry = build_registry(&config)?;
            let result = registry.call(&tool, args).await;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }
    Ok(())
}
