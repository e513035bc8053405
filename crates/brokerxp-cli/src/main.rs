mod config;
mod dashboard;
mod display;

use std::path::PathBuf;

use anyhow::{Context, bail};
use brokerxp_core::{SkillType, estimate_actions, model::parse_timestamp, progress, rank};
use brokerxp_sync::ApiClient;
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use config::AppConfig;

#[derive(Parser)]
#[command(name = "brokerxp", version)]
#[command(about = "Skill levels, weekly goals and leaderboard for the broker pipeline")]
struct Cli {
    /// Path to configuration file (default: ./brokerxp.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// IANA timezone for week and day boundaries (overrides config file)
    #[arg(long, global = true, env = "BROKERXP_TIMEZONE")]
    timezone: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show level and progress for a cumulative XP value
    Level {
        /// Raw XP; negative or NaN readings count as 0
        #[arg(allow_negative_numbers = true)]
        xp: f64,
    },
    /// Estimate the actions needed to cover an XP gap
    Estimate {
        /// prospecting, followUp, consistency or marketKnowledge
        #[arg(value_parser = parse_skill)]
        skill: SkillType,
        xp_to_next: u64,
    },
    /// Show the Monday-aligned week containing an instant
    Week {
        /// RFC 3339 timestamp (default: now)
        at: Option<String>,
    },
    /// Fetch skills and activities from the backend and show this week's progress
    Dashboard(ApiArgs),
    /// Rank all brokers by total level
    Leaderboard(ApiArgs),
}

#[derive(Args)]
struct ApiArgs {
    /// Backend base URL (overrides config file)
    #[arg(long, env = "BROKERXP_API_URL")]
    api_url: Option<String>,

    /// Bearer token for the backend
    #[arg(long, env = "BROKERXP_API_TOKEN", hide_env_values = true)]
    token: Option<String>,
}

fn parse_skill(s: &str) -> Result<SkillType, String> {
    if let Some(skill) = SkillType::parse(s) {
        return Ok(skill);
    }
    match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
        "prospecting" => Ok(SkillType::Prospecting),
        "followup" => Ok(SkillType::FollowUp),
        "consistency" => Ok(SkillType::Consistency),
        "marketknowledge" => Ok(SkillType::MarketKnowledge),
        _ => Err(format!(
            "unknown skill '{s}' (expected prospecting, followUp, consistency or marketKnowledge)"
        )),
    }
}

fn api_client(config: &AppConfig) -> anyhow::Result<ApiClient> {
    let Some(base_url) = config.api.base_url.clone() else {
        bail!("no backend URL: pass --api-url, set BROKERXP_API_URL, or add [api] base_url");
    };
    let client = ApiClient::new(base_url);
    Ok(match &config.api.token {
        Some(token) => client.with_token(token.clone()),
        None => client,
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("warn,brokerxp=info,brokerxp_core=info,brokerxp_sync=info")
        }))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.override_timezone(cli.timezone);
    let tz = config.engine.validate().context("engine config")?;

    match cli.command {
        Command::Level { xp } => {
            let xp = brokerxp_core::sanitize_xp(xp);
            print!("{}", display::render_level(xp, &progress(xp)));
        }
        Command::Estimate { skill, xp_to_next } => {
            let estimate = estimate_actions(xp_to_next, skill);
            print!("{}", display::render_estimate(skill, xp_to_next, &estimate));
        }
        Command::Week { at } => {
            let ts = match at {
                Some(raw) => parse_timestamp(&raw)
                    .with_context(|| format!("not an RFC 3339 timestamp: {raw}"))?,
                None => Utc::now(),
            };
            let key = brokerxp_core::week_key(ts, tz);
            print!("{}", display::render_week(key, &config.engine.timezone));
        }
        Command::Dashboard(args) => {
            config.override_api(args.api_url, args.token);
            let client = api_client(&config)?;
            let dash = dashboard::build_dashboard(&client, &config.engine, Utc::now()).await?;
            print!("{}", display::render_dashboard(&dash));
        }
        Command::Leaderboard(args) => {
            config.override_api(args.api_url, args.token);
            let client = api_client(&config)?;
            let entries = client
                .fetch_leaderboard()
                .await
                .context("fetching leaderboard")?;
            print!("{}", display::render_leaderboard(&rank(entries)));
        }
    }

    Ok(())
}
