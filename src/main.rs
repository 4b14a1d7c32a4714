use anyhow::{Context, Result};
use clap::Parser;
use nba_prop_odds::{
    presenter, ByName, OddsPipeline, Prompt, RunOutcome, Settings, StakeClient,
};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Look up NBA player prop odds for one upcoming game.
#[derive(Parser, Debug)]
#[command(name = "nba-prop-odds", version)]
struct Args {
    /// Game to look up, by display name. Prompts when omitted.
    #[arg(long)]
    fixture: Option<String>,

    /// Only list upcoming games.
    #[arg(long)]
    list: bool,

    /// Directory for the exported spreadsheet.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Skip writing the spreadsheet.
    #[arg(long)]
    no_export: bool,

    /// Print rows as JSON instead of a table.
    #[arg(long)]
    json: bool,

    /// Settings file (defaults to ./nba-odds.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
}

fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_deref()).context("Failed to load settings")?;
    if let Some(dir) = args.output_dir {
        settings.output_dir = dir;
    }

    init_logging(&settings.log_level);
    info!(endpoint = %settings.endpoint, tournament = %settings.tournament_slug, "Starting player odds lookup");

    let client = StakeClient::new(&settings).context("Failed to build HTTP client")?;
    let pipeline = OddsPipeline::new(client, &settings);

    if args.list {
        let fixtures = pipeline
            .fetch_fixtures()
            .await
            .context("Failed to fetch fixtures")?;
        if fixtures.is_empty() {
            println!("No upcoming games for '{}'.", settings.tournament_slug);
        } else {
            println!("{}", presenter::render_fixtures(&fixtures));
        }
        return Ok(());
    }

    let outcome = match args.fixture {
        Some(name) => pipeline.run(&ByName(name)).await,
        None => pipeline.run(&Prompt).await,
    }
    .context("Odds lookup failed")?;

    let report = match outcome {
        RunOutcome::NoFixtures { tournament_slug } => {
            println!("No upcoming games for '{}'.", tournament_slug);
            return Ok(());
        }
        RunOutcome::Completed(report) => report,
    };

    let presentation = pipeline.present(&report);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report.rows)?);
    } else {
        println!("{}", presentation.caption);
        println!("{}", presentation.table);
    }
    if let Some(notice) = presentation.notice {
        warn!("{}", notice);
        println!("{}", notice);
    }

    if !args.no_export {
        if let Some(err) = presentation.export_error {
            return Err(anyhow::Error::new(err).context("Failed to prepare export"));
        }
        if let Some(artifact) = presentation.artifact {
            let path = artifact
                .write_to(&settings.output_dir)
                .context("Failed to write spreadsheet")?;
            println!("Saved {} ({})", path.display(), artifact.mime_type);
        }
    }

    Ok(())
}
