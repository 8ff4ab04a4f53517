//! Climate Planner CLI
//!
//! Runs the planning workflows against a backend and prints the resulting
//! domain objects as JSON on stdout. Logs go to stderr.
//!
//! Usage:
//!   climate-planner assess --location "Miami, FL"
//!   climate-planner plan --location "Miami, FL"
//!   climate-planner footprint --category transportation --activity car_gasoline --amount 120
//!   climate-planner predict --lat 25.76 --lon -80.19 --years 10

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use climate_model::FootprintActivity;
use planner_api::{ClientConfig, PlannerClient, Session};
use serde::Serialize;
use session_store::SessionStore;
use std::io::{self, Write};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "climate-planner",
    about = "Climate risk assessment, action planning and carbon tracking"
)]
struct Args {
    /// Backend base URL (overrides CLIMATE_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// User id for footprint calls; a fresh one is generated when absent
    #[arg(long, global = true)]
    user_id: Option<String>,

    /// Also print the session store (current values and history) after the command
    #[arg(long, global = true)]
    show_session: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Assess climate risk for a location
    Assess {
        #[arg(short, long)]
        location: String,
    },
    /// Assess a location, then generate an action plan for it
    Plan {
        #[arg(short, long)]
        location: String,
    },
    /// Log one activity and calculate its emissions
    Footprint {
        #[arg(short, long)]
        category: String,
        #[arg(short, long)]
        activity: String,
        #[arg(long)]
        amount: f64,
        #[arg(short, long)]
        unit: Option<String>,
    },
    /// Emission totals for this session's user
    Summary,
    /// Known footprint categories and activities
    Categories,
    /// Forecast climate risk for a coordinate
    Predict {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        #[arg(short, long, default_value_t = 10)]
        years: u32,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PlanOutput<'a> {
    assessment: &'a climate_model::RiskAssessment,
    action_plan: &'a climate_model::ActionPlan,
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "climate_planner=debug,planner_api=debug,climate_model=debug"
    } else {
        "climate_planner=info,planner_api=info"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut config = ClientConfig::from_env().context("reading client configuration")?;
    if let Some(url) = args.api_url {
        config.base_url = url;
    }
    info!(base_url = %config.base_url, "climate planner starting");
    debug!(retry = ?config.retry, "retry policy");

    let client = PlannerClient::new(config)?;
    let mut session = Session::new(client);
    if let Some(user_id) = args.user_id {
        session = session.with_store(SessionStore::with_user_id(user_id));
    }

    match args.command {
        Command::Assess { location } => {
            let assessment = session.assess(&location).await?;
            print_json(&assessment)?;
        }
        Command::Plan { location } => {
            let assessment = session.assess(&location).await?;
            let action_plan = session.generate_action_plan().await?;
            print_json(&PlanOutput {
                assessment: &assessment,
                action_plan: &action_plan,
            })?;
        }
        Command::Footprint {
            category,
            activity,
            amount,
            unit,
        } => {
            let mut entry = FootprintActivity::new(category, activity, amount);
            if let Some(unit) = unit {
                entry = entry.with_unit(unit);
            }
            let footprint = session.log_footprint(entry).await?;
            print_json(&footprint)?;
        }
        Command::Summary => {
            let summary = session.footprint_summary().await?;
            print_json(&summary)?;
        }
        Command::Categories => {
            let categories = session.footprint_categories().await?;
            print_json(&categories)?;
        }
        Command::Predict { lat, lon, years } => {
            let prediction = session.generate_predictions(lat, lon, years).await?;
            print_json(&prediction)?;
        }
    }

    if args.show_session {
        print_json(session.store())?;
    }

    Ok(())
}
