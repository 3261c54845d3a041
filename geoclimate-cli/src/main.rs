//! GeoClimate CLI - freight lane risk scoring and advisory

#![deny(warnings)]

// Global invariants enforced:
// - stdout carries only reports and answers; logs go to stderr
// - The session file is written only by commands that change the store

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use geoclimate_core::advisor::Advisor;
use geoclimate_core::config::{self, ResolvedConfig};
use geoclimate_core::report::{self, LaneReport};
use geoclimate_core::{optimizer, profiles, prompts, scenario, session};
use geoclimate_core::{
    ContextStore, RiskAssessment, RouteContext, StressMultipliers, TransportMode,
    WeightingProfile,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "geoclimate")]
#[command(about = "Freight lane risk scoring with a rule-based supply chain advisor")]
#[command(version = env!("GEOCLIMATE_VERSION"))]
struct Cli {
    /// Session file holding the context store (overrides config file)
    #[arg(long, global = true)]
    session: Option<PathBuf>,

    /// Path to config file (default: auto-discover)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a lane and make it the current lane
    Analyze {
        /// Origin location
        origin: String,

        /// Destination location
        destination: String,

        /// Transport mode: sea, air, road or rail (overrides config file)
        #[arg(long)]
        mode: Option<String>,

        /// Departure date, YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Weighting profile: Balanced, Geo-heavy, Climate-heavy, Logistics-heavy
        #[arg(long)]
        weighting: Option<String>,

        /// Disable the conflict bump for conflict origins
        #[arg(long)]
        no_conflict: bool,

        /// Also append the lane to the comparison basket
        #[arg(long)]
        basket: bool,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },
    /// Explain the current lane's drivers and mitigations
    Explain {
        /// Pin "today" for the advisor, YYYY-MM-DD
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Stress the current lane and store the scenario
    Stress {
        #[arg(long)]
        geo: Option<f64>,
        #[arg(long)]
        climate: Option<f64>,
        #[arg(long)]
        logistics: Option<f64>,
        #[arg(long)]
        cyber: Option<f64>,

        /// Print the advisor's interpretation after the table
        #[arg(long)]
        explain: bool,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },
    /// Generate alternatives for the current lane
    Optimize {
        /// Print the advisor's recommendation after the table
        #[arg(long)]
        advise: bool,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },
    /// Comparison basket
    Basket {
        #[command(subcommand)]
        action: BasketAction,
    },
    /// Ask the advisor a question
    Ask {
        /// Question text
        #[arg(required = true)]
        question: Vec<String>,

        /// Strategy room: append the dashboard context to the answer
        #[arg(long)]
        strategy: bool,

        /// Print the classified intent to stderr
        #[arg(long)]
        show_intent: bool,

        /// Pin "today" for the advisor, YYYY-MM-DD
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Global heat index per profiled location
    Heatmap {
        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },
    /// Inspect or clear the session
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
    /// Validate or show configuration
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum BasketAction {
    /// Show the basket as a table
    Show {
        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },
    /// Ask the advisor to compare the basket lanes
    Compare,
}

#[derive(Subcommand)]
enum SessionAction {
    /// Print the stored context
    Show,
    /// Delete the session file
    Reset,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Validate a config file
    Validate {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Show the resolved configuration (merged defaults + config file)
    Show {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("GEOCLIMATE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    // Config subcommands load their own file and never touch the session
    if let Commands::Config { action } = cli.command {
        return handle_config(action);
    }

    let cwd = std::env::current_dir()?;
    let resolved = config::load_and_resolve(&cwd, cli.config.as_deref())
        .context("failed to load configuration")?;
    if let Some(ref p) = resolved.config_path {
        tracing::info!("Using config: {}", p.display());
    }
    let session_path = cli
        .session
        .clone()
        .unwrap_or_else(|| resolved.session_path.clone());

    match cli.command {
        Commands::Analyze {
            origin,
            destination,
            mode,
            date,
            weighting,
            no_conflict,
            basket,
            format,
        } => {
            let route = RouteContext {
                mode: parse_mode(mode.as_deref(), resolved.mode)?,
                weighting: parse_weighting(weighting.as_deref(), resolved.weighting)?,
                departure_date: date.unwrap_or_else(today),
                include_conflict: resolved.include_conflict && !no_conflict,
                origin,
                destination,
            };
            for name in [&route.origin, &route.destination] {
                if !profiles::is_known_location(name) {
                    tracing::warn!("'{}' has no risk profile; using default baselines", name);
                }
            }
            let assessment = geoclimate_core::assess(&route);

            let mut store = session::load_or_new(&session_path)?;
            store.set_lane(route.clone(), assessment);
            if basket {
                store.push_basket(route.clone(), assessment);
            }
            session::save(&session_path, &store)?;

            let lane = LaneReport::new(&route, &assessment);
            print_report(format, &lane, || report::render_lane_text(&lane));
        }
        Commands::Explain { today } => {
            let store = session::load_or_new(&session_path)?;
            let (route, assessment) = require_lane(&store)?;
            let prompt = prompts::explain_route_prompt(route, assessment);
            println!("{}", advisor(today).respond("You are a supply chain advisor.", &prompt, &store));
        }
        Commands::Stress {
            geo,
            climate,
            logistics,
            cyber,
            explain,
            format,
        } => {
            let multipliers = StressMultipliers {
                geo: geo.unwrap_or(resolved.stress.geo),
                climate: climate.unwrap_or(resolved.stress.climate),
                logistics: logistics.unwrap_or(resolved.stress.logistics),
                cyber: cyber.unwrap_or(resolved.stress.cyber),
            };
            multipliers.validate()?;

            let mut store = session::load_or_new(&session_path)?;
            let (_, base) = require_lane(&store)?;
            let base = *base;
            let stressed = scenario::stress(&base, multipliers);
            store.set_scenario(stressed);
            session::save(&session_path, &store)?;

            let rows = scenario::compare(&base, &stressed);
            print_report(format, &rows, || report::render_scenario_text(&rows));
            if explain {
                let prompt = prompts::scenario_prompt(&base, &stressed);
                println!();
                println!("{}", advisor(None).respond("You are a risk analyst.", &prompt, &store));
            }
        }
        Commands::Optimize { advise, format } => {
            let mut store = session::load_or_new(&session_path)?;
            let (route, assessment) = require_lane(&store)?;
            let (route, assessment) = (route.clone(), *assessment);
            let options = optimizer::generate_alternatives(&route);
            store.set_options(options.clone());
            session::save(&session_path, &store)?;

            print_report(format, &options, || {
                report::render_options_text(&route, &assessment, &options)
            });
            if advise {
                let prompt = prompts::optimizer_prompt(&route, &assessment, &options);
                println!();
                println!("{}", advisor(None).respond("You are a network designer.", &prompt, &store));
            }
        }
        Commands::Basket { action } => {
            let store = session::load_or_new(&session_path)?;
            match action {
                BasketAction::Show { format } => {
                    print_report(format, store.basket(), || {
                        report::render_basket_text(store.basket())
                    });
                }
                BasketAction::Compare => {
                    if store.basket().is_empty() {
                        anyhow::bail!("comparison basket is empty: run `geoclimate analyze ... --basket` first");
                    }
                    let prompt = prompts::basket_prompt(store.basket());
                    println!("{}", advisor(None).respond("You are a network planner.", &prompt, &store));
                }
            }
        }
        Commands::Ask {
            question,
            strategy,
            show_intent,
            today,
        } => {
            let store = session::load_or_new(&session_path)?;
            let question = question.join(" ");
            let advisor = advisor(today);
            if show_intent {
                let intent = geoclimate_core::classify(&question, &store);
                eprintln!("intent: {}", intent.as_str());
            }
            let answer = if strategy {
                advisor.strategy_room(&question, &store)
            } else {
                advisor.respond("You are a supply chain strategist.", &question, &store)
            };
            println!("{}", answer);
        }
        Commands::Heatmap { format } => {
            let rows = profiles::heat_index();
            print_report(format, &rows, || report::render_heat_index_text(&rows));
        }
        Commands::Session { action } => match action {
            SessionAction::Show => {
                let store = session::load_or_new(&session_path)?;
                if store.is_empty() {
                    println!("Session is empty: {}", session_path.display());
                } else {
                    println!("{}", report::render_json(&store));
                }
            }
            SessionAction::Reset => {
                if session::reset(&session_path)? {
                    println!("Session cleared: {}", session_path.display());
                } else {
                    println!("No session file at {}", session_path.display());
                }
            }
        },
        Commands::Config { .. } => unreachable!("handled above"),
    }

    Ok(())
}

fn handle_config(action: ConfigAction) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    match action {
        ConfigAction::Validate { path } => {
            match config::load_and_resolve(&cwd, path.as_deref()) {
                Ok(config) => {
                    if let Some(ref p) = config.config_path {
                        println!("Config valid: {}", p.display());
                    } else {
                        println!("No config file found. Using defaults.");
                    }
                }
                Err(e) => {
                    eprintln!("Config validation failed: {:#}", e);
                    std::process::exit(1);
                }
            }
        }
        ConfigAction::Show { path } => {
            let resolved = config::load_and_resolve(&cwd, path.as_deref())
                .context("failed to load configuration")?;
            print_config(&resolved);
        }
    }
    Ok(())
}

fn print_config(resolved: &ResolvedConfig) {
    println!("Configuration:");
    if let Some(ref p) = resolved.config_path {
        println!("  Source: {}", p.display());
    } else {
        println!("  Source: defaults (no config file found)");
    }
    println!();
    println!("Lane defaults:");
    println!("  mode: {}", resolved.mode);
    println!("  weighting: {}", resolved.weighting);
    println!("  include_conflict: {}", resolved.include_conflict);
    println!();
    println!("Stress multipliers:");
    println!("  geo: {}", resolved.stress.geo);
    println!("  climate: {}", resolved.stress.climate);
    println!("  logistics: {}", resolved.stress.logistics);
    println!("  cyber: {}", resolved.stress.cyber);
    println!();
    println!("Session: {}", resolved.session_path.display());
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn advisor(today: Option<NaiveDate>) -> Advisor {
    today.map(Advisor::new).unwrap_or_else(Advisor::for_today)
}

fn parse_mode(flag: Option<&str>, fallback: TransportMode) -> anyhow::Result<TransportMode> {
    match flag {
        None => Ok(fallback),
        Some(name) => TransportMode::parse(name)
            .with_context(|| format!("unknown mode '{}' (expected sea, air, road or rail)", name)),
    }
}

fn parse_weighting(
    flag: Option<&str>,
    fallback: WeightingProfile,
) -> anyhow::Result<WeightingProfile> {
    match flag {
        None => Ok(fallback),
        Some(name) => WeightingProfile::parse(name).with_context(|| {
            format!(
                "unknown weighting '{}' (expected Balanced, Geo-heavy, Climate-heavy or Logistics-heavy)",
                name
            )
        }),
    }
}

fn require_lane(store: &ContextStore) -> anyhow::Result<(&RouteContext, &RiskAssessment)> {
    store
        .current_lane()
        .context("no current lane in this session: run `geoclimate analyze <origin> <destination>` first")
}

fn print_report<T: Serialize + ?Sized>(format: OutputFormat, value: &T, text: impl FnOnce() -> String) {
    match format {
        OutputFormat::Text => print!("{}", text()),
        OutputFormat::Json => println!("{}", report::render_json(value)),
    }
}
