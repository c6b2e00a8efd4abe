//! Portfolio Analytics CLI
//!
//! Command-line interface for XIRR, Monte Carlo projections, goal probabilities
//! and contribution sweeps

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use portfolio_analytics::portfolio::{load_cash_flows, load_holdings};
use portfolio_analytics::simulation::{entropy_seed, RandSource};
use portfolio_analytics::{
    MonteCarloEngine, PortfolioReturns, PortfolioSnapshot, ProjectionConfig, ProjectionResult,
    ScenarioRunner, Settings, XirrOptions,
};
use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "portfolio_analytics", version, about = "Portfolio returns and goal projections")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Annualized return (XIRR) of recorded cash flows plus the current valuation
    Xirr {
        /// CSV with date,amount,note columns
        #[arg(long)]
        flows: PathBuf,

        /// JSON array of holding rows; their total current value is the terminal inflow
        #[arg(long, conflicts_with = "value")]
        holdings: Option<PathBuf>,

        /// Current portfolio value used as the terminal inflow
        #[arg(long)]
        value: Option<f64>,

        /// Valuation date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        as_of: Option<NaiveDate>,

        /// Starting guess for the rate
        #[arg(long)]
        guess: Option<f64>,

        #[arg(long)]
        json: bool,
    },

    /// Percentile bands of projected wealth per month
    Project {
        #[command(flatten)]
        projection: ProjectionArgs,

        /// Write every month's band to this CSV file
        #[arg(long)]
        output: Option<PathBuf>,

        #[arg(long)]
        json: bool,
    },

    /// Probability of reaching a target stated in today's money
    Goal {
        #[command(flatten)]
        projection: ProjectionArgs,

        /// Target amount in today's currency
        #[arg(long)]
        target: f64,

        /// Paths in the goal batch
        #[arg(long)]
        goal_paths: Option<usize>,
    },

    /// Compare several monthly contributions on identical random draws
    Sweep {
        #[command(flatten)]
        projection: ProjectionArgs,

        /// Comma-separated monthly contributions
        #[arg(long, value_delimiter = ',', required = true)]
        contributions: Vec<f64>,
    },
}

#[derive(Args)]
struct ProjectionArgs {
    /// JSON file holding a full projection config (flags below are ignored)
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value_t = 0.0)]
    corpus: f64,

    #[arg(long, default_value_t = 0.0)]
    contribution: f64,

    #[arg(long, default_value_t = 10.0)]
    years: f64,

    /// Expected annual return, e.g. 0.12
    #[arg(long, default_value_t = 0.10)]
    mean: f64,

    /// Annual volatility, e.g. 0.15
    #[arg(long, default_value_t = 0.15)]
    volatility: f64,

    /// Expected annual inflation, e.g. 0.06
    #[arg(long, default_value_t = 0.06)]
    inflation: f64,

    /// Number of simulated paths (defaults to PORTFOLIO_PATH_COUNT or 1000)
    #[arg(long)]
    paths: Option<usize>,

    /// Seed for reproducible runs (defaults to PORTFOLIO_SEED)
    #[arg(long)]
    seed: Option<u64>,
}

impl ProjectionArgs {
    fn to_config(&self, settings: &Settings) -> Result<ProjectionConfig> {
        if let Some(path) = &self.config {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            let config: ProjectionConfig =
                serde_json::from_reader(file).with_context(|| format!("parsing {}", path.display()))?;
            return Ok(config);
        }

        Ok(ProjectionConfig {
            start_corpus: self.corpus,
            monthly_contribution: self.contribution,
            horizon_years: self.years,
            annual_return_mean: self.mean,
            annual_return_volatility: self.volatility,
            annual_inflation: self.inflation,
            path_count: self.paths.unwrap_or(settings.path_count),
        })
    }

    fn seed(&self, settings: &Settings) -> Option<u64> {
        self.seed.or(settings.seed)
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let settings = Settings::from_env().context("reading environment settings")?;
    let cli = Cli::parse();

    match cli.command {
        Command::Xirr {
            flows,
            holdings,
            value,
            as_of,
            guess,
            json,
        } => run_xirr(&settings, flows, holdings, value, as_of, guess, json),
        Command::Project {
            projection,
            output,
            json,
        } => run_project(&settings, &projection, output, json),
        Command::Goal {
            projection,
            target,
            goal_paths,
        } => run_goal(&settings, &projection, target, goal_paths),
        Command::Sweep {
            projection,
            contributions,
        } => run_sweep(&settings, &projection, &contributions),
    }
}

fn run_xirr(
    settings: &Settings,
    flows: PathBuf,
    holdings: Option<PathBuf>,
    value: Option<f64>,
    as_of: Option<NaiveDate>,
    guess: Option<f64>,
    json: bool,
) -> Result<()> {
    let records = load_cash_flows(&flows).with_context(|| format!("loading {}", flows.display()))?;
    let as_of = as_of.unwrap_or_else(|| Local::now().date_naive());

    let snapshot = match (holdings, value) {
        (Some(path), _) => {
            let rows = load_holdings(&path).with_context(|| format!("loading {}", path.display()))?;
            PortfolioSnapshot::from_holdings(&rows)
        }
        (None, Some(value)) => PortfolioSnapshot {
            total_current_value: value,
            ..Default::default()
        },
        (None, None) => PortfolioSnapshot::default(),
    };

    let options = XirrOptions {
        guess,
        day_count: settings.day_count,
    };
    let returns = PortfolioReturns::from_records(&records, &snapshot, as_of, options);

    if json {
        println!("{}", serde_json::to_string_pretty(&returns)?);
        return Ok(());
    }

    println!("Cash flows: {} (as of {})", records.len(), returns.as_of);
    println!("  Invested:      {:>14.2}", returns.total_invested);
    println!("  Withdrawn:     {:>14.2}", returns.total_withdrawn);
    println!("  Current value: {:>14.2}", returns.current_value);
    println!("  Gain:          {:>14.2}", returns.absolute_gain);
    println!("  Simple return: {:>14}", format_pct(returns.simple_return));
    println!("  XIRR:          {:>14}", format_pct(returns.xirr));
    Ok(())
}

fn run_project(settings: &Settings, args: &ProjectionArgs, output: Option<PathBuf>, json: bool) -> Result<()> {
    let engine = MonteCarloEngine::new(args.to_config(settings)?);
    let result = simulate(&engine, args.seed(settings));

    if let Some(path) = output {
        write_points_csv(&result, &path)?;
        if !json {
            println!("Monthly bands written to: {}", path.display());
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("Projection ({} paths, {} months):", engine.config().path_count, engine.horizon_months());
    println!("{:>6} {:>16} {:>16} {:>16} {:>10}", "Year", "P10", "P50", "P90", "Inflation");
    println!("{}", "-".repeat(68));
    for point in result.points.iter().filter(|p| p.month_index % 12 == 0 || p.month_index == engine.horizon_months()) {
        println!(
            "{:>6.1} {:>16.2} {:>16.2} {:>16.2} {:>10.4}",
            point.month_index as f64 / 12.0,
            point.p10,
            point.p50,
            point.p90,
            point.cumulative_inflation_factor
        );
    }

    let summary = result.summary();
    println!("\nMedian in today's money: {:.2}", summary.final_real_p50);
    Ok(())
}

fn run_goal(settings: &Settings, args: &ProjectionArgs, target: f64, goal_paths: Option<usize>) -> Result<()> {
    if !target.is_finite() {
        bail!("target must be a finite amount");
    }

    let engine = MonteCarloEngine::new(args.to_config(settings)?);
    let goal_paths = goal_paths.unwrap_or(settings.goal_path_count);
    let probability = match args.seed(settings) {
        Some(seed) => engine.estimate_goal_success_probability(target, goal_paths, &mut RandSource::seeded(seed)),
        None => engine.estimate_goal_success_probability(target, goal_paths, &mut RandSource::from_entropy()),
    };

    println!(
        "Target {:.2} today ({:.2} at horizon): {:.1}% chance of success",
        target,
        target * engine.cumulative_inflation(engine.horizon_months()),
        probability * 100.0
    );
    Ok(())
}

fn run_sweep(settings: &Settings, args: &ProjectionArgs, contributions: &[f64]) -> Result<()> {
    let seed = args.seed(settings).unwrap_or_else(entropy_seed);
    let runner = ScenarioRunner::new(args.to_config(settings)?, seed);
    let results = runner.contribution_sweep(contributions);

    println!("{:>14} {:>16} {:>16} {:>16}", "Contribution", "P10", "P50", "P90");
    println!("{}", "-".repeat(65));
    for (contribution, result) in contributions.iter().zip(&results) {
        let summary = result.summary();
        println!(
            "{:>14.2} {:>16.2} {:>16.2} {:>16.2}",
            contribution, summary.final_p10, summary.final_p50, summary.final_p90
        );
    }
    Ok(())
}

fn simulate(engine: &MonteCarloEngine, seed: Option<u64>) -> ProjectionResult {
    match seed {
        Some(seed) => engine.simulate_paths_parallel(seed),
        None => engine.simulate_paths(&mut RandSource::from_entropy()),
    }
}

fn write_points_csv(result: &ProjectionResult, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    for point in &result.points {
        writer.serialize(point)?;
    }
    writer.flush()?;
    Ok(())
}

fn format_pct(rate: Option<f64>) -> String {
    match rate {
        Some(r) => format!("{:.2}%", r * 100.0),
        None => "—".to_string(),
    }
}
