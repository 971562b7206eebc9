// scripts/greeks.rs
//! bs-greeks CLI
//!
//! Command-line front end for the Black-Scholes engine.
//!
//! # Commands
//!
//! - `bs-greeks price` - Price one option and print its Greeks
//! - `bs-greeks sweep --metric gamma` - Tabulate a metric across spot prices
//!
//! Any parameter left out falls back to the lab configuration defaults.

use anyhow::Context;
use bs_greeks::analytics::{price_and_greeks, sweep_greeks, Metric, MetricSet, OptionInputs, OptionType};
use bs_greeks::output;
use bs_greeks::{LabConfig, SessionState, SweepRange};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "bs-greeks")]
#[command(author, version, about = "Black-Scholes price and Greeks explorer", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Lab configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct MarketArgs {
    /// Current stock price (S)
    #[arg(long)]
    spot: Option<f64>,

    /// Strike price (K)
    #[arg(long)]
    strike: Option<f64>,

    /// Time to maturity in years (T)
    #[arg(long)]
    maturity: Option<f64>,

    /// Risk-free interest rate (r)
    #[arg(long, allow_hyphen_values = true)]
    rate: Option<f64>,

    /// Volatility (sigma)
    #[arg(long)]
    vol: Option<f64>,

    /// Option type: call or put
    #[arg(short = 't', long = "type")]
    option_type: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Price an option and print its Greeks
    Price {
        #[command(flatten)]
        market: MarketArgs,

        /// Output format (table, json, csv)
        #[arg(short, long, default_value = "table")]
        format: String,

        /// File for csv output
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Evaluate a metric across a range of stock prices
    Sweep {
        #[command(flatten)]
        market: MarketArgs,

        /// Metric to sweep (price, delta, gamma, theta, vega, rho, all)
        #[arg(short, long, default_value = "delta")]
        metric: String,

        /// Lowest stock price
        #[arg(long)]
        s_min: Option<f64>,

        /// Highest stock price
        #[arg(long)]
        s_max: Option<f64>,

        /// Number of grid points
        #[arg(long)]
        points: Option<usize>,

        /// CSV output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    let config = match &cli.config {
        Some(path) => LabConfig::from_file(path)
            .with_context(|| format!("loading lab configuration from {}", path.display()))?,
        None => LabConfig::default(),
    };
    debug!(?config, "lab configuration");

    let mut session = SessionState::new(config);

    match cli.command {
        Commands::Price {
            market,
            format,
            output,
        } => {
            apply_market_args(&mut session, &market)?;
            run_price(&session, &format, output)
        }
        Commands::Sweep {
            market,
            metric,
            s_min,
            s_max,
            points,
            output,
        } => {
            apply_market_args(&mut session, &market)?;
            let settings = session.config().sweep;
            let range = SweepRange::new(
                s_min.unwrap_or(settings.s_min),
                s_max.unwrap_or(settings.s_max),
                points.unwrap_or(settings.n_points),
            );
            run_sweep(&mut session, &metric, &range, output)
        }
    }
}

fn apply_market_args(session: &mut SessionState, market: &MarketArgs) -> anyhow::Result<()> {
    let current = session.inputs();
    let option_type = match &market.option_type {
        Some(name) => name.parse::<OptionType>()?,
        None => current.option_type,
    };
    session.set_lab_parameters(OptionInputs::new(
        market.spot.unwrap_or(current.s),
        market.strike.unwrap_or(current.k),
        market.maturity.unwrap_or(current.t),
        market.rate.unwrap_or(current.r),
        market.vol.unwrap_or(current.sigma),
        option_type,
    ));
    Ok(())
}

fn run_price(session: &SessionState, format: &str, output: Option<PathBuf>) -> anyhow::Result<()> {
    let inputs = session.inputs();
    info!(
        s = inputs.s,
        k = inputs.k,
        t = inputs.t,
        r = inputs.r,
        sigma = inputs.sigma,
        option_type = %inputs.option_type,
        "pricing option"
    );
    let greeks = price_and_greeks(&inputs)?;

    match format {
        "table" => {
            println!("\nOption Price: {:.2}", greeks.price);
            println!("\nSensitivities (Greeks):");
            println!("  Delta: {:>10.3}", greeks.delta);
            println!("  Gamma: {:>10.3}", greeks.gamma);
            println!("  Theta: {:>10.3}/day ({:.3}/year)", greeks.theta_per_day(), greeks.theta);
            println!("  Vega:  {:>10.3}", greeks.vega);
            println!("  Rho:   {:>10.3}", greeks.rho);
        }
        "json" => println!("{}", output::result_to_json(&inputs, &greeks)?),
        "csv" => {
            let path = output.unwrap_or_else(|| PathBuf::from("greeks_summary.csv"));
            let mut summary: Vec<(&str, String)> = Metric::ALL
                .iter()
                .map(|m| (m.name(), greeks.value(*m).to_string()))
                .collect();
            summary.push(("theta_per_day", greeks.theta_per_day().to_string()));
            output::write_summary_to_csv(&path, &summary)?;
            info!("Summary written to {}", path.display());
        }
        other => anyhow::bail!("Unknown format: {}. Supported: table, json, csv", other),
    }
    Ok(())
}

fn run_sweep(
    session: &mut SessionState,
    metric: &str,
    range: &SweepRange,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let inputs = session.inputs();

    if metric.eq_ignore_ascii_case("all") {
        let points = sweep_greeks(range, &inputs)?;
        match output {
            Some(path) => {
                output::write_sweep_to_csv(&path, &points, MetricSet::ALL)?;
                info!(points = points.len(), "Sweep written to {}", path.display());
            }
            None => output::write_sweep(std::io::stdout().lock(), &points, MetricSet::ALL)?,
        }
        return Ok(());
    }

    let metric: Metric = metric.parse()?;
    session.select_metric(metric);
    let chart = session.chart_series_over(range)?;

    match output {
        Some(path) => {
            output::write_series_to_csv(&path, chart.column, &chart.points)?;
            info!(points = chart.points.len(), "Sweep written to {}", path.display());
        }
        None => output::write_series(std::io::stdout().lock(), chart.column, &chart.points)?,
    }
    Ok(())
}
