// scripts/benchmark.rs
use bs_greeks::analytics::{
    price_and_greeks, price_and_greeks_batch, sweep_greeks, OptionInputs, OptionType, SweepRange,
};
use bs_greeks::math_utils::Timer;
use std::env;
use std::fs::File;
use std::hint::black_box;
use std::io::Write;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
struct SystemInfo {
    os: String,
    cpu_cores: usize,
    rustc_flags: String,
    rayon_threads: usize,
}

impl SystemInfo {
    fn gather() -> Self {
        Self {
            os: env::consts::OS.to_string(),
            cpu_cores: num_cpus::get(),
            rustc_flags: env::var("RUSTFLAGS").unwrap_or_else(|_| "default".to_string()),
            rayon_threads: rayon::current_num_threads(),
        }
    }
}

#[derive(Debug)]
struct BenchmarkResult {
    name: String,
    evaluations: usize,
    time_ms: f64,
    throughput_evals_per_sec: f64,
}

impl BenchmarkResult {
    fn new(name: impl Into<String>, evaluations: usize, time_ms: f64) -> Self {
        BenchmarkResult {
            name: name.into(),
            evaluations,
            time_ms,
            throughput_evals_per_sec: evaluations as f64 / (time_ms / 1000.0),
        }
    }
}

/// Deterministic grid of contracts covering the lab slider ranges
fn contract_grid(n: usize) -> Vec<OptionInputs> {
    (0..n)
        .map(|i| {
            let u = i as f64 / n as f64;
            let option_type = if i % 2 == 0 { OptionType::Call } else { OptionType::Put };
            OptionInputs::new(
                50.0 + 100.0 * u,
                150.0 - 100.0 * u,
                0.1 + 4.9 * ((i * 7) % n) as f64 / n as f64,
                0.2 * ((i * 13) % n) as f64 / n as f64,
                0.1 + 0.9 * ((i * 31) % n) as f64 / n as f64,
                option_type,
            )
        })
        .collect()
}

fn run_benchmarks() -> anyhow::Result<Vec<BenchmarkResult>> {
    let mut results = Vec::new();
    let mut timer = Timer::new();

    for &n in &[10_000, 100_000, 1_000_000] {
        info!("Running benchmarks with {} contracts...", n);
        let contracts = contract_grid(n);

        timer.start();
        for inputs in &contracts {
            black_box(price_and_greeks(black_box(inputs))?);
        }
        results.push(BenchmarkResult::new(
            format!("Sequential price_and_greeks ({}k)", n / 1000),
            n,
            timer.elapsed_ms(),
        ));

        timer.start();
        let batch = black_box(price_and_greeks_batch(&contracts));
        results.push(BenchmarkResult::new(
            format!("Parallel batch ({}k)", n / 1000),
            batch.len(),
            timer.elapsed_ms(),
        ));
    }

    let fixed = OptionInputs::default();
    let range = SweepRange::default();
    let rounds = 1_000;
    timer.start();
    for _ in 0..rounds {
        black_box(sweep_greeks(&range, &fixed)?);
    }
    results.push(BenchmarkResult::new(
        format!("Sweep {} points x {}", range.n_points, rounds),
        range.n_points * rounds,
        timer.elapsed_ms(),
    ));

    Ok(results)
}

fn write_results_to_csv(
    results: &[BenchmarkResult],
    system_info: &SystemInfo,
    filename: &str,
) -> anyhow::Result<()> {
    let mut file = File::create(filename)?;

    // System information as comment lines ahead of the table
    writeln!(file, "# OS: {}", system_info.os)?;
    writeln!(file, "# CPU Cores: {}", system_info.cpu_cores)?;
    writeln!(file, "# RUSTFLAGS: {}", system_info.rustc_flags)?;
    writeln!(file, "# Rayon Threads: {}", system_info.rayon_threads)?;
    writeln!(
        file,
        "# Benchmark Date: {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )?;

    let mut wtr = csv::Writer::from_writer(file);
    wtr.write_record(["Benchmark", "Evaluations", "Time_ms", "Throughput_evals_per_sec"])?;
    for result in results {
        wtr.write_record(&[
            result.name.clone(),
            result.evaluations.to_string(),
            format!("{:.2}", result.time_ms),
            format!("{:.0}", result.throughput_evals_per_sec),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let system_info = SystemInfo::gather();
    info!(?system_info, "bs-greeks benchmark");

    let results = run_benchmarks()?;

    println!("\n{:<40} {:>12} {:>12} {:>16}", "Benchmark", "Evals", "Time (ms)", "Evals/sec");
    println!("{}", "-".repeat(84));
    for result in &results {
        println!(
            "{:<40} {:>12} {:>12.2} {:>16.0}",
            result.name, result.evaluations, result.time_ms, result.throughput_evals_per_sec
        );
    }

    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    let filename = format!("benchmark_results_{}.csv", timestamp);
    write_results_to_csv(&results, &system_info, &filename)?;
    info!("Results written to {}", filename);
    Ok(())
}
