// src/output.rs
use crate::analytics::{GreeksResult, Metric, MetricSet, OptionInputs};
use crate::error::BsResult;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Single series as `s,<column>` rows
///
/// `column` names the unit as well as the metric, e.g. `theta` for annual
/// and `theta_per_day` for daily decay.
pub fn write_series<W: Write>(writer: W, column: &str, series: &[(f64, f64)]) -> BsResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["s", column])?;
    for (s, value) in series {
        wtr.write_record(&[s.to_string(), value.to_string()])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_series_to_csv(
    filename: impl AsRef<Path>,
    column: &str,
    series: &[(f64, f64)],
) -> BsResult<()> {
    write_series(File::create(filename)?, column, series)
}

/// Full sweep with one column per selected metric
pub fn write_sweep<W: Write>(
    writer: W,
    points: &[(f64, GreeksResult)],
    metrics: MetricSet,
) -> BsResult<()> {
    let columns = metrics.metrics();
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec!["s"];
    header.extend(columns.iter().map(|m| m.name()));
    wtr.write_record(&header)?;

    for (s, result) in points {
        let mut record = vec![s.to_string()];
        record.extend(columns.iter().map(|m| result.value(*m).to_string()));
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_sweep_to_csv(
    filename: impl AsRef<Path>,
    points: &[(f64, GreeksResult)],
    metrics: MetricSet,
) -> BsResult<()> {
    write_sweep(File::create(filename)?, points, metrics)
}

pub fn write_summary_to_csv(filename: impl AsRef<Path>, summary_data: &[(&str, String)]) -> BsResult<()> {
    let mut wtr = csv::Writer::from_writer(File::create(filename)?);
    for (key, value) in summary_data {
        wtr.write_record([*key, value.as_str()])?;
    }
    wtr.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct PricingReport<'a> {
    inputs: &'a OptionInputs,
    result: &'a GreeksResult,
    theta_per_day: f64,
}

/// JSON report of one evaluation, inputs included
pub fn result_to_json(inputs: &OptionInputs, result: &GreeksResult) -> BsResult<String> {
    let report = PricingReport {
        inputs,
        result,
        theta_per_day: result.theta_per_day(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}
