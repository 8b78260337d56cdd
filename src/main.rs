use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};

use polyfret::data::aggregate::aggregate;
use polyfret::data::loader::{load_measurements, load_params};

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Load a measurement table and parameter file, aggregate by condition,
/// and print a per-condition summary.
fn run() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let usage = "usage: polyfret <measurements.{csv,json}> <params.json>";
    let data_path = args.next().context(usage)?;
    let params_path = args.next().context(usage)?;

    let params = load_params(Path::new(&params_path))?;
    let measurements = load_measurements(Path::new(&data_path))?;
    log::info!("loaded {} measurement rows from {data_path}", measurements.len());

    let experiment = aggregate(&measurements, params)?;
    println!(
        "{} conditions, RNA {:.3} µM, n = {}, max time {:.0} s",
        experiment.conditions.len(),
        experiment.rna * 1e6,
        experiment.params.oligomer_len,
        experiment.max_time()
    );

    for (condition, series) in experiment.conditions.iter().zip(&experiment.series) {
        let mean = if series.is_empty() {
            0.0
        } else {
            series.signal.iter().sum::<f64>() / series.len() as f64
        };
        println!(
            "  [E] {:.4} µM: {} points, mean FRET {mean:.4}",
            condition * 1e6,
            series.len()
        );
    }

    Ok(())
}
