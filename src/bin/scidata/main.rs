//! scidata CLI - inspect field descriptions and reconstruct them along requests.

mod description;

use std::env;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::json;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use scidata::request::expr;
use scidata::{Along, AxisData, AxisKind, Field};

use description::FieldDescription;

/// Environment variable holding a `tracing` filter directive.
const LOG_ENV: &str = "SCIDATA_LOG";

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    let mut level = "warn";
    let mut filtered_args: Vec<&str> = Vec::new();
    for arg in &args {
        match arg.as_str() {
            "-v" | "--verbose" => level = "debug",
            "-vv" | "--trace" => level = "trace",
            "-q" | "--quiet" => level = "off",
            _ => filtered_args.push(arg),
        }
    }
    init_logging(level);

    if let Err(e) = run(&filtered_args) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn run(args: &[&str]) -> Result<()> {
    let Some((&command, rest)) = args.split_first() else {
        print_help();
        return Ok(());
    };

    match command {
        "along" | "a" => {
            let Some((&path, requests)) = rest.split_first() else {
                bail!(
                    "missing file argument\n\
                     Usage: scidata-cli along <field.json> <request>... [--data axis=v1,v2,...]"
                );
            };
            let (requests, axis_data) = split_data_args(requests)?;
            let field = load_field(Path::new(path))?;
            let along = field
                .get_along_with_data(&requests, &axis_data)
                .with_context(|| format!("reconstructing '{}'", field.symbol()))?;
            println!("{}", serde_json::to_string_pretty(&along_json(&along))?);
        }
        "info" | "i" => {
            let Some(&path) = rest.first() else {
                bail!("missing file argument\nUsage: scidata-cli info <field.json>");
            };
            let field = load_field(Path::new(path))?;
            println!("{}", serde_json::to_string_pretty(&info_json(&field))?);
        }
        "version" | "V" => {
            println!(
                "scidata-cli {} (built {} {})",
                env!("CARGO_PKG_VERSION"),
                env!("SCIDATA_BUILD_DATE"),
                env!("SCIDATA_BUILD_TIME")
            );
        }
        "help" | "h" | "-h" | "--help" => print_help(),
        other => {
            print_help();
            bail!("unknown command '{other}'");
        }
    }
    Ok(())
}

fn print_help() {
    println!("scidata-cli - reconstruct symmetric field data");
    println!();
    println!("USAGE:");
    println!("    scidata-cli [OPTIONS] <COMMAND> [ARGS]");
    println!();
    println!("COMMANDS:");
    println!("    a, along <file> <request>...   Reconstruct the field along requests (JSON)");
    println!("             [--data axis=v1,v2]   Target coordinates for 'axis=axis_data' requests");
    println!("    i, info  <file>                Show axes, periodicity and stored shape");
    println!("    V, version                     Show version and build stamp");
    println!("    h, help                        Show this help");
    println!();
    println!("OPTIONS:");
    println!("    -v, --verbose    Show debug output");
    println!("    -vv, --trace     Show trace output (very verbose)");
    println!("    -q, --quiet      Suppress all log output");
    println!();
    println!("REQUESTS:");
    println!("    time                  full reconstruction");
    println!("    time[oneperiod]       smallestperiod | oneperiod | antiperiod | pattern");
    println!("    angle=[0,pi/4]        coordinates v with lower <= v < upper");
    println!("    slice=axis_data       resample onto --data coordinates");
    println!();
    println!("EXAMPLES:");
    println!("    scidata-cli info field.json");
    println!("    scidata-cli along field.json time 'angle=[0,pi/4]'");
    println!("    scidata-cli along field.json slice=axis_data --data slice=-5,-4,-3");
    println!();
    println!("ENVIRONMENT:");
    println!("    {LOG_ENV}       tracing filter, overrides -v/-vv/-q");
    println!("                      e.g. {LOG_ENV}=scidata=debug");
}

fn load_field(path: &Path) -> Result<Field> {
    let desc = FieldDescription::load(path)?;
    tracing::info!(path = %path.display(), axes = desc.axes.len(), "loaded field description");
    desc.build()
}

/// Separate `--data axis=v1,v2,...` pairs from request strings.
fn split_data_args<'a>(args: &[&'a str]) -> Result<(Vec<&'a str>, AxisData)> {
    let mut requests = Vec::new();
    let mut axis_data = AxisData::new();
    let mut iter = args.iter();
    while let Some(&arg) = iter.next() {
        if arg != "--data" && arg != "-d" {
            requests.push(arg);
            continue;
        }
        let Some(&pair) = iter.next() else {
            bail!("--data needs an 'axis=v1,v2,...' argument");
        };
        let (name, list) = pair
            .split_once('=')
            .with_context(|| format!("--data '{pair}': expected axis=v1,v2,..."))?;
        let values = list
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .map(expr::eval)
            .collect::<scidata::Result<Vec<_>>>()
            .with_context(|| format!("--data '{pair}'"))?;
        axis_data.insert(name.trim().to_string(), values);
    }
    Ok((requests, axis_data))
}

fn along_json(along: &Along) -> serde_json::Value {
    let axes: Vec<_> = along
        .axes()
        .iter()
        .map(|(name, coords)| json!({ "name": name, "values": coords }))
        .collect();
    json!({
        "symbol": along.symbol(),
        "shape": along.shape().sizes(),
        "axes": axes,
        "values": along.values(),
    })
}

fn info_json(field: &Field) -> serde_json::Value {
    let axes: Vec<_> = field
        .axes()
        .iter()
        .map(|axis| {
            let kind = match axis.kind() {
                AxisKind::Linspace(_) => "linspace",
                AxisKind::Values(_) => "values",
                AxisKind::Pattern(_) => "pattern",
            };
            let unique_indices = axis.as_pattern().map(|p| p.unique_indices());
            let periodicity = axis.periodicity().map(|p| {
                json!({
                    "period_count": p.period_count(),
                    "is_antiperiod": p.is_antiperiod(),
                    "one_period_length": p.one_period_length(),
                })
            });
            json!({
                "name": axis.name(),
                "unit": axis.unit(),
                "kind": kind,
                "length": axis.get_length(false),
                "stored_length": axis.stored_length(),
                "periodicity": periodicity,
                "unique_indices": unique_indices,
            })
        })
        .collect();
    json!({
        "name": field.name(),
        "symbol": field.symbol(),
        "unit": field.unit(),
        "shape": field.shape().sizes(),
        "axes": axes,
    })
}
