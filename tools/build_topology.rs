// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Column Topology Builder Tool

Builds one or more cortical columns from a network config document, checks
that the resulting schedule is causal, and prints the topology as JSON.

Usage:
  cargo run --bin build_topology -- [config.toml|config.json] [--key=value ...] [--debug-{crate}]

Keys:
  columns, suffix, profiling, log_level, log_format, output
  sensor_input_size, external_input_size, l2_cell_count

Without a path the document is found via COLUMN_CONFIG_PATH or
column_network.toml / column_network.json in the working directory or a parent.

Example:
  cargo run --bin build_topology -- column_network.toml --columns=3 --output=columns.json

Copyright 2025 Neuraville Inc.
Licensed under the Apache License, Version 2.0
*/

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;

use column_config::{load_network_document, ToolSettings};
use column_observability::{debug_flags_help, init_logging, parse_debug_flags};
use cortical_column::{build_network, logging_config};
use serde_json::json;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().skip(1).collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return Ok(());
    }

    let (config_path, overrides) = parse_args(&args);

    let document = load_network_document(config_path.as_deref(), Some(&overrides))?;
    let mut settings = ToolSettings::from_document(&document)?;
    settings.apply_cli_overrides(&overrides);
    settings.validate()?;

    let _guard = init_logging(&parse_debug_flags(), &logging_config(&settings))?;

    eprintln!("🧬 Cortical Column Topology Builder");
    eprintln!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    match &config_path {
        Some(path) => eprintln!("📂 Config:    {}", path.display()),
        None => eprintln!("📂 Config:    (discovered)"),
    }
    eprintln!("🏛️  Columns:   {}", settings.columns);
    eprintln!("📊 Profiling: {}", settings.profiling);
    eprintln!();

    // Errors return through main so the logging guard flushes on drop
    let (output, summary) = run(document, &settings).map_err(|e| {
        eprintln!("❌ Error: {}", e);
        e
    })?;

    match overrides.get("output") {
        Some(path) => {
            fs::write(path, &output)?;
            eprintln!("💾 Topology written to {}", path);
        }
        None => println!("{}", output),
    }

    eprintln!();
    eprintln!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    eprintln!("✅ {}", summary);

    Ok(())
}

/// Build, check causality, and render the topology report
///
/// Returns the pretty JSON report and a one-line summary.
fn run(
    document: serde_json::Value,
    settings: &ToolSettings,
) -> Result<(String, String), Box<dyn std::error::Error>> {
    let built = build_network(document, settings)?;

    eprintln!("🔍 Checking causality...");
    built.network.check_causality()?;

    let schedule: Vec<_> = built
        .network
        .execution_schedule()
        .into_iter()
        .map(|(phase, regions)| json!({"phase": phase, "regions": regions}))
        .collect();
    let report = json!({
        "columns": built.columns,
        "schedule": schedule,
        "profilingEnabled": built.network.profiling_enabled(),
    });
    let summary = format!(
        "Built {} column(s): {} regions, {} links",
        built.columns.len(),
        built.network.region_count(),
        built.network.links().len()
    );

    Ok((serde_json::to_string_pretty(&report)?, summary))
}

/// Split arguments into an optional document path and `--key=value` overrides
///
/// `--debug-*` flags are left to the observability crate.
fn parse_args(args: &[String]) -> (Option<PathBuf>, HashMap<String, String>) {
    let mut config_path = None;
    let mut overrides = HashMap::new();

    for arg in args {
        if arg.starts_with("--debug-") {
            continue;
        }
        match arg.strip_prefix("--") {
            Some(pair) => {
                if let Some((key, value)) = pair.split_once('=') {
                    overrides.insert(key.replace('-', "_"), value.to_string());
                } else {
                    eprintln!("⚠️  Ignoring flag without value: {}", arg);
                }
            }
            None => config_path = Some(PathBuf::from(arg)),
        }
    }

    (config_path, overrides)
}

fn print_usage() {
    println!("Usage: build_topology [config.toml|config.json] [--key=value ...]");
    println!();
    println!("Keys:");
    println!("  --columns=N               Number of columns (indexed suffixes when N > 1)");
    println!("  --suffix=S                Suffix of a single column");
    println!("  --profiling=true|false    Ask the engine to enable profiling");
    println!("  --log_level=LEVEL         Default log level");
    println!("  --log_format=text|json    Console log format");
    println!("  --output=PATH             Write the topology JSON to a file");
    println!("  --sensor_input_size=N     Override sensorInputSize");
    println!("  --external_input_size=N   Override externalInputSize");
    println!("  --l2_cell_count=N         Override L2Params.cellCount");
    println!();
    print!("{}", debug_flags_help());
}
