//! Diagnostic CLI: classify one transaction and print the pipeline trace.
//!
//! Reads an upstream enrichment payload (JSON) from a file path or stdin
//! (`-`), runs it through `scc::Parser`, and prints the resulting
//! state-machine trace. Exit code mirrors the outcome: 0 on `Emitted`, 2 on
//! `Erased`, 1 on internal error.

use clap::Parser as ClapParser;
use comfy_table::{presets::UTF8_FULL, Table};
use scc::config::{load_config, load_config_from_path, with_config};
use scc::logger::{self, LogTag};
use scc::scc::config::CoreConfig;
use scc::scc::ingest::{ingest, UpstreamPayload};
use scc::scc::parsed::Parsed;
use scc::scc::state::PipelineState;
use scc::scc::storage::to_storage_records;
use scc::scc::telemetry::NoopTelemetry;
use scc::scc::validator::validate_all;
use scc::scc::Parser;
use std::io::Read;

#[derive(ClapParser, Debug)]
#[command(name = "scc-diagnose")]
#[command(about = "Classify a single transaction payload and print its pipeline trace")]
struct Args {
    /// Path to a JSON upstream payload, or `-` to read from stdin.
    input: String,

    /// Path to the host configuration file (TOML). Defaults to built-in
    /// configuration when omitted.
    #[arg(long)]
    config: Option<String>,
}

fn read_input(path: &str) -> Result<String, String> {
    if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("failed to read stdin: {e}"))?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path).map_err(|e| format!("failed to read {path}: {e}"))
    }
}

fn print_trace(states: &[PipelineState]) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Step", "State"]);
    for (i, state) in states.iter().enumerate() {
        table.add_row(vec![(i + 1).to_string(), state.to_string()]);
    }
    println!("{table}");
}

fn main() {
    logger::init();
    let args = Args::parse();

    let config_result = match &args.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };
    if let Err(e) = config_result {
        logger::error(LogTag::Cli, &format!("failed to load configuration: {e}"));
        eprintln!("failed to load configuration: {e}");
        std::process::exit(1);
    }

    let raw_json = match read_input(&args.input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let payload: UpstreamPayload = match serde_json::from_str(&raw_json) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("invalid payload JSON: {e}");
            std::process::exit(1);
        }
    };

    let core_config = with_config(|cfg| CoreConfig::from_schema(&cfg.core));
    let core_config = match core_config {
        Ok(c) => c,
        Err(e) => {
            eprintln!("invalid core configuration: {e}");
            std::process::exit(1);
        }
    };

    let mut trace = vec![PipelineState::Init];
    let telemetry = NoopTelemetry;

    let raw_tx = match ingest(payload, &core_config, &telemetry) {
        Ok(tx) => {
            trace.push(PipelineState::IngestOk);
            tx
        }
        Err(e) => {
            trace.push(PipelineState::Erased);
            print_trace(&trace);
            logger::log_rejection("<unknown>", &e.reason);
            std::process::exit(2);
        }
    };

    let signature = raw_tx.signature.to_string();
    let parser = Parser::with_config(core_config);

    match parser.parse(raw_tx) {
        Ok(parsed) => {
            trace.push(PipelineState::DeltasBuilt);
            trace.push(PipelineState::SwapperChosen);
            trace.push(PipelineState::Classified);
            match &parsed {
                Parsed::Single(_) => trace.push(PipelineState::Single),
                Parsed::Split(_) => trace.push(PipelineState::Split),
            }
            trace.push(PipelineState::Mapped);

            let records = to_storage_records(&parsed);
            if let Err(e) = validate_all(&records) {
                trace.push(PipelineState::Erased);
                print_trace(&trace);
                logger::log_rejection(&signature, &e.reason);
                std::process::exit(2);
            }
            trace.push(PipelineState::Validated);
            trace.push(PipelineState::Emitted);
            print_trace(&trace);

            let kind = match &parsed {
                Parsed::Single(_) => scc::scc::telemetry::EmissionKind::Single,
                Parsed::Split(_) => scc::scc::telemetry::EmissionKind::SplitSell,
            };
            logger::log_emission(&signature, kind);
            std::process::exit(0);
        }
        Err(e) => {
            trace.push(PipelineState::Erased);
            print_trace(&trace);
            logger::log_rejection(&signature, &e.reason);
            std::process::exit(2);
        }
    }
}
