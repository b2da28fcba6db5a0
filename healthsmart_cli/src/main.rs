use clap::Parser;
use healthsmart_core::service::{health_status, usage};
use healthsmart_core::{Config, EngineApi, Result};
use serde_json::{json, Value};
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "healthsmart")]
#[command(about = "Personalized monthly health plan engine", long_about = None)]
struct Cli {
    /// Action to run (generate_plan, daily_recommendation, analyze_health, health)
    action: Option<String>,

    /// JSON payload; read from stdin when omitted
    payload: Option<String>,

    /// Seed for reproducible meal and exercise selection
    #[arg(long)]
    seed: Option<u64>,

    /// Use this config file instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also write the generated daily plans to this CSV file
    #[arg(long)]
    csv_out: Option<PathBuf>,

    /// Log at info level instead of warnings only
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging (stderr only)
    if cli.verbose {
        healthsmart_core::logging::init();
    } else {
        healthsmart_core::logging::init_with_level("warn");
    }

    let Some(action) = cli.action.as_deref() else {
        print_json(&usage());
        return ExitCode::SUCCESS;
    };

    let success = match run(action, &cli) {
        Ok(success) => success,
        Err(e) => {
            tracing::error!("{}", e);
            print_json(&json!({ "success": false, "data": null, "message": e.to_string() }));
            false
        }
    };

    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn run(action: &str, cli: &Cli) -> Result<bool> {
    // Liveness checks never touch config or stdin
    if action == "health" {
        print_json(&health_status());
        return Ok(true);
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let mut api = EngineApi::new(config, cli.seed)?;
    if let Some(path) = &cli.csv_out {
        api = api.with_csv_export(path.clone());
    }

    let payload = match &cli.payload {
        Some(payload) => payload.clone(),
        None => read_stdin()?,
    };

    let response = api.handle(action, &payload);
    print_json(&response.body);
    Ok(response.success)
}

fn read_stdin() -> Result<String> {
    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;
    Ok(input)
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(e) => println!("{{\"success\": false, \"message\": \"{}\"}}", e),
    }
}
