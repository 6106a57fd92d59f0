use cpusched::prelude::*;
use std::{env, process};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: cpusched <input_file> {FCFS|SJF|SRTF|RR|ALL} [time_quantum] [--config <file.json>] [--json]";

/// Parsed command line
struct CliArgs {
    input: String,
    algorithm: String,
    quantum: Option<String>,
    config: Option<String>,
    json: bool,
}

fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut positional = Vec::new();
    let mut config = None;
    let mut json = false;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--json" => json = true,
            "--config" => {
                let path = iter.next().ok_or("--config requires a file path")?;
                config = Some(path.clone());
            }
            _ => positional.push(arg.clone()),
        }
    }

    if positional.len() < 2 || positional.len() > 3 {
        return Err(USAGE.to_string());
    }

    let quantum = positional.get(2).cloned();

    Ok(CliArgs {
        input: positional[0].clone(),
        algorithm: positional[1].clone(),
        quantum,
        config,
        json,
    })
}

/// Whether every policy was requested
fn wants_all(cli: &CliArgs) -> bool {
    cli.algorithm.eq_ignore_ascii_case("ALL")
}

fn print_outcome(outcome: &SimulationOutcome, json: bool) -> Result<(), SimError> {
    if json {
        let rendered = outcome
            .to_json()
            .map_err(|e| SimError::ExecutionFailed(format!("JSON export failed: {}", e)))?;
        println!("{}", rendered);
    } else {
        print!("{}", outcome.report());
    }
    Ok(())
}

async fn run(cli: CliArgs) -> Result<i32, SimError> {
    let config = match &cli.config {
        Some(path) => SimConfig::from_file(path)?,
        None => SimConfig::default(),
    };
    config.validate()?;

    // A single policy is checked before the input is touched. In ALL mode a
    // bad quantum only fails the RR run.
    let single = if wants_all(&cli) {
        None
    } else {
        Some(SchedulingPolicy::from_args(
            &cli.algorithm,
            cli.quantum.as_deref(),
        )?)
    };

    let contents = tokio::fs::read_to_string(&cli.input).await.map_err(|e| {
        SimError::Io(std::io::Error::new(
            e.kind(),
            format!("could not open '{}': {}", cli.input, e),
        ))
    })?;
    let tasks = parse_tasks(&contents, config.max_tasks)?;

    let simulator = Simulator::with_config(config);

    if let Some(policy) = single {
        let outcome = simulator.run(&tasks, policy)?;
        print_outcome(&outcome, cli.json)?;
        return Ok(0);
    }

    let executor = Executor::new("cpusched");
    let mut exit_code = 0;
    let requests = PolicyRequest::all(cli.quantum.as_deref());
    for run in executor.run_requested(&simulator, &tasks, requests).await {
        if !cli.json {
            println!("=== {} ===", run);
        }
        match &run.result {
            Ok(outcome) => print_outcome(outcome, cli.json)?,
            Err(e) => {
                eprintln!("{}: {}", run, e);
                exit_code = 1;
            }
        }
    }

    Ok(exit_code)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(usage) => {
            eprintln!("{}", usage);
            process::exit(1);
        }
    };

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
