//! Beacon Probe CLI
//!
//! Loads the beacon native module into the in-process host and calls it.
//!
//! ## Usage
//!
//! ```bash
//! # List bound capabilities
//! beacon-probe exports
//!
//! # Call hello, extra arguments are parsed as json when possible
//! beacon-probe call hello ignored 123 null
//!
//! # Hammer a capability from several threads
//! beacon-probe stress --threads 8 --iterations 10000
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use beacon_host::ModuleHost;
use beacon_native::{Value, HELLO, MODULE};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "beacon-probe")]
#[command(about = "load the beacon native module and exercise its capabilities")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print the invocation trace as json to stderr when done
    #[arg(long, global = true, env = "BEACON_PROBE_TRACE")]
    trace: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List capabilities bound by the module
    Exports {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },

    /// Invoke a capability once
    Call {
        /// Capability name
        #[arg(default_value = HELLO)]
        name: String,

        /// Arguments, each a json literal or a plain string
        args: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },

    /// Invoke a capability concurrently and compare against a single call
    Stress {
        /// Capability name
        #[arg(default_value = HELLO)]
        name: String,

        /// Worker threads
        #[arg(short, long, default_value_t = 4)]
        threads: usize,

        /// Calls per thread
        #[arg(short, long, default_value_t = 1000)]
        iterations: usize,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("beacon_probe={level},beacon_host={level},beacon_native={level}").into()
            }),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut host = ModuleHost::new(MODULE);
    if cli.trace {
        host = host.with_trace();
    }
    if let Err(e) = host.load() {
        error!("failed to load {}: {}", MODULE.name, e);
        return Err(e).context("loading native module");
    }

    match cli.command {
        Commands::Exports { output } => run_exports(&host, output)?,
        Commands::Call { name, args, output } => run_call(&host, &name, &args, output)?,
        Commands::Stress {
            name,
            threads,
            iterations,
        } => run_stress(&host, &name, threads, iterations)?,
    }

    if let Some(trace) = host.trace() {
        eprintln!("{}", serde_json::to_string_pretty(&trace)?);
    }
    Ok(())
}

fn run_exports(host: &ModuleHost, output: OutputFormat) -> Result<()> {
    let names = host.capabilities()?;
    match output {
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({ "module": host.module_name(), "capabilities": names })
        ),
        OutputFormat::Text => {
            println!("{}:", host.module_name());
            for name in names {
                println!("  {}", name);
            }
        }
    }
    Ok(())
}

fn run_call(host: &ModuleHost, name: &str, raw_args: &[String], output: OutputFormat) -> Result<()> {
    let args: Vec<Value> = raw_args.iter().map(|a| parse_arg(a)).collect();
    info!("calling {} with {} argument(s)", name, args.len());

    let result = host
        .invoke(name, &args)
        .with_context(|| format!("calling {}", name))?;

    match output {
        OutputFormat::Json => println!("{}", serde_json::Value::from(&result)),
        OutputFormat::Text => println!("{}", result),
    }
    Ok(())
}

fn run_stress(host: &ModuleHost, name: &str, threads: usize, iterations: usize) -> Result<()> {
    let baseline = host.invoke(name, &[])?;
    let mismatches = AtomicUsize::new(0);
    let start = Instant::now();

    std::thread::scope(|s| {
        for t in 0..threads {
            let (baseline, mismatches) = (&baseline, &mismatches);
            s.spawn(move || {
                for i in 0..iterations {
                    let args = [Value::from(t as f64), Value::from(i as f64)];
                    match host.invoke(name, &args) {
                        Ok(v) if &v == baseline => {}
                        Ok(v) => {
                            error!("thread {} call {}: got {:?}", t, i, v);
                            mismatches.fetch_add(1, Ordering::Relaxed);
                        }
                        Err(e) => {
                            error!("thread {} call {}: {}", t, i, e);
                            mismatches.fetch_add(1, Ordering::Relaxed);
                        }
                    }
                }
            });
        }
    });

    let total = threads * iterations;
    let elapsed = start.elapsed();
    let mismatches = mismatches.into_inner();
    println!(
        "{} calls on {} threads in {:.2?}: {} mismatch(es)",
        total, threads, elapsed, mismatches
    );

    if mismatches > 0 {
        bail!("{} of {} concurrent calls differed from the single-threaded result", mismatches, total);
    }
    Ok(())
}

/// json literal when it parses, the raw text otherwise
fn parse_arg(raw: &str) -> Value {
    serde_json::from_str::<serde_json::Value>(raw)
        .map(Value::from)
        .unwrap_or_else(|_| Value::from(raw))
}
