use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use smartcalc::{
    evaluate_expression, substitute, SampleSet, SamplerConfig, Viewport, DEFAULT_SAMPLE_COUNT,
    ERROR_SENTINEL, MAX_VALUE_AREA,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// smartcalc evaluates single-line arithmetic expressions, and samples
/// one-variable functions for plotting.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate expressions, printing one result per line.
    Eval {
        /// Print the reason of failures instead of "Error".
        #[arg(short, long)]
        diagnostics: bool,

        /// Value substituted for the variable before evaluation.
        #[arg(short = 'x', long = "x", allow_negative_numbers = true)]
        value: Option<f64>,

        /// Name of the variable replaced by `--x`.
        #[arg(long, default_value = "x")]
        var: String,

        #[arg(required = true, allow_hyphen_values = true)]
        expressions: Vec<String>,
    },
    /// Sample an expression over an interval, printing `x,y` lines.
    Plot {
        /// Name of the variable of the expression.
        #[arg(long, default_value = "x")]
        var: String,

        /// Left edge of the interval.
        #[arg(long, default_value_t = -10.0, allow_negative_numbers = true)]
        from: f64,

        /// Right edge of the interval.
        #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
        to: f64,

        /// Number of samples.
        #[arg(long, default_value_t = DEFAULT_SAMPLE_COUNT)]
        count: usize,

        /// Absolute limit of the interval edges.
        #[arg(long, default_value_t = MAX_VALUE_AREA)]
        bound: f64,

        /// Print a JSON document instead of `x,y` lines.
        #[arg(long)]
        json: bool,

        #[arg(allow_hyphen_values = true)]
        expression: String,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<ExitCode> {
    init_tracing();
    let args = Args::parse();

    match args.command {
        Command::Eval {
            diagnostics,
            value,
            var,
            expressions,
        } => {
            let mut failed = false;
            for expression in &expressions {
                let expression = match value {
                    Some(value) => substitute(expression, &var, value),
                    None => expression.clone(),
                };
                match evaluate_expression(&expression) {
                    Ok(result) => println!("{}", result),
                    Err(kind) => {
                        failed = true;
                        if diagnostics {
                            println!("{}: {}", ERROR_SENTINEL, kind);
                        } else {
                            println!("{}", ERROR_SENTINEL);
                        }
                    }
                }
            }
            Ok(if failed {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
        Command::Plot {
            var,
            from,
            to,
            count,
            bound,
            json,
            expression,
        } => {
            let config = SamplerConfig {
                variable: var,
                count,
                bound,
                viewport: Viewport::new(from, to),
            };
            let samples = config
                .sample(&expression)
                .with_context(|| format!("cannot sample '{}'", expression))?;
            info!(points = samples.len(), gaps = samples.gaps(), "plot ready");
            if json {
                print_json(&expression, &config, &samples)?;
            } else {
                print_csv(&samples);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn print_csv(samples: &SampleSet) {
    for point in samples.points() {
        match point.y {
            Some(y) => println!("{},{}", point.x, y),
            None => println!("{},", point.x),
        }
    }
}

fn print_json(expression: &str, config: &SamplerConfig, samples: &SampleSet) -> anyhow::Result<()> {
    let document = serde_json::json!({
        "expression": expression,
        "config": config,
        "y_range": samples.y_range(),
        "samples": samples,
    });
    let rendered = serde_json::to_string_pretty(&document).context("cannot render samples")?;
    println!("{}", rendered);
    Ok(())
}
