//! clvecadd
//!
//! Adds two integer vectors on an OpenCL CPU or GPU device and prints the
//! time spent in the kernel dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use clvecadd_cli::args::{Cli, split_known_args};
use clvecadd_cli::config::{LogFormat, RunConfig};
use clvecadd_cli::exit::{EXIT_CONFIG_FAIL, EXIT_OFFLOAD_FAIL, EXIT_SUCCESS};
use clvecadd_cli::output::execution_time_line;
use clvecadd_cli::workload::ramp_inputs;
use clvecadd_opencl::{DispatchOptions, add_opencl, load_kernel_source};
use std::io::IsTerminal;
use tracing::{debug, error, info};

fn main() {
    let (known, ignored) = split_known_args(std::env::args_os());
    let cli = Cli::parse_from(known);

    let config = match RunConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            setup_logging(&RunConfig::default());
            error!("Invalid configuration: {}", e);
            eprintln!("Error: invalid configuration: {e}");
            std::process::exit(EXIT_CONFIG_FAIL);
        }
    };
    setup_logging(&config);

    for arg in &ignored {
        debug!("Ignoring argument {:?}", arg);
    }

    match run(&cli, &config) {
        Ok(seconds) => {
            println!("{}", execution_time_line(seconds));
            std::process::exit(EXIT_SUCCESS);
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            error!("{}", e);
            let mut source = e.source();
            while let Some(err) = source {
                error!("  Caused by: {}", err);
                source = err.source();
            }
            std::process::exit(EXIT_OFFLOAD_FAIL);
        }
    }
}

fn run(cli: &Cli, config: &RunConfig) -> Result<f64> {
    let class = cli.device_class();
    info!("Adding {} element vectors on the {} device", config.element_count, class);

    let source = load_kernel_source(config.kernel_path.as_deref())?;
    let (a, b) = ramp_inputs(config.element_count);
    let mut c = vec![0; config.element_count];
    let options = DispatchOptions { max_work_group_size: config.work_group_size };

    add_opencl(class, &source, &mut c, &a, &b, options)
        .with_context(|| format!("vector addition on the {class} device"))
}

/// Install the global subscriber. Logs go to stderr; stdout carries only the
/// result line.
fn setup_logging(config: &RunConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    match config.log_format {
        LogFormat::Json => {
            subscriber.json().with_timer(tracing_subscriber::fmt::time::uptime()).init();
        }
        LogFormat::Pretty => subscriber.pretty().init(),
        LogFormat::Compact => subscriber.compact().init(),
    }
}
