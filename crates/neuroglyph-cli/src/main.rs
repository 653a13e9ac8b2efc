use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[cfg(target_env = "msvc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use neuroglyph_cli::{Command, NeuroglyphOptions, run_main};

#[derive(Parser, Debug)]
#[command(
    name = "neuroglyph",
    about = "neuroglyph: seeded cyber brains and pixel-font banners as SVG",
    version
)]
pub struct Cli {
    /// TOML file with [brain], [pixel_text], [logo] and [output] sections
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Directory for generated files (default: assets)
    #[arg(long = "out-dir", value_name = "DIR", global = true)]
    out_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

pub fn run(args: Cli) -> ExitCode {
    let total_start = Instant::now();

    // Initialize tracing subscriber for logging
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }

    let opts = NeuroglyphOptions {
        config: args.config,
        out_dir: args.out_dir,
        command: args.command,
    };

    let code = match run_main(&opts) {
        Ok(report) => {
            for generated in &report.generated {
                println!("{} generated: {}", generated.what, generated.path.display());
            }
            report.exit_code()
        }
        Err(e) => {
            eprintln!("Error: {e}");
            tracing::error!(error = %e, "execution failed");
            1
        }
    };

    let total_secs = total_start.elapsed().as_secs_f64();
    tracing::info!(total_secs, "complete");
    ExitCode::from(code)
}

pub fn main() -> ExitCode {
    let args = Cli::parse();
    run(args)
}
