use std::io;
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::WrapErr;
use rectisweep::{Presentation, SweepFile, execute, init_logging};
use rectisweep_core::ToolchainBackend;

#[derive(Parser, Debug)]
#[command(name = "rectisweep")]
#[command(about = "Sweep two rectifier model parameters through an FMU simulator and plot the results")]
struct Args {
    /// Sweep configuration file (YAML); built-in defaults when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to the data directory (default: ~/.rectisweep/)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Print the results as a table instead of opening the chart
    #[arg(long)]
    no_display: bool,

    /// Print the default configuration as YAML and exit
    #[arg(long)]
    print_config: bool,
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".rectisweep")
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    if args.print_config {
        let yaml = SweepFile::default()
            .to_yaml()
            .wrap_err("failed to serialize default configuration")?;
        print!("{yaml}");
        return Ok(());
    }

    let data_dir = args.data_dir.unwrap_or_else(default_data_dir);
    let _guard = init_logging(&data_dir, &args.log_level)?;

    let file = match &args.config {
        Some(path) => SweepFile::load(path)?,
        None => SweepFile::default(),
    };

    let backend = ToolchainBackend::new(file.toolchain.clone(), file.build_dir(&data_dir));

    if args.no_display {
        let mut stdout = io::stdout().lock();
        execute(&backend, &file.model, &file.sweep, Presentation::Table(&mut stdout))?;
    } else {
        execute(&backend, &file.model, &file.sweep, Presentation::Interactive)?;
    }

    tracing::info!("Application shutting down");
    Ok(())
}
