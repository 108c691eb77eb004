use std::fs::File;
use std::process::ExitCode;
use std::sync::Arc;

use acrodef::cli::{self, OutputFormat};
use acrodef::core::SearchController;
use acrodef::core::config::{self, CliOverrides};
use acrodef::lookup::AcromineClient;
use acrodef::tui;
use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};

#[derive(Parser)]
#[command(name = "acrodef", about = "Look up acronym definitions from the Acromine dictionary")]
struct Args {
    /// Acronym to look up once and print; omit to open the interactive search
    acronym: Option<String>,

    /// Output format for one-shot lookups
    #[arg(short, long, default_value_t, value_enum)]
    format: OutputFormat,

    /// Dictionary service base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Log file path
    #[arg(long)]
    log_file: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<ExitCode> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let loaded = config::load_config();
    let default_config = config::AcrodefConfig::default();
    let file_config = match &loaded {
        Ok((file_config, _)) => file_config,
        Err(_) => &default_config,
    };
    let resolved = config::resolve(
        file_config,
        &CliOverrides {
            base_url: args.base_url.as_deref(),
            log_file: args.log_file.as_deref(),
        },
    );

    // Initialize file logger
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    // Config loading ran before the logger existed; report it now
    match &loaded {
        Ok((file_config, source)) => {
            log::info!("Config: {}", source);
            log::debug!("Config: {:?}", file_config);
        }
        Err(e) => {
            log::warn!("Using default config: {}", e);
            eprintln!("acrodef: {e}; using defaults");
        }
    }
    for warning in &resolved.warnings {
        log::warn!("{}", warning);
    }
    log::info!("acrodef starting up against {}", resolved.base_url);

    let client = AcromineClient::new(Some(resolved.base_url.clone()), resolved.timeout)
        .map_err(std::io::Error::other)?;
    let controller = SearchController::new(Arc::new(client));

    match args.acronym {
        Some(acronym) => {
            let ok = cli::run_once(&controller, &acronym, args.format).await?;
            Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
        None => {
            tui::run(controller)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
