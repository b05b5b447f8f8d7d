use clap::Parser;
use cinescope::ScreenMode;
use cinescope::core::config;
use cinescope::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "cinescope", about = "Browse and search a movie catalog from the terminal")]
struct Args {
    /// Screen to open with
    #[arg(short, long, value_enum)]
    mode: Option<ScreenMode>,

    /// Include adult titles in listings
    #[arg(long)]
    include_adult: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - the terminal belongs to the UI
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("cinescope.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config()?;
    let resolved = config::resolve(&file_config, args.mode, args.include_adult);

    log::info!(
        "Cinescope starting up: mode={:?}, include_adult={}, base_url={}",
        resolved.mode,
        resolved.include_adult,
        resolved.base_url
    );

    tui::run(resolved)?;
    Ok(())
}
