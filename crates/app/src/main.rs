use std::process;

use tracing_subscriber::filter::LevelFilter;

mod headless;
mod logging;

fn main() {
    let log_level_state = logging::setup_tracing(LevelFilter::INFO);

    let args: Vec<String> = std::env::args().collect();
    let parsed = match headless::parse_headless_args(&args) {
        Ok(parsed) => parsed,
        Err(err) => {
            eprintln!("flexkit: {err}");
            process::exit(1);
        }
    };
    if let Some(level) = parsed.log_level {
        logging::set_log_level(&log_level_state, level);
    }

    tracing::info!("FlexKit export starting");
    if let Err(err) = headless::run(&parsed) {
        tracing::error!("{err}");
        eprintln!("flexkit: {err}");
        process::exit(1);
    }
}
