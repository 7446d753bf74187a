use clap::Parser;
use laneboard::cli::commands::Cli;
use laneboard::io::{config_io, logging};

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = config_io::load_config(cli.config.as_deref())?;
    logging::init_logging(cli.log_file.as_deref())?;
    let db_path = config_io::resolve_db_path(cli.db.as_deref(), &config);
    laneboard::tui::run(&db_path, &config)
}
