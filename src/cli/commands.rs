use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "lb", about = concat!("laneboard v", env!("CARGO_PKG_VERSION"), " - a three-lane task board for the terminal"), version)]
pub struct Cli {
    /// Task database file [default: ~/.laneboard.db]
    #[arg(short = 'd', long = "db")]
    pub db: Option<PathBuf>,

    /// Config file [default: <config dir>/laneboard/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write logs to this file (filter with LANEBOARD_LOG)
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_flags() {
        let cli = Cli::try_parse_from(["lb", "-d", "/tmp/x.db", "--log-file", "/tmp/lb.log"]).unwrap();
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/x.db")));
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/lb.log")));
        assert_eq!(cli.config, None);

        let cli = Cli::try_parse_from(["lb", "--db=/a.db", "--config", "c.toml"]).unwrap();
        assert_eq!(cli.db, Some(PathBuf::from("/a.db")));
        assert_eq!(cli.config, Some(PathBuf::from("c.toml")));
    }

    #[test]
    fn no_subcommands() {
        assert!(Cli::try_parse_from(["lb", "list"]).is_err());
    }
}
