use clap::Parser;
use std::path::PathBuf;

/// Fetch one subject's infobox facts and store them as YAML records.
#[derive(Parser, Debug)]
#[command(name = "importer")]
#[command(about = "Import infobox facts for one subject into YAML records")]
#[command(version)]
pub struct Cli {
    #[arg(
        short,
        long,
        help = "Directory the YAML records are written to (falls back to info_dir from the config)"
    )]
    pub info: Option<PathBuf>,

    #[arg(short, long, help = "Scraper to run, matched case-insensitively (e.g. wikipedia)")]
    pub scraper: String,

    #[arg(short, long, help = "Subject to look up, e.g. an article title")]
    pub page: String,

    #[arg(short, long, help = "YAML configuration file (default: ./finder.yaml if present)")]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_short_flags() {
        let cli = Cli::try_parse_from([
            "importer",
            "-i",
            "info",
            "-s",
            "Wikipedia",
            "-p",
            "Lucky Number Slevin",
        ])
        .unwrap();
        assert_eq!(cli.info, Some(PathBuf::from("info")));
        assert_eq!(cli.scraper, "Wikipedia");
        assert_eq!(cli.page, "Lucky Number Slevin");
        assert!(cli.config.is_none());
    }

    #[test]
    fn parses_long_flags() {
        let cli = Cli::try_parse_from([
            "importer",
            "--scraper",
            "wikipedia",
            "--page",
            "Memento",
            "--config",
            "custom.yaml",
        ])
        .unwrap();
        assert!(cli.info.is_none());
        assert_eq!(cli.config, Some(PathBuf::from("custom.yaml")));
    }

    #[test]
    fn page_and_scraper_are_required() {
        assert!(Cli::try_parse_from(["importer", "-s", "wikipedia"]).is_err());
        assert!(Cli::try_parse_from(["importer", "-p", "Memento"]).is_err());
    }
}
