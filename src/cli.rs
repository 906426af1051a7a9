//! Command-line interface for cgoexport.

use clap::{ArgAction, Parser};
use std::io::{self, IsTerminal};
use std::path::PathBuf;

use crate::config::{Config, OutputFormat};
use crate::report;
use crate::runner::Runner;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_NOT_FOUND: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Extract cgo-exported function signatures from a Go source file.
///
/// Functions whose doc comment ends with an `//export` line are listed
/// with their flattened parameters and results. Recognized C types are
/// `*C.char` and `C.int`; anything else is reported as N/A.
#[derive(Parser)]
#[command(name = "cgoexport")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Go source file to inspect
    pub path: PathBuf,

    /// Output format: text or json
    #[arg(short, long)]
    pub format: Option<String>,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Exit successfully even if no exported functions are found
    #[arg(long)]
    pub allow_empty: bool,

    /// Extract from files with syntax errors
    #[arg(long)]
    pub allow_parse_errors: bool,

    /// Do not warn about unsupported parameter or result types
    #[arg(long)]
    pub no_warn_unknown: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    fn log_level(&self) -> Option<log::LevelFilter> {
        if self.quiet {
            return Some(log::LevelFilter::Error);
        }
        match self.verbose {
            0 => None,
            1 => Some(log::LevelFilter::Debug),
            _ => Some(log::LevelFilter::Trace),
        }
    }

    /// Merge file config with command-line overrides.
    fn effective_config(&self, mut config: Config) -> Config {
        if let Some(format) = &self.format {
            config.format = Some(format.clone());
        }
        if self.allow_empty {
            config.allow_empty = Some(true);
        }
        if self.allow_parse_errors {
            config.allow_parse_errors = Some(true);
        }
        if self.no_warn_unknown {
            config.warn_unknown = Some(false);
        }
        config
    }
}

/// Initialize logging. `RUST_LOG` applies unless -v/-q is given.
pub fn init_logging(cli: &Cli) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(level) = cli.log_level() {
        builder.filter_level(level);
    }
    builder.format_timestamp(None);
    let _ = builder.try_init();
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let path = match &cli.config {
        Some(p) => Some(p.clone()),
        None => Config::discover(&std::env::current_dir()?),
    };

    let config = match path {
        Some(p) => {
            log::debug!("using config {}", p.display());
            Config::parse_file(&p)?
        }
        None => Config::default(),
    };

    let config = cli.effective_config(config);
    config.validate()?;
    Ok(config)
}

/// Run extraction and print the result.
pub fn run(cli: &Cli) -> anyhow::Result<i32> {
    let config = match load_config(cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };
    let format = config.output_format()?;

    let file_report = match Runner::from_config(&config).run(&cli.path) {
        Ok(r) => r,
        Err(e) if e.is_no_exports() => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_NOT_FOUND);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Json => report::write_json(&mut out, &file_report)?,
        OutputFormat::Text => {
            let color = io::stdout().is_terminal();
            report::write_text(&mut out, &file_report, color)?;
        }
    }

    if !cli.quiet {
        report::write_summary(&mut io::stderr(), &file_report)?;
    }

    Ok(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        let cli = Cli::try_parse_from(["cgoexport", "lib.go", "-f", "json", "-vv"]).unwrap();
        assert_eq!(cli.path, PathBuf::from("lib.go"));
        assert_eq!(cli.format.as_deref(), Some("json"));
        assert_eq!(cli.log_level(), Some(log::LevelFilter::Trace));
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["cgoexport", "lib.go", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "cgoexport",
            "lib.go",
            "--format",
            "text",
            "--allow-empty",
            "--no-warn-unknown",
        ])
        .unwrap();

        let file_config = Config {
            format: Some("json".to_string()),
            allow_empty: Some(false),
            ..Default::default()
        };
        let config = cli.effective_config(file_config);

        assert_eq!(config.output_format().unwrap(), OutputFormat::Text);
        assert!(config.should_allow_empty());
        assert!(!config.should_warn_unknown());
        assert!(!config.should_allow_parse_errors());
    }
}
