//! CLI commands for race-report-api.
//!
//! Runs the HTTP server, or prints the same reports to stdout.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::AppConfig;
use crate::error::ReportError;
use crate::format::{to_report_json, to_report_xml};
use crate::report::{
    driver_directory, driver_statistic, full_report_as_lines, full_report_as_mapping,
    sectioned_lines,
};
use crate::storage::RacerStore;
use crate::types::SortOrder;

#[derive(Parser)]
#[command(name = "race-report-api")]
#[command(version, about = "Race results report: JSON, XML and HTML views", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for the `report` command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Xml,
    /// Sectioned lines as shown on the HTML report
    Lines,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the API server
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,

        /// Results database override
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Print the full report
    Report {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Line order for the `lines` format (asc, desc)
        #[arg(short, long, default_value = "asc")]
        order: String,

        /// Results database override
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Print the driver directory, or one driver's statistic
    Drivers {
        /// Driver code, e.g. HAM
        #[arg(long)]
        driver_id: Option<String>,

        /// Results database override
        #[arg(short, long)]
        database: Option<PathBuf>,
    },
}

/// Load configuration and apply a database override.
pub fn load_config(database: Option<PathBuf>) -> anyhow::Result<AppConfig> {
    let mut config = AppConfig::load()?;
    if let Some(path) = database {
        config.storage.database_path = path.to_string_lossy().to_string();
    }
    Ok(config)
}

/// Render the full report in the requested format.
pub fn render_report(
    config: &AppConfig,
    format: OutputFormat,
    order: SortOrder,
) -> Result<String, ReportError> {
    let store = RacerStore::new(&config.storage.database_path);
    match format {
        OutputFormat::Json => to_report_json(&full_report_as_mapping(&store)?),
        OutputFormat::Xml => to_report_xml(&full_report_as_mapping(&store)?),
        OutputFormat::Lines => {
            let cfg = &config.report;
            let lines = full_report_as_lines(&store, &cfg.separator)?;
            Ok(sectioned_lines(lines, cfg.best_results, cfg.borderline_length, order).join("\n"))
        }
    }
}

/// Render the driver directory as `CODE name` lines, or a single driver.
pub fn render_drivers(config: &AppConfig, driver_id: Option<&str>) -> Result<String, ReportError> {
    let store = RacerStore::new(&config.storage.database_path);
    match driver_id {
        Some(code) => {
            let stat = driver_statistic(&store, code)?;
            Ok(format!("{}\n{}", stat.name, stat.driver_statistic))
        }
        None => {
            let drivers = driver_directory(&store)?;
            Ok(drivers
                .iter()
                .map(|(code, name)| format!("{} {}", code, name))
                .collect::<Vec<_>>()
                .join("\n"))
        }
    }
}

/// Run the `report` command.
pub fn run_report(
    format: OutputFormat,
    order: String,
    database: Option<PathBuf>,
) -> anyhow::Result<()> {
    let config = load_config(database)?;
    let order: SortOrder = order.parse()?;

    let output = render_report(&config, format, order)?;
    println!("{}", output);
    Ok(())
}

/// Run the `drivers` command.
pub fn run_drivers(driver_id: Option<String>, database: Option<PathBuf>) -> anyhow::Result<()> {
    let config = load_config(database)?;

    let output = render_drivers(&config, driver_id.as_deref().filter(|c| !c.is_empty()))?;
    println!("{}", output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::schema::{create_test_store, monaco_racers};
    use tempfile::TempDir;

    fn monaco_config() -> (TempDir, AppConfig) {
        let dir = tempfile::tempdir().unwrap();
        let path = create_test_store(dir.path(), &monaco_racers()).unwrap();
        let mut config = AppConfig::default();
        config.storage.database_path = path.to_string_lossy().to_string();
        (dir, config)
    }

    #[test]
    fn test_cli_parses_report_command() {
        let cli = Cli::try_parse_from(["race-report-api", "report", "--format", "xml"]).unwrap();
        match cli.command {
            Commands::Report { format, order, database } => {
                assert_eq!(format, OutputFormat::Xml);
                assert_eq!(order, "asc");
                assert!(database.is_none());
            }
            _ => panic!("expected report command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["race-report-api", "report", "--format", "csv"]).is_err());
    }

    #[test]
    fn test_render_report_lines() {
        let (_dir, mut config) = monaco_config();
        config.report.best_results = 1;
        config.report.borderline_length = 5;

        let output = render_report(&config, OutputFormat::Lines, SortOrder::Desc).unwrap();
        assert_eq!(
            output,
            "2 |Valtteri Bottas |Mercedes |+1.5s\n-----\n1 |Lewis Hamilton |Mercedes |1:30:45.997"
        );
    }

    #[test]
    fn test_render_report_json() {
        let (_dir, config) = monaco_config();
        let output = render_report(&config, OutputFormat::Json, SortOrder::Asc).unwrap();
        assert!(output.contains("\"HAM\" = {"));
    }

    #[test]
    fn test_render_drivers() {
        let (_dir, config) = monaco_config();

        let output = render_drivers(&config, None).unwrap();
        assert_eq!(output, "HAM Lewis Hamilton\nBOT Valtteri Bottas");

        let output = render_drivers(&config, Some("HAM")).unwrap();
        assert_eq!(output, "Lewis Hamilton\n1 |Mercedes |1:30:45.997");

        assert!(matches!(
            render_drivers(&config, Some("ZZZ")),
            Err(ReportError::DriverNotFound(_))
        ));
    }
}
