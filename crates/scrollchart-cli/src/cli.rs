//! Command line arguments
//!
//! Every flag is optional and overrides the matching config file value.

use std::path::PathBuf;

use clap::Parser;
use scrollchart_core::ChartConfig;

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// CSV file with one row per month
    pub csv: Option<PathBuf>,

    /// Number of months shown at once
    #[arg(long)]
    pub rows: Option<usize>,

    /// Delay between playback steps, in milliseconds
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Duration of the bar transition after each step, in milliseconds
    #[arg(long)]
    pub transition_ms: Option<u64>,

    /// Start playing as soon as the chart is shown
    #[arg(long)]
    pub autoplay: bool,

    /// Config file (default: platform config dir, scrollchart/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Header of the year-month column
    #[arg(long)]
    pub date_column: Option<String>,

    /// Header of the rate column
    #[arg(long)]
    pub rate_column: Option<String>,

    /// Log file (default: platform cache dir, scrollchart/scrollchart.log)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Print the effective config as TOML and exit
    #[arg(long)]
    pub print_config: bool,
}

impl Args {
    /// Overlay the flags that were given onto `config`
    pub fn apply(&self, config: &mut ChartConfig) {
        if let Some(csv) = &self.csv {
            config.csv_path = csv.clone();
        }
        if let Some(rows) = self.rows {
            config.visible_rows = rows;
        }
        if let Some(ms) = self.interval_ms {
            config.tick_interval_ms = ms;
        }
        if let Some(ms) = self.transition_ms {
            config.transition_ms = ms;
        }
        if self.autoplay {
            config.autoplay = true;
        }
        if let Some(name) = &self.date_column {
            config.columns.date = name.clone();
        }
        if let Some(name) = &self.rate_column {
            config.columns.rate = name.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_keep_config() {
        let args = Args::try_parse_from(["scrollchart"]).unwrap();
        let mut config = ChartConfig {
            visible_rows: 12,
            autoplay: true,
            ..ChartConfig::default()
        };
        let before = config.clone();
        args.apply(&mut config);
        assert_eq!(config, before);
    }

    #[test]
    fn test_flags_override_config() {
        let args = Args::try_parse_from([
            "scrollchart",
            "data.csv",
            "--rows",
            "5",
            "--interval-ms",
            "250",
            "--transition-ms",
            "0",
            "--autoplay",
            "--rate-column",
            "rate",
        ])
        .unwrap();
        let mut config = ChartConfig::default();
        args.apply(&mut config);

        assert_eq!(config.csv_path, PathBuf::from("data.csv"));
        assert_eq!(config.visible_rows, 5);
        assert_eq!(config.tick_interval_ms, 250);
        assert_eq!(config.transition_ms, 0);
        assert!(config.autoplay);
        assert_eq!(config.columns.rate, "rate");
        assert_eq!(config.columns.date, "yearAndMonth");
    }

    #[test]
    fn test_rejects_bad_numbers() {
        assert!(Args::try_parse_from(["scrollchart", "--rows", "-3"]).is_err());
        assert!(Args::try_parse_from(["scrollchart", "--interval-ms", "soon"]).is_err());
    }
}
