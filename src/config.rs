//! Configuration and CLI argument handling

use clap::Parser;

use crate::utils::TimeField;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "countdown-timer")]
#[command(about = "A countdown timer driven over HTTP")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Initial hours field, validated like typed input
    #[arg(long)]
    pub hours: Option<String>,

    /// Initial minutes field, validated like typed input
    #[arg(long)]
    pub minutes: Option<String>,

    /// Initial seconds field, validated like typed input
    #[arg(long)]
    pub seconds: Option<String>,

    /// Start the countdown right away
    #[arg(long)]
    pub start: bool,

    /// Start with sound off
    #[arg(long)]
    pub mute: bool,

    /// Shell command played as the alarm instead of the terminal bell
    #[arg(long)]
    pub alarm_command: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Field texts given on the command line
    pub fn initial_fields(&self) -> Vec<(TimeField, &str)> {
        TimeField::ALL
            .into_iter()
            .zip([&self.hours, &self.minutes, &self.seconds])
            .filter_map(|(field, text)| text.as_deref().map(|text| (field, text)))
            .collect()
    }
}
