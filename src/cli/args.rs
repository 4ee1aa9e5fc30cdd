use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::Serialize;

use otter_debug::{
    config::{Config, DebugConfig, TieBreak},
    types::err::{self},
};

/// The interface of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum InterfaceKind {
    #[default]
    /// A prompt, for use at a terminal
    Cli,
    /// A line based protocol, for use by some other program
    Wire,
}

/// Interactively debug an incoherent answer set program.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// The program to debug, in debug DIMACS.
    #[arg(required_unless_present = "help_markdown")]
    pub program: Option<PathBuf>,

    /// The interface to use.
    #[arg(short, long, value_enum, default_value_t = InterfaceKind::Cli)]
    pub interface: InterfaceKind,

    /// A history of assertions to make before the first command.
    #[arg(long)]
    pub history: Option<PathBuf>,

    /// The bound, in milliseconds, on exploration when selecting a query.
    #[arg(long, default_value_t = 3000)]
    pub query_timeout: u64,

    /// How to order candidates of a query with equal scores.
    #[arg(long, value_enum, default_value_t = TieBreak::MostOccurrences)]
    pub tie_break: TieBreak,

    /// The time limit, in seconds, for each solve, with zero for no limit.
    #[arg(long, default_value_t = 0)]
    pub time_limit: u64,

    /// The probability of choosing true when freely choosing a value.
    #[arg(long)]
    pub polarity_lean: Option<f64>,

    /// The probability of making a random decision.
    #[arg(long)]
    pub random_decision_bias: Option<f64>,

    /// The `u` value to multiply the luby sequence by when scheduling restarts.
    #[arg(long)]
    pub luby: Option<u32>,

    /// Prevent choices from being forgotten.
    #[arg(long)]
    pub no_restart: bool,

    /// Shrink the failed assumptions of each solve before minimizing a core.
    #[arg(long)]
    pub minimize_cores: bool,

    /// Seed for the source of randomness.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Print output without colour.
    #[arg(long)]
    pub no_style: bool,

    /// Print help in markdown format.
    #[arg(long, hide = true)]
    pub help_markdown: bool,
}

impl Args {
    /// The configuration of the solver, or an error if some value is outside the permitted range.
    pub fn config(&self) -> Result<Config, err::ConfigError> {
        let mut config = Config::default();

        config.time_limit.set(std::time::Duration::from_secs(self.time_limit))?;
        if let Some(lean) = self.polarity_lean {
            config.polarity_lean.set(lean)?;
        }
        if let Some(bias) = self.random_decision_bias {
            config.random_decision_bias.set(bias)?;
        }
        if let Some(u) = self.luby {
            config.luby_u.set(u)?;
        }
        config.restart.value = !self.no_restart;
        config.minimize_cores.value = self.minimize_cores;
        config.seed = self.seed;

        Ok(config)
    }

    /// The configuration of a session, or an error if some value is outside the permitted range.
    pub fn debug_config(&self) -> Result<DebugConfig, err::ConfigError> {
        let mut config = DebugConfig::default();
        config
            .query_timeout
            .set(std::time::Duration::from_millis(self.query_timeout))?;
        config.tie_break = self.tie_break;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut all = vec!["otter_debug", "program.cnf"];
        all.extend_from_slice(extra);
        Args::try_parse_from(all).unwrap()
    }

    #[test]
    fn defaults() {
        let args = args(&[]);
        let config = args.config().unwrap();
        assert_eq!(config.polarity_lean.value, 0.0);
        assert!(config.restart.value);

        let debug_config = args.debug_config().unwrap();
        assert_eq!(debug_config.query_timeout.value, std::time::Duration::from_secs(3));
        assert_eq!(debug_config.tie_break, TieBreak::MostOccurrences);
    }

    #[test]
    fn within_range() {
        let args = args(&["--polarity-lean", "0.75", "--query-timeout", "10", "--no-restart"]);
        assert_eq!(args.config().unwrap().polarity_lean.value, 0.75);
        assert!(!args.config().unwrap().restart.value);
        assert_eq!(
            args.debug_config().unwrap().query_timeout.value,
            std::time::Duration::from_millis(10)
        );
    }

    #[test]
    fn out_of_range_is_rejected() {
        let args = args(&["--query-timeout", "0", "--polarity-lean", "7.5"]);

        match args.config() {
            Err(err::ConfigError::OutOfRange { name, .. }) => assert_eq!(name, "polarity_lean"),
            Ok(_) => panic!("accepted a polarity lean of 7.5"),
        }

        match args.debug_config() {
            Err(err::ConfigError::OutOfRange { name, .. }) => assert_eq!(name, "query_timeout"),
            Ok(_) => panic!("accepted a query timeout of zero"),
        }
    }
}
