/*!
Configuration of a context, and of a debug session.

All configuration for a context is contained within a [Config].
Configuration of the exploration done when selecting a query is contained within a [DebugConfig], held by a session rather than a context.
*/

mod config_option;
pub use config_option::ConfigOption;

use clap::ValueEnum;
use serde::Serialize;

use crate::generic::luby::LubyRepresentation;

/// Representation for the probability of choosing `true`
pub type PolarityLean = f64;

/// Representation for the probability of making a random decision
pub type RandomDecisionBias = f64;

/// Representation for the activity of an atom.
pub type Activity = f64;

/// The primary configuration structure.
#[derive(Clone, Debug)]
pub struct Config {
    /// The amount to bump the activity of an atom by, when involved in a conflict.
    pub atom_bump: ConfigOption<Activity>,

    /// The decay to apply to activity after each conflict.
    pub atom_decay: ConfigOption<Activity>,

    /// The `u` value to multiply the luby sequence by when determining whether to perform a restart.
    pub luby_u: ConfigOption<LubyRepresentation>,

    /// The probability of assigning positive polarity to a atom when freely choosing a atom.
    pub polarity_lean: ConfigOption<PolarityLean>,

    /// The probability of making a random decision, as opposed to choosing the most active atom.
    pub random_decision_bias: ConfigOption<RandomDecisionBias>,

    /// Default to the last set value of a atom when choosing a value for the atom, otherwise decide with the polarity lean.
    pub phase_saving: ConfigOption<bool>,

    /// Permit (scheduled) restarts.
    pub restart: ConfigOption<bool>,

    /// The time limit for a solve, with zero for no limit.
    pub time_limit: ConfigOption<std::time::Duration>,

    /// Identify the failed assumptions of an unsatisfiable solve.
    pub compute_cores: ConfigOption<bool>,

    /// Shrink failed assumptions by solving under the failed assumptions, until no further shrinking happens.
    pub minimize_cores: ConfigOption<bool>,

    /// Seed for the source of randomness.
    pub seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            atom_bump: ConfigOption {
                name: "atom_bump",
                min: Activity::MIN_POSITIVE,
                max: Activity::MAX,
                value: 1.0,
            },

            atom_decay: ConfigOption {
                name: "atom_decay",
                min: Activity::MIN_POSITIVE,
                max: 1.0,
                value: 0.95,
            },

            luby_u: ConfigOption {
                name: "luby",
                min: LubyRepresentation::MIN,
                max: LubyRepresentation::MAX,
                value: 128,
            },

            polarity_lean: ConfigOption {
                name: "polarity_lean",
                min: 0.0,
                max: 1.0,
                value: 0.0,
            },

            random_decision_bias: ConfigOption {
                name: "random_decision_bias",
                min: 0.0,
                max: 1.0,
                value: 0.0,
            },

            phase_saving: ConfigOption {
                name: "phase_saving",
                min: false,
                max: true,
                value: true,
            },

            restart: ConfigOption {
                name: "restart",
                min: false,
                max: true,
                value: true,
            },

            time_limit: ConfigOption {
                name: "time_limit",
                min: std::time::Duration::from_secs(0),
                max: std::time::Duration::MAX,
                value: std::time::Duration::from_secs(0),
            },

            compute_cores: ConfigOption {
                name: "compute_cores",
                min: false,
                max: true,
                value: true,
            },

            minimize_cores: ConfigOption {
                name: "minimize_cores",
                min: false,
                max: true,
                value: false,
            },

            seed: 0,
        }
    }
}

/// How to order candidates with equal scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TieBreak {
    #[default]
    /// Prefer atoms occurring in more rules of the core
    MostOccurrences,
    /// Prefer atoms occurring in fewer rules of the core
    FewestOccurrences,
}

impl std::fmt::Display for TieBreak {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::MostOccurrences => write!(f, "most-occurrences"),
            Self::FewestOccurrences => write!(f, "fewest-occurrences"),
        }
    }
}

/// Configuration of a debug session.
#[derive(Clone, Debug)]
pub struct DebugConfig {
    /// The bound on time spent exploring relaxations of a core when selecting a query.
    pub query_timeout: ConfigOption<std::time::Duration>,

    /// The order of atoms with equal scores.
    pub tie_break: TieBreak,
}

impl Default for DebugConfig {
    fn default() -> Self {
        DebugConfig {
            query_timeout: ConfigOption {
                name: "query_timeout",
                min: std::time::Duration::from_millis(1),
                max: std::time::Duration::MAX,
                value: std::time::Duration::from_secs(3),
            },

            tie_break: TieBreak::default(),
        }
    }
}
