use std::time::Duration;

/// Counts for various things which count, roughly.
#[derive(Default)]
pub struct Counters {
    /// A count of every conflict seen during all solves.
    pub total_conflicts: usize,

    /// A count of conflicts seen since the last restart.
    ///
    /// As u32 rather than a usize for easier interaction with the luby sequence.
    pub fresh_conflicts: u32,

    /// A count of all decisions made.
    pub total_decisions: usize,

    /// The number of restarts through all solves.
    pub restarts: usize,

    /// The number of solves requested.
    pub solves: usize,

    /// The time taken during the most recent solve.
    pub time: Duration,
}
