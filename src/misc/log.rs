/*!
Miscelanous items related to [logging](log).

Calls to the log macro are made throughout the library.
No log implementation is provided by the library, though the binary may install one.
*/

/// Targets to be used within a [log]! macro.
pub mod targets {
    /// Logs related to [BCP](crate::procedures::bcp)
    pub const PROPAGATION: &str = "propagation";

    /// Logs related to [analysis](crate::procedures::analysis)
    pub const ANALYSIS: &str = "analysis";

    /// Logs related to [backjumping](crate::procedures::backjump)
    pub const BACKJUMP: &str = "backjump";

    /// Logs related to [failed assumptions](crate::procedures::core)
    pub const CORE: &str = "core";

    /// Logs related to [core minimization](crate::debug::quickxplain)
    pub const QUICKXPLAIN: &str = "quickxplain";

    /// Logs related to [query selection](crate::debug::query)
    pub const QUERY: &str = "query";

    /// Logs related to a [debug session](crate::debug::session)
    pub const SESSION: &str = "session";

    /// Logs related to [disjoint cores](crate::debug::disjoint)
    pub const DISJOINT: &str = "disjoint";

    /// Logs related to [building](crate::builder) a context
    pub const BUILDER: &str = "builder";
}
