//! Error types used in the library.
//!
//! - Most of these are very unlikely to occur during use.
//! - Some are internally expected, e.g. BCP errors are used to control the flow of a solve.
//! - Some are recoverable and reported to a user, e.g. a [HistoryError] from a malformed history file.
//!
//! Names of the error enums, for the most part, overlap with corresponding structs.
//  As such, throughout the library err::{self} is often used to prefix use of the types with `err::`.

use crate::db::ClauseKey;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Analysis(AnalysisError),
    BCP(BCPError),
    ClauseDB(ClauseDBError),
    Config(ConfigError),
    History(HistoryError),
    Names(NamesError),
    Parse(ParseError),
    State(StateError),

    Backjump,
}

/// Noted errors during conflict analysis.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AnalysisError {
    /// Somehow resolution resolved to an empty clause.
    EmptyResolution,

    /// Resolution failed to terminate with an asserting clause.
    NoAssertion,

    /// A literal on the trail at some positive level had no reason, and was not a decision.
    MissingReason,
}

impl From<AnalysisError> for ErrorKind {
    fn from(e: AnalysisError) -> Self {
        ErrorKind::Analysis(e)
    }
}

/// Noted errors during boolean constraint propagation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BCPError {
    /// A conflict was found.
    /// This is expected from time to time, and a learning opportunity.
    Conflict(ClauseKey),

    /// Some corruption in the watched literals of a clause.
    /// This is unexpected.
    CorruptWatch,
}

impl From<BCPError> for ErrorKind {
    fn from(e: BCPError) -> Self {
        ErrorKind::BCP(e)
    }
}

/// Errors in the clause database.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ClauseDBError {
    /// A clause is missing.
    Missing,

    /// Some attempt was made to store an empty clause.
    EmptyClause,

    /// A clause was added after some decision has been made.
    DecisionMade,
}

impl From<ClauseDBError> for ErrorKind {
    fn from(e: ClauseDBError) -> Self {
        ErrorKind::ClauseDB(e)
    }
}

/// Errors when configuring a context or session.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ConfigError {
    /// A value outside the permitted range of the named option.
    OutOfRange {
        name: &'static str,
        min: String,
        max: String,
    },
}

impl From<ConfigError> for ErrorKind {
    fn from(e: ConfigError) -> Self {
        ErrorKind::Config(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfRange { name, min, max } => {
                write!(f, "{name} requires a value between {min} and {max}")
            }
        }
    }
}

/// Errors when reading or writing a query history.
///
/// Each of these is recoverable, and reported to a user without any change to a session.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum HistoryError {
    /// The file could not be read.
    Read(std::io::ErrorKind),

    /// The file could not be written.
    Write(std::io::ErrorKind),

    /// A line without both a name and a value.
    MalformedLine(usize),

    /// A line with a name unknown to the program.
    UnknownName(usize, String),

    /// A line with a value other than `true` or `false`.
    UnknownValue(usize, String),
}

impl From<HistoryError> for ErrorKind {
    fn from(e: HistoryError) -> Self {
        ErrorKind::History(e)
    }
}

impl std::fmt::Display for HistoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read(kind) => write!(f, "unable to read file ({kind})"),
            Self::Write(kind) => write!(f, "unable to write file ({kind})"),
            Self::MalformedLine(line) => write!(f, "line {line} is not of the form '<name> <true|false>'"),
            Self::UnknownName(line, name) => write!(f, "line {line} names the unknown atom '{name}'"),
            Self::UnknownValue(line, value) => write!(f, "line {line} has the unknown value '{value}'"),
        }
    }
}

/// Errors when naming atoms.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum NamesError {
    /// The name is already used for some other atom.
    DuplicateName(String),
}

impl From<NamesError> for ErrorKind {
    fn from(e: NamesError) -> Self {
        ErrorKind::Names(e)
    }
}

/// Errors when parsing a program.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// The source could not be read.
    Read(std::io::ErrorKind),

    /// The problem specification (`p cnf <atoms> <clauses>`) is malformed, at the given line.
    ProblemSpecification(usize),

    /// Some clause or annotation appeared before the problem specification, at the given line.
    MissingProblemSpecification(usize),

    /// A token which should be a literal, at the given line.
    Literal(usize, String),

    /// An atom above the count declared in the problem specification, at the given line.
    AtomOutOfRange(usize, isize),

    /// A malformed name annotation (`c v <atom> <name>`), at the given line.
    Name(usize),

    /// A name given to two distinct atoms, at the given line.
    DuplicateName(usize, String),

    /// A malformed rule annotation (`c d <constant> <n> <variables> <rule>`), at the given line.
    Rule(usize),

    /// The final clause is missing its terminating `0`.
    UnterminatedClause,
}

impl From<ParseError> for ErrorKind {
    fn from(e: ParseError) -> Self {
        ErrorKind::Parse(e)
    }
}

/// Errors in the state of a context or session.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StateError {
    /// A solve returned unsatisfiable, though no unsatisfiable core is available.
    MissingCore,

    /// A solve was requested while some decision remains on the trail.
    SolveAboveZero,

    /// A solve finished in a state other than satisfiable or unsatisfiable.
    UnknownResult,
}

impl From<StateError> for ErrorKind {
    fn from(e: StateError) -> Self {
        ErrorKind::State(e)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(e) => write!(f, "{e}"),
            Self::History(e) => write!(f, "{e}"),
            other => write!(f, "{other:?}"),
        }
    }
}
