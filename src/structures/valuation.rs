//! The value of an atom on some (partial) valuation.

/// Truth value of an atom, as reported to a user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TruthValue {
    True,
    False,
    Undefined,
}

impl From<Option<bool>> for TruthValue {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => Self::True,
            Some(false) => Self::False,
            None => Self::Undefined,
        }
    }
}

impl From<bool> for TruthValue {
    fn from(value: bool) -> Self {
        match value {
            true => Self::True,
            false => Self::False,
        }
    }
}

impl std::fmt::Display for TruthValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::True => write!(f, "true"),
            Self::False => write!(f, "false"),
            Self::Undefined => write!(f, "undefined"),
        }
    }
}

impl std::str::FromStr for TruthValue {
    type Err = ();

    /// Only `true` and `false` are read, as an undefined value is never supplied by a user.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "true" => Ok(Self::True),
            "false" => Ok(Self::False),
            _ => Err(()),
        }
    }
}
