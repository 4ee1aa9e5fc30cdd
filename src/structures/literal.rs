//! Literals are atoms paired with a (boolean) polarity.
//!
//! ```rust
//! # use otter_debug::structures::literal::{CLiteral, Literal};
//! let literal = CLiteral::new(79, true);
//!
//! assert!(literal.polarity());
//! assert_eq!(literal.atom(), 79);
//! assert!(!literal.negate().polarity());
//! assert_eq!(literal.negate().negate(), literal);
//! ```
//!
//! Literals are ordered by atom and then polarity, with `false` strictly less than `true`.

use crate::structures::atom::Atom;

/// Something which has methods for returning an atom and a polarity, etc.
pub trait Literal: std::cmp::Ord + std::hash::Hash {
    /// A fresh literal, specified by pairing an atom with a boolean.
    fn new(atom: Atom, polarity: bool) -> Self;

    /// The negation of the literal.
    fn negate(&self) -> Self;

    /// The atom of the literal.
    fn atom(&self) -> Atom;

    /// The polarity of the literal.
    fn polarity(&self) -> bool;

    /// The literal in it's integer form, with sign indicating polarity.
    fn as_int(&self) -> isize;

    /// A dense index for the literal, used to index watch lists.
    fn index(&self) -> usize;
}

/// The canonical representation of a literal, as an atom paired with a boolean.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CLiteral {
    atom: Atom,
    polarity: bool,
}

impl Literal for CLiteral {
    fn new(atom: Atom, polarity: bool) -> Self {
        Self { atom, polarity }
    }

    fn negate(&self) -> Self {
        Self {
            atom: self.atom,
            polarity: !self.polarity,
        }
    }

    fn atom(&self) -> Atom {
        self.atom
    }

    fn polarity(&self) -> bool {
        self.polarity
    }

    fn as_int(&self) -> isize {
        match self.polarity {
            true => self.atom as isize,
            false => -(self.atom as isize),
        }
    }

    fn index(&self) -> usize {
        (self.atom as usize) * 2 + self.polarity as usize
    }
}

impl PartialOrd for CLiteral {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CLiteral {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        if self.atom == other.atom {
            self.polarity.cmp(&other.polarity)
        } else {
            self.atom.cmp(&other.atom)
        }
    }
}

impl std::ops::Neg for CLiteral {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl std::fmt::Display for CLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_int())
    }
}

impl TryFrom<isize> for CLiteral {
    type Error = ();

    /// Reads a DIMACS style literal. Zero is not a literal.
    fn try_from(value: isize) -> Result<Self, Self::Error> {
        match value {
            0 => Err(()),
            _ => {
                let atom = Atom::try_from(value.unsigned_abs()).map_err(|_| ())?;
                Ok(CLiteral::new(atom, value.is_positive()))
            }
        }
    }
}
