/*!
Clauses, as (disjunctions of) literals.

A clause is anything which can be viewed as a slice of [CLiteral]s.
The [Clause] trait supplies a few methods of interest on such slices.
*/

use std::collections::HashSet;

use crate::structures::{
    atom::Atom,
    literal::{CLiteral, Literal},
};

/// The canonical representation of a clause.
pub type CClause = Vec<CLiteral>;

/// Methods of interest on a clause.
pub trait Clause {
    /// The clause as a string of DIMACS literals, without the terminating `0`.
    fn as_dimacs(&self) -> String;

    /// Whether the clause contains a literal and its negation.
    fn is_tautology(&self) -> bool;

    /// The atoms of the clause, in order of appearance.
    fn atoms(&self) -> impl Iterator<Item = Atom> + '_;
}

impl Clause for [CLiteral] {
    fn as_dimacs(&self) -> String {
        let mut the_string = String::default();
        for literal in self {
            the_string.push_str(&format!("{literal} "));
        }
        the_string.pop();
        the_string
    }

    fn is_tautology(&self) -> bool {
        let mut seen: HashSet<CLiteral> = HashSet::default();
        for literal in self {
            if seen.contains(&literal.negate()) {
                return true;
            }
            seen.insert(*literal);
        }
        false
    }

    fn atoms(&self) -> impl Iterator<Item = Atom> + '_ {
        self.iter().map(|literal| literal.atom())
    }
}
