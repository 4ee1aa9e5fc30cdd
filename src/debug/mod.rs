/*!
The debugger.

- [adapter]: the contract between the debugger and a solver.
- [quickxplain]: minimization of unsatisfiable cores.
- [query]: selection of the atom to ask a user about.
- [disjoint]: identification of disjoint cores.
- [history]: reading and writing assertions.
- [session]: the interactive session, tying everything together.
*/

pub mod adapter;
pub mod disjoint;
pub mod history;
pub mod query;
pub mod quickxplain;
pub mod session;

use crate::structures::literal::{CLiteral, Literal};

/// The union of two sequences of literals, with the literals of `first` followed by those of `second` not in `first`.
pub(crate) fn union(first: &[CLiteral], second: &[CLiteral]) -> Vec<CLiteral> {
    let mut combined = first.to_vec();
    for literal in second {
        if !first.contains(literal) {
            combined.push(*literal);
        }
    }
    combined
}

/// Whether the atom of the literal is the atom of some literal in the sequence.
pub(crate) fn contains_atom(literals: &[CLiteral], literal: &CLiteral) -> bool {
    literals.iter().any(|other| other.atom() == literal.atom())
}
