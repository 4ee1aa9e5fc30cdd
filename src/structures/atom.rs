/*!
(The internal representation of) an atom.

Each atom is a `u32`, counting up from `1`.
Atom `0` is never issued, so that an atom may be read directly as a (positive) DIMACS literal.

Names of atoms, when present, are kept by the [naming service](crate::names) and never by the solver.
*/

/// An atom, aka. a 'variable'.
pub type Atom = u32;
