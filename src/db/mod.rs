/*!
Databases for holding information relevant to a solve.

- [The atom database](crate::db::atom)
  + Valuation, levels, reasons, saved phases and activity, indexed by atom.
- [The clause database](crate::db::clause)
  + Clauses of two or more literals, keyed by a [ClauseKey].
- [Watch lists](crate::db::watches)
  + For each literal, the clauses watching the literal.
- [The trail](crate::db::trail)
  + Assignments, in order, with the start of each decision level.

Unit clauses are never stored, as these are assigned (and kept) at level zero.
*/

pub mod atom;
pub mod clause;
pub mod trail;
pub mod watches;

slotmap::new_key_type! {
    /// The key to a clause in the [clause database](crate::db::clause).
    pub struct ClauseKey;
}

/// The index of a decision level.
pub type LevelIndex = u32;
