/*!
The context, to which formulas are added and within which solves take place.

A context is a compact conflict-driven solver, with support for solving under assumptions and identifying failed assumptions.
The debugger interacts with a context through the [SolverAdapter](crate::debug::adapter::SolverAdapter) trait.

# Example
```rust
# use otter_debug::context::Context;
# use otter_debug::config::Config;
# use otter_debug::reports::Report;
# use otter_debug::structures::literal::{CLiteral, Literal};
let mut the_context = Context::from_config(Config::default());

let p = the_context.fresh_atom();
let q = the_context.fresh_atom();

let p_q_clause = vec![CLiteral::new(p, true), CLiteral::new(q, true)];
assert!(the_context.add_clause(p_q_clause).is_ok());

let not_p = CLiteral::new(p, false);

assert!(the_context.add_clause(vec![not_p]).is_ok());
assert_eq!(the_context.solve_given(None), Ok(Report::Satisfiable));

assert_eq!(the_context.atom_db.value_of(p), Some(false));
assert_eq!(the_context.atom_db.value_of(q), Some(true));
```
*/

mod counters;
pub use counters::Counters;

use rand::{rngs::StdRng, SeedableRng};

use crate::{
    config::Config,
    db::{
        atom::AtomDB,
        clause::{ClauseDB, ClauseSource},
        trail::Trail,
        watches::Watches,
        ClauseKey,
    },
    structures::{
        atom::Atom,
        clause::Clause,
        literal::{CLiteral, Literal},
    },
    types::err::{self, ErrorKind},
};

/// The state of a context.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ContextState {
    /// The context allows input.
    Input,

    /// The formula is known to be satisfiable, with a complete valuation on the trail.
    Satisfiable,

    /// The formula is known to be unsatisfiable, on the assumptions of the most recent solve.
    Unsatisfiable,

    /// The consistency of the formula is unknown.
    Solving,
}

impl std::fmt::Display for ContextState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Input => write!(f, "Input"),
            Self::Satisfiable => write!(f, "Satisfiable"),
            Self::Unsatisfiable => write!(f, "Unsatisfiable"),
            Self::Solving => write!(f, "Solving"),
        }
    }
}

/// A context.
pub struct Context {
    /// The atom database.
    pub atom_db: AtomDB,

    /// The clause database.
    pub clause_db: ClauseDB,

    /// Watch lists for each literal.
    pub watches: Watches,

    /// The trail of assignments.
    pub trail: Trail,

    /// The configuration of the context.
    pub config: Config,

    /// Counters related to solves.
    pub counters: Counters,

    /// The state of the context.
    pub state: ContextState,

    /// The source of randomness.
    pub rng: StdRng,

    /// Failed assumptions of the most recent unsatisfiable solve.
    pub core: Option<Vec<CLiteral>>,

    /// Whether the formula is unsatisfiable without any assumption.
    pub inconsistent: bool,
}

impl Context {
    pub fn from_config(config: Config) -> Self {
        Context {
            atom_db: AtomDB::new(config.atom_bump.value, config.atom_decay.value),
            clause_db: ClauseDB::default(),
            watches: Watches::default(),
            trail: Trail::default(),
            counters: Counters::default(),
            state: ContextState::Input,
            rng: StdRng::seed_from_u64(config.seed),
            core: None,
            inconsistent: false,
            config,
        }
    }

    /// A fresh atom.
    pub fn fresh_atom(&mut self) -> Atom {
        let atom = self.atom_db.fresh_atom(false);
        self.watches.grow_to(self.atom_db.count());
        atom
    }

    /// Fresh atoms, until the context has (at least) the given count of atoms.
    pub fn ensure_atoms(&mut self, count: usize) {
        while self.atom_db.count() < count {
            self.fresh_atom();
        }
    }

    /// Records the assignment of a literal at the current level.
    pub fn assign(&mut self, literal: CLiteral, reason: Option<ClauseKey>) {
        self.atom_db.set_value(literal, self.trail.level(), reason);
        self.trail.store_assignment(literal);
    }

    /// Adds a clause to the context.
    ///
    /// Clauses may only be added at level zero.
    /// The clause is simplified with respect to the valuation at level zero:
    /// - A tautology, or a clause satisfied at level zero, is skipped.
    /// - Literals false at level zero are removed.
    /// - A unit clause is assigned at level zero.
    /// - An empty clause marks the context as inconsistent.
    pub fn add_clause(&mut self, clause: Vec<CLiteral>) -> Result<(), ErrorKind> {
        if self.trail.level() > 0 {
            return Err(err::ClauseDBError::DecisionMade.into());
        }

        if let Some(max) = clause.iter().map(|literal| literal.atom()).max() {
            self.ensure_atoms(max as usize);
        }

        if clause.is_tautology() {
            return Ok(());
        }

        let mut simplified: Vec<CLiteral> = Vec::with_capacity(clause.len());
        for literal in clause {
            match self.atom_db.value_of_literal(&literal) {
                Some(true) => return Ok(()),
                Some(false) => {}
                None => {
                    if !simplified.contains(&literal) {
                        simplified.push(literal)
                    }
                }
            }
        }

        match simplified.len() {
            0 => {
                log::info!("Empty clause added, the formula is unsatisfiable");
                self.inconsistent = true;
            }
            1 => self.assign(simplified[0], None),
            _ => {
                let first = simplified[0];
                let second = simplified[1];
                let key = self.clause_db.store(simplified, ClauseSource::Original)?;
                self.watches.watch(&first, key);
                self.watches.watch(&second, key);
            }
        }
        Ok(())
    }

    /// The literals assigned at level zero, independent of any assumption.
    pub fn level_zero_literals(&self) -> &[CLiteral] {
        self.trail.level_zero_assignments()
    }

    /// The current valuation, as a sequence of literals for valued atoms.
    pub fn valuation_literals(&self) -> Vec<CLiteral> {
        self.atom_db
            .atoms()
            .filter_map(|atom| {
                self.atom_db
                    .value_of(atom)
                    .map(|value| CLiteral::new(atom, value))
            })
            .collect()
    }
}
