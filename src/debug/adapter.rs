/*!
The contract between the debugger and a solver.

The debugger requires a solver to:
- Solve under assumptions, and identify (some) unsatisfiable core on an unsatisfiable result.
- Report the value of each atom after a solve.
- Return to level zero, and clear any conflict, before a further solve.

# Release

Each solve must be followed by a return to level zero and the clearing of any conflict, before anything else happens.
This is done by the [Solved] guard returned from [guarded_solve](SolverAdapter::guarded_solve), which releases the solver when dropped.
While the guard is held, the valuation (or core) of the solve may be read through the guard.

```rust,ignore
let solved = solver.guarded_solve(&assumptions)?;
match solved.report() {
    Report::Unsatisfiable => {
        let core = solved.unsat_core().map(<[CLiteral]>::to_vec);
        ...
    }
    ...
}
// the solver is released here
```
*/

use crate::{
    context::{Context, ContextState},
    reports::Report,
    structures::{
        atom::Atom,
        literal::{CLiteral, Literal},
        valuation::TruthValue,
    },
    types::err::ErrorKind,
};

/// A solver, as seen by the debugger.
pub trait SolverAdapter {
    /// Solves under the given assumptions.
    ///
    /// A solve is only permitted at level zero.
    fn solve(&mut self, assumptions: &[CLiteral]) -> Result<Report, ErrorKind>;

    /// The unsatisfiable core of the most recent solve, if the solve was unsatisfiable.
    ///
    /// The core is a subset of the assumptions of the solve, in order.
    fn unsat_core(&self) -> Option<&[CLiteral]>;

    /// Removes every level above zero.
    fn unroll_to_zero(&mut self);

    /// Clears any conflict (and core) of the most recent solve.
    fn clear_conflict_status(&mut self);

    /// The value of an atom.
    fn value_of(&self, atom: Atom) -> TruthValue;

    /// A count of atoms, with atoms `1..=atom_count`.
    fn atom_count(&self) -> usize;

    /// Whether unsatisfiable cores are identified.
    fn set_compute_unsat_cores(&mut self, value: bool);

    /// Whether unsatisfiable cores are shrunk before being returned.
    fn set_minimize_unsat_core(&mut self, value: bool);

    /// Solves under the given assumptions, returning a guard which releases the solver when dropped.
    ///
    /// On an error the solver is released before the error is returned.
    fn guarded_solve(&mut self, assumptions: &[CLiteral]) -> Result<Solved<'_, Self>, ErrorKind>
    where
        Self: Sized,
    {
        match self.solve(assumptions) {
            Ok(report) => Ok(Solved {
                solver: self,
                report,
            }),
            Err(e) => {
                self.unroll_to_zero();
                self.clear_conflict_status();
                Err(e)
            }
        }
    }

    /// Atoms with a value, and so true on every valuation when no assumption is made.
    ///
    /// Only meaningful when the solver is at level zero.
    fn valued_atoms(&self) -> Vec<Atom> {
        (1..=self.atom_count() as Atom)
            .filter(|atom| self.value_of(*atom) != TruthValue::Undefined)
            .collect()
    }

    /// Literals for each atom with a value, in order of atom.
    fn assigned_literals(&self) -> Vec<CLiteral> {
        (1..=self.atom_count() as Atom)
            .filter_map(|atom| match self.value_of(atom) {
                TruthValue::True => Some(CLiteral::new(atom, true)),
                TruthValue::False => Some(CLiteral::new(atom, false)),
                TruthValue::Undefined => None,
            })
            .collect()
    }

    /// Atoms true on the current valuation.
    fn true_atoms(&self) -> Vec<Atom> {
        (1..=self.atom_count() as Atom)
            .filter(|atom| self.value_of(*atom) == TruthValue::True)
            .collect()
    }
}

/// A guard on a solved solver, which releases the solver when dropped.
pub struct Solved<'s, S: SolverAdapter> {
    solver: &'s mut S,
    report: Report,
}

impl<S: SolverAdapter> Solved<'_, S> {
    /// The report of the solve.
    pub fn report(&self) -> Report {
        self.report
    }
}

impl<S: SolverAdapter> std::ops::Deref for Solved<'_, S> {
    type Target = S;

    fn deref(&self) -> &Self::Target {
        &*self.solver
    }
}

impl<S: SolverAdapter> Drop for Solved<'_, S> {
    fn drop(&mut self) {
        self.solver.unroll_to_zero();
        self.solver.clear_conflict_status();
    }
}

impl SolverAdapter for Context {
    fn solve(&mut self, assumptions: &[CLiteral]) -> Result<Report, ErrorKind> {
        self.solve_given(Some(assumptions.to_vec()))
    }

    fn unsat_core(&self) -> Option<&[CLiteral]> {
        match self.state {
            ContextState::Unsatisfiable => self.core.as_deref(),
            _ => None,
        }
    }

    fn unroll_to_zero(&mut self) {
        self.backjump(0);
    }

    fn clear_conflict_status(&mut self) {
        self.core = None;
        self.state = ContextState::Input;
    }

    fn value_of(&self, atom: Atom) -> TruthValue {
        self.atom_db.value_of(atom).into()
    }

    fn assigned_literals(&self) -> Vec<CLiteral> {
        self.valuation_literals()
    }

    fn atom_count(&self) -> usize {
        self.atom_db.count()
    }

    fn set_compute_unsat_cores(&mut self, value: bool) {
        self.config.compute_cores.value = value;
    }

    fn set_minimize_unsat_core(&mut self, value: bool) {
        self.config.minimize_cores.value = value;
    }
}
