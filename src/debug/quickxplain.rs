/*!
Minimization of an unsatisfiable core, by QuickXPlain.

# Overview

Given a core, i.e. a sequence of literals which is unsatisfiable together with some background, QuickXPlain returns a subset of the core which remains unsatisfiable together with the background, and which is irreducible: removing any literal gives a satisfiable set.

The core is split into halves, and each half is minimized against the other half, by recursion:

```none
minimize(to_check, added, to_split):
  if added is non-empty and background ∪ to_check is unsatisfiable:
    return ∅
  if |to_split| = 1:
    return to_split
  first, second = split to_split, with |first| = ⌈|to_split| / 2⌉
  second_result = minimize(to_check ∪ first, first, second)
  first_result  = minimize(to_check ∪ second_result, second_result, first)
  return second_result ∪ first_result
```

Each solve made by the procedure is released before the procedure continues.
A solve without a result (e.g. on reaching a time limit) ends minimization with an error.

The result of minimization is only irreducible if the given core is (with the background) unsatisfiable.
*/

use crate::{
    debug::{adapter::SolverAdapter, union},
    misc::log::targets::{self},
    reports::Report,
    structures::literal::CLiteral,
    types::err::{self, ErrorKind},
};

/// A core minimizer, over some solver and background.
pub struct QuickXPlain<'s, S: SolverAdapter> {
    solver: &'s mut S,
    background: &'s [CLiteral],
    checks: usize,
}

impl<'s, S: SolverAdapter> QuickXPlain<'s, S> {
    /// A minimizer, solving under the background (in addition to the literals being checked) on each check.
    pub fn new(solver: &'s mut S, background: &'s [CLiteral]) -> Self {
        QuickXPlain {
            solver,
            background,
            checks: 0,
        }
    }

    /// A count of the solves made by the minimizer.
    pub fn checks(&self) -> usize {
        self.checks
    }

    /// Minimizes a core.
    ///
    /// An empty core is returned as it is.
    pub fn minimize(&mut self, core: &[CLiteral]) -> Result<Vec<CLiteral>, ErrorKind> {
        if core.is_empty() {
            log::debug!(target: targets::QUICKXPLAIN, "Core is empty");
            return Ok(Vec::default());
        }

        let minimal = self.minimize_recursive(&[], &[], core)?;
        log::debug!(
            target: targets::QUICKXPLAIN,
            "Minimized core of {} literals to {} literals with {} checks",
            core.len(),
            minimal.len(),
            self.checks
        );
        Ok(minimal)
    }

    fn minimize_recursive(
        &mut self,
        to_check: &[CLiteral],
        added: &[CLiteral],
        to_split: &[CLiteral],
    ) -> Result<Vec<CLiteral>, ErrorKind> {
        if !added.is_empty() && self.is_unsatisfiable(to_check)? {
            log::trace!(target: targets::QUICKXPLAIN, "Unsatisfiable on {to_check:?}, pruning");
            return Ok(Vec::default());
        }

        if to_split.len() <= 1 {
            return Ok(to_split.to_vec());
        }

        let (first, second) = to_split.split_at(to_split.len().div_ceil(2));

        let second_result = self.minimize_recursive(&union(to_check, first), first, second)?;
        let first_result =
            self.minimize_recursive(&union(to_check, &second_result), &second_result, first)?;

        Ok(union(&second_result, &first_result))
    }

    fn is_unsatisfiable(&mut self, literals: &[CLiteral]) -> Result<bool, ErrorKind> {
        self.checks += 1;
        let assumptions = union(self.background, literals);
        let solved = self.solver.guarded_solve(&assumptions)?;
        match solved.report() {
            Report::Unsatisfiable => Ok(true),
            Report::Satisfiable => Ok(false),
            Report::Unknown => Err(err::StateError::UnknownResult.into()),
        }
    }
}
