/*!
A procedure to identify the failed assumptions of an unsatisfiable solve.

When an assumption is found to be false, the assumptions which (together with the formula) led to the negation of the assumption are found by walking the trail backwards from the top, following the reasons of each atom of interest.
As no decision is made until every assumption has been made, each assignment without a reason above level zero is an assumption.

The core is the failed assumption together with those assumptions, in the order the assumptions were given.
If the negation of the failed assumption holds at level zero, the core is the failed assumption alone.
*/

use crate::{
    context::Context,
    misc::log::targets::{self},
    structures::literal::{CLiteral, Literal},
    types::err::{self},
};

impl Context {
    /// For documentation see [procedures::core](crate::procedures::core).
    pub fn analyze_final(
        &mut self,
        failed: CLiteral,
        assumptions: &[CLiteral],
    ) -> Result<(), err::ErrorKind> {
        let mut core: Vec<CLiteral> = vec![failed];

        if self.atom_db.level_of(failed.atom()) > 0 {
            let mut seen = vec![false; self.atom_db.count() + 1];
            seen[failed.atom() as usize] = true;

            let level_zero_end = self.trail.level_zero_end();
            for index in (level_zero_end..self.trail.literals.len()).rev() {
                let literal = self.trail.literals[index];
                let atom = literal.atom();
                if !seen[atom as usize] {
                    continue;
                }

                match self.atom_db.reason_of(atom) {
                    None => {
                        if !core.contains(&literal) {
                            core.push(literal)
                        }
                    }
                    Some(key) => {
                        let clause = self.clause_db.get(&key)?;
                        for other in clause.iter().filter(|other| other.atom() != atom) {
                            if self.atom_db.level_of(other.atom()) > 0 {
                                seen[other.atom() as usize] = true;
                            }
                        }
                    }
                }
                seen[atom as usize] = false;
            }
        }

        core.sort_by_key(|literal| {
            assumptions
                .iter()
                .position(|assumption| assumption == literal)
                .unwrap_or(usize::MAX)
        });

        log::debug!(target: targets::CORE, "Failed assumptions: {core:?}");
        self.core = Some(core);
        Ok(())
    }
}
