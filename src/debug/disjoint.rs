/*!
Identification of disjoint cores.

Cores are found one at a time.
After each core is found (and minimized) every considered literal on an atom of the core is removed from consideration, and so the next core found is disjoint from each core found so far.

Identification stops when the remaining literals are satisfiable, or when some core removes nothing from consideration.
The latter happens when a core depends only on assertions, or when the program is unsatisfiable without assumptions.
*/

use crate::{
    debug::{adapter::SolverAdapter, contains_atom, quickxplain::QuickXPlain, union},
    misc::log::targets::{self},
    reports::Report,
    structures::literal::CLiteral,
    types::err::{self, ErrorKind},
};

/// Disjoint (minimized) cores of the considered literals, together with the assertions.
pub fn compute_disjoint_cores<S: SolverAdapter>(
    solver: &mut S,
    assertions: &[CLiteral],
    considered: &[CLiteral],
) -> Result<Vec<Vec<CLiteral>>, ErrorKind> {
    let mut cores: Vec<Vec<CLiteral>> = Vec::default();
    let mut reduced = considered.to_vec();

    loop {
        let assumptions = union(assertions, &reduced);
        let solved = solver.guarded_solve(&assumptions)?;

        let core = match solved.report() {
            Report::Unsatisfiable => match solved.unsat_core() {
                Some(core) => core.to_vec(),
                None => return Err(err::StateError::MissingCore.into()),
            },
            Report::Satisfiable => break,
            Report::Unknown => return Err(err::StateError::UnknownResult.into()),
        };
        drop(solved);

        let minimal = QuickXPlain::new(&mut *solver, &[]).minimize(&core)?;
        if minimal.is_empty() {
            log::info!(target: targets::DISJOINT, "Unsatisfiable without assumptions");
            break;
        }

        let before = reduced.len();
        reduced.retain(|literal| !contains_atom(&minimal, literal));
        let removed = before - reduced.len();

        log::debug!(target: targets::DISJOINT, "Core {minimal:?} removes {removed} literals");
        cores.push(minimal);

        if removed == 0 || reduced.is_empty() {
            break;
        }
    }

    log::info!(target: targets::DISJOINT, "Found {} disjoint cores", cores.len());
    Ok(cores)
}

/// Fixes the first core, by removing every literal on an atom of the other cores from the considered literals.
///
/// Returns the first core, if any.
pub fn fix_core(cores: &[Vec<CLiteral>], considered: &mut Vec<CLiteral>) -> Option<Vec<CLiteral>> {
    let (first, rest) = cores.split_first()?;
    for core in rest {
        considered.retain(|literal| !contains_atom(core, literal));
    }
    Some(first.clone())
}
