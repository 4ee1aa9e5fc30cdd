/*!
Selection of the atom to ask a user about.

# Overview

The minimized core is relaxed one literal at a time, and the program is solved (with the assertions of the session) on each relaxation.

- On a satisfiable relaxation, the model found is counted, and the entropy of each atom is updated: +1 if the atom is true on the model, and -1 otherwise.
- On an unsatisfiable relaxation, the new core is minimized and relaxed in turn, beneath the relaxation.

Exploration stops once every relaxation has been explored, or the configured time bound has passed.

Candidates are atoms occurring in the rules of the debug atoms of the core, other than assertions and facts.
An atom true on about half of the models found has an entropy near zero, and so discriminates between the models found.
So, candidates are ranked by ascending absolute entropy, with ties broken by the count of occurrences in the rules of the core.

If no model is found, no candidate is ranked.
*/

use std::{
    collections::{BTreeMap, BTreeSet},
    time::{Duration, Instant},
};

use crate::{
    config::{DebugConfig, TieBreak},
    debug::{adapter::SolverAdapter, quickxplain::QuickXPlain, union},
    misc::log::targets::{self},
    names::Names,
    reports::Report,
    structures::{
        atom::Atom,
        literal::{CLiteral, Literal},
        valuation::TruthValue,
    },
    types::err::{self, ErrorKind},
};

/// The result of query selection.
#[derive(Clone, Debug, Default)]
pub struct Selection {
    /// Candidates, with the most informative candidate first.
    pub ranking: Vec<Atom>,

    /// A count of models found during exploration.
    pub models: usize,

    /// Whether exploration stopped on the time bound.
    pub timed_out: bool,

    /// The entropy of each atom, over the models found.
    pub entropy: BTreeMap<Atom, i64>,

    /// The occurrences of each candidate in the rules of the core.
    pub occurrences: BTreeMap<Atom, usize>,
}

/// A query selector, over some solver and the assertions of a session.
pub struct QuerySelector<'s, S: SolverAdapter> {
    solver: &'s mut S,
    assertions: &'s [CLiteral],
    timeout: Duration,
    tie_break: TieBreak,
}

impl<'s, S: SolverAdapter> QuerySelector<'s, S> {
    pub fn new(solver: &'s mut S, assertions: &'s [CLiteral], config: &DebugConfig) -> Self {
        QuerySelector {
            solver,
            assertions,
            timeout: config.query_timeout.value,
            tie_break: config.tie_break,
        }
    }

    /// Ranks candidates for a query, given a minimized core, the debug literals considered by the session, and the facts of the program.
    pub fn select(
        &mut self,
        core: &[CLiteral],
        considered: &[CLiteral],
        names: &Names,
        facts: &BTreeSet<Atom>,
    ) -> Result<Selection, ErrorKind> {
        let mut selection = Selection::default();
        let start = Instant::now();

        let (models, timed_out) = self.explore(core, considered, 1, start, &mut selection.entropy)?;
        selection.models = models;
        selection.timed_out = timed_out;

        log::info!(target: targets::QUERY, "Found {models} models in {:.2?}", start.elapsed());
        if timed_out {
            log::info!(target: targets::QUERY, "Exploration stopped on the time bound");
        }

        for literal in core.iter().filter(|literal| names.is_debug(literal.atom())) {
            for atom in names.rule_atoms(literal.atom()) {
                *selection.occurrences.entry(atom).or_default() += 1;
            }
        }

        if models == 0 {
            return Ok(selection);
        }

        let mut ranking: Vec<Atom> = selection
            .occurrences
            .keys()
            .filter(|atom| {
                !facts.contains(atom)
                    && !self.assertions.iter().any(|assertion| assertion.atom() == **atom)
            })
            .copied()
            .collect();

        let score = |atom: &Atom| selection.entropy.get(atom).copied().unwrap_or(0).abs();
        let occurrences = |atom: &Atom| selection.occurrences.get(atom).copied().unwrap_or(0);

        ranking.sort_by(|a, b| {
            score(a).cmp(&score(b)).then_with(|| match self.tie_break {
                TieBreak::MostOccurrences => occurrences(b).cmp(&occurrences(a)),
                TieBreak::FewestOccurrences => occurrences(a).cmp(&occurrences(b)),
            })
        });

        for atom in &ranking {
            log::debug!(
                target: targets::QUERY,
                "{}: entropy {}, {} occurrences",
                names.display_name(*atom),
                selection.entropy.get(atom).copied().unwrap_or(0),
                occurrences(atom)
            );
        }

        selection.ranking = ranking;
        Ok(selection)
    }

    /// Explores relaxations of a core, returning a count of models found and whether the time bound passed.
    fn explore(
        &mut self,
        core: &[CLiteral],
        parent: &[CLiteral],
        depth: usize,
        start: Instant,
        entropy: &mut BTreeMap<Atom, i64>,
    ) -> Result<(usize, bool), ErrorKind> {
        let mut models = 0;

        for relaxed_literal in core {
            let relaxed: Vec<CLiteral> = parent
                .iter()
                .filter(|literal| literal.atom() != relaxed_literal.atom())
                .copied()
                .collect();

            if relaxed.len() == parent.len() {
                log::trace!(target: targets::QUERY, "{relaxed_literal} is not among the assumptions at depth {depth}");
                continue;
            }

            if start.elapsed() > self.timeout {
                return Ok((models, true));
            }

            let assumptions = union(self.assertions, &relaxed);
            let solved = self.solver.guarded_solve(&assumptions)?;

            match solved.report() {
                Report::Satisfiable => {
                    models += 1;
                    log::trace!(target: targets::QUERY, "Model found relaxing {relaxed_literal} at depth {depth}");
                    for atom in 1..=solved.atom_count() as Atom {
                        let delta = match solved.value_of(atom) {
                            TruthValue::True => 1,
                            TruthValue::False | TruthValue::Undefined => -1,
                        };
                        *entropy.entry(atom).or_default() += delta;
                    }
                    drop(solved);
                }

                Report::Unsatisfiable => {
                    let relaxed_core = match solved.unsat_core() {
                        Some(core) => core.to_vec(),
                        None => return Err(err::StateError::MissingCore.into()),
                    };
                    drop(solved);

                    let minimal = QuickXPlain::new(&mut *self.solver, &[]).minimize(&relaxed_core)?;
                    let (found, timed_out) = self.explore(&minimal, &relaxed, depth + 1, start, entropy)?;
                    models += found;
                    if timed_out {
                        return Ok((models, true));
                    }
                }

                Report::Unknown => {
                    drop(solved);
                    log::warn!(target: targets::QUERY, "Unknown result relaxing {relaxed_literal}");
                }
            }
        }

        Ok((models, false))
    }
}
