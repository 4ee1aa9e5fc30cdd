/*!
The solve procedure.

# Overview

A solve is a loop of propagation, analysis of conflicts, and decisions.

```rust,ignore
loop {
    match self.propagate() {
        Err(conflict) => {
            analyse the conflict, backjump and assert the learnt clause
        }
        Ok(()) => {
            make the next assumption, or else make a decision, or else return satisfiable
        }
    }
}
```

# Assumptions

Assumptions are made one per level, before any decision, with level *i* holding the *i*th assumption.
An assumption already true on the valuation is given an empty level, so the correspondence between levels and assumptions is kept.
An assumption already false on the valuation ends the solve as unsatisfiable, with the failed assumptions identified by [analyze_final](crate::procedures::core).

# After a solve

The valuation and trail of a solve are kept until the next solve, or until the context is unrolled to level zero.
This allows the model of a satisfiable solve to be read, and is required before a further solve.

If the formula is unsatisfiable without assumptions, the context is marked inconsistent and each further solve is immediately unsatisfiable with an empty core.
*/

use std::time::Instant;

use crate::{
    context::{Context, ContextState},
    db::clause::ClauseSource,
    generic::luby::Luby,
    misc::log::targets::{self},
    procedures::analysis::AnalysisResult,
    reports::Report,
    structures::literal::CLiteral,
    types::err::{self, ErrorKind},
};

impl Context {
    /// Determines the satisfiability of the formula of the context, on the given assumptions (if any).
    ///
    /// If core minimization is configured, failed assumptions are shrunk by repeated solves on the failed assumptions, until no further shrinking is found.
    pub fn solve_given(&mut self, assumptions: Option<Vec<CLiteral>>) -> Result<Report, ErrorKind> {
        let assumptions = assumptions.unwrap_or_default();
        let report = self.solve_inner(&assumptions)?;

        if report == Report::Unsatisfiable && self.config.minimize_cores.value {
            loop {
                let previous = match &self.core {
                    Some(core) if !core.is_empty() => core.clone(),
                    _ => break,
                };
                self.backjump(0);

                match self.solve_inner(&previous)? {
                    Report::Unsatisfiable => {}
                    _ => {
                        log::error!(target: targets::CORE, "Failed assumptions were satisfiable");
                        self.core = Some(previous);
                        self.state = ContextState::Unsatisfiable;
                        break;
                    }
                }

                if self.core.as_ref().is_some_and(|core| core.len() >= previous.len()) {
                    break;
                }
            }
        }

        Ok(report)
    }

    fn solve_inner(&mut self, assumptions: &[CLiteral]) -> Result<Report, ErrorKind> {
        if self.trail.level() > 0 {
            return Err(err::StateError::SolveAboveZero.into());
        }

        self.counters.solves += 1;
        self.counters.fresh_conflicts = 0;
        self.core = None;
        self.state = ContextState::Solving;

        if self.inconsistent || self.propagate().is_err() {
            self.inconsistent = true;
            self.core = Some(Vec::default());
            self.state = ContextState::Unsatisfiable;
            return Ok(Report::Unsatisfiable);
        }

        let start = Instant::now();
        let time_limit = self.config.time_limit.value;
        let mut luby = Luby::default();

        'search: loop {
            if !time_limit.is_zero() && start.elapsed() > time_limit {
                self.counters.time = start.elapsed();
                self.backjump(0);
                self.state = ContextState::Solving;
                return Ok(Report::Unknown);
            }

            match self.propagate() {
                Err(err::BCPError::Conflict(key)) => {
                    self.counters.total_conflicts += 1;
                    self.counters.fresh_conflicts += 1;

                    if self.trail.level() == 0 {
                        self.inconsistent = true;
                        self.core = Some(Vec::default());
                        break 'search;
                    }

                    match self.conflict_analysis(key)? {
                        AnalysisResult::UnitClause(literal) => {
                            self.backjump(0);
                            self.assign(literal, None);
                        }

                        AnalysisResult::AssertingClause(clause, level) => {
                            self.backjump(level);
                            let asserted = clause[0];
                            let watched = clause[1];
                            let key = self.clause_db.store(clause, ClauseSource::Resolution)?;
                            self.watches.watch(&asserted, key);
                            self.watches.watch(&watched, key);
                            self.assign(asserted, Some(key));
                        }
                    }

                    self.atom_db.decay_activity();

                    if self.config.restart.value
                        && self.counters.fresh_conflicts
                            >= self.config.luby_u.value.saturating_mul(luby.current())
                    {
                        self.backjump(0);
                        luby.next();
                        self.counters.restarts += 1;
                        self.counters.fresh_conflicts = 0;
                    }
                }

                Err(err::BCPError::CorruptWatch) => {
                    return Err(err::BCPError::CorruptWatch.into());
                }

                Ok(()) => {
                    while (self.trail.level() as usize) < assumptions.len() {
                        let assumption = assumptions[self.trail.level() as usize];

                        match self.atom_db.value_of_literal(&assumption) {
                            Some(true) => self.trail.push_level(),

                            Some(false) => {
                                if self.config.compute_cores.value {
                                    self.analyze_final(assumption, assumptions)?;
                                } else {
                                    self.core = Some(Vec::default());
                                }
                                break 'search;
                            }

                            None => {
                                self.trail.push_level();
                                self.assign(assumption, None);
                                continue 'search;
                            }
                        }
                    }

                    match self.make_decision() {
                        Some(decision) => {
                            self.trail.push_level();
                            self.assign(decision, None);
                        }

                        None => {
                            self.counters.time = start.elapsed();
                            self.state = ContextState::Satisfiable;
                            return Ok(Report::Satisfiable);
                        }
                    }
                }
            }
        }

        self.counters.time = start.elapsed();
        self.state = ContextState::Unsatisfiable;
        Ok(Report::Unsatisfiable)
    }
}
