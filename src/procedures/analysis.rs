/*!
Analysis of an unsatisfiable clause.

Takes a key to a clause which is unsatisfiable on the current valuation and returns a clause which asserts some literal at a lower level, together with the level to backjump to.

# Overview

The clause is resolved with the reasons of literals at the current level, walking the trail backwards, until only one literal of the current level remains.
That literal is the first unique implication point, and its negation is the asserting literal of the learnt clause.

Each atom of a resolved clause (above level zero) has its activity bumped, as done by MiniSAT.

Literals valued at level zero are dropped from the learnt clause, as these are false on every valuation of interest.

# Ordering

The asserting literal is placed at index 0 of the learnt clause, and a literal of the backjump level (if any) is placed at index 1.
So, the learnt clause may be stored with watches on indices 0 and 1 immediately after backjumping.
*/

use crate::{
    context::Context,
    db::{ClauseKey, LevelIndex},
    misc::log::targets::{self},
    structures::literal::{CLiteral, Literal},
    types::err::{self},
};

/// The result of conflict analysis.
pub enum AnalysisResult {
    /// A unit clause, to be asserted at level zero.
    UnitClause(CLiteral),

    /// A clause asserting the literal at index 0 on backjumping to the level.
    AssertingClause(Vec<CLiteral>, LevelIndex),
}

impl Context {
    /// For documentation see [procedures::analysis](crate::procedures::analysis).
    pub fn conflict_analysis(&mut self, key: ClauseKey) -> Result<AnalysisResult, err::ErrorKind> {
        let current_level = self.trail.level();
        let mut seen = vec![false; self.atom_db.count() + 1];

        // index 0 is reserved for the asserting literal
        let mut learnt: Vec<CLiteral> = vec![CLiteral::new(0, false)];
        let mut unresolved = 0;
        let mut pivot: Option<CLiteral> = None;
        let mut trail_index = self.trail.literals.len();
        let mut reason_key = key;

        loop {
            let clause = self.clause_db.get(&reason_key)?;

            for literal in clause.iter() {
                if pivot.is_some_and(|pivot| pivot.atom() == literal.atom()) {
                    continue;
                }
                let atom = literal.atom();
                if seen[atom as usize] || self.atom_db.level_of(atom) == 0 {
                    continue;
                }
                seen[atom as usize] = true;
                self.atom_db.bump_activity(atom);

                if self.atom_db.level_of(atom) == current_level {
                    unresolved += 1;
                } else {
                    learnt.push(*literal);
                }
            }

            let next = loop {
                if trail_index == 0 {
                    return Err(err::AnalysisError::NoAssertion.into());
                }
                trail_index -= 1;
                let candidate = self.trail.literals[trail_index];
                if seen[candidate.atom() as usize] {
                    break candidate;
                }
            };

            seen[next.atom() as usize] = false;
            pivot = Some(next);

            if unresolved <= 1 {
                break;
            }
            unresolved -= 1;

            reason_key = match self.atom_db.reason_of(next.atom()) {
                Some(reason) => reason,
                None => return Err(err::AnalysisError::MissingReason.into()),
            };
        }

        let Some(uip) = pivot else {
            return Err(err::AnalysisError::EmptyResolution.into());
        };
        learnt[0] = uip.negate();

        log::trace!(target: targets::ANALYSIS, "Learnt clause of length {} from {key:?}", learnt.len());

        if learnt.len() == 1 {
            return Ok(AnalysisResult::UnitClause(learnt[0]));
        }

        let mut max_index = 1;
        for index in 2..learnt.len() {
            if self.atom_db.level_of(learnt[index].atom())
                > self.atom_db.level_of(learnt[max_index].atom())
            {
                max_index = index;
            }
        }
        learnt.swap(1, max_index);
        let backjump_level = self.atom_db.level_of(learnt[1].atom());

        Ok(AnalysisResult::AssertingClause(learnt, backjump_level))
    }
}
