/*!
A context method for boolean constraint propagation.

# Overview
Propagates an atom being assigned some value, given as a literal.

This is done by examining clauses watching the negation of the literal and updating the watches of the clause, if possible, assigning the consequence of an asserting clause, or identifying the clause conflicts with the current valuation.

The watch list examined is taken from the watch database for the duration of the examination.
This avoids a mutable borrow of the watch database conflicting with the addition of a watch to some other list.
Still, the taken list is never a candidate for a new watch, as the watched literal of the list is false.

[propagate](Context::propagate) applies bcp to each assignment on the trail which has not already been propagated.
*/

use crate::{
    context::Context,
    misc::log::targets::{self},
    structures::literal::{CLiteral, Literal},
    types::err::{self},
};

impl Context {
    /// For documentation see [procedures::bcp](crate::procedures::bcp).
    pub fn bcp(&mut self, literal: CLiteral) -> Result<(), err::BCPError> {
        let false_literal = literal.negate();
        let mut list = self.watches.take(&false_literal);

        let mut index = 0;
        while index < list.len() {
            let key = list[index];

            let db_clause = match self.clause_db.get_mut(&key) {
                Ok(stored) => stored,
                Err(_) => {
                    self.watches.restore(&false_literal, list);
                    return Err(err::BCPError::CorruptWatch);
                }
            };

            let clause = db_clause.literals_mut();
            if clause[0] == false_literal {
                clause.swap(0, 1);
            }
            if clause[1] != false_literal {
                self.watches.restore(&false_literal, list);
                return Err(err::BCPError::CorruptWatch);
            }

            let first = clause[0];
            if self.atom_db.value_of_literal(&first) == Some(true) {
                index += 1;
                continue;
            }

            let replacement = (2..clause.len())
                .find(|&i| self.atom_db.value_of_literal(&clause[i]) != Some(false));

            if let Some(replacement) = replacement {
                clause.swap(1, replacement);
                let watch = clause[1];
                self.watches.watch(&watch, key);
                list.swap_remove(index);
                continue;
            }

            match self.atom_db.value_of_literal(&first) {
                None => {
                    log::trace!(target: targets::PROPAGATION, "{key:?} asserts {first}");
                    self.assign(first, Some(key));
                }
                Some(_) => {
                    log::trace!(target: targets::PROPAGATION, "Consequence of {key:?} and {literal} is contradiction");
                    self.watches.restore(&false_literal, list);
                    return Err(err::BCPError::Conflict(key));
                }
            }
            index += 1;
        }

        self.watches.restore(&false_literal, list);
        Ok(())
    }

    /// Applies [bcp](Context::bcp) to each assignment yet to be propagated, in order of assignment.
    pub fn propagate(&mut self) -> Result<(), err::BCPError> {
        while let Some(&literal) = self.trail.literals.get(self.trail.q_head) {
            self.trail.q_head += 1;
            self.bcp(literal)?;
        }
        Ok(())
    }
}
