/*!
Backjumping, i.e. the removal of levels above some level from the trail.

The value of each atom assigned above the level is cleared, with the value noted as the previous value of the atom, for phase saving.
*/

use crate::{context::Context, db::LevelIndex, misc::log::targets, structures::literal::Literal};

impl Context {
    /// Removes all levels above the given level.
    pub fn backjump(&mut self, to: LevelIndex) {
        if to >= self.trail.level() {
            return;
        }
        log::trace!(target: targets::BACKJUMP, "Backjump from {} to {}", self.trail.level(), to);

        for literal in self.trail.truncate_to(to) {
            self.atom_db.drop_value(literal.atom());
        }
    }
}
