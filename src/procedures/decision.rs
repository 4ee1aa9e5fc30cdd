//! Decisions, i.e. the choice of an atom without a value and a value for the atom.

use rand::{seq::IteratorRandom, Rng};

use crate::{
    context::Context,
    structures::literal::{CLiteral, Literal},
};

impl Context {
    /// A literal to decide on, if some atom is without a value.
    ///
    /// With probability [random_decision_bias](crate::config::Config::random_decision_bias) the atom is chosen at random, and otherwise the most active atom is chosen.
    /// The value is the previous value of the atom, if phase saving is enabled, and otherwise chosen with probability [polarity_lean](crate::config::Config::polarity_lean).
    pub fn make_decision(&mut self) -> Option<CLiteral> {
        let random = self.config.random_decision_bias.value > 0.0
            && self.rng.gen_bool(self.config.random_decision_bias.value);

        let atom = match random {
            true => self.atom_db.unvalued_atoms().choose(&mut self.rng),
            false => self.atom_db.most_active_unvalued(),
        }?;

        let polarity = match self.config.phase_saving.value {
            true => self.atom_db.previous_value_of(atom),
            false => self.rng.gen_bool(self.config.polarity_lean.value),
        };

        self.counters.total_decisions += 1;
        Some(CLiteral::new(atom, polarity))
    }
}
