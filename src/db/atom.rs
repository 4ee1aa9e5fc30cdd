/*!
A database of 'atom related' things, accessed via fields on an [AtomDB] struct.

Things include:
- The current (partial) valuation, and the level at which each atom was valued.
- The reason (clause) for the value of an atom, if the value was not a decision.
- The previous value of each atom, for phase saving.
- The activity of each atom, to guide decisions.

All vectors are indexed by atom, and so have a placeholder at index zero.
*/

use crate::{
    config::Activity,
    db::{ClauseKey, LevelIndex},
    structures::{
        atom::Atom,
        literal::{CLiteral, Literal},
    },
};

/// The atom database.
pub struct AtomDB {
    valuation: Vec<Option<bool>>,
    levels: Vec<LevelIndex>,
    reasons: Vec<Option<ClauseKey>>,
    previous_values: Vec<bool>,
    activity: Vec<Activity>,

    bump: Activity,
    decay: Activity,
}

const ACTIVITY_LIMIT: Activity = 1e100;

impl AtomDB {
    pub fn new(bump: Activity, decay: Activity) -> Self {
        AtomDB {
            valuation: vec![None],
            levels: vec![0],
            reasons: vec![None],
            previous_values: vec![false],
            activity: vec![0.0],
            bump,
            decay,
        }
    }

    /// A fresh atom, without a value.
    pub fn fresh_atom(&mut self, previous_value: bool) -> Atom {
        let atom = self.valuation.len() as Atom;
        self.valuation.push(None);
        self.levels.push(0);
        self.reasons.push(None);
        self.previous_values.push(previous_value);
        self.activity.push(0.0);
        atom
    }

    /// A count of atoms in the database.
    pub fn count(&self) -> usize {
        self.valuation.len() - 1
    }

    /// An iterator over all atoms in the database.
    pub fn atoms(&self) -> impl Iterator<Item = Atom> {
        1..(self.valuation.len() as Atom)
    }

    /// The value of an atom, if any.
    pub fn value_of(&self, atom: Atom) -> Option<bool> {
        self.valuation.get(atom as usize).copied().flatten()
    }

    /// The value of a literal, if the atom of the literal has a value.
    pub fn value_of_literal(&self, literal: &CLiteral) -> Option<bool> {
        self.value_of(literal.atom())
            .map(|value| value == literal.polarity())
    }

    /// The level at which an atom was valued.
    ///
    /// The level of an atom without a value is meaningless.
    pub fn level_of(&self, atom: Atom) -> LevelIndex {
        self.levels[atom as usize]
    }

    /// The reason for the value of an atom, if the value was not a decision (or valued at level zero).
    pub fn reason_of(&self, atom: Atom) -> Option<ClauseKey> {
        self.reasons[atom as usize]
    }

    pub fn previous_value_of(&self, atom: Atom) -> bool {
        self.previous_values[atom as usize]
    }

    /// Values the atom of a literal to the polarity of the literal.
    pub fn set_value(&mut self, literal: CLiteral, level: LevelIndex, reason: Option<ClauseKey>) {
        let atom = literal.atom() as usize;
        self.valuation[atom] = Some(literal.polarity());
        self.levels[atom] = level;
        self.reasons[atom] = reason;
    }

    /// Clears the value of an atom, noting the value as the previous value of the atom.
    pub fn drop_value(&mut self, atom: Atom) {
        let atom = atom as usize;
        if let Some(value) = self.valuation[atom].take() {
            self.previous_values[atom] = value;
        }
        self.reasons[atom] = None;
    }

    pub fn activity_of(&self, atom: Atom) -> Activity {
        self.activity[atom as usize]
    }

    /// Bumps the activity of an atom, rescaling all activity if the limit is passed.
    pub fn bump_activity(&mut self, atom: Atom) {
        let activity = &mut self.activity[atom as usize];
        *activity += self.bump;

        if *activity > ACTIVITY_LIMIT {
            for activity in self.activity.iter_mut() {
                *activity *= ACTIVITY_LIMIT.recip();
            }
            self.bump *= ACTIVITY_LIMIT.recip();
        }
    }

    /// Decays activity, by increasing the bump applied to future conflicts.
    pub fn decay_activity(&mut self) {
        self.bump /= self.decay;
    }

    /// The most active atom without a value, ties broken by the lowest atom.
    pub fn most_active_unvalued(&self) -> Option<Atom> {
        let mut best: Option<(Atom, Activity)> = None;
        for atom in self.atoms() {
            if self.value_of(atom).is_some() {
                continue;
            }
            let activity = self.activity_of(atom);
            match best {
                Some((_, best_activity)) if best_activity >= activity => {}
                _ => best = Some((atom, activity)),
            }
        }
        best.map(|(atom, _)| atom)
    }

    /// An iterator over atoms without a value.
    pub fn unvalued_atoms(&self) -> impl Iterator<Item = Atom> + '_ {
        self.atoms().filter(|atom| self.value_of(*atom).is_none())
    }
}
