/*!
Watch lists, one for each literal.

The list of a literal contains the key of each clause watching the literal.
A clause watches the literals at indices 0 and 1.
*/

use crate::{
    db::ClauseKey,
    structures::literal::{CLiteral, Literal},
};

#[derive(Default)]
pub struct Watches {
    lists: Vec<Vec<ClauseKey>>,
}

impl Watches {
    /// Extends the lists to cover the literals of the given atom count.
    pub fn grow_to(&mut self, atom_count: usize) {
        let required = (atom_count + 1) * 2;
        if self.lists.len() < required {
            self.lists.resize_with(required, Vec::default);
        }
    }

    pub fn watch(&mut self, literal: &CLiteral, key: ClauseKey) {
        self.lists[literal.index()].push(key);
    }

    /// Takes the watch list of a literal, leaving an empty list in place until the list is restored.
    pub fn take(&mut self, literal: &CLiteral) -> Vec<ClauseKey> {
        std::mem::take(&mut self.lists[literal.index()])
    }

    /// Restores a list taken with [take](Watches::take).
    ///
    /// Any watches added to the literal while the list was taken are kept.
    pub fn restore(&mut self, literal: &CLiteral, mut list: Vec<ClauseKey>) {
        let added = std::mem::take(&mut self.lists[literal.index()]);
        list.extend(added);
        self.lists[literal.index()] = list;
    }
}
