use crate::{db::LevelIndex, structures::literal::CLiteral};

/// Assignments, in order, with the index of the first assignment of each (positive) level.
#[derive(Default)]
pub struct Trail {
    pub literals: Vec<CLiteral>,
    pub level_indicies: Vec<usize>,
    pub q_head: usize,
}

impl Trail {
    /// Stores an assignment of the top decision level.
    pub fn store_assignment(&mut self, literal: CLiteral) {
        self.literals.push(literal);
    }

    /// The current level.
    pub fn level(&self) -> LevelIndex {
        self.level_indicies.len() as LevelIndex
    }

    /// Opens a fresh level.
    pub fn push_level(&mut self) {
        self.level_indicies.push(self.literals.len());
    }

    /// The index of the first assignment above level zero.
    pub fn level_zero_end(&self) -> usize {
        self.level_indicies
            .first()
            .copied()
            .unwrap_or(self.literals.len())
    }

    /// The assignments made at level zero, in order of assignment.
    pub fn level_zero_assignments(&self) -> &[CLiteral] {
        &self.literals[..self.level_zero_end()]
    }

    /// Removes all levels above the given level, returning the assignments removed.
    ///
    /// # Soundness
    /// Does not clear the *valuation* of the removed assignments.
    pub fn truncate_to(&mut self, level: LevelIndex) -> Vec<CLiteral> {
        let level = level as usize;
        if level >= self.level_indicies.len() {
            return Vec::default();
        }
        let start = self.level_indicies[level];
        self.level_indicies.truncate(level);
        self.q_head = std::cmp::min(self.q_head, start);
        self.literals.split_off(start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::literal::Literal;

    #[test]
    fn truncate() {
        let mut trail = Trail::default();
        trail.store_assignment(CLiteral::new(1, true));
        trail.push_level();
        trail.store_assignment(CLiteral::new(2, false));
        trail.push_level();
        trail.store_assignment(CLiteral::new(3, true));
        trail.q_head = 3;

        assert_eq!(trail.level(), 2);
        assert_eq!(trail.level_zero_assignments(), &[CLiteral::new(1, true)]);

        let removed = trail.truncate_to(0);
        assert_eq!(removed.len(), 2);
        assert_eq!(trail.level(), 0);
        assert_eq!(trail.q_head, 1);
        assert!(trail.truncate_to(0).is_empty());
    }
}
