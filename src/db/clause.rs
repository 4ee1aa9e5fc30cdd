/*!
A database of clauses, each of two or more literals.

Clauses are stored in a [SlotMap], and identified by a [ClauseKey].
As the database never removes a clause, a key remains valid for the lifetime of a context.

The first two literals of each clause are the watched literals of the clause.
*/

use slotmap::SlotMap;

use crate::{
    db::ClauseKey,
    structures::literal::CLiteral,
    types::err::{self},
};

/// The source of a clause.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClauseSource {
    /// A clause of the formula.
    Original,

    /// A clause derived by resolution during conflict analysis.
    Resolution,
}

/// A clause, as stored in the database.
#[derive(Debug)]
pub struct DBClause {
    literals: Vec<CLiteral>,
    source: ClauseSource,
}

impl DBClause {
    pub fn literals(&self) -> &[CLiteral] {
        &self.literals
    }

    pub fn literals_mut(&mut self) -> &mut [CLiteral] {
        &mut self.literals
    }

    pub fn source(&self) -> ClauseSource {
        self.source
    }
}

impl std::ops::Deref for DBClause {
    type Target = [CLiteral];

    fn deref(&self) -> &Self::Target {
        &self.literals
    }
}

/// The clause database.
#[derive(Default)]
pub struct ClauseDB {
    clauses: SlotMap<ClauseKey, DBClause>,
    original_count: usize,
    addition_count: usize,
}

impl ClauseDB {
    /// Stores a clause, returning the key to the clause.
    ///
    /// The clause must have at least two literals, and the first two literals are taken as the watched literals.
    pub fn store(
        &mut self,
        literals: Vec<CLiteral>,
        source: ClauseSource,
    ) -> Result<ClauseKey, err::ClauseDBError> {
        if literals.len() < 2 {
            return Err(err::ClauseDBError::EmptyClause);
        }
        match source {
            ClauseSource::Original => self.original_count += 1,
            ClauseSource::Resolution => self.addition_count += 1,
        }
        Ok(self.clauses.insert(DBClause { literals, source }))
    }

    pub fn get(&self, key: &ClauseKey) -> Result<&DBClause, err::ClauseDBError> {
        self.clauses.get(*key).ok_or(err::ClauseDBError::Missing)
    }

    pub fn get_mut(&mut self, key: &ClauseKey) -> Result<&mut DBClause, err::ClauseDBError> {
        self.clauses.get_mut(*key).ok_or(err::ClauseDBError::Missing)
    }

    /// A count of the original clauses stored.
    pub fn original_count(&self) -> usize {
        self.original_count
    }

    /// A count of the clauses added by resolution.
    pub fn addition_count(&self) -> usize {
        self.addition_count
    }

    /// An iterator over all original clauses.
    pub fn original_clauses(&self) -> impl Iterator<Item = &DBClause> {
        self.clauses
            .values()
            .filter(|clause| clause.source == ClauseSource::Original)
    }
}
