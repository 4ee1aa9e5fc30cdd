//! The basic structures shared by the solver and the debugger.

pub mod atom;
pub mod clause;
pub mod literal;
pub mod valuation;
