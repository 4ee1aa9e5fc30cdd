/*!
A library for debugging incoherent answer set programs, built around a small conflict-driven solver.

# Orientation

A program is given as a CNF formula in an extended DIMACS format, which also names atoms and registers the rules behind *debug atoms*.
Each debug atom relaxes a rule of the program, and so when the program is incoherent some set of debug atoms, taken together, is inconsistent.
Such a set is a core, and a [session](debug::session) helps a user find the faulty rules by:
- Shrinking cores to a minimal core, with [QuickXPlain](debug::quickxplain).
- Suggesting atoms to query, ranked by how evenly their values split the models of relaxations of a core, with a [QuerySelector](debug::query::QuerySelector).
- Recording the values asserted by the user, and saving or loading those values as a [history](debug::history).
- Splitting the program into [disjoint cores](debug::disjoint).

The solver is accessed through the [SolverAdapter](debug::adapter::SolverAdapter) trait, implemented by a [Context](context::Context).

# Example

```rust
# use otter_debug::config::{Config, DebugConfig};
# use otter_debug::context::Context;
# use otter_debug::debug::session::{DebugSession, Outcome};
# use otter_debug::interface::wire::Wire;
let program = "p cnf 2 1
c v 1 _debug1
c v 2 a
c d _debug1 0 :- a.
-1 -2 0
";

let mut context = Context::from_config(Config::default());
let names = context.read_debug_dimacs(program.as_bytes()).unwrap();

let mut interface = Wire::new(&names, "exit\n".as_bytes(), Vec::<u8>::new());
let mut session = DebugSession::new(&mut context, &names, DebugConfig::default());

assert!(matches!(session.debug(&mut interface), Ok(Outcome::Coherent(_))));
```
*/

pub mod builder;
pub mod config;
pub mod context;
pub mod db;
pub mod debug;
pub mod interface;
pub mod names;
pub mod procedures;
pub mod reports;
pub mod structures;
pub mod types;

pub(crate) mod generic;
pub(crate) mod misc;
