/*!
Procedures on a context.

Each procedure is implemented as a method on a [Context](crate::context::Context), in a file of the same name.

- [bcp]: boolean constraint propagation, with two watched literals.
- [analysis]: conflict analysis, to the first unique implication point.
- [backjump]: removal of levels from the trail.
- [decision]: the choice of an atom and value.
- [core]: identification of the failed assumptions of an unsatisfiable solve.
- [solve]: the solve loop, under assumptions.
*/

pub mod analysis;
pub mod backjump;
pub mod bcp;
pub mod core;
pub mod decision;
pub mod solve;
