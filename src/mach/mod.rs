/*!
## Rust Machine Module

This Rust module runs parsed Forter programs.

Line numbers and variables are the same thing here: integers naming
cells. Each dispatch step evaluates every line number against the cells,
so a `LET` can change which line runs next.

*/

pub type Address = i64;

mod cell;
mod operation;
mod program;
mod runtime;
mod val;

pub use cell::Cell;
pub use cell::CellStore;
pub use operation::Operation;
pub use program::Program;
pub use runtime::Event;
pub use runtime::Runtime;
pub use runtime::END_OF_INPUT;
pub use val::Val;

#[cfg(test)]
mod tests;
