//! # Forter
//!
//! A tiny line-numbered language where every integer names a cell and
//! line numbers are expressions that move as cells change.
//!
//! Run a program file with `forter program.fo`, or give the program text
//! directly with `forter -e '10 PRINT "HI":END'`. Input for `INPUT` and
//! `GET` comes from standard input.
//! ```text
//! $ forter -e '10 LET 1=5:PRINT 1+1:END'
//! 10
//! ```
//!
//! The library runs programs the same way through [`run`].

#[path = "doc/introduction.rs"]
#[allow(non_snake_case)]
pub mod _Introduction;

#[path = "doc/commands.rs"]
#[allow(non_snake_case)]
pub mod __Commands;

pub mod lang;
pub mod mach;
pub mod term;

pub use term::run;
