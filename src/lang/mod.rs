/*!
# Rust Language Module

This Rust module provides lexical analysis and parsing of Forter.

The scanner and grammar engine are generic. The Forter token rules live
in `lex` and the Forter grammar in `parse`.

*/

#[macro_use]
mod error;
mod lex;
mod parse;
mod source;

pub mod ast;
pub mod grammar;
pub mod scan;
pub mod token;

pub use error::Error;
pub use error::ErrorCode;
pub use lex::lex;
pub use parse::{parse, Node, Parser};
pub use source::{Locator, Source};
