//! Expression parser for event instruction parameters.
//!
//! Instruction parameters whose metadata says "expression" or "string" hold
//! text in a small expression language:
//!
//! ```text
//! 2 * Player.X() + Random(10)
//! "Score: " + ToString(Variable(score)) + Player.Health::Label()
//! ```
//!
//! The parser reports what it reads through the [`ExprVisitor`] callbacks
//! instead of building a tree; refactoring passes implement the callbacks
//! to rebuild or inspect the text. Function calls are resolved against a
//! [`MetadataProvider`](evt_ir::MetadataProvider), which says how many
//! arguments a call takes and how each of them must be parsed.

mod cursor;
mod error;
mod parser;
mod visitor;

pub use error::{ParseError, ParseErrorKind};
pub use parser::ExpressionParser;
pub use visitor::ExprVisitor;
