//! Parser callbacks.
//!
//! The parser does not build a tree. It reports the structure of an
//! expression, left to right, through an [`ExprVisitor`]:
//!
//! - verbatim text: `on_constant_token` (whitespace runs, string literals),
//!   `on_number`, `on_operator` (arithmetic operators, `+` concatenation,
//!   parentheses)
//! - calls, once all their arguments are known: `on_static_function`,
//!   `on_object_function`, `on_object_automatism_function`
//! - nested argument expressions, before the call that contains them:
//!   `on_sub_math_expression`, `on_sub_text_expression`
//! - the whitespace inside an empty argument list, just before its call:
//!   `on_blank_arguments`
//!
//! Concatenating the verbatim callbacks with each call rendered as written
//! reproduces the input text.
//!
//! # Call arguments
//!
//! `args` is aligned with `metadata.parameters`:
//! - object calls: `args[0]` is the receiving object name
//! - automatism calls: additionally, `args[1]` is the automatism name
//! - code-only parameters hold an empty expression
//! - omitted trailing optional parameters are absent
//!
//! Sub-expression callbacks get the argument mutably and may replace it;
//! the call callback then sees the replacement. Returning `false` aborts
//! the parse.

use evt_ir::{Expression, FunctionMetadata};

/// Receives the structure of a parsed expression.
///
/// Every method has a default: verbatim text and calls are ignored, nested
/// expressions are accepted without being parsed.
pub trait ExprVisitor {
    /// Verbatim text that carries no reference: whitespace, string literals.
    fn on_constant_token(&mut self, text: &str) {
        let _ = text;
    }

    /// A number literal, verbatim.
    fn on_number(&mut self, text: &str) {
        let _ = text;
    }

    /// An operator or parenthesis, verbatim.
    fn on_operator(&mut self, text: &str) {
        let _ = text;
    }

    /// `Name(args)`.
    fn on_static_function(&mut self, name: &str, args: &[Expression], metadata: &FunctionMetadata) {
        let _ = (name, args, metadata);
    }

    /// `object.Name(args)`; `args[0]` is the object.
    fn on_object_function(&mut self, name: &str, args: &[Expression], metadata: &FunctionMetadata) {
        let _ = (name, args, metadata);
    }

    /// `object.Automatism::Name(args)`; `args[0]` is the object and
    /// `args[1]` the automatism.
    fn on_object_automatism_function(
        &mut self,
        name: &str,
        args: &[Expression],
        metadata: &FunctionMetadata,
    ) {
        let _ = (name, args, metadata);
    }

    /// Whitespace written between the parentheses of a call without
    /// arguments, as in `X( )`. Reported right before that call.
    fn on_blank_arguments(&mut self, text: &str) {
        let _ = text;
    }

    /// A math argument. Return `false` to reject it.
    fn on_sub_math_expression(&mut self, expr: &mut Expression) -> bool {
        let _ = expr;
        true
    }

    /// A string argument. Return `false` to reject it.
    fn on_sub_text_expression(&mut self, expr: &mut Expression) -> bool {
        let _ = expr;
        true
    }
}
