//! Detecting whether an expression uses an object.

use evt_ir::{Expression, FunctionMetadata, MetadataProvider};
use evt_parse::{ExprVisitor, ExpressionParser, ParseError};
use evt_stack::ensure_sufficient_stack;

/// Whether `text`, a math expression, calls a function on `object`.
pub fn math_references_object<M: MetadataProvider + ?Sized>(
    parser: ExpressionParser<'_, M>,
    text: &str,
    object: &str,
) -> Result<bool, ParseError> {
    let mut visitor = PresenceVisitor::new(parser, object);
    parser.parse_math(text, &mut visitor)?;
    Ok(visitor.found())
}

/// Whether `text`, a string expression, calls a function on `object`.
pub fn string_references_object<M: MetadataProvider + ?Sized>(
    parser: ExpressionParser<'_, M>,
    text: &str,
    object: &str,
) -> Result<bool, ParseError> {
    let mut visitor = PresenceVisitor::new(parser, object);
    parser.parse_string(text, &mut visitor)?;
    Ok(visitor.found())
}

/// Looks for object and automatism calls whose receiver is a given object.
///
/// Only the receiver counts. An object name passed as a plain argument, or
/// spelled inside a string literal, is not a reference.
pub struct PresenceVisitor<'r, 'm, M: ?Sized> {
    parser: ExpressionParser<'m, M>,
    target: &'r str,
    found: bool,
}

impl<'r, 'm, M: MetadataProvider + ?Sized> PresenceVisitor<'r, 'm, M> {
    pub fn new(parser: ExpressionParser<'m, M>, target: &'r str) -> Self {
        PresenceVisitor {
            parser,
            target,
            found: false,
        }
    }

    pub fn found(&self) -> bool {
        self.found
    }

    fn check_receiver(&mut self, args: &[Expression]) {
        if args
            .first()
            .is_some_and(|receiver| receiver.plain_string() == self.target)
        {
            self.found = true;
        }
    }

    fn absorb(&mut self, result: Result<bool, ParseError>) -> bool {
        match result {
            Ok(found) => {
                self.found |= found;
                true
            }
            Err(_) => false,
        }
    }
}

impl<M: MetadataProvider + ?Sized> ExprVisitor for PresenceVisitor<'_, '_, M> {
    fn on_object_function(&mut self, _name: &str, args: &[Expression], _: &FunctionMetadata) {
        self.check_receiver(args);
    }

    fn on_object_automatism_function(
        &mut self,
        _name: &str,
        args: &[Expression],
        _: &FunctionMetadata,
    ) {
        self.check_receiver(args);
    }

    fn on_sub_math_expression(&mut self, expr: &mut Expression) -> bool {
        let result = ensure_sufficient_stack(|| {
            math_references_object(self.parser, expr.plain_string(), self.target)
        });
        self.absorb(result)
    }

    fn on_sub_text_expression(&mut self, expr: &mut Expression) -> bool {
        let result = ensure_sufficient_stack(|| {
            string_references_object(self.parser, expr.plain_string(), self.target)
        });
        self.absorb(result)
    }
}
