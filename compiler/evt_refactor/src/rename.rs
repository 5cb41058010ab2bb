//! Renaming an object inside expression text.
//!
//! [`RenameVisitor`] rebuilds the expression it is fed, substituting the
//! object in receiver position of object and automatism calls. Everything
//! else is reproduced as written, so an expression that does not use the
//! object as a receiver comes back byte-identical.

use evt_ir::{Expression, FunctionMetadata, MetadataProvider, ReturnType};
use evt_parse::{ExprVisitor, ExpressionParser, ParseError};
use evt_stack::ensure_sufficient_stack;

/// Rename `old_name` to `new_name` in a math expression.
pub fn rename_in_math<M: MetadataProvider + ?Sized>(
    parser: ExpressionParser<'_, M>,
    text: &str,
    old_name: &str,
    new_name: &str,
) -> Result<String, ParseError> {
    let mut visitor = RenameVisitor::new(parser, old_name, new_name);
    parser.parse_math(text, &mut visitor)?;
    Ok(visitor.into_output())
}

/// Rename `old_name` to `new_name` in a string expression.
pub fn rename_in_string<M: MetadataProvider + ?Sized>(
    parser: ExpressionParser<'_, M>,
    text: &str,
    old_name: &str,
    new_name: &str,
) -> Result<String, ParseError> {
    let mut visitor = RenameVisitor::new(parser, old_name, new_name);
    parser.parse_string(text, &mut visitor)?;
    Ok(visitor.into_output())
}

/// Rebuilds an expression with one object renamed.
///
/// Only the receiver (`args[0]`) of object and automatism calls is
/// compared to the old name. Other arguments that happen to spell the same
/// name are left alone, and the automatism name (`args[1]`) is never
/// substituted. Math and string arguments are rewritten recursively, each
/// by a fresh visitor, before the call containing them is rendered.
pub struct RenameVisitor<'r, 'm, M: ?Sized> {
    parser: ExpressionParser<'m, M>,
    old_name: &'r str,
    new_name: &'r str,
    output: String,
    padding: String,
}

impl<'r, 'm, M: MetadataProvider + ?Sized> RenameVisitor<'r, 'm, M> {
    pub fn new(parser: ExpressionParser<'m, M>, old_name: &'r str, new_name: &'r str) -> Self {
        RenameVisitor {
            parser,
            old_name,
            new_name,
            output: String::new(),
            padding: String::new(),
        }
    }

    /// The rebuilt expression.
    pub fn into_output(self) -> String {
        self.output
    }

    fn receiver<'a>(&'a self, args: &'a [Expression]) -> &'a str {
        match args.first() {
            Some(receiver) if receiver.plain_string() == self.old_name => self.new_name,
            Some(receiver) => receiver.plain_string(),
            None => "",
        }
    }

    /// Append `name(args...)`, skipping the first `skip` slots and
    /// code-only parameters. An empty list keeps its padding.
    fn push_call(&mut self, name: &str, args: &[Expression], metadata: &FunctionMetadata, skip: usize) {
        self.output.push_str(name);
        self.output.push('(');
        let padding = std::mem::take(&mut self.padding);
        self.output.push_str(&padding);
        self.push_arguments(args, metadata, skip);
        self.output.push(')');
    }

    fn push_arguments(&mut self, args: &[Expression], metadata: &FunctionMetadata, skip: usize) {
        let visible = args
            .iter()
            .enumerate()
            .skip(skip)
            .filter(|(index, _)| !metadata.is_code_only(*index));
        for (n, (_, arg)) in visible.enumerate() {
            if n > 0 {
                self.output.push(',');
            }
            self.output.push_str(arg.plain_string());
        }
    }
}

impl<M: MetadataProvider + ?Sized> ExprVisitor for RenameVisitor<'_, '_, M> {
    fn on_constant_token(&mut self, text: &str) {
        self.output.push_str(text);
    }

    fn on_number(&mut self, text: &str) {
        self.output.push_str(text);
    }

    fn on_operator(&mut self, text: &str) {
        self.output.push_str(text);
    }

    fn on_static_function(&mut self, name: &str, args: &[Expression], metadata: &FunctionMetadata) {
        // A nameless string function is how some parsers report a literal.
        if name.is_empty() && metadata.returns == ReturnType::String {
            self.output.push('"');
            self.push_arguments(args, metadata, 0);
            self.output.push('"');
            return;
        }
        self.push_call(name, args, metadata, 0);
    }

    fn on_object_function(&mut self, name: &str, args: &[Expression], metadata: &FunctionMetadata) {
        let receiver = self.receiver(args).to_owned();
        self.output.push_str(&receiver);
        self.output.push('.');
        self.push_call(name, args, metadata, 1);
    }

    fn on_object_automatism_function(
        &mut self,
        name: &str,
        args: &[Expression],
        metadata: &FunctionMetadata,
    ) {
        let receiver = self.receiver(args).to_owned();
        let automatism = args.get(1).map_or("", Expression::plain_string);
        self.output.push_str(&receiver);
        self.output.push('.');
        self.output.push_str(automatism);
        self.output.push_str("::");
        self.push_call(name, args, metadata, 2);
    }

    fn on_blank_arguments(&mut self, text: &str) {
        self.padding = text.to_owned();
    }

    fn on_sub_math_expression(&mut self, expr: &mut Expression) -> bool {
        let result = ensure_sufficient_stack(|| {
            rename_in_math(self.parser, expr.plain_string(), self.old_name, self.new_name)
        });
        match result {
            Ok(renamed) => {
                *expr = Expression::new(renamed);
                true
            }
            Err(_) => false,
        }
    }

    fn on_sub_text_expression(&mut self, expr: &mut Expression) -> bool {
        let result = ensure_sufficient_stack(|| {
            rename_in_string(self.parser, expr.plain_string(), self.old_name, self.new_name)
        });
        match result {
            Ok(renamed) => {
                *expr = Expression::new(renamed);
                true
            }
            Err(_) => false,
        }
    }
}
