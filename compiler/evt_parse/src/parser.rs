//! Math and string expression grammar.
//!
//! ```text
//! math    := ws? sum ws? EOF
//! sum     := product (ws? ('+' | '-') ws? product)*
//! product := unary (ws? ('*' | '/') ws? unary)*
//! unary   := ('+' | '-') ws? unary | number | '(' ws? sum ws? ')' | call
//!
//! string  := ws? concat ws? EOF
//! concat  := term (ws? '+' ws? term)*
//! term    := literal | '(' ws? concat ws? ')' | call
//!
//! call    := ident '(' args ')'                      static
//!          | ident '.' ident '(' args ')'            object
//!          | ident '.' ident '::' ident '(' args ')' automatism
//! ```
//!
//! Call arguments are split at top-level commas but not parsed here: each
//! math or string argument is handed to the visitor, which decides whether
//! and how to parse it.

use std::ops::Range;

use evt_ir::{Expression, FunctionMetadata, MetadataProvider, ParameterKind, ReturnType, Span};
use evt_stack::ensure_sufficient_stack;
use tracing::trace;

use crate::cursor::{is_blank, is_ident_start, Cursor};
use crate::{ExprVisitor, ParseError, ParseErrorKind};

/// Parses expression text against a metadata provider.
///
/// Cheap to copy: it only borrows the metadata. Visitors that recurse into
/// sub-expressions keep a copy to parse their arguments.
pub struct ExpressionParser<'m, M: ?Sized> {
    metadata: &'m M,
}

impl<M: ?Sized> Clone for ExpressionParser<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: ?Sized> Copy for ExpressionParser<'_, M> {}

impl<'m, M: MetadataProvider + ?Sized> ExpressionParser<'m, M> {
    pub fn new(metadata: &'m M) -> Self {
        ExpressionParser { metadata }
    }

    /// The metadata calls are resolved against.
    pub fn metadata(&self) -> &'m M {
        self.metadata
    }

    /// Parse `text` as a math expression, reporting its structure to
    /// `visitor`.
    pub fn parse_math<V: ExprVisitor + ?Sized>(
        &self,
        text: &str,
        visitor: &mut V,
    ) -> Result<(), ParseError> {
        let mut grammar = Grammar::new(text, self.metadata, visitor);
        grammar.whitespace();
        grammar.sum()?;
        grammar.whitespace();
        grammar.expect_end()
    }

    /// Parse `text` as a string expression, reporting its structure to
    /// `visitor`.
    pub fn parse_string<V: ExprVisitor + ?Sized>(
        &self,
        text: &str,
        visitor: &mut V,
    ) -> Result<(), ParseError> {
        let mut grammar = Grammar::new(text, self.metadata, visitor);
        grammar.whitespace();
        grammar.concat()?;
        grammar.whitespace();
        grammar.expect_end()
    }

    /// Check that `text` is a well-formed math expression, arguments
    /// included.
    ///
    /// Errors inside arguments are reported with spans relative to `text`.
    pub fn validate_math(&self, text: &str) -> Result<(), ParseError> {
        let mut validator = Validator::new(*self);
        let result = self.parse_math(text, &mut validator);
        validator.finish(result)
    }

    /// Check that `text` is a well-formed string expression, arguments
    /// included.
    pub fn validate_string(&self, text: &str) -> Result<(), ParseError> {
        let mut validator = Validator::new(*self);
        let result = self.parse_string(text, &mut validator);
        validator.finish(result)
    }
}

/// Visitor that parses every argument, remembering the first failure.
struct Validator<'m, M: ?Sized> {
    parser: ExpressionParser<'m, M>,
    inner: Option<ParseError>,
}

impl<'m, M: MetadataProvider + ?Sized> Validator<'m, M> {
    fn new(parser: ExpressionParser<'m, M>) -> Self {
        Validator {
            parser,
            inner: None,
        }
    }

    fn check(&mut self, result: Result<(), ParseError>) -> bool {
        match result {
            Ok(()) => true,
            Err(error) => {
                self.inner = Some(error);
                false
            }
        }
    }

    /// Replace a "rejected argument" error by the argument's own error,
    /// rebased onto the outer text.
    fn finish(self, result: Result<(), ParseError>) -> Result<(), ParseError> {
        let inner = self.inner;
        result.map_err(|outer| {
            let rejected_argument = matches!(outer.kind, ParseErrorKind::SubExpression { .. });
            match inner {
                Some(inner) if rejected_argument => inner.shifted(outer.span.start),
                _ => outer,
            }
        })
    }
}

impl<M: MetadataProvider + ?Sized> ExprVisitor for Validator<'_, M> {
    fn on_sub_math_expression(&mut self, expr: &mut Expression) -> bool {
        let result = self.parser.validate_math(expr.plain_string());
        self.check(result)
    }

    fn on_sub_text_expression(&mut self, expr: &mut Expression) -> bool {
        let result = self.parser.validate_string(expr.plain_string());
        self.check(result)
    }
}

/// The three call shapes, with their names borrowed from the source text.
#[derive(Clone, Copy, Debug)]
enum Call<'a> {
    Static {
        name: &'a str,
    },
    Object {
        receiver: &'a str,
        name: &'a str,
    },
    Automatism {
        receiver: &'a str,
        automatism: &'a str,
        name: &'a str,
    },
}

impl<'a> Call<'a> {
    fn name(self) -> &'a str {
        match self {
            Call::Static { name } | Call::Object { name, .. } | Call::Automatism { name, .. } => {
                name
            }
        }
    }

    /// Leading argument slots filled from the call syntax rather than from
    /// the argument list.
    fn fixed_slots(self) -> usize {
        match self {
            Call::Static { .. } => 0,
            Call::Object { .. } => 1,
            Call::Automatism { .. } => 2,
        }
    }
}

/// A call's argument list as written, split at top-level commas.
struct WrittenArguments {
    ranges: Vec<Range<usize>>,
    /// Whitespace between the parentheses of an empty list.
    padding: Option<Range<usize>>,
}

/// Recursive-descent state for one expression.
struct Grammar<'a, 'm, 'v, M: ?Sized, V: ?Sized> {
    cursor: Cursor<'a>,
    metadata: &'m M,
    visitor: &'v mut V,
}

impl<'a, 'm, 'v, M, V> Grammar<'a, 'm, 'v, M, V>
where
    M: MetadataProvider + ?Sized,
    V: ExprVisitor + ?Sized,
{
    fn new(text: &'a str, metadata: &'m M, visitor: &'v mut V) -> Self {
        Grammar {
            cursor: Cursor::new(text),
            metadata,
            visitor,
        }
    }

    // --- Shared ---

    /// Consume whitespace, reporting it verbatim.
    fn whitespace(&mut self) {
        let ws = self.cursor.eat_whitespace();
        if !ws.is_empty() {
            self.visitor.on_constant_token(ws);
        }
    }

    /// Consume a `len`-byte operator, reporting it verbatim.
    fn operator(&mut self, len: usize) {
        let start = self.cursor.pos();
        self.cursor.advance_n(len);
        let op = self.cursor.slice_from(start);
        self.visitor.on_operator(op);
    }

    fn expect_end(&self) -> Result<(), ParseError> {
        if self.cursor.is_eof() {
            Ok(())
        } else {
            Err(ParseError::trailing_input(
                self.cursor.pos(),
                self.cursor.end(),
            ))
        }
    }

    #[cold]
    fn unexpected(&self, expected: &'static str) -> ParseError {
        let found = if self.cursor.is_eof() {
            None
        } else {
            self.cursor.current_char()
        };
        ParseError::unexpected(found, expected, self.cursor.pos())
    }

    fn ident(&mut self) -> Result<&'a str, ParseError> {
        match self.cursor.eat_ident() {
            Some(ident) => Ok(ident),
            None => Err(self.unexpected("an identifier")),
        }
    }

    /// `'(' ws? inner ws? ')'`.
    fn group(&mut self, inner: fn(&mut Self) -> Result<(), ParseError>) -> Result<(), ParseError> {
        let open = self.cursor.pos();
        self.operator(1);
        self.whitespace();
        ensure_sufficient_stack(|| inner(self))?;
        self.whitespace();
        match self.cursor.current() {
            b')' => {
                self.operator(1);
                Ok(())
            }
            _ if self.cursor.is_eof() => Err(ParseError::unclosed_group(open)),
            _ => Err(self.unexpected("`)`")),
        }
    }

    // --- Math ---

    fn sum(&mut self) -> Result<(), ParseError> {
        self.product()?;
        loop {
            self.whitespace();
            if !matches!(self.cursor.current(), b'+' | b'-') {
                return Ok(());
            }
            self.operator(1);
            self.whitespace();
            self.product()?;
        }
    }

    fn product(&mut self) -> Result<(), ParseError> {
        self.unary()?;
        loop {
            self.whitespace();
            if !matches!(self.cursor.current(), b'*' | b'/') {
                return Ok(());
            }
            self.operator(1);
            self.whitespace();
            self.unary()?;
        }
    }

    fn unary(&mut self) -> Result<(), ParseError> {
        let current = self.cursor.current();
        if matches!(current, b'+' | b'-') {
            self.operator(1);
            self.whitespace();
            return ensure_sufficient_stack(|| self.unary());
        }
        if let Some(number) = self.cursor.eat_number() {
            self.visitor.on_number(number);
            return Ok(());
        }
        match current {
            b'(' => self.group(Self::sum),
            _ if is_ident_start(current) => self.call(ReturnType::Number),
            _ => Err(self.unexpected("a number, `(` or a function call")),
        }
    }

    // --- String ---

    fn concat(&mut self) -> Result<(), ParseError> {
        self.term()?;
        loop {
            self.whitespace();
            if self.cursor.current() != b'+' {
                return Ok(());
            }
            self.operator(1);
            self.whitespace();
            self.term()?;
        }
    }

    fn term(&mut self) -> Result<(), ParseError> {
        let current = self.cursor.current();
        match current {
            b'"' => self.string_literal(),
            b'(' => self.group(Self::concat),
            _ if is_ident_start(current) => self.call(ReturnType::String),
            _ => Err(self.unexpected("a string, `(` or a function call")),
        }
    }

    fn string_literal(&mut self) -> Result<(), ParseError> {
        let start = self.cursor.pos();
        if !self.cursor.eat_string_literal() {
            return Err(ParseError::unterminated_string(start, self.cursor.pos()));
        }
        let literal = self.cursor.slice_from(start);
        self.visitor.on_constant_token(literal);
        Ok(())
    }

    // --- Calls ---

    fn call(&mut self, returns: ReturnType) -> Result<(), ParseError> {
        let start = self.cursor.pos();
        let first = self.ident()?;
        let call = if self.cursor.current() == b'.' {
            self.cursor.advance();
            let second = self.ident()?;
            if self.cursor.current() == b':' && self.cursor.peek() == b':' {
                self.cursor.advance_n(2);
                let name = self.ident()?;
                Call::Automatism {
                    receiver: first,
                    automatism: second,
                    name,
                }
            } else {
                Call::Object {
                    receiver: first,
                    name: second,
                }
            }
        } else {
            Call::Static { name: first }
        };
        let call_span = Span::from_range(start..self.cursor.pos());

        if self.cursor.current() != b'(' {
            return Err(ParseError::new(
                ParseErrorKind::ExpectedArguments {
                    name: call.name().to_owned(),
                },
                call_span,
            ));
        }

        let Some(metadata) = self.lookup(call, returns) else {
            return Err(ParseError::new(
                ParseErrorKind::UnknownFunction {
                    name: call.name().to_owned(),
                    returns,
                },
                call_span,
            ));
        };

        let WrittenArguments { ranges, padding } = self.arguments()?;
        let (mut args, spans) = self.align_arguments(call, metadata, ranges, call_span)?;
        self.visit_arguments(call, metadata, &mut args, &spans)?;

        if let Some(padding) = padding {
            self.visitor
                .on_blank_arguments(self.cursor.slice(padding.start, padding.end));
        }

        trace!(function = call.name(), args = args.len(), "call");
        match call {
            Call::Static { name } => self.visitor.on_static_function(name, &args, metadata),
            Call::Object { name, .. } => self.visitor.on_object_function(name, &args, metadata),
            Call::Automatism { name, .. } => {
                self.visitor
                    .on_object_automatism_function(name, &args, metadata);
            }
        }
        Ok(())
    }

    fn lookup(&self, call: Call<'_>, returns: ReturnType) -> Option<&'m FunctionMetadata> {
        let metadata: &'m M = self.metadata;
        match call {
            Call::Static { name } => metadata.static_function(returns, name),
            Call::Object { name, .. } => metadata.object_function(returns, name),
            Call::Automatism { name, .. } => metadata.automatism_function(returns, name),
        }
    }

    /// Split the argument list at top-level commas.
    ///
    /// Expects the cursor on `(` and leaves it after the matching `)`.
    /// Strings and nested parentheses are skipped as units. A blank list
    /// is zero arguments, its whitespace kept as padding.
    fn arguments(&mut self) -> Result<WrittenArguments, ParseError> {
        let open = self.cursor.pos();
        self.cursor.advance();
        let mut ranges = Vec::new();
        let mut start = self.cursor.pos();
        let mut depth = 0usize;
        loop {
            match self.cursor.current() {
                b'"' => {
                    let literal = self.cursor.pos();
                    if !self.cursor.eat_string_literal() {
                        return Err(ParseError::unterminated_string(literal, self.cursor.pos()));
                    }
                    continue;
                }
                b'(' => depth += 1,
                b')' if depth == 0 => {
                    ranges.push(start..self.cursor.pos());
                    self.cursor.advance();
                    break;
                }
                b')' => depth -= 1,
                b',' if depth == 0 => {
                    ranges.push(start..self.cursor.pos());
                    start = self.cursor.pos() + 1;
                }
                _ if self.cursor.is_eof() => return Err(ParseError::unclosed_group(open)),
                _ => {}
            }
            self.cursor.advance();
        }

        let mut padding = None;
        if let [only] = ranges.as_slice() {
            if is_blank(self.cursor.slice(only.start, only.end)) {
                if !only.is_empty() {
                    padding = Some(only.clone());
                }
                ranges.clear();
            }
        }
        Ok(WrittenArguments { ranges, padding })
    }

    /// Lay written arguments out along the declared parameters.
    fn align_arguments(
        &self,
        call: Call<'a>,
        metadata: &FunctionMetadata,
        written: Vec<Range<usize>>,
        call_span: Span,
    ) -> Result<(Vec<Expression>, Vec<Span>), ParseError> {
        let fixed = call.fixed_slots();
        let capacity = metadata.parameters.len().max(fixed);
        let mut args = Vec::with_capacity(capacity);
        let mut spans = Vec::with_capacity(capacity);

        match call {
            Call::Static { .. } => {}
            Call::Object { receiver, .. } => args.push(Expression::new(receiver)),
            Call::Automatism {
                receiver,
                automatism,
                ..
            } => {
                args.push(Expression::new(receiver));
                args.push(Expression::new(automatism));
            }
        }
        spans.resize(args.len(), call_span);

        let mut written = written.into_iter();
        for param in metadata.parameters.iter().skip(fixed) {
            if param.code_only {
                args.push(Expression::default());
                spans.push(call_span);
                continue;
            }
            match written.next() {
                Some(range) => {
                    args.push(Expression::new(self.cursor.slice(range.start, range.end)));
                    spans.push(Span::from_range(range));
                }
                None if param.optional => break,
                None => {
                    return Err(ParseError::new(
                        ParseErrorKind::MissingArgument {
                            function: call.name().to_owned(),
                            index: args.len(),
                        },
                        call_span,
                    ));
                }
            }
        }

        let extra = written.count();
        if extra > 0 {
            let expected = metadata
                .parameters
                .iter()
                .skip(fixed)
                .filter(|param| !param.code_only)
                .count();
            return Err(ParseError::new(
                ParseErrorKind::TooManyArguments {
                    function: call.name().to_owned(),
                    expected,
                    found: expected + extra,
                },
                call_span,
            ));
        }

        Ok((args, spans))
    }

    /// Hand math and string arguments to the visitor, which may replace
    /// them in place.
    fn visit_arguments(
        &mut self,
        call: Call<'a>,
        metadata: &FunctionMetadata,
        args: &mut [Expression],
        spans: &[Span],
    ) -> Result<(), ParseError> {
        let fixed = call.fixed_slots();
        for (index, arg) in args.iter_mut().enumerate().skip(fixed) {
            let Some(param) = metadata.parameters.get(index) else {
                continue;
            };
            if param.code_only {
                continue;
            }
            let accepted = match param.kind {
                ParameterKind::Expression => self.visitor.on_sub_math_expression(arg),
                ParameterKind::StringLike => self.visitor.on_sub_text_expression(arg),
                ParameterKind::Object | ParameterKind::Other => true,
            };
            if !accepted {
                return Err(ParseError::new(
                    ParseErrorKind::SubExpression {
                        function: call.name().to_owned(),
                        index,
                    },
                    spans[index],
                ));
            }
        }
        Ok(())
    }
}
