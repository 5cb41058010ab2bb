//! Walking flat instruction lists and their sub-instructions.
//!
//! Parameters are dispatched on the kind their instruction's metadata
//! declares. A parameter that fails to parse is logged and left as is; it
//! never stops the walk.

use evt_ir::{
    Expression, Instruction, InstructionList, InstructionMetadata, MetadataProvider, ParameterKind,
};
use evt_parse::{ExpressionParser, ParseError};
use evt_stack::ensure_sufficient_stack;
use tracing::debug;

use crate::presence::{math_references_object, string_references_object};
use crate::rename::{rename_in_math, rename_in_string};
use crate::text::TextPattern;

/// Which kind of instruction a list holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    Conditions,
    Actions,
}

impl Side {
    /// Metadata of `type_id` on this side.
    fn metadata<'m, M: MetadataProvider + ?Sized>(
        self,
        metadata: &'m M,
        type_id: &str,
    ) -> &'m InstructionMetadata {
        match self {
            Side::Conditions => metadata.condition(type_id),
            Side::Actions => metadata.action(type_id),
        }
    }
}

/// Per-parameter rewrite applied by [`rewrite_instructions`].
pub(crate) trait ParameterRewrite {
    /// The new text of a parameter, or `None` to keep it.
    fn rewrite(&self, kind: ParameterKind, text: &str) -> Result<Option<String>, ParseError>;
}

/// Renames an object in object parameters and in expressions.
pub(crate) struct RenameObject<'r, 'm, M: ?Sized> {
    pub(crate) parser: ExpressionParser<'m, M>,
    pub(crate) old_name: &'r str,
    pub(crate) new_name: &'r str,
}

impl<M: MetadataProvider + ?Sized> ParameterRewrite for RenameObject<'_, '_, M> {
    fn rewrite(&self, kind: ParameterKind, text: &str) -> Result<Option<String>, ParseError> {
        match kind {
            ParameterKind::Object => Ok((text == self.old_name).then(|| self.new_name.to_owned())),
            ParameterKind::Expression => {
                rename_in_math(self.parser, text, self.old_name, self.new_name).map(Some)
            }
            ParameterKind::StringLike => {
                rename_in_string(self.parser, text, self.old_name, self.new_name).map(Some)
            }
            ParameterKind::Other => Ok(None),
        }
    }
}

/// Replaces text in every parameter, whatever its kind.
pub(crate) struct ReplaceText<'r> {
    pub(crate) pattern: &'r TextPattern,
    pub(crate) replacement: &'r str,
}

impl ParameterRewrite for ReplaceText<'_> {
    fn rewrite(&self, _kind: ParameterKind, text: &str) -> Result<Option<String>, ParseError> {
        Ok(self.pattern.replace_all(text, self.replacement))
    }
}

/// Apply `rewrite` to every parameter of `instructions`, sub-instructions
/// included. Returns whether any parameter text changed.
pub(crate) fn rewrite_instructions<M, R>(
    instructions: &mut InstructionList,
    metadata: &M,
    side: Side,
    rewrite: &R,
) -> bool
where
    M: MetadataProvider + ?Sized,
    R: ParameterRewrite + ?Sized,
{
    let mut changed = false;
    for instruction in instructions.iter_mut() {
        let meta = side.metadata(metadata, instruction.type_id());
        for index in 0..instruction.parameters().len() {
            let kind = meta.parameter_kind(index);
            let text = instruction.parameters()[index].plain_string();
            match rewrite.rewrite(kind, text) {
                Ok(Some(new_text)) if new_text != text => {
                    instruction.set_parameter(index, Expression::new(new_text));
                    changed = true;
                }
                Ok(_) => {}
                Err(error) => {
                    debug!(type_id = instruction.type_id(), index, %error, "parameter skipped");
                }
            }
        }
        changed |= ensure_sufficient_stack(|| {
            rewrite_instructions(instruction.sub_instructions_mut(), metadata, side, rewrite)
        });
    }
    changed
}

/// Delete every instruction that references `name`, and search the
/// sub-instructions of the others. Returns whether anything was removed.
pub(crate) fn remove_in_instructions<M: MetadataProvider + ?Sized>(
    instructions: &mut InstructionList,
    parser: ExpressionParser<'_, M>,
    side: Side,
    name: &str,
) -> bool {
    let before = instructions.len();
    let mut removed_nested = false;
    instructions.retain_mut(|instruction| {
        if references_object(instruction, parser, side, name) {
            return false;
        }
        removed_nested |= ensure_sufficient_stack(|| {
            remove_in_instructions(instruction.sub_instructions_mut(), parser, side, name)
        });
        true
    });
    removed_nested || instructions.len() != before
}

/// Whether one instruction's own parameters reference `name`.
///
/// Object parameters are compared first; expressions are only parsed when
/// none of them matches.
fn references_object<M: MetadataProvider + ?Sized>(
    instruction: &Instruction,
    parser: ExpressionParser<'_, M>,
    side: Side,
    name: &str,
) -> bool {
    let meta = side.metadata(parser.metadata(), instruction.type_id());

    if kinded_parameters(instruction, meta)
        .any(|(_, kind, text)| kind == ParameterKind::Object && text == name)
    {
        return true;
    }

    kinded_parameters(instruction, meta).any(|(index, kind, text)| {
        let result = match kind {
            ParameterKind::Expression => math_references_object(parser, text, name),
            ParameterKind::StringLike => string_references_object(parser, text, name),
            ParameterKind::Object | ParameterKind::Other => return false,
        };
        result.unwrap_or_else(|error| {
            debug!(type_id = instruction.type_id(), index, %error, "parameter skipped");
            false
        })
    })
}

/// Parameters of `instruction` with their index and declared kind.
fn kinded_parameters<'a>(
    instruction: &'a Instruction,
    meta: &'a InstructionMetadata,
) -> impl Iterator<Item = (usize, ParameterKind, &'a str)> + 'a {
    instruction
        .parameters()
        .iter()
        .enumerate()
        .map(move |(index, param)| (index, meta.parameter_kind(index), param.plain_string()))
}

/// Whether any parameter of `instructions`, sub-instructions included,
/// contains `pattern`.
pub(crate) fn instructions_contain(instructions: &[Instruction], pattern: &TextPattern) -> bool {
    instructions.iter().any(|instruction| {
        instruction
            .parameters()
            .iter()
            .any(|param| pattern.is_match(param.plain_string()))
            || ensure_sufficient_stack(|| {
                instructions_contain(instruction.sub_instructions(), pattern)
            })
    })
}
