//! Conditions and actions.

use crate::Expression;

/// A list of conditions or a list of actions.
pub type InstructionList = Vec<Instruction>;

/// One condition or action occurrence inside an event.
///
/// `type_id` selects the metadata that gives the kind of each positional
/// parameter. Compound instructions (logical groupings such as "or") keep
/// their children in `sub_instructions`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instruction {
    type_id: String,
    parameters: Vec<Expression>,
    #[cfg_attr(feature = "serde", serde(default))]
    sub_instructions: InstructionList,
    #[cfg_attr(feature = "serde", serde(default))]
    inverted: bool,
}

impl Instruction {
    /// Create an instruction with the given type and parameters.
    pub fn new<I, P>(type_id: impl Into<String>, parameters: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Expression>,
    {
        Instruction {
            type_id: type_id.into(),
            parameters: parameters.into_iter().map(Into::into).collect(),
            sub_instructions: Vec::new(),
            inverted: false,
        }
    }

    /// Builder: attach sub-instructions.
    #[must_use]
    pub fn with_sub_instructions(mut self, sub_instructions: InstructionList) -> Self {
        self.sub_instructions = sub_instructions;
        self
    }

    /// Builder: mark the condition as inverted.
    #[must_use]
    pub fn inverted(mut self) -> Self {
        self.inverted = true;
        self
    }

    pub fn type_id(&self) -> &str {
        &self.type_id
    }

    pub fn parameters(&self) -> &[Expression] {
        &self.parameters
    }

    /// Parameter at `index`, if present.
    pub fn parameter(&self, index: usize) -> Option<&Expression> {
        self.parameters.get(index)
    }

    /// Replace the parameter at `index` wholesale.
    ///
    /// Out-of-range indices are ignored: the instruction's arity is owned by
    /// whoever created it, not by the passes rewriting it.
    pub fn set_parameter(&mut self, index: usize, value: Expression) {
        if let Some(slot) = self.parameters.get_mut(index) {
            *slot = value;
        }
    }

    pub fn sub_instructions(&self) -> &InstructionList {
        &self.sub_instructions
    }

    pub fn sub_instructions_mut(&mut self) -> &mut InstructionList {
        &mut self.sub_instructions
    }

    pub fn is_inverted(&self) -> bool {
        self.inverted
    }
}
