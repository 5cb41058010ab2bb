//! Instruction and expression-function metadata.
//!
//! Metadata says how each positional parameter of an instruction or
//! expression function must be read: as a literal object name, as a math
//! expression, as a string expression, or as opaque text. The refactoring
//! passes consume it read-only through [`MetadataProvider`].

/// How a parameter's text must be interpreted.
///
/// A closed classification of the open-ended parameter type names used by
/// extensions (see [`ParameterKind::classify`]).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParameterKind {
    /// The text is an object name, verbatim.
    Object,
    /// The text is a math expression.
    Expression,
    /// The text is a string expression (strings, files, joystick axes,
    /// colors, layers).
    StringLike,
    /// Anything else. Never parsed, never rewritten by kind-aware passes.
    Other,
}

impl ParameterKind {
    /// Classify a raw parameter type name.
    pub fn classify(type_name: &str) -> Self {
        match type_name {
            "object" | "objectPtr" | "objectList" | "objectListWithoutPicking" => Self::Object,
            "expression" | "camera" => Self::Expression,
            "string" | "file" | "joyaxis" | "color" | "layer" => Self::StringLike,
            _ => Self::Other,
        }
    }
}

/// Declaration of one positional parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParameterMetadata {
    /// Raw type name as declared by the extension (`"object"`, `"string"`, ...).
    pub type_name: String,
    /// Classification of `type_name`.
    pub kind: ParameterKind,
    /// Only exists for code generation: never written by users, never shown.
    #[cfg_attr(feature = "serde", serde(default))]
    pub code_only: bool,
    /// May be omitted when it is a trailing argument.
    #[cfg_attr(feature = "serde", serde(default))]
    pub optional: bool,
}

impl ParameterMetadata {
    /// A parameter of the given raw type name.
    pub fn new(type_name: impl Into<String>) -> Self {
        let type_name = type_name.into();
        let kind = ParameterKind::classify(&type_name);
        ParameterMetadata {
            type_name,
            kind,
            code_only: false,
            optional: false,
        }
    }

    /// Builder: mark as code-only.
    #[must_use]
    pub fn code_only(mut self) -> Self {
        self.code_only = true;
        self
    }

    /// Builder: mark as optional.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

/// Declared parameters of a condition or action type.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstructionMetadata {
    pub parameters: Vec<ParameterMetadata>,
}

impl InstructionMetadata {
    /// Metadata with no parameters, returned for unknown instruction types.
    pub const EMPTY: InstructionMetadata = InstructionMetadata {
        parameters: Vec::new(),
    };

    /// Metadata from raw parameter type names.
    pub fn from_types<'a>(type_names: impl IntoIterator<Item = &'a str>) -> Self {
        InstructionMetadata {
            parameters: type_names.into_iter().map(ParameterMetadata::new).collect(),
        }
    }

    /// Kind of the parameter at `index`; `Other` past the declared arity.
    pub fn parameter_kind(&self, index: usize) -> ParameterKind {
        self.parameters
            .get(index)
            .map_or(ParameterKind::Other, |p| p.kind)
    }
}

/// What an expression function evaluates to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReturnType {
    Number,
    String,
}

/// Declaration of an expression function.
///
/// For object functions, parameter 0 is the receiving object. For
/// automatism functions, parameter 1 is additionally the automatism name.
/// Both are part of `parameters` so argument vectors line up with it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionMetadata {
    pub name: String,
    pub returns: ReturnType,
    pub parameters: Vec<ParameterMetadata>,
}

impl FunctionMetadata {
    pub fn new(
        name: impl Into<String>,
        returns: ReturnType,
        parameters: Vec<ParameterMetadata>,
    ) -> Self {
        FunctionMetadata {
            name: name.into(),
            returns,
            parameters,
        }
    }

    /// Whether the parameter at `index` is code-only.
    ///
    /// Indices past the declared arity are treated as user-visible.
    pub fn is_code_only(&self, index: usize) -> bool {
        self.parameters.get(index).is_some_and(|p| p.code_only)
    }
}

/// Read-only access to instruction and expression-function metadata.
pub trait MetadataProvider {
    /// Metadata of a condition type. Unknown types yield an empty parameter
    /// list, never an error.
    fn condition(&self, type_id: &str) -> &InstructionMetadata;

    /// Metadata of an action type. Unknown types yield an empty parameter
    /// list, never an error.
    fn action(&self, type_id: &str) -> &InstructionMetadata;

    /// A free function, `Name(args)`.
    fn static_function(&self, returns: ReturnType, name: &str) -> Option<&FunctionMetadata>;

    /// An object function, `object.Name(args)`.
    fn object_function(&self, returns: ReturnType, name: &str) -> Option<&FunctionMetadata>;

    /// An automatism function, `object.Automatism::Name(args)`.
    fn automatism_function(&self, returns: ReturnType, name: &str) -> Option<&FunctionMetadata>;
}
