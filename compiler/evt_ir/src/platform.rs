//! In-memory metadata registry.

use rustc_hash::FxHashMap;

use crate::{FunctionMetadata, InstructionMetadata, MetadataProvider, ReturnType};

/// Returned for instruction types the platform does not know about.
static EMPTY_INSTRUCTION: InstructionMetadata = InstructionMetadata::EMPTY;

/// Expression functions of one call shape, split by return type.
///
/// The same name may be declared once per return type (a number `Text`
/// length and a string `Text` are unrelated functions).
#[derive(Clone, Debug, Default)]
struct FunctionTable {
    number: FxHashMap<String, FunctionMetadata>,
    string: FxHashMap<String, FunctionMetadata>,
}

impl FunctionTable {
    fn insert(&mut self, meta: FunctionMetadata) {
        let table = match meta.returns {
            ReturnType::Number => &mut self.number,
            ReturnType::String => &mut self.string,
        };
        table.insert(meta.name.clone(), meta);
    }

    fn get(&self, returns: ReturnType, name: &str) -> Option<&FunctionMetadata> {
        match returns {
            ReturnType::Number => self.number.get(name),
            ReturnType::String => self.string.get(name),
        }
    }
}

/// A metadata registry held in hash tables.
///
/// Populated with chained `with_*` calls; a later declaration of the same
/// name replaces the earlier one.
#[derive(Clone, Debug, Default)]
pub struct Platform {
    conditions: FxHashMap<String, InstructionMetadata>,
    actions: FxHashMap<String, InstructionMetadata>,
    static_functions: FunctionTable,
    object_functions: FunctionTable,
    automatism_functions: FunctionTable,
}

impl Platform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a condition type.
    #[must_use]
    pub fn with_condition(mut self, type_id: impl Into<String>, meta: InstructionMetadata) -> Self {
        self.conditions.insert(type_id.into(), meta);
        self
    }

    /// Declare an action type.
    #[must_use]
    pub fn with_action(mut self, type_id: impl Into<String>, meta: InstructionMetadata) -> Self {
        self.actions.insert(type_id.into(), meta);
        self
    }

    /// Declare a free expression function.
    #[must_use]
    pub fn with_static_function(mut self, meta: FunctionMetadata) -> Self {
        self.static_functions.insert(meta);
        self
    }

    /// Declare an object expression function.
    #[must_use]
    pub fn with_object_function(mut self, meta: FunctionMetadata) -> Self {
        self.object_functions.insert(meta);
        self
    }

    /// Declare an automatism expression function.
    #[must_use]
    pub fn with_automatism_function(mut self, meta: FunctionMetadata) -> Self {
        self.automatism_functions.insert(meta);
        self
    }
}

impl MetadataProvider for Platform {
    fn condition(&self, type_id: &str) -> &InstructionMetadata {
        self.conditions.get(type_id).unwrap_or(&EMPTY_INSTRUCTION)
    }

    fn action(&self, type_id: &str) -> &InstructionMetadata {
        self.actions.get(type_id).unwrap_or(&EMPTY_INSTRUCTION)
    }

    fn static_function(&self, returns: ReturnType, name: &str) -> Option<&FunctionMetadata> {
        self.static_functions.get(returns, name)
    }

    fn object_function(&self, returns: ReturnType, name: &str) -> Option<&FunctionMetadata> {
        self.object_functions.get(returns, name)
    }

    fn automatism_function(&self, returns: ReturnType, name: &str) -> Option<&FunctionMetadata> {
        self.automatism_functions.get(returns, name)
    }
}
