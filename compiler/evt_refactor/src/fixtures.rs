//! Shared metadata for unit tests.

use evt_ir::{FunctionMetadata, InstructionMetadata, ParameterMetadata, Platform, ReturnType};

fn function(name: &str, returns: ReturnType, params: &[&str]) -> FunctionMetadata {
    FunctionMetadata::new(
        name,
        returns,
        params.iter().map(|p| ParameterMetadata::new(*p)).collect(),
    )
}

/// A handful of instructions and functions shaped like the built-in ones.
pub(crate) fn platform() -> Platform {
    use ReturnType::{Number, String};

    Platform::new()
        // Conditions
        .with_condition(
            "PosX",
            InstructionMetadata::from_types(["object", "relationalOperator", "expression"]),
        )
        .with_condition(
            "VarScene",
            InstructionMetadata::from_types(["scenevar", "relationalOperator", "expression"]),
        )
        .with_condition("BuiltinCommonInstructions::Or", InstructionMetadata::EMPTY)
        // Actions
        .with_action("Delete", InstructionMetadata::from_types(["object"]))
        .with_action(
            "MettreX",
            InstructionMetadata::from_types(["object", "operator", "expression"]),
        )
        .with_action(
            "ModVarSceneTxt",
            InstructionMetadata::from_types(["scenevar", "operator", "string"]),
        )
        .with_action(
            "PlaySound",
            InstructionMetadata::from_types(["file", "yesorno", "expression"]),
        )
        // Expression functions
        .with_static_function(function("Abs", Number, &["expression"]))
        .with_static_function(function("Count", Number, &["objectList"]))
        .with_static_function(FunctionMetadata::new(
            "TimeDelta",
            Number,
            vec![ParameterMetadata::new("currentScene").code_only()],
        ))
        .with_static_function(function("ToString", String, &["expression"]))
        .with_static_function(FunctionMetadata::new(
            "Label",
            String,
            vec![
                ParameterMetadata::new("currentScene").code_only(),
                ParameterMetadata::new("string"),
            ],
        ))
        .with_object_function(function("X", Number, &["object"]))
        .with_object_function(function("Foo", Number, &["object", "object", "expression"]))
        .with_object_function(function("Name", String, &["object"]))
        .with_automatism_function(function(
            "SetVelocity",
            Number,
            &["object", "automatism", "expression", "expression"],
        ))
        .with_automatism_function(function("State", String, &["object", "automatism"]))
}
