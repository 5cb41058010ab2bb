//! Shared test utilities: a small platform and event builders.

#![allow(dead_code, reason = "Each test binary uses a different subset")]

use evt_ir::{
    Event, EventList, EventNode, Expression, FunctionMetadata, Instruction, InstructionMetadata,
    ParameterMetadata, Platform, ReturnType,
};

fn function(name: &str, returns: ReturnType, params: &[&str]) -> FunctionMetadata {
    FunctionMetadata::new(
        name,
        returns,
        params.iter().map(|p| ParameterMetadata::new(*p)).collect(),
    )
}

/// Instructions and functions modelled on a typical game platform.
pub fn platform() -> Platform {
    use ReturnType::{Number, String};

    Platform::new()
        .with_condition(
            "PosX",
            InstructionMetadata::from_types(["object", "relationalOperator", "expression"]),
        )
        .with_condition(
            "Collision",
            InstructionMetadata::from_types(["objectList", "objectList"]),
        )
        .with_condition(
            "VarScene",
            InstructionMetadata::from_types(["scenevar", "relationalOperator", "expression"]),
        )
        .with_condition("BuiltinCommonInstructions::Or", InstructionMetadata::EMPTY)
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
        .with_static_function(function("Abs", Number, &["expression"]))
        .with_static_function(function("Count", Number, &["objectList"]))
        .with_static_function(FunctionMetadata::new(
            "TimeDelta",
            Number,
            vec![ParameterMetadata::new("currentScene").code_only()],
        ))
        .with_static_function(function("ToString", String, &["expression"]))
        .with_object_function(function("X", Number, &["object"]))
        .with_object_function(function("Foo", Number, &["object", "object", "expression"]))
        .with_object_function(function("Name", String, &["object"]))
        .with_automatism_function(function(
            "SetVelocity",
            Number,
            &["object", "automatism", "expression", "expression"],
        ))
}

pub fn instr<const N: usize>(type_id: &str, params: [&str; N]) -> Instruction {
    Instruction::new(type_id, params)
}

/// Parameter texts of a list of instructions.
pub fn texts(instructions: &[Instruction]) -> Vec<Vec<String>> {
    instructions
        .iter()
        .map(|i| {
            i.parameters()
                .iter()
                .map(|p| p.plain_string().to_owned())
                .collect()
        })
        .collect()
}

/// Every parameter text of a tree, in walk order.
pub fn all_texts<E: EventNode>(events: &EventList<E>) -> Vec<String> {
    let mut out = Vec::new();
    collect_texts(events, &mut out);
    out
}

fn collect_texts<E: EventNode>(events: &EventList<E>, out: &mut Vec<String>) {
    for event in events {
        for list in event
            .condition_lists()
            .into_iter()
            .chain(event.action_lists())
        {
            collect_instructions(list, out);
        }
        if let Some(sub_events) = event.sub_events() {
            collect_texts(sub_events, out);
        }
    }
}

fn collect_instructions(instructions: &[Instruction], out: &mut Vec<String>) {
    for instruction in instructions {
        out.extend(
            instruction
                .parameters()
                .iter()
                .map(Expression::plain_string)
                .map(str::to_owned),
        );
        collect_instructions(instruction.sub_instructions(), out);
    }
}

/// Conditions of the standard event at `index`.
pub fn conditions(events: &EventList<Event>, index: usize) -> Vec<Vec<String>> {
    texts(events[index].condition_lists()[0])
}

/// Actions of the standard event at `index`.
pub fn actions(events: &EventList<Event>, index: usize) -> Vec<Vec<String>> {
    texts(events[index].action_lists()[0])
}
