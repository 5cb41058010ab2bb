//! Event IR - data model for the event refactoring engine
//!
//! This crate contains the data structures the refactoring passes walk:
//! - Spans for diagnostics inside expression text
//! - `Expression`, the textual value of one instruction parameter
//! - `Instruction` and `InstructionList` (conditions and actions)
//! - Events behind the `EventNode` capability trait, stored in identified
//!   `EventList`s
//! - Instruction and expression-function metadata, plus `Platform`, an
//!   in-memory metadata registry
//!
//! # Design Philosophy
//!
//! - **Text is the source of truth**: parameters are stored as plain strings
//!   and replaced wholesale, never patched in place.
//! - **Stable identities**: every event and event list carries an id that is
//!   never reused, so references into the tree can be held weakly.
//! - **Narrow capabilities**: passes only see what `EventNode` exposes.

mod event;
mod event_list;
mod expression;
mod ids;
mod instruction;
mod metadata;
mod platform;
mod span;

pub use event::{Event, EventKind, EventNode, InstructionLists, InstructionListsMut};
pub use event_list::EventList;
pub use expression::Expression;
pub use ids::{EventId, ListId};
pub use instruction::{Instruction, InstructionList};
pub use metadata::{
    FunctionMetadata, InstructionMetadata, MetadataProvider, ParameterKind, ParameterMetadata,
    ReturnType,
};
pub use platform::Platform;
pub use span::Span;
