//! Events and the capability set refactoring passes rely on.
//!
//! Passes never match on concrete event kinds. They go through
//! [`EventNode`], which exposes exactly what a tree walk needs: the
//! condition and action lists of every branch, the sub-event list, and a
//! way to flag the event for re-layout. [`Event`] is the concrete closed
//! set of event kinds shipped with this crate.

use smallvec::{smallvec, SmallVec};

use crate::{EventId, EventList, Expression, InstructionList};

/// Borrowed instruction lists of one event (most events have one or two).
pub type InstructionLists<'a> = SmallVec<[&'a InstructionList; 2]>;

/// Mutably borrowed instruction lists of one event.
pub type InstructionListsMut<'a> = SmallVec<[&'a mut InstructionList; 2]>;

/// Capabilities of an event as seen by tree walks.
pub trait EventNode: Sized {
    /// Stable identity of this event.
    fn id(&self) -> EventId;

    /// Condition lists of every branch of this event.
    fn condition_lists(&self) -> InstructionLists<'_>;

    /// Mutable condition lists of every branch of this event.
    fn condition_lists_mut(&mut self) -> InstructionListsMut<'_>;

    /// Action lists of every branch of this event.
    fn action_lists(&self) -> InstructionLists<'_>;

    /// Mutable action lists of every branch of this event.
    fn action_lists_mut(&mut self) -> InstructionListsMut<'_>;

    /// Whether this kind of event owns a sub-event list.
    fn can_have_sub_events(&self) -> bool;

    /// The sub-events, for kinds that can have them.
    fn sub_events(&self) -> Option<&EventList<Self>>;

    /// Mutable sub-events, for kinds that can have them.
    fn sub_events_mut(&mut self) -> Option<&mut EventList<Self>>;

    /// Flag the event so its rendered layout is recomputed.
    fn mark_layout_dirty(&mut self);
}

/// The kinds of events.
#[derive(Debug)]
pub enum EventKind {
    /// Conditions, actions and sub-events.
    Standard {
        conditions: InstructionList,
        actions: InstructionList,
        sub_events: EventList<Event>,
    },
    /// Repeats while `while_conditions` hold, then behaves as a standard
    /// event for each iteration.
    While {
        while_conditions: InstructionList,
        conditions: InstructionList,
        actions: InstructionList,
        sub_events: EventList<Event>,
    },
    /// Runs `repeat_count` times. The count is a math expression but not an
    /// instruction parameter.
    Repeat {
        repeat_count: Expression,
        conditions: InstructionList,
        actions: InstructionList,
        sub_events: EventList<Event>,
    },
    /// A named folder of events.
    Group {
        name: String,
        sub_events: EventList<Event>,
    },
    /// Free text, no instructions.
    Comment { text: String },
}

/// One event of an event sheet.
#[derive(Debug)]
pub struct Event {
    id: EventId,
    kind: EventKind,
    layout_dirty: bool,
}

impl Event {
    /// Wrap a kind into an event with a fresh id.
    pub fn new(kind: EventKind) -> Self {
        Event {
            id: EventId::fresh(),
            kind,
            layout_dirty: false,
        }
    }

    /// A standard event.
    pub fn standard(conditions: InstructionList, actions: InstructionList) -> Self {
        Self::new(EventKind::Standard {
            conditions,
            actions,
            sub_events: EventList::new(),
        })
    }

    /// A while event.
    pub fn while_loop(
        while_conditions: InstructionList,
        conditions: InstructionList,
        actions: InstructionList,
    ) -> Self {
        Self::new(EventKind::While {
            while_conditions,
            conditions,
            actions,
            sub_events: EventList::new(),
        })
    }

    /// A repeat event.
    pub fn repeat(
        repeat_count: impl Into<Expression>,
        conditions: InstructionList,
        actions: InstructionList,
    ) -> Self {
        Self::new(EventKind::Repeat {
            repeat_count: repeat_count.into(),
            conditions,
            actions,
            sub_events: EventList::new(),
        })
    }

    /// A group of events.
    pub fn group(name: impl Into<String>, sub_events: EventList<Event>) -> Self {
        Self::new(EventKind::Group {
            name: name.into(),
            sub_events,
        })
    }

    /// A comment.
    pub fn comment(text: impl Into<String>) -> Self {
        Self::new(EventKind::Comment { text: text.into() })
    }

    /// Builder: replace the sub-events. Ignored for kinds without sub-events.
    #[must_use]
    pub fn with_sub_events(mut self, events: EventList<Event>) -> Self {
        if let Some(sub_events) = self.sub_events_mut() {
            *sub_events = events;
        }
        self
    }

    pub fn kind(&self) -> &EventKind {
        &self.kind
    }

    /// Whether the event was flagged for re-layout.
    pub fn is_layout_dirty(&self) -> bool {
        self.layout_dirty
    }

    /// Read and clear the re-layout flag.
    pub fn take_layout_dirty(&mut self) -> bool {
        std::mem::take(&mut self.layout_dirty)
    }
}

impl EventNode for Event {
    fn id(&self) -> EventId {
        self.id
    }

    fn condition_lists(&self) -> InstructionLists<'_> {
        match &self.kind {
            EventKind::Standard { conditions, .. } | EventKind::Repeat { conditions, .. } => {
                smallvec![conditions]
            }
            EventKind::While {
                while_conditions,
                conditions,
                ..
            } => smallvec![while_conditions, conditions],
            EventKind::Group { .. } | EventKind::Comment { .. } => SmallVec::new(),
        }
    }

    fn condition_lists_mut(&mut self) -> InstructionListsMut<'_> {
        match &mut self.kind {
            EventKind::Standard { conditions, .. } | EventKind::Repeat { conditions, .. } => {
                smallvec![conditions]
            }
            EventKind::While {
                while_conditions,
                conditions,
                ..
            } => smallvec![while_conditions, conditions],
            EventKind::Group { .. } | EventKind::Comment { .. } => SmallVec::new(),
        }
    }

    fn action_lists(&self) -> InstructionLists<'_> {
        match &self.kind {
            EventKind::Standard { actions, .. }
            | EventKind::While { actions, .. }
            | EventKind::Repeat { actions, .. } => smallvec![actions],
            EventKind::Group { .. } | EventKind::Comment { .. } => SmallVec::new(),
        }
    }

    fn action_lists_mut(&mut self) -> InstructionListsMut<'_> {
        match &mut self.kind {
            EventKind::Standard { actions, .. }
            | EventKind::While { actions, .. }
            | EventKind::Repeat { actions, .. } => smallvec![actions],
            EventKind::Group { .. } | EventKind::Comment { .. } => SmallVec::new(),
        }
    }

    fn can_have_sub_events(&self) -> bool {
        !matches!(self.kind, EventKind::Comment { .. })
    }

    fn sub_events(&self) -> Option<&EventList<Self>> {
        match &self.kind {
            EventKind::Standard { sub_events, .. }
            | EventKind::While { sub_events, .. }
            | EventKind::Repeat { sub_events, .. }
            | EventKind::Group { sub_events, .. } => Some(sub_events),
            EventKind::Comment { .. } => None,
        }
    }

    fn sub_events_mut(&mut self) -> Option<&mut EventList<Self>> {
        match &mut self.kind {
            EventKind::Standard { sub_events, .. }
            | EventKind::While { sub_events, .. }
            | EventKind::Repeat { sub_events, .. }
            | EventKind::Group { sub_events, .. } => Some(sub_events),
            EventKind::Comment { .. } => None,
        }
    }

    fn mark_layout_dirty(&mut self) {
        self.layout_dirty = true;
    }
}
