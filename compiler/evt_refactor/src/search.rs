//! Text search over event trees and the results it produces.

use evt_ir::{EventId, EventList, EventNode, ListId};
use evt_stack::ensure_sufficient_stack;
use tracing::trace;

use crate::instructions::instructions_contain;
use crate::text::TextPattern;

/// Toggles shared by find/replace and search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextSearchOptions {
    /// Compare case-sensitively.
    pub match_case: bool,
    /// Look at condition lists.
    pub in_conditions: bool,
    /// Look at action lists.
    pub in_actions: bool,
}

impl Default for TextSearchOptions {
    fn default() -> Self {
        TextSearchOptions {
            match_case: true,
            in_conditions: true,
            in_actions: true,
        }
    }
}

impl TextSearchOptions {
    #[must_use]
    pub fn match_case(mut self, match_case: bool) -> Self {
        self.match_case = match_case;
        self
    }

    #[must_use]
    pub fn in_conditions(mut self, in_conditions: bool) -> Self {
        self.in_conditions = in_conditions;
        self
    }

    #[must_use]
    pub fn in_actions(mut self, in_actions: bool) -> Self {
        self.in_actions = in_actions;
        self
    }
}

/// Where a search matched.
///
/// A result names the event and its list by id, plus the index the event
/// had when the search ran. It does not borrow the tree. Once the event is
/// removed, [`resolve`](Self::resolve) returns `None`; if it only moved
/// within its list, it is still found.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SearchResult {
    event: EventId,
    list: ListId,
    index: usize,
}

impl SearchResult {
    /// The matching event.
    pub fn event(&self) -> EventId {
        self.event
    }

    /// The list that contained the event.
    pub fn list(&self) -> ListId {
        self.list
    }

    /// Index of the event in its list at search time.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The matching event, if it still exists under `root`.
    pub fn resolve<'a, E: EventNode>(&self, root: &'a EventList<E>) -> Option<&'a E> {
        let list = root.find_list(self.list)?;
        match list.get(self.index) {
            Some(event) if event.id() == self.event => Some(event),
            _ => list.iter().find(|event| event.id() == self.event),
        }
    }

    /// Mutable access to the matching event, if it still exists under
    /// `root`.
    pub fn resolve_mut<'a, E: EventNode>(&self, root: &'a mut EventList<E>) -> Option<&'a mut E> {
        let list = root.find_list_mut(self.list)?;
        let index = match list.get(self.index) {
            Some(event) if event.id() == self.event => self.index,
            _ => list.iter().position(|event| event.id() == self.event)?,
        };
        list.get_mut(index)
    }
}

/// Collect one result per event whose in-scope parameters contain
/// `pattern`, then search its sub-events.
pub(crate) fn search_events<E: EventNode>(
    events: &EventList<E>,
    pattern: &TextPattern,
    options: TextSearchOptions,
    results: &mut Vec<SearchResult>,
) {
    for (index, event) in events.iter().enumerate() {
        let matched = (options.in_conditions
            && event
                .condition_lists()
                .iter()
                .any(|list| instructions_contain(list, pattern)))
            || (options.in_actions
                && event
                    .action_lists()
                    .iter()
                    .any(|list| instructions_contain(list, pattern)));
        if matched {
            trace!(event = ?event.id(), index, "event matched");
            results.push(SearchResult {
                event: event.id(),
                list: events.id(),
                index,
            });
        }

        if event.can_have_sub_events() {
            if let Some(sub_events) = event.sub_events() {
                ensure_sufficient_stack(|| search_events(sub_events, pattern, options, results));
            }
        }
    }
}
