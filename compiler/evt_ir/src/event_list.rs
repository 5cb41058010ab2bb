//! Identified, owned lists of events.

use std::ops::Index;

use crate::{EventNode, ListId};

/// An ordered list of events with a stable identity.
///
/// The id survives every mutation of the list's contents, so a reference
/// recorded as "event X in list L" can be re-resolved later.
#[derive(Debug)]
pub struct EventList<E> {
    id: ListId,
    events: Vec<E>,
}

impl<E> EventList<E> {
    /// Create an empty list with a fresh id.
    pub fn new() -> Self {
        EventList {
            id: ListId::fresh(),
            events: Vec::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> ListId {
        self.id
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&E> {
        self.events.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut E> {
        self.events.get_mut(index)
    }

    pub fn push(&mut self, event: E) {
        self.events.push(event);
    }

    /// Insert at `index`, clamped to the end of the list.
    pub fn insert(&mut self, index: usize, event: E) {
        let index = index.min(self.events.len());
        self.events.insert(index, event);
    }

    /// Remove and return the event at `index`, if any.
    pub fn remove(&mut self, index: usize) -> Option<E> {
        (index < self.events.len()).then(|| self.events.remove(index))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.events.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, E> {
        self.events.iter_mut()
    }
}

impl<E: EventNode> EventList<E> {
    /// Find this list or one nested below it by id (depth-first).
    pub fn find_list(&self, id: ListId) -> Option<&EventList<E>> {
        if self.id == id {
            return Some(self);
        }
        self.events
            .iter()
            .filter_map(E::sub_events)
            .find_map(|sub| sub.find_list(id))
    }

    /// Mutable counterpart of [`find_list`](Self::find_list).
    pub fn find_list_mut(&mut self, id: ListId) -> Option<&mut EventList<E>> {
        if self.id == id {
            return Some(self);
        }
        self.events
            .iter_mut()
            .filter_map(E::sub_events_mut)
            .find_map(|sub| sub.find_list_mut(id))
    }
}

impl<E> Default for EventList<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> FromIterator<E> for EventList<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        EventList {
            id: ListId::fresh(),
            events: iter.into_iter().collect(),
        }
    }
}

impl<E> From<Vec<E>> for EventList<E> {
    fn from(events: Vec<E>) -> Self {
        EventList {
            id: ListId::fresh(),
            events,
        }
    }
}

impl<E> Index<usize> for EventList<E> {
    type Output = E;

    fn index(&self, index: usize) -> &E {
        &self.events[index]
    }
}

impl<'a, E> IntoIterator for &'a EventList<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

impl<'a, E> IntoIterator for &'a mut EventList<E> {
    type Item = &'a mut E;
    type IntoIter = std::slice::IterMut<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter_mut()
    }
}
