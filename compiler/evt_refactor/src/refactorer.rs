//! Whole-tree refactoring operations.

use evt_ir::{EventList, EventNode, MetadataProvider};
use evt_parse::ExpressionParser;
use tracing::debug;

use crate::search::search_events;
use crate::text::TextPattern;
use crate::walker::{walk_events, RemovePass, RenamePass, ReplacePass};
use crate::{SearchResult, TextSearchOptions};

/// Rename, remove, replace and search across event lists.
///
/// Operations are best effort: a parameter that cannot be parsed is left
/// untouched and the walk goes on. None of them fails as a whole.
pub struct EventsRefactorer<'m, M: ?Sized> {
    parser: ExpressionParser<'m, M>,
}

impl<M: ?Sized> Clone for EventsRefactorer<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: ?Sized> Copy for EventsRefactorer<'_, M> {}

impl<'m, M: MetadataProvider + ?Sized> EventsRefactorer<'m, M> {
    /// A refactorer resolving instructions and functions against `metadata`.
    pub fn new(metadata: &'m M) -> Self {
        EventsRefactorer {
            parser: ExpressionParser::new(metadata),
        }
    }

    /// Rename object `old_name` to `new_name` in object parameters and as
    /// the receiver of calls inside expressions.
    #[tracing::instrument(level = "debug", skip_all, fields(
        old_name = %old_name,
        new_name = %new_name,
    ))]
    pub fn rename_object_in_events<E: EventNode>(
        &self,
        events: &mut EventList<E>,
        old_name: &str,
        new_name: &str,
    ) {
        if old_name == new_name {
            debug!("same name, nothing to rename");
            return;
        }
        let pass = RenamePass {
            parser: self.parser,
            old_name,
            new_name,
        };
        walk_events(events, &pass);
    }

    /// Delete every condition and action that references object `name`,
    /// either as an object parameter or as the receiver of a call inside
    /// an expression.
    #[tracing::instrument(level = "debug", skip_all, fields(name = %name))]
    pub fn remove_object_in_events<E: EventNode>(&self, events: &mut EventList<E>, name: &str) {
        let pass = RemovePass {
            parser: self.parser,
            name,
        };
        walk_events(events, &pass);
    }

    /// Replace `to_replace` by `new_string` in the text of every parameter
    /// of the enabled categories. Parameters are not parsed.
    #[tracing::instrument(level = "debug", skip_all, fields(
        to_replace = %to_replace,
        options = ?options,
    ))]
    pub fn replace_string_in_events<E: EventNode>(
        &self,
        events: &mut EventList<E>,
        to_replace: &str,
        new_string: &str,
        options: TextSearchOptions,
    ) {
        let pattern = TextPattern::new(to_replace, options.match_case);
        if pattern.is_empty() {
            debug!("empty needle, nothing to replace");
            return;
        }
        let pass = ReplacePass {
            metadata: self.parser.metadata(),
            pattern,
            replacement: new_string,
            in_conditions: options.in_conditions,
            in_actions: options.in_actions,
        };
        walk_events(events, &pass);
    }

    /// Find the events with a parameter containing `search`.
    ///
    /// Each event is reported at most once, whatever the number of matching
    /// parameters it holds. Sub-events are reported on their own.
    #[tracing::instrument(level = "debug", skip_all, fields(
        search = %search,
        options = ?options,
    ))]
    pub fn search_in_events<E: EventNode>(
        &self,
        events: &EventList<E>,
        search: &str,
        options: TextSearchOptions,
    ) -> Vec<SearchResult> {
        let pattern = TextPattern::new(search, options.match_case);
        let mut results = Vec::new();
        if !pattern.is_empty() {
            search_events(events, &pattern, options, &mut results);
        }
        debug!(results = results.len(), "search done");
        results
    }
}
