//! Depth-first walk over event lists.

use evt_ir::{EventList, EventNode, InstructionList, MetadataProvider};
use evt_parse::ExpressionParser;
use evt_stack::ensure_sufficient_stack;
use tracing::trace;

use crate::instructions::{
    remove_in_instructions, rewrite_instructions, RenameObject, ReplaceText, Side,
};
use crate::text::TextPattern;

/// What a walk does to each instruction list it meets.
pub(crate) trait ListPass {
    /// Process one list. Returns whether it changed.
    fn visit_list(&self, list: &mut InstructionList, side: Side) -> bool;

    /// Whether lists on `side` are visited at all.
    fn applies_to(&self, _side: Side) -> bool {
        true
    }
}

/// Run `pass` over every condition and action list of `events`, nested
/// events included.
///
/// An event whose lists changed is marked for re-layout. Sub-events are
/// visited whether or not their parent changed.
pub(crate) fn walk_events<E, P>(events: &mut EventList<E>, pass: &P)
where
    E: EventNode,
    P: ListPass + ?Sized,
{
    for event in events.iter_mut() {
        let mut changed = false;
        if pass.applies_to(Side::Conditions) {
            for list in event.condition_lists_mut() {
                changed |= pass.visit_list(list, Side::Conditions);
            }
        }
        if pass.applies_to(Side::Actions) {
            for list in event.action_lists_mut() {
                changed |= pass.visit_list(list, Side::Actions);
            }
        }
        if changed {
            trace!(event = ?event.id(), "event changed");
            event.mark_layout_dirty();
        }

        if event.can_have_sub_events() {
            if let Some(sub_events) = event.sub_events_mut() {
                ensure_sufficient_stack(|| walk_events(sub_events, pass));
            }
        }
    }
}

pub(crate) struct RenamePass<'r, 'm, M: ?Sized> {
    pub(crate) parser: ExpressionParser<'m, M>,
    pub(crate) old_name: &'r str,
    pub(crate) new_name: &'r str,
}

impl<M: MetadataProvider + ?Sized> ListPass for RenamePass<'_, '_, M> {
    fn visit_list(&self, list: &mut InstructionList, side: Side) -> bool {
        let rewrite = RenameObject {
            parser: self.parser,
            old_name: self.old_name,
            new_name: self.new_name,
        };
        rewrite_instructions(list, self.parser.metadata(), side, &rewrite)
    }
}

pub(crate) struct RemovePass<'r, 'm, M: ?Sized> {
    pub(crate) parser: ExpressionParser<'m, M>,
    pub(crate) name: &'r str,
}

impl<M: MetadataProvider + ?Sized> ListPass for RemovePass<'_, '_, M> {
    fn visit_list(&self, list: &mut InstructionList, side: Side) -> bool {
        remove_in_instructions(list, self.parser, side, self.name)
    }
}

pub(crate) struct ReplacePass<'r, 'm, M: ?Sized> {
    pub(crate) metadata: &'m M,
    pub(crate) pattern: TextPattern,
    pub(crate) replacement: &'r str,
    pub(crate) in_conditions: bool,
    pub(crate) in_actions: bool,
}

impl<M: MetadataProvider + ?Sized> ListPass for ReplacePass<'_, '_, M> {
    fn visit_list(&self, list: &mut InstructionList, side: Side) -> bool {
        let rewrite = ReplaceText {
            pattern: &self.pattern,
            replacement: self.replacement,
        };
        rewrite_instructions(list, self.metadata, side, &rewrite)
    }

    fn applies_to(&self, side: Side) -> bool {
        match side {
            Side::Conditions => self.in_conditions,
            Side::Actions => self.in_actions,
        }
    }
}
