//! End-to-end tests of the four refactoring operations on event trees.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

mod common;

use common::{actions, all_texts, conditions, instr, platform};
use evt_ir::{Event, EventList, EventNode};
use evt_refactor::{EventsRefactorer, TextSearchOptions};
use pretty_assertions::assert_eq;

fn strings<const N: usize>(texts: [&str; N]) -> Vec<String> {
    texts.iter().map(|t| (*t).to_owned()).collect()
}

// -- Rename --

#[test]
fn rename_touches_conditions_actions_and_sub_events() {
    let platform = platform();
    let refactorer = EventsRefactorer::new(&platform);

    let child = Event::standard(
        vec![instr("PosX", ["Enemy", "<", "Player.X()"])],
        vec![instr("ModVarSceneTxt", ["label", "=", r#""at " + ToString(Enemy.X())"#])],
    );
    let parent = Event::standard(
        vec![instr("Collision", ["Player", "Enemy"])],
        vec![instr("MettreX", ["Enemy", "+", "Abs(Enemy.X() - Player.X())"])],
    )
    .with_sub_events(vec![child].into());
    let mut events: EventList<Event> = vec![parent].into();

    refactorer.rename_object_in_events(&mut events, "Enemy", "Boss");

    assert_eq!(conditions(&events, 0), vec![strings(["Player", "Boss"])]);
    assert_eq!(
        actions(&events, 0),
        vec![strings(["Boss", "+", "Abs(Boss.X() - Player.X())"])]
    );
    let sub_events = events[0].sub_events().unwrap();
    assert_eq!(conditions(sub_events, 0), vec![strings(["Boss", "<", "Player.X()"])]);
    assert_eq!(
        actions(sub_events, 0),
        vec![strings(["label", "=", r#""at " + ToString(Boss.X())"#])]
    );
}

#[test]
fn rename_then_back_restores_every_parameter() {
    let platform = platform();
    let refactorer = EventsRefactorer::new(&platform);
    let mut events: EventList<Event> = vec![
        Event::standard(
            vec![instr("PosX", ["Enemy", ">=", " Enemy.X( )+ 2"])],
            vec![instr(
                "MettreX",
                ["Player", "=", "Enemy.Physics::SetVelocity( 1,Player.Foo(Enemy, 3))"],
            )],
        ),
        Event::repeat("3", Vec::new(), vec![instr("Delete", ["Enemy"])]),
    ]
    .into();
    let before = all_texts(&events);

    refactorer.rename_object_in_events(&mut events, "Enemy", "Boss");
    assert!(all_texts(&events).iter().all(|t| !t.contains("Enemy.")));
    refactorer.rename_object_in_events(&mut events, "Boss", "Enemy");

    assert_eq!(all_texts(&events), before);
}

#[test]
fn rename_of_absent_object_leaves_blank_argument_lists_alone() {
    let platform = platform();
    let refactorer = EventsRefactorer::new(&platform);
    let mut events: EventList<Event> = vec![Event::standard(
        Vec::new(),
        vec![instr("MettreX", ["Enemy", "=", "Player.X( ) + 1"])],
    )]
    .into();

    refactorer.rename_object_in_events(&mut events, "Ghost", "Hero");

    assert_eq!(
        actions(&events, 0),
        vec![strings(["Enemy", "=", "Player.X( ) + 1"])]
    );
    assert!(!events[0].is_layout_dirty());
}

#[test]
fn rename_marks_only_changed_events() {
    let platform = platform();
    let refactorer = EventsRefactorer::new(&platform);
    let mut events: EventList<Event> = vec![
        Event::standard(Vec::new(), vec![instr("Delete", ["Enemy"])]),
        Event::standard(Vec::new(), vec![instr("Delete", ["Player"])]),
        Event::comment("Enemy"),
    ]
    .into();

    refactorer.rename_object_in_events(&mut events, "Enemy", "Boss");

    let dirty: Vec<bool> = events.iter().map(Event::is_layout_dirty).collect();
    assert_eq!(dirty, vec![true, false, false]);
}

#[test]
fn rename_reaches_both_condition_lists_of_while_events() {
    let platform = platform();
    let refactorer = EventsRefactorer::new(&platform);
    let mut events: EventList<Event> = vec![Event::while_loop(
        vec![instr("PosX", ["Enemy", "<", "100"])],
        vec![instr("PosX", ["Player", "<", "Enemy.X()"])],
        Vec::new(),
    )]
    .into();

    refactorer.rename_object_in_events(&mut events, "Enemy", "Boss");

    let lists: Vec<_> = events[0]
        .condition_lists()
        .into_iter()
        .map(|list| common::texts(list))
        .collect();
    assert_eq!(
        lists,
        vec![
            vec![strings(["Boss", "<", "100"])],
            vec![strings(["Player", "<", "Boss.X()"])],
        ]
    );
}

#[test]
fn rename_to_same_name_is_a_no_op() {
    let platform = platform();
    let refactorer = EventsRefactorer::new(&platform);
    let mut events: EventList<Event> =
        vec![Event::standard(Vec::new(), vec![instr("Delete", ["Enemy"])])].into();
    refactorer.rename_object_in_events(&mut events, "Enemy", "Enemy");
    assert!(!events[0].is_layout_dirty());
}

// -- Remove --

#[test]
fn remove_deletes_direct_and_receiver_references() {
    let platform = platform();
    let refactorer = EventsRefactorer::new(&platform);
    let mut events: EventList<Event> = vec![Event::standard(
        vec![
            instr("Collision", ["Player", "Enemy"]),
            instr("VarScene", ["hits", ">", "Count(Enemy)"]),
        ],
        vec![
            instr("MettreX", ["Player", "=", "Enemy.X()"]),
            instr("MettreX", ["Player", "=", "Player.Foo(Enemy, 1)"]),
            instr("PlaySound", ["Enemy.wav", "yes", "100"]),
        ],
    )]
    .into();

    refactorer.remove_object_in_events(&mut events, "Enemy");

    assert_eq!(
        conditions(&events, 0),
        vec![strings(["hits", ">", "Count(Enemy)"])]
    );
    assert_eq!(
        actions(&events, 0),
        vec![
            strings(["Player", "=", "Player.Foo(Enemy, 1)"]),
            strings(["Enemy.wav", "yes", "100"]),
        ]
    );
    assert!(events[0].is_layout_dirty());
}

#[test]
fn remove_renumbers_adjacent_deletions() {
    let platform = platform();
    let refactorer = EventsRefactorer::new(&platform);
    for kept_at in 0..3 {
        let list = (0..3)
            .map(|i| {
                let object = if i == kept_at { "Player" } else { "Enemy" };
                instr("Delete", [object])
            })
            .collect();
        let mut events: EventList<Event> = vec![Event::standard(Vec::new(), list)].into();

        refactorer.remove_object_in_events(&mut events, "Enemy");

        assert_eq!(actions(&events, 0), vec![strings(["Player"])], "kept at {kept_at}");
    }
}

#[test]
fn remove_visits_sub_events_and_sub_instructions() {
    let platform = platform();
    let refactorer = EventsRefactorer::new(&platform);
    let child = Event::standard(
        vec![instr("BuiltinCommonInstructions::Or", [])
            .with_sub_instructions(vec![
                instr("PosX", ["Enemy", "<", "1"]),
                instr("PosX", ["Player", "<", "1"]),
            ])],
        vec![instr("Delete", ["Enemy"])],
    );
    let parent = Event::group("enemies", vec![child].into());
    let mut events: EventList<Event> = vec![parent].into();

    refactorer.remove_object_in_events(&mut events, "Enemy");

    let child = &events[0].sub_events().unwrap()[0];
    let child_conditions = child.condition_lists();
    let or = &child_conditions[0][0];
    assert_eq!(
        common::texts(or.sub_instructions()),
        vec![strings(["Player", "<", "1"])]
    );
    assert!(child.action_lists()[0].is_empty());
    assert!(child.is_layout_dirty());
    assert!(!events[0].is_layout_dirty());
}

// -- Replace --

#[test]
fn replace_rewrites_every_parameter_kind() {
    let platform = platform();
    let refactorer = EventsRefactorer::new(&platform);
    let mut events: EventList<Event> = vec![Event::standard(
        vec![instr("VarScene", ["score", "=", "score + 1"])],
        vec![instr("ModVarSceneTxt", ["label", "=", r#""Score: ""#])],
    )]
    .into();

    refactorer.replace_string_in_events(
        &mut events,
        "score",
        "points",
        TextSearchOptions::default().match_case(false),
    );

    assert_eq!(
        conditions(&events, 0),
        vec![strings(["points", "=", "points + 1"])]
    );
    assert_eq!(
        actions(&events, 0),
        vec![strings(["label", "=", r#""points: ""#])]
    );
}

#[test]
fn replace_respects_category_toggles() {
    let platform = platform();
    let refactorer = EventsRefactorer::new(&platform);
    let build = || -> EventList<Event> {
        vec![Event::standard(
            vec![instr("VarScene", ["aaa", "=", "1"])],
            vec![instr("Delete", ["aaa"])],
        )]
        .into()
    };

    let mut events = build();
    let options = TextSearchOptions::default().in_actions(false);
    refactorer.replace_string_in_events(&mut events, "a", "bb", options);
    assert_eq!(conditions(&events, 0), vec![strings(["bbbbbb", "=", "1"])]);
    assert_eq!(actions(&events, 0), vec![strings(["aaa"])]);

    let mut events = build();
    let options = TextSearchOptions::default().in_conditions(false);
    refactorer.replace_string_in_events(&mut events, "a", "bb", options);
    assert_eq!(conditions(&events, 0), vec![strings(["aaa", "=", "1"])]);
    assert_eq!(actions(&events, 0), vec![strings(["bbbbbb"])]);
}

#[test]
fn replace_with_empty_needle_changes_nothing() {
    let platform = platform();
    let refactorer = EventsRefactorer::new(&platform);
    let mut events: EventList<Event> =
        vec![Event::standard(Vec::new(), vec![instr("Delete", ["Enemy"])])].into();
    refactorer.replace_string_in_events(&mut events, "", "x", TextSearchOptions::default());
    assert_eq!(actions(&events, 0), vec![strings(["Enemy"])]);
    assert!(!events[0].is_layout_dirty());
}

// -- Search --

#[test]
fn search_reports_each_event_once() {
    let platform = platform();
    let refactorer = EventsRefactorer::new(&platform);
    let child = Event::standard(Vec::new(), vec![instr("Delete", ["Enemy"])]);
    let parent = Event::standard(
        vec![instr("PosX", ["Enemy", "<", "Enemy.X()"])],
        vec![instr("Delete", ["Enemy"])],
    )
    .with_sub_events(vec![child].into());
    let events: EventList<Event> = vec![
        Event::standard(Vec::new(), vec![instr("Delete", ["Player"])]),
        parent,
    ]
    .into();

    let results = refactorer.search_in_events(&events, "enemy", TextSearchOptions::default());
    assert!(results.is_empty());

    let options = TextSearchOptions::default().match_case(false);
    let results = refactorer.search_in_events(&events, "enemy", options);
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].event(), events[1].id());
    assert_eq!(results[0].index(), 1);
    let child_id = events[1].sub_events().unwrap()[0].id();
    assert_eq!(results[1].event(), child_id);
    assert_eq!(results[1].index(), 0);
}

#[test]
fn search_results_outlive_edits() {
    let platform = platform();
    let refactorer = EventsRefactorer::new(&platform);
    let mut events: EventList<Event> = vec![
        Event::standard(Vec::new(), vec![instr("Delete", ["Enemy"])]),
        Event::standard(Vec::new(), vec![instr("Delete", ["Player"])]),
    ]
    .into();

    let results = refactorer.search_in_events(&events, "Enemy", TextSearchOptions::default());
    assert_eq!(results.len(), 1);
    let found = results[0];

    // Editing through a result.
    let event = found.resolve_mut(&mut events).unwrap();
    event.mark_layout_dirty();
    assert!(events[0].is_layout_dirty());

    refactorer.remove_object_in_events(&mut events, "Enemy");
    assert!(found.resolve(&events).is_some());

    events.remove(0);
    assert!(found.resolve(&events).is_none());
}
