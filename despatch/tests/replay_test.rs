//! Replay protocol tests: buffering, flush triggers, ordering, and
//! re-resolution against a mutated tree.

use despatch::testing::{CountingHandler, FakeTree, RecordingHandler};
use despatch::{Dispatcher, EventInfoWrapper, NoResolver, Replayer, TreeResolver, create_event_info};
use std::cell::RefCell;
use std::rc::Rc;

mod common;
use common::{EventInfoBuilder, FakeEvent};

type TestDispatcher = Dispatcher<FakeEvent, NoResolver<u32>>;

/// Records each flush as the list of `(action name, timestamp)` pairs the
/// replayer was handed, without re-submitting anything.
fn recording_replayer<R: despatch::ActionResolver<Node = u32>>(
    batches: &Rc<RefCell<Vec<Vec<(Option<String>, f64)>>>>,
) -> Replayer<FakeEvent, R> {
    let batches = Rc::clone(batches);
    Box::new(move |entries, _dispatcher| {
        let batch = entries
            .iter()
            .map(|wrapper| {
                (
                    wrapper.action().map(|action| action.name.clone()),
                    wrapper.timestamp(),
                )
            })
            .collect();
        batches.borrow_mut().push(batch);
    })
}

/// Feeds every entry back through `dispatch`, preserving order.
fn resubmitting_replayer<R: despatch::ActionResolver<Node = u32>>() -> Replayer<FakeEvent, R> {
    Box::new(|entries, dispatcher| {
        for entry in entries {
            dispatcher.dispatch(entry.into_event_info());
        }
    })
}

#[test]
fn replay_events_without_handler_are_buffered_not_invoked() {
    let mut dispatcher = TestDispatcher::new();

    dispatcher.dispatch(EventInfoBuilder::new().action("foo.bar", 2).replay().build());

    assert_eq!(dispatcher.pending_replay(), 1);
}

#[test]
fn live_events_without_handler_are_dropped_not_buffered() {
    let mut dispatcher = TestDispatcher::new();

    dispatcher.dispatch(EventInfoBuilder::new().action("foo.bar", 2).build());

    assert_eq!(dispatcher.pending_replay(), 0);
}

#[test]
fn unresolved_replay_events_are_buffered() {
    let mut dispatcher = TestDispatcher::new();

    dispatcher.dispatch(EventInfoBuilder::new().no_action().replay().build());

    assert_eq!(dispatcher.pending_replay(), 1);
}

#[test]
fn registration_flushes_buffered_events_in_capture_order() {
    let batches = Rc::new(RefCell::new(Vec::new()));
    let mut dispatcher = TestDispatcher::new();
    dispatcher.set_event_replayer(recording_replayer(&batches));

    for timestamp in [1.0, 2.0, 3.0] {
        dispatcher.dispatch(
            EventInfoBuilder::new()
                .action("foo.bar", 2)
                .timestamp(timestamp)
                .replay()
                .build(),
        );
    }
    assert_eq!(dispatcher.pending_replay(), 3);
    assert!(batches.borrow().is_empty());

    dispatcher
        .register_event_info_handlers(
            "foo",
            None,
            [("bar".to_string(), CountingHandler::new().handler())],
        )
        .unwrap();

    let batches = batches.borrow();
    assert_eq!(batches.len(), 1);
    assert_eq!(
        batches[0],
        vec![
            (Some("foo.bar".to_string()), 1.0),
            (Some("foo.bar".to_string()), 2.0),
            (Some("foo.bar".to_string()), 3.0),
        ]
    );
    assert_eq!(dispatcher.pending_replay(), 0);
}

#[test]
fn flush_is_idempotent() {
    let batches = Rc::new(RefCell::new(Vec::new()));
    let mut dispatcher = TestDispatcher::new();
    dispatcher.set_event_replayer(recording_replayer(&batches));

    dispatcher.dispatch(EventInfoBuilder::new().action("foo.bar", 2).replay().build());
    dispatcher
        .register_event_info_handlers(
            "foo",
            None,
            [("bar".to_string(), CountingHandler::new().handler())],
        )
        .unwrap();
    assert_eq!(batches.borrow().len(), 1);

    // A second registration with nothing buffered must not re-invoke the
    // replayer.
    dispatcher
        .register_event_info_handlers(
            "foo",
            None,
            [("other".to_string(), CountingHandler::new().handler())],
        )
        .unwrap();
    assert_eq!(batches.borrow().len(), 1);
}

#[test]
fn installing_a_replayer_flushes_the_existing_buffer() {
    let batches = Rc::new(RefCell::new(Vec::new()));
    let mut dispatcher = TestDispatcher::new();

    dispatcher.dispatch(EventInfoBuilder::new().action("foo.bar", 2).replay().build());
    assert_eq!(dispatcher.pending_replay(), 1);

    dispatcher.set_event_replayer(recording_replayer(&batches));

    assert_eq!(batches.borrow().len(), 1);
    assert_eq!(dispatcher.pending_replay(), 0);
}

#[test]
fn successful_dispatch_flushes_the_buffer() {
    let batches = Rc::new(RefCell::new(Vec::new()));
    let mut dispatcher = TestDispatcher::new();
    dispatcher.set_event_replayer(recording_replayer(&batches));
    dispatcher
        .register_event_info_handlers(
            "foo",
            None,
            [("bar".to_string(), CountingHandler::new().handler())],
        )
        .unwrap();

    // Buffered after the registration: no trigger fires on buffering alone.
    dispatcher.dispatch(EventInfoBuilder::new().action("foo.baz", 2).replay().build());
    assert_eq!(dispatcher.pending_replay(), 1);
    assert!(batches.borrow().is_empty());

    // A live dispatch that finds its handler is a flush trigger.
    dispatcher.dispatch(EventInfoBuilder::new().action("foo.bar", 2).build());

    let batches = batches.borrow();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0], vec![(Some("foo.baz".to_string()), 0.0)]);
}

#[test]
fn replayer_resubmission_reaches_handlers_in_order() {
    let recorder = RecordingHandler::new();
    let mut dispatcher = TestDispatcher::new();
    dispatcher.set_event_replayer(resubmitting_replayer());

    dispatcher.dispatch(
        EventInfoBuilder::new()
            .action("foo.bar", 2)
            .timestamp(1.0)
            .replay()
            .build(),
    );
    dispatcher.dispatch(
        EventInfoBuilder::new()
            .action("foo.bar", 2)
            .timestamp(2.0)
            .replay()
            .build(),
    );

    dispatcher
        .register_event_info_handlers("foo", None, [("bar".to_string(), recorder.handler())])
        .unwrap();

    let invocations = recorder.invocations();
    assert_eq!(invocations.len(), 2);
    assert!(invocations.iter().all(|invocation| invocation.is_replay));
    assert_eq!(dispatcher.pending_replay(), 0);
}

#[test]
fn still_unhandleable_entries_rebuffer_behind_the_flush() {
    let recorder = RecordingHandler::new();
    let mut dispatcher = TestDispatcher::new();
    dispatcher.set_event_replayer(resubmitting_replayer());

    dispatcher.dispatch(EventInfoBuilder::new().action("foo.bar", 2).replay().build());
    dispatcher.dispatch(EventInfoBuilder::new().action("foo.nope", 2).replay().build());

    // Registration flushes both; `foo.bar` dispatches (a mid-flush success
    // must not restart the flush), `foo.nope` re-buffers for the next
    // trigger.
    dispatcher
        .register_event_info_handlers("foo", None, [("bar".to_string(), recorder.handler())])
        .unwrap();

    assert_eq!(recorder.count(), 1);
    assert_eq!(dispatcher.pending_replay(), 1);
}

#[test]
fn events_buffered_during_a_flush_wait_for_the_next_trigger() {
    let batches = Rc::new(RefCell::new(Vec::<usize>::new()));
    let mut dispatcher = TestDispatcher::new();
    {
        let batches = Rc::clone(&batches);
        dispatcher.set_event_replayer(Box::new(
            move |entries: Vec<EventInfoWrapper<FakeEvent, u32>>, dispatcher| {
                batches.borrow_mut().push(entries.len());
                // A "live" event arriving while the flush runs: it must
                // queue behind the flush, not extend or restart it.
                dispatcher.dispatch(
                    EventInfoBuilder::new().action("foo.late", 2).replay().build(),
                );
            },
        ));
    }

    dispatcher.dispatch(EventInfoBuilder::new().action("foo.bar", 2).replay().build());
    dispatcher
        .register_event_info_handlers(
            "foo",
            None,
            [("bar".to_string(), CountingHandler::new().handler())],
        )
        .unwrap();

    assert_eq!(*batches.borrow(), vec![1]);
    assert_eq!(dispatcher.pending_replay(), 1);
}

#[test]
fn replayed_events_are_reresolved_against_the_current_tree() {
    let tree = Rc::new(FakeTree::new());
    tree.add_root(0);
    tree.add_child(1, 0);

    let recorder = RecordingHandler::new();
    let mut dispatcher = Dispatcher::<FakeEvent, _>::with_resolver(TreeResolver::new(Rc::clone(&tree)));
    dispatcher.set_event_replayer(resubmitting_replayer());

    // At capture time nothing resolves; the event buffers unresolved.
    dispatcher.dispatch(create_event_info(
        "click",
        FakeEvent("click"),
        1,
        0,
        0.0,
        None,
        true,
    ));
    assert_eq!(dispatcher.pending_replay(), 1);

    // The tree gains the mapping before handlers arrive; replay re-walks
    // the ancestor chain and finds it.
    tree.set_action(1, "click", "foo.bar");
    dispatcher
        .register_event_info_handlers("foo", None, [("bar".to_string(), recorder.handler())])
        .unwrap();

    let invocations = recorder.invocations();
    assert_eq!(invocations.len(), 1);
    assert_eq!(invocations[0].action_name.as_deref(), Some("foo.bar"));
    assert_eq!(invocations[0].action_element, Some(1));
    assert_eq!(dispatcher.pending_replay(), 0);
}

#[test]
fn buffer_accumulates_without_a_replayer() {
    let mut dispatcher = TestDispatcher::new();
    dispatcher
        .register_event_info_handlers(
            "foo",
            None,
            [("other".to_string(), CountingHandler::new().handler())],
        )
        .unwrap();

    for _ in 0..4 {
        dispatcher.dispatch(EventInfoBuilder::new().action("foo.bar", 2).replay().build());
    }

    // Registration is a flush trigger, but with no replayer installed the
    // entries stay put.
    dispatcher
        .register_event_info_handlers(
            "foo",
            None,
            [("another".to_string(), CountingHandler::new().handler())],
        )
        .unwrap();
    assert_eq!(dispatcher.pending_replay(), 4);
}
