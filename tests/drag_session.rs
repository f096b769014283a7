use egui::{Pos2, Rect, pos2, vec2};
use photo_decorator::event::{EditorEvent, RecordingHandler};
use photo_decorator::{
    DragOutcome, DragPayload, DragRecognizer, DragSignal, EditorState, FrameLayout, MarkerId,
};

/// Canvas offset inside the window, trash in the top-left corner
fn layout() -> FrameLayout {
    FrameLayout {
        canvas: Rect::from_min_size(pos2(200.0, 50.0), vec2(800.0, 600.0)),
        overlay: Rect::from_min_size(Pos2::ZERO, vec2(1280.0, 800.0)),
        trash: Rect::from_min_max(pos2(0.0, 0.0), pos2(40.0, 40.0)),
    }
}

fn state_with_marker(center: Pos2) -> (EditorState, MarkerId) {
    let mut state = EditorState::default();
    state.sync_layout(layout());
    let id = state.place_marker(0, center).expect("default palette has entries");
    (state, id)
}

fn start(state: &mut EditorState, id: MarkerId, pointer: Pos2) {
    state.dispatch(DragSignal::Started {
        payload: DragPayload::Marker(id),
        pointer,
    });
}

fn assert_ghost_matches_drag(state: &EditorState) {
    assert_eq!(
        state.coordinator().is_dragging(),
        state.coordinator().ghost().is_some()
    );
}

#[test]
fn test_drag_start_hides_marker_and_shows_ghost() {
    let (mut state, id) = state_with_marker(pos2(100.0, 100.0));
    start(&mut state, id, pos2(300.0, 150.0));

    assert!(state.coordinator().is_dragging());
    assert_eq!(state.coordinator().active_marker(), Some(id));
    let marker = state.canvas().marker(id).expect("marker still on canvas");
    assert!(!marker.is_visible());

    // Ghost starts over the marker, in overlay coordinates
    let ghost = state.coordinator().ghost().expect("ghost while dragging");
    assert_eq!(ghost.position(), pos2(275.0, 125.0));
    assert_eq!(ghost.size(), marker.size());
    assert!(ghost.opacity() > 0.0 && ghost.opacity() < 1.0);
    assert_ghost_matches_drag(&state);
}

#[test]
fn test_ghost_follows_pointer() {
    let (mut state, id) = state_with_marker(pos2(100.0, 100.0));
    start(&mut state, id, pos2(300.0, 150.0));

    for pointer in [pos2(320.0, 160.0), pos2(500.0, 400.0), pos2(10.0, 780.0)] {
        state.dispatch(DragSignal::Moved { pointer });
        let ghost = state.coordinator().ghost().expect("ghost while dragging");
        assert_eq!(ghost.center(), pointer);
    }
    assert_ghost_matches_drag(&state);
}

#[test]
fn test_drop_on_trash_deletes_marker() {
    let (mut state, id) = state_with_marker(pos2(100.0, 100.0));
    let recorder = RecordingHandler::default();
    state.events().subscribe(Box::new(recorder.clone()));

    start(&mut state, id, pos2(300.0, 150.0));
    state.dispatch(DragSignal::Moved {
        pointer: pos2(20.0, 20.0),
    });
    let outcome = state.dispatch(DragSignal::Dropped {
        payload: DragPayload::Marker(id),
        position: pos2(20.0, 20.0),
    });

    assert_eq!(outcome, Some(DragOutcome::Deleted { id }));
    assert!(!state.canvas().contains_marker(id));
    assert!(!state.coordinator().is_dragging());
    assert!(state.coordinator().ghost().is_none());
    assert_eq!(recorder.events(), vec![EditorEvent::MarkerDeleted { id }]);
}

#[test]
fn test_drop_on_canvas_moves_marker_center() {
    let (mut state, id) = state_with_marker(pos2(100.0, 100.0));
    start(&mut state, id, pos2(300.0, 150.0));

    let outcome = state.dispatch(DragSignal::Dropped {
        payload: DragPayload::Marker(id),
        position: pos2(600.0, 350.0),
    });

    assert_eq!(
        outcome,
        Some(DragOutcome::Moved {
            id,
            from: pos2(100.0, 100.0),
            to: pos2(400.0, 300.0),
        })
    );
    let marker = state.canvas().marker(id).expect("marker survives a move");
    assert_eq!(marker.center(), pos2(400.0, 300.0));
    assert_eq!(marker.position(), pos2(375.0, 275.0));
    assert!(marker.is_visible());
    assert!(state.coordinator().ghost().is_none());
}

#[test]
fn test_drop_uses_layout_at_drop_time() {
    let (mut state, id) = state_with_marker(pos2(100.0, 100.0));
    start(&mut state, id, pos2(300.0, 150.0));

    // Window resized mid-drag; the trash moved to the bottom
    let mut resized = layout();
    resized.trash = Rect::from_min_max(pos2(0.0, 700.0), pos2(100.0, 780.0));
    state.sync_layout(resized);

    let outcome = state.dispatch(DragSignal::Dropped {
        payload: DragPayload::Marker(id),
        position: pos2(50.0, 740.0),
    });
    assert_eq!(outcome, Some(DragOutcome::Deleted { id }));
}

#[test]
fn test_cancel_restores_marker_in_place() {
    let (mut state, id) = state_with_marker(pos2(100.0, 100.0));
    start(&mut state, id, pos2(300.0, 150.0));
    state.dispatch(DragSignal::Moved {
        pointer: pos2(700.0, 500.0),
    });

    let outcome = state.dispatch(DragSignal::Cancelled {
        payload: DragPayload::Marker(id),
    });

    assert_eq!(outcome, Some(DragOutcome::Cancelled { id }));
    let marker = state.canvas().marker(id).expect("cancel keeps the marker");
    assert_eq!(marker.center(), pos2(100.0, 100.0));
    assert!(marker.is_visible());
    assert!(!state.coordinator().is_dragging());
    assert_ghost_matches_drag(&state);
}

#[test]
fn test_second_drag_is_ignored_while_one_is_active() {
    let mut state = EditorState::default();
    state.sync_layout(layout());
    let first = state.place_marker(0, pos2(100.0, 100.0)).expect("entry 0");
    let second = state.place_marker(1, pos2(300.0, 300.0)).expect("entry 1");

    start(&mut state, first, pos2(300.0, 150.0));
    start(&mut state, second, pos2(500.0, 350.0));

    assert_eq!(state.coordinator().active_marker(), Some(first));
    let untouched = state.canvas().marker(second).expect("second marker");
    assert!(untouched.is_visible());
}

#[test]
fn test_move_without_drag_is_a_no_op() {
    let (mut state, id) = state_with_marker(pos2(100.0, 100.0));

    let outcome = state.dispatch(DragSignal::Moved {
        pointer: pos2(10.0, 10.0),
    });

    assert_eq!(outcome, None);
    assert!(state.coordinator().ghost().is_none());
    let marker = state.canvas().marker(id).expect("marker");
    assert_eq!(marker.center(), pos2(100.0, 100.0));
}

#[test]
fn test_pointer_gesture_end_to_end() {
    let (mut state, id) = state_with_marker(pos2(100.0, 100.0));
    let mut recognizer = DragRecognizer::default();

    let press = pos2(300.0, 150.0);
    let source = state.drag_source_at(press);
    assert_eq!(source, Some(DragPayload::Marker(id)));
    recognizer.pointer_down(press, source);

    // Under the threshold nothing happens
    assert_eq!(recognizer.pointer_move(pos2(302.0, 151.0)), None);
    assert!(state.coordinator().ghost().is_none());

    let run = |state: &mut EditorState, signal: Option<DragSignal>| {
        if let Some(signal) = signal {
            state.dispatch(signal);
        }
    };
    run(&mut state, recognizer.pointer_move(pos2(320.0, 150.0)));
    assert!(state.coordinator().is_dragging());

    run(&mut state, recognizer.pointer_move(pos2(25.0, 25.0)));
    let release = pos2(25.0, 25.0);
    let over_target = state.layout().is_drop_target(release);
    run(&mut state, recognizer.pointer_up(release, over_target));

    assert!(!state.canvas().contains_marker(id));
    assert!(!recognizer.is_dragging());
    assert!(!state.coordinator().is_dragging());
}

#[test]
fn test_release_off_target_cancels() {
    let (mut state, id) = state_with_marker(pos2(100.0, 100.0));
    let mut recognizer = DragRecognizer::default();

    recognizer.pointer_down(pos2(300.0, 150.0), Some(DragPayload::Marker(id)));
    if let Some(signal) = recognizer.pointer_move(pos2(100.0, 400.0)) {
        state.dispatch(signal);
    }
    // Left of the canvas, outside the trash
    let release = pos2(100.0, 400.0);
    assert!(!state.layout().is_drop_target(release));
    if let Some(signal) = recognizer.pointer_up(release, false) {
        state.dispatch(signal);
    }

    let marker = state.canvas().marker(id).expect("marker kept");
    assert_eq!(marker.center(), pos2(100.0, 100.0));
    assert!(marker.is_visible());
    assert!(state.coordinator().ghost().is_none());
}

#[test]
fn test_drag_into_corner_trash() {
    // Canvas fills the window; the trash sits on top of its corner
    let mut state = EditorState::default();
    state.sync_layout(FrameLayout {
        canvas: Rect::from_min_size(Pos2::ZERO, vec2(800.0, 600.0)),
        overlay: Rect::from_min_size(Pos2::ZERO, vec2(800.0, 600.0)),
        trash: Rect::from_min_max(pos2(0.0, 0.0), pos2(40.0, 40.0)),
    });
    let id = state.place_marker(0, pos2(50.0, 50.0)).expect("entry 0");

    start(&mut state, id, pos2(50.0, 50.0));
    state.dispatch(DragSignal::Moved {
        pointer: pos2(20.0, 20.0),
    });
    state.dispatch(DragSignal::Dropped {
        payload: DragPayload::Marker(id),
        position: pos2(20.0, 20.0),
    });

    assert!(state.canvas().markers().is_empty());
    assert!(state.coordinator().ghost().is_none());

    // A late duplicate drop resolves to nothing
    let outcome = state.dispatch(DragSignal::Dropped {
        payload: DragPayload::Marker(id),
        position: pos2(20.0, 20.0),
    });
    assert_eq!(outcome, None);
}

#[test]
fn test_stray_signal_for_another_marker_keeps_drag_alive() {
    let mut state = EditorState::default();
    state.sync_layout(layout());
    let dragged = state.place_marker(0, pos2(100.0, 100.0)).expect("entry 0");
    let other = state.place_marker(1, pos2(400.0, 300.0)).expect("entry 1");

    start(&mut state, dragged, pos2(300.0, 150.0));
    let stray = [
        DragSignal::Cancelled {
            payload: DragPayload::Marker(other),
        },
        DragSignal::Dropped {
            payload: DragPayload::Marker(other),
            position: pos2(600.0, 350.0),
        },
        DragSignal::Dropped {
            payload: DragPayload::Marker(other),
            position: pos2(20.0, 20.0),
        },
    ];
    for signal in stray {
        assert_eq!(state.dispatch(signal), None);
        let marker = state.canvas().marker(dragged).expect("dragged marker");
        assert!(marker.is_visible() || state.coordinator().is_dragging());
        assert_ghost_matches_drag(&state);
    }

    assert_eq!(state.coordinator().active_marker(), Some(dragged));
    let untouched = state.canvas().marker(other).expect("other marker kept");
    assert_eq!(untouched.center(), pos2(400.0, 300.0));

    state.dispatch(DragSignal::Cancelled {
        payload: DragPayload::Marker(dragged),
    });
    let marker = state.canvas().marker(dragged).expect("dragged marker");
    assert!(marker.is_visible());
    assert_eq!(marker.center(), pos2(100.0, 100.0));
}
