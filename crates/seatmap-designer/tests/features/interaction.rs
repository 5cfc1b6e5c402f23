use seatmap_core::LayoutError;
use seatmap_designer::{
    Command, EditOutcome, GestureKind, LayoutEditor, ObjectId, ObjectPatch, PlacedObject, Point,
    PointerInput, ShapeKind, Size, Style,
};
use seatmap_settings::Config;

fn editor_with(objects: Vec<PlacedObject>) -> LayoutEditor {
    let mut editor = LayoutEditor::new(Config::default());
    editor.load(objects).unwrap();
    editor
}

fn seat(id: &str, x: f64, y: f64) -> PlacedObject {
    PlacedObject::rectangle(id, Point::new(x, y), 40.0, 40.0)
}

fn position(editor: &LayoutEditor, id: &str) -> Point {
    editor.object(&ObjectId::from(id)).unwrap().position
}

#[test]
fn test_click_on_empty_canvas_creates_active_kind() {
    let mut editor = LayoutEditor::new(Config::default());
    editor.set_active_kind(ShapeKind::Circle).unwrap();

    let outcome = editor.pointer_down(PointerInput::at(103.0, 107.0));
    let EditOutcome::Created(id) = outcome else {
        panic!("expected creation, got {:?}", outcome);
    };
    let circle = editor.object(&id).unwrap();
    assert_eq!(circle.kind(), ShapeKind::Circle);
    assert_eq!(circle.position, Point::new(105.0, 105.0));
    assert_eq!(editor.selection(), &[id]);
    assert!(editor.interaction().is_idle());
}

#[test]
fn test_polygons_and_groups_are_not_click_created() {
    let mut editor = LayoutEditor::new(Config::default());
    assert!(editor.set_active_kind(ShapeKind::Polygon).is_err());
    assert!(editor.set_active_kind(ShapeKind::Group).is_err());
    assert!(editor.create_object(ShapeKind::Group, Point::new(0.0, 0.0)).is_err());
    assert_eq!(editor.active_kind(), ShapeKind::Rectangle);
}

#[test]
fn test_copy_click_on_empty_canvas_is_ignored() {
    let mut editor = LayoutEditor::new(Config::default());
    let outcome = editor.pointer_down(PointerInput::at(10.0, 10.0).with_copy());
    assert_eq!(outcome, EditOutcome::Ignored);
    assert!(editor.objects().is_empty());
}

#[test]
fn test_malformed_events_are_ignored() {
    let mut editor = editor_with(vec![seat("a", 0.0, 0.0)]);
    assert_eq!(editor.pointer_up(PointerInput::at(5.0, 5.0)), EditOutcome::Ignored);
    assert_eq!(editor.pointer_leave(), EditOutcome::Ignored);
    assert_eq!(editor.history().len(), 1);
}

#[test]
fn test_hover_tracks_topmost_object() {
    let mut editor = editor_with(vec![seat("a", 0.0, 0.0), seat("b", 20.0, 0.0)]);
    assert_eq!(editor.pointer_move(PointerInput::at(30.0, 20.0)), EditOutcome::Updated);
    assert_eq!(editor.hovered(), Some(&ObjectId::from("b")));
    assert_eq!(editor.pointer_move(PointerInput::at(31.0, 20.0)), EditOutcome::Ignored);
    editor.pointer_move(PointerInput::at(300.0, 300.0));
    assert_eq!(editor.hovered(), None);
}

#[test]
fn test_drag_commits_one_entry() {
    let mut editor = editor_with(vec![seat("a", 0.0, 0.0)]);

    assert_eq!(
        editor.pointer_down(PointerInput::at(20.0, 20.0)),
        EditOutcome::GestureStarted(GestureKind::Drag)
    );
    for step in 1..=10 {
        editor.pointer_move(PointerInput::at(20.0 + step as f64 * 7.0, 20.0));
    }
    assert_eq!(editor.history().len(), 1);
    assert_eq!(
        editor.pointer_up(PointerInput::at(90.0, 20.0)),
        EditOutcome::Committed(GestureKind::Drag)
    );

    assert_eq!(position(&editor, "a"), Point::new(70.0, 0.0));
    assert_eq!(editor.history().len(), 2);
}

#[test]
fn test_rotate_from_top_left_corner() {
    let mut editor = editor_with(vec![PlacedObject::rectangle("a", Point::new(0.0, 0.0), 60.0, 60.0)]);

    assert_eq!(
        editor.pointer_down(PointerInput::at(2.0, 2.0)),
        EditOutcome::GestureStarted(GestureKind::Rotate)
    );
    editor.pointer_move(PointerInput::at(58.0, 2.0));
    assert_eq!(
        editor.pointer_up(PointerInput::at(58.0, 2.0)),
        EditOutcome::Committed(GestureKind::Rotate)
    );

    let rotated = editor.object(&ObjectId::from("a")).unwrap();
    assert!((rotated.rotation - 90.0).abs() < 1e-9);
    assert_eq!(rotated.position, Point::new(0.0, 0.0));
}

#[test]
fn test_constrained_rotation_snaps_to_step() {
    let mut editor = editor_with(vec![PlacedObject::rectangle("a", Point::new(0.0, 0.0), 60.0, 60.0)]);
    let center = Point::new(30.0, 30.0);

    editor.pointer_down(PointerInput::at(2.0, 2.0));
    // Start angle is -135 degrees; -85 is a 50 degree turn.
    let a = (-85.0f64).to_radians();
    let p = center + Point::new(a.cos(), a.sin()) * 40.0;
    editor.pointer_move(PointerInput::at(p.x, p.y).with_constrain());
    editor.pointer_up(PointerInput::at(p.x, p.y));

    let rotated = editor.object(&ObjectId::from("a")).unwrap();
    assert!((rotated.rotation - 45.0).abs() < 1e-9);
}

#[test]
fn test_resize_from_bottom_right_corner() {
    let mut editor = editor_with(vec![seat("a", 10.0, 10.0)]);

    assert_eq!(
        editor.pointer_down(PointerInput::at(49.0, 49.0)),
        EditOutcome::GestureStarted(GestureKind::Resize)
    );
    editor.pointer_move(PointerInput::at(70.0, 60.0));
    editor.pointer_up(PointerInput::at(70.0, 60.0));

    let resized = editor.object(&ObjectId::from("a")).unwrap();
    assert_eq!(resized.local_size(), Size::new(60.0, 50.0));
    assert_eq!(resized.position, Point::new(10.0, 10.0));
    assert_eq!(editor.history().len(), 2);
}

#[test]
fn test_constrained_resize_is_square() {
    let mut editor = editor_with(vec![seat("a", 0.0, 0.0)]);
    editor.pointer_down(PointerInput::at(39.0, 39.0));
    editor.pointer_move(PointerInput::at(80.0, 70.0).with_constrain());
    editor.pointer_up(PointerInput::at(80.0, 70.0));

    let size = editor.object(&ObjectId::from("a")).unwrap().local_size();
    assert_eq!(size, Size::new(80.0, 80.0));
}

#[test]
fn test_constrained_resize_near_axis_stays_square() {
    let mut editor = editor_with(vec![PlacedObject::rectangle("a", Point::new(0.0, 0.0), 100.0, 100.0)]);
    editor.pointer_down(PointerInput::at(99.0, 99.0));
    editor.pointer_move(PointerInput::at(300.0, 100.0).with_constrain());
    editor.pointer_up(PointerInput::at(300.0, 100.0));

    let resized = editor.object(&ObjectId::from("a")).unwrap();
    assert_eq!(resized.local_size(), Size::new(300.0, 300.0));
    assert_eq!(resized.position, Point::new(0.0, 0.0));
}

#[test]
fn test_top_right_requests_delete_without_deleting() {
    let mut editor = editor_with(vec![seat("a", 0.0, 0.0)]);

    let outcome = editor.pointer_down(PointerInput::at(39.0, 1.0));
    assert_eq!(outcome, EditOutcome::DeleteRequested(vec![ObjectId::from("a")]));
    assert!(editor.interaction().is_idle());
    assert_eq!(editor.objects().len(), 1);

    assert_eq!(editor.delete_objects(&[ObjectId::from("a")]), 1);
    assert!(editor.objects().is_empty());
    assert!(editor.selection().is_empty());
    editor.undo();
    assert_eq!(editor.objects().len(), 1);
}

#[test]
fn test_bottom_left_requests_rename() {
    let mut editor = editor_with(vec![seat("a", 0.0, 0.0), seat("b", 100.0, 0.0)]);

    let outcome = editor.pointer_down(PointerInput::at(1.0, 39.0));
    assert_eq!(outcome, EditOutcome::RenameRequested(ObjectId::from("a")));

    let err = editor.rename_object(&ObjectId::from("a"), "b").unwrap_err();
    assert!(err.is_duplicate_id());
    editor.rename_object(&ObjectId::from("a"), "A-1").unwrap();
    assert!(editor.object(&ObjectId::from("A-1")).is_some());
    assert_eq!(editor.selection(), &[ObjectId::from("A-1")]);
}

#[test]
fn test_delete_selected_command_asks_for_confirmation() {
    let mut editor = editor_with(vec![seat("a", 0.0, 0.0)]);
    assert_eq!(editor.execute(Command::DeleteSelected).unwrap(), EditOutcome::Ignored);

    editor.select(&ObjectId::from("a"));
    assert_eq!(
        editor.execute(Command::DeleteSelected).unwrap(),
        EditOutcome::DeleteRequested(vec![ObjectId::from("a")])
    );
    assert_eq!(editor.objects().len(), 1);
}

#[test]
fn test_copy_drag_commits_duplicate_on_release() {
    let mut editor = editor_with(vec![seat("a", 0.0, 0.0)]);

    assert_eq!(
        editor.pointer_down(PointerInput::at(20.0, 20.0).with_copy()),
        EditOutcome::GestureStarted(GestureKind::CopyDrag)
    );
    editor.pointer_move(PointerInput::at(122.0, 19.0).with_copy());

    let ghost = editor.interaction().ghost().unwrap();
    assert_eq!(ghost.position, Point::new(100.0, 0.0));
    assert_eq!(editor.objects().len(), 1);
    assert!(editor.document().topmost_hit(Point::new(120.0, 20.0)).is_none());

    let EditOutcome::Created(id) = editor.pointer_up(PointerInput::at(122.0, 19.0)) else {
        panic!("copy was not committed");
    };
    assert_ne!(id, ObjectId::from("a"));
    assert_eq!(position(&editor, id.as_str()), Point::new(100.0, 0.0));
    assert_eq!(position(&editor, "a"), Point::new(0.0, 0.0));
    assert_eq!(editor.history().len(), 2);
}

#[test]
fn test_pointer_leave_reverts_drag() {
    let mut editor = editor_with(vec![seat("a", 0.0, 0.0)]);
    editor.pointer_down(PointerInput::at(20.0, 20.0));
    editor.pointer_move(PointerInput::at(70.0, 20.0));
    assert_eq!(position(&editor, "a"), Point::new(50.0, 0.0));

    assert_eq!(editor.pointer_leave(), EditOutcome::Cancelled);
    assert_eq!(position(&editor, "a"), Point::new(0.0, 0.0));
    assert!(editor.interaction().is_idle());
    assert_eq!(editor.history().len(), 1);
}

#[test]
fn test_pointer_leave_reverts_resize() {
    let mut editor = editor_with(vec![seat("a", 10.0, 10.0)]);
    editor.pointer_down(PointerInput::at(49.0, 49.0));
    editor.pointer_move(PointerInput::at(90.0, 75.0));
    assert_eq!(
        editor.object(&ObjectId::from("a")).unwrap().local_size(),
        Size::new(80.0, 65.0)
    );

    assert_eq!(editor.pointer_leave(), EditOutcome::Cancelled);
    let restored = editor.object(&ObjectId::from("a")).unwrap();
    assert_eq!(restored.local_size(), Size::new(40.0, 40.0));
    assert_eq!(restored.position, Point::new(10.0, 10.0));
    assert!(editor.interaction().is_idle());
    assert_eq!(editor.history().len(), 1);
    assert_eq!(editor.history().current(), editor.document());
}

#[test]
fn test_pointer_leave_reverts_rotate() {
    let mut editor = editor_with(vec![PlacedObject::rectangle("a", Point::new(0.0, 0.0), 60.0, 60.0)]);
    editor.pointer_down(PointerInput::at(2.0, 2.0));
    editor.pointer_move(PointerInput::at(58.0, 2.0));
    assert!((editor.object(&ObjectId::from("a")).unwrap().rotation - 90.0).abs() < 1e-9);

    assert_eq!(editor.pointer_leave(), EditOutcome::Cancelled);
    assert_eq!(editor.object(&ObjectId::from("a")).unwrap().rotation, 0.0);
    assert!(editor.interaction().is_idle());
    assert_eq!(editor.history().len(), 1);
    assert_eq!(editor.history().current(), editor.document());
}

#[test]
fn test_document_mutations_are_rejected_during_drag() {
    let mut editor = editor_with(vec![PlacedObject::rectangle("seat", Point::new(0.0, 0.0), 100.0, 100.0)]);
    let id = ObjectId::from("seat");
    editor.pointer_down(PointerInput::at(50.0, 50.0));
    editor.pointer_move(PointerInput::at(70.0, 50.0));

    let err = editor.rename_object(&id, "A1").unwrap_err();
    assert!(matches!(err.as_layout(), Some(LayoutError::GestureInProgress { .. })));
    assert!(editor.insert_object(seat("b", 300.0, 300.0)).is_err());
    assert!(editor.duplicate_object(&id, Point::new(300.0, 0.0)).is_err());
    assert!(editor.update_object(&id, &ObjectPatch::rotation(30.0)).is_err());
    assert!(editor.set_locked(&id, true).is_err());
    assert!(editor.bring_to_front(&id).is_err());
    assert!(editor.create_object(ShapeKind::Circle, Point::new(300.0, 300.0)).is_err());

    assert_eq!(editor.pointer_move(PointerInput::at(90.0, 50.0)), EditOutcome::Updated);
    assert_eq!(position(&editor, "seat"), Point::new(40.0, 0.0));
    assert_eq!(
        editor.pointer_up(PointerInput::at(90.0, 50.0)),
        EditOutcome::Committed(GestureKind::Drag)
    );
    assert_eq!(editor.objects().len(), 1);
    assert_eq!(editor.history().len(), 2);
    assert_eq!(editor.history().current(), editor.document());

    editor.rename_object(&id, "A1").unwrap();
    assert_eq!(position(&editor, "A1"), Point::new(40.0, 0.0));
}

#[test]
fn test_group_edits_are_rejected_during_resize() {
    let mut editor = editor_with(vec![seat("a", 0.0, 0.0), seat("b", 100.0, 0.0)]);
    editor.pointer_down(PointerInput::at(39.0, 39.0));
    editor.pointer_move(PointerInput::at(60.0, 60.0));

    assert!(editor
        .group_objects(&[ObjectId::from("a"), ObjectId::from("b")])
        .is_err());
    assert!(editor.ungroup_object(&ObjectId::from("a")).is_err());

    assert_eq!(editor.pointer_leave(), EditOutcome::Cancelled);
    assert_eq!(editor.objects().len(), 2);
    assert_eq!(editor.history().current(), editor.document());
}

#[test]
fn test_pointer_leave_discards_copy_ghost() {
    let mut editor = editor_with(vec![seat("a", 0.0, 0.0)]);
    editor.pointer_down(PointerInput::at(20.0, 20.0).with_copy());
    editor.pointer_move(PointerInput::at(120.0, 20.0).with_copy());

    assert_eq!(editor.pointer_leave(), EditOutcome::Cancelled);
    assert!(editor.interaction().ghost().is_none());
    assert_eq!(editor.objects().len(), 1);
    assert_eq!(editor.pointer_up(PointerInput::at(120.0, 20.0)), EditOutcome::Ignored);
}

#[test]
fn test_undo_is_ignored_during_gesture() {
    let mut editor = editor_with(vec![seat("a", 0.0, 0.0)]);
    editor.create_object(ShapeKind::Rectangle, Point::new(200.0, 200.0)).unwrap();

    editor.pointer_down(PointerInput::at(20.0, 20.0));
    editor.pointer_move(PointerInput::at(40.0, 20.0));
    assert_eq!(editor.undo(), EditOutcome::Ignored);
    assert_eq!(editor.objects().len(), 2);

    editor.pointer_up(PointerInput::at(40.0, 20.0));
    assert_eq!(editor.undo(), EditOutcome::HistoryMoved);
    assert_eq!(position(&editor, "a"), Point::new(0.0, 0.0));
}

#[test]
fn test_new_gesture_is_ignored_while_one_is_active() {
    let mut editor = editor_with(vec![seat("a", 0.0, 0.0), seat("b", 100.0, 0.0)]);
    editor.pointer_down(PointerInput::at(20.0, 20.0));
    assert_eq!(editor.pointer_down(PointerInput::at(120.0, 20.0)), EditOutcome::Ignored);
    assert_eq!(editor.interaction().target(), Some(&ObjectId::from("a")));
}

#[test]
fn test_locked_object_keeps_geometry_but_takes_style() {
    let mut editor = editor_with(vec![seat("a", 0.0, 0.0).locked(true)]);

    editor.pointer_down(PointerInput::at(20.0, 20.0));
    assert_eq!(editor.pointer_move(PointerInput::at(70.0, 20.0)), EditOutcome::Ignored);
    assert_eq!(editor.pointer_up(PointerInput::at(70.0, 20.0)), EditOutcome::Ignored);
    assert_eq!(position(&editor, "a"), Point::new(0.0, 0.0));
    assert_eq!(editor.history().len(), 1);

    let style = Style {
        fill: "#ff0000".into(),
        ..Style::default()
    };
    editor.set_style(&ObjectId::from("a"), style.clone()).unwrap();
    assert_eq!(editor.object(&ObjectId::from("a")).unwrap().style, style);
    assert_eq!(editor.history().len(), 2);
}

#[test]
fn test_group_and_ungroup_preserve_world_positions() {
    let mut editor = editor_with(vec![seat("a", 10.0, 10.0), seat("b", 100.0, 50.0), seat("c", 300.0, 300.0)]);

    let group = editor
        .group_objects(&[ObjectId::from("b"), ObjectId::from("a")])
        .unwrap();
    assert_eq!(editor.objects().len(), 2);
    assert_eq!(editor.objects()[0].id, group);
    assert_eq!(editor.object(&group).unwrap().kind(), ShapeKind::Group);
    assert_eq!(position(&editor, group.as_str()), Point::new(10.0, 10.0));

    // A click on a child hits the group.
    let hit = editor.document().topmost_hit(Point::new(120.0, 70.0)).unwrap();
    assert_eq!(hit.id, group);

    let children = editor.ungroup_object(&group).unwrap();
    assert_eq!(children, vec![ObjectId::from("a"), ObjectId::from("b")]);
    assert!((position(&editor, "a").distance_to(&Point::new(10.0, 10.0))) < 1e-9);
    assert!((position(&editor, "b").distance_to(&Point::new(100.0, 50.0))) < 1e-9);
    assert_eq!(editor.history().len(), 3);
}

#[test]
fn test_dragging_a_group_moves_children_with_it() {
    let mut editor = editor_with(vec![seat("a", 0.0, 0.0), seat("b", 50.0, 0.0)]);
    let group = editor
        .group_objects(&[ObjectId::from("a"), ObjectId::from("b")])
        .unwrap();

    editor.pointer_down(PointerInput::at(20.0, 20.0));
    editor.pointer_move(PointerInput::at(120.0, 120.0));
    editor.pointer_up(PointerInput::at(120.0, 120.0));

    editor.ungroup_object(&group).unwrap();
    assert!((position(&editor, "a").distance_to(&Point::new(100.0, 100.0))) < 1e-9);
    assert!((position(&editor, "b").distance_to(&Point::new(150.0, 100.0))) < 1e-9);
}

#[test]
fn test_duplicate_copies_children_with_fresh_ids() {
    let mut editor = editor_with(vec![seat("a", 0.0, 0.0), seat("b", 50.0, 0.0)]);
    let group = editor
        .group_objects(&[ObjectId::from("a"), ObjectId::from("b")])
        .unwrap();
    let copy = editor.duplicate_object(&group, Point::new(0.0, 200.0)).unwrap();

    let copied = editor.object(&copy).unwrap();
    assert_eq!(copied.children().len(), 2);
    for child in copied.children() {
        assert_ne!(child.id.as_str(), "a");
        assert_ne!(child.id.as_str(), "b");
    }
    assert!(editor.document().validate().is_ok());
}

#[test]
fn test_z_order_commands() {
    let mut editor = editor_with(vec![seat("a", 0.0, 0.0), seat("b", 0.0, 0.0)]);
    editor.bring_to_front(&ObjectId::from("a")).unwrap();
    assert_eq!(editor.document().topmost_hit(Point::new(10.0, 10.0)).unwrap().id.as_str(), "a");
    editor.send_to_back(&ObjectId::from("a")).unwrap();
    assert_eq!(editor.document().topmost_hit(Point::new(10.0, 10.0)).unwrap().id.as_str(), "b");
    assert!(editor.bring_to_front(&ObjectId::from("zzz")).is_err());
}

#[test]
fn test_update_then_commit_records_once() {
    let mut editor = editor_with(vec![seat("a", 0.0, 0.0)]);
    let id = ObjectId::from("a");
    let patch = seatmap_designer::ObjectPatch::position(Point::new(30.0, 30.0));

    assert!(editor.update_object(&id, &patch).unwrap());
    assert!(editor
        .update_object(&id, &patch.clone().with_size(Size::new(80.0, 20.0)))
        .unwrap());
    assert_eq!(editor.history().len(), 1);
    assert!(editor.commit());
    assert!(!editor.commit());
    assert_eq!(editor.history().len(), 2);
    assert!(editor.update_object(&ObjectId::from("missing"), &patch).is_err());
}
