use seatmap_designer::{
    Command, EditOutcome, Interaction, LayoutEditor, Point, PointerInput, Shape, ShapeKind,
};
use seatmap_settings::Config;

fn drawing_editor() -> LayoutEditor {
    let mut editor = LayoutEditor::new(Config::default());
    assert_eq!(editor.execute(Command::StartPolygon).unwrap(), EditOutcome::PolygonStarted);
    editor
}

fn vertices(editor: &LayoutEditor) -> Vec<Point> {
    match editor.interaction() {
        Interaction::DrawingPolygon { vertices, .. } => vertices.clone(),
        other => panic!("not drawing: {:?}", other),
    }
}

#[test]
fn test_closing_click_commits_triangle() {
    let mut editor = drawing_editor();
    editor.pointer_down(PointerInput::at(0.0, 0.0));
    editor.pointer_down(PointerInput::at(100.0, 0.0));
    assert_eq!(editor.pointer_down(PointerInput::at(100.0, 100.0)), EditOutcome::VertexAdded(3));
    assert!(editor.objects().is_empty());

    let outcome = editor.pointer_down(PointerInput::at(4.0, 6.0));
    let EditOutcome::PolygonClosed(id) = outcome else {
        panic!("polygon not closed: {:?}", outcome);
    };

    assert_eq!(editor.objects().len(), 1);
    let polygon = editor.object(&id).unwrap();
    assert_eq!(polygon.kind(), ShapeKind::Polygon);
    assert_eq!(polygon.position, Point::new(0.0, 0.0));
    match &polygon.shape {
        Shape::Polygon(p) => assert_eq!(p.vertices.len(), 3),
        other => panic!("wrong shape {:?}", other),
    }
    assert_eq!(editor.history().len(), 2);
    assert!(editor.interaction().is_idle());
}

#[test]
fn test_close_with_two_vertices_is_ignored() {
    let mut editor = drawing_editor();
    editor.pointer_down(PointerInput::at(0.0, 0.0));
    editor.pointer_down(PointerInput::at(100.0, 0.0));

    assert_eq!(editor.pointer_down(PointerInput::at(3.0, 3.0)), EditOutcome::Ignored);
    assert_eq!(vertices(&editor).len(), 2);
    assert!(editor.objects().is_empty());
}

#[test]
fn test_cancel_discards_vertices_without_history() {
    let mut editor = drawing_editor();
    editor.pointer_down(PointerInput::at(0.0, 0.0));
    editor.pointer_down(PointerInput::at(100.0, 0.0));
    editor.pointer_down(PointerInput::at(100.0, 100.0));

    assert_eq!(editor.execute(Command::CancelPolygon).unwrap(), EditOutcome::Cancelled);
    assert!(editor.interaction().is_idle());
    assert!(editor.objects().is_empty());
    assert_eq!(editor.history().len(), 1);
    assert_eq!(editor.cancel_polygon(), EditOutcome::Ignored);
}

#[test]
fn test_vertices_snap_to_grid() {
    let mut editor = drawing_editor();
    editor.pointer_down(PointerInput::at(12.0, 13.0));
    editor.pointer_down(PointerInput::at(98.0, 2.0));
    assert_eq!(vertices(&editor), vec![Point::new(10.0, 15.0), Point::new(100.0, 0.0)]);
}

#[test]
fn test_constrained_vertex_snaps_to_angle_from_previous() {
    let mut editor = drawing_editor();
    editor.pointer_down(PointerInput::at(0.0, 0.0));
    editor.pointer_down(PointerInput::at(100.0, 0.0));
    editor.pointer_down(PointerInput::at(90.0, 95.0).with_constrain());

    let v = vertices(&editor);
    let expected_len = Point::new(-10.0, 95.0).length();
    assert!((v[2].x - 100.0).abs() < 1e-9);
    assert!((v[2].y - expected_len).abs() < 1e-9);
}

#[test]
fn test_repeated_vertex_is_ignored() {
    let mut editor = drawing_editor();
    editor.pointer_down(PointerInput::at(0.0, 0.0));
    editor.pointer_down(PointerInput::at(100.0, 0.0));
    assert_eq!(editor.pointer_down(PointerInput::at(101.0, 1.0)), EditOutcome::Ignored);
    assert_eq!(vertices(&editor).len(), 2);
}

#[test]
fn test_preview_follows_pointer_and_survives_leave() {
    let mut editor = drawing_editor();
    editor.pointer_down(PointerInput::at(0.0, 0.0));
    assert_eq!(editor.pointer_move(PointerInput::at(42.0, 18.0)), EditOutcome::Updated);

    let (vs, cursor) = editor.interaction().polygon_preview().unwrap();
    assert_eq!(vs.len(), 1);
    assert_eq!(cursor, Some(Point::new(40.0, 20.0)));

    assert_eq!(editor.pointer_leave(), EditOutcome::Ignored);
    assert!(editor.interaction().is_drawing_polygon());
    assert_eq!(editor.pointer_up(PointerInput::at(0.0, 0.0)), EditOutcome::Ignored);
    assert!(editor.interaction().is_drawing_polygon());
}

#[test]
fn test_polygon_over_existing_object_does_not_select_it() {
    let mut editor = LayoutEditor::new(Config::default());
    editor.create_object(ShapeKind::Rectangle, Point::new(0.0, 0.0)).unwrap();
    editor.execute(Command::StartPolygon).unwrap();

    assert_eq!(editor.pointer_down(PointerInput::at(20.0, 20.0)), EditOutcome::VertexAdded(1));
    assert_eq!(editor.objects().len(), 1);
}

#[test]
fn test_start_polygon_requires_idle() {
    let mut editor = drawing_editor();
    assert_eq!(editor.start_polygon(), EditOutcome::Ignored);
}

#[test]
fn test_undo_removes_closed_polygon() {
    let mut editor = drawing_editor();
    for (x, y) in [(0.0, 0.0), (50.0, 0.0), (50.0, 50.0), (0.0, 50.0), (1.0, 1.0)] {
        editor.pointer_down(PointerInput::at(x, y));
    }
    assert_eq!(editor.objects().len(), 1);
    editor.execute(Command::Undo).unwrap();
    assert!(editor.objects().is_empty());
    editor.execute(Command::Redo).unwrap();
    assert_eq!(editor.objects().len(), 1);
}
