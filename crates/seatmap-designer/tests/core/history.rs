use seatmap_designer::history::HistoryStack;
use seatmap_designer::{LayoutDocument, PlacedObject, Point};

fn doc_with(n: usize) -> LayoutDocument {
    let objects = (0..n)
        .map(|i| PlacedObject::rectangle(format!("rect-{}", i + 1), Point::new(i as f64 * 50.0, 0.0), 40.0, 40.0))
        .collect();
    LayoutDocument::from_objects(objects).unwrap()
}

#[test]
fn test_new_history_has_nothing_to_undo() {
    let history = HistoryStack::new(LayoutDocument::new(), 50);
    assert!(!history.can_undo());
    assert!(!history.can_redo());
    assert_eq!(history.len(), 1);
    assert_eq!(history.cursor(), 0);
}

#[test]
fn test_push_ignores_unchanged_document() {
    let mut history = HistoryStack::new(doc_with(1), 50);
    assert!(!history.push(doc_with(1)));
    assert_eq!(history.len(), 1);
}

#[test]
fn test_undo_and_redo_are_clamped() {
    let mut history = HistoryStack::new(LayoutDocument::new(), 50);
    assert!(history.undo().is_none());
    assert!(history.push(doc_with(1)));
    assert!(history.redo().is_none());

    assert_eq!(history.undo(), Some(&LayoutDocument::new()));
    assert!(history.undo().is_none());
    assert_eq!(history.cursor(), 0);
}

#[test]
fn test_linear_undo_redo_restores_every_state() {
    let mut history = HistoryStack::new(LayoutDocument::new(), 50);
    for n in 1..=5 {
        assert!(history.push(doc_with(n)));
    }

    for _ in 0..5 {
        assert!(history.undo().is_some());
    }
    assert_eq!(history.current(), &LayoutDocument::new());

    for _ in 0..5 {
        assert!(history.redo().is_some());
    }
    assert_eq!(history.current(), &doc_with(5));
}

#[test]
fn test_push_after_undo_truncates_redo_tail() {
    let mut history = HistoryStack::new(LayoutDocument::new(), 50);
    history.push(doc_with(1));
    history.push(doc_with(2));
    history.push(doc_with(3));

    history.undo();
    assert_eq!(history.redo_depth(), 1);

    let mut branch = doc_with(2);
    branch
        .push(PlacedObject::circle("circle-9", Point::new(500.0, 500.0), 10.0))
        .unwrap();
    assert!(history.push(branch.clone()));

    assert!(!history.can_redo());
    assert!(history.redo().is_none());
    assert_eq!(history.current(), &branch);
    assert_eq!(history.len(), 4);
}

#[test]
fn test_max_depth_trims_oldest_entries() {
    let mut history = HistoryStack::new(LayoutDocument::new(), 3);
    for n in 1..=5 {
        history.push(doc_with(n));
    }
    assert_eq!(history.len(), 3);
    assert_eq!(history.cursor(), 2);
    assert_eq!(history.current(), &doc_with(5));

    history.undo();
    history.undo();
    assert!(!history.can_undo());
    assert_eq!(history.current(), &doc_with(3));
}

#[test]
fn test_reset_starts_over() {
    let mut history = HistoryStack::new(LayoutDocument::new(), 10);
    history.push(doc_with(1));
    history.push(doc_with(2));
    history.reset(doc_with(4));
    assert_eq!(history.len(), 1);
    assert_eq!(history.current(), &doc_with(4));
    assert!(!history.can_undo());
}
