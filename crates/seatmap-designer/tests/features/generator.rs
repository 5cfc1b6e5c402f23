use proptest::prelude::*;
use std::collections::HashSet;

use seatmap_designer::generator::{
    auto_space, footprint, GridParams, LinearParams, PatternGenerator, PlacementConfig,
    RadialParams, SpacingRules,
};
use seatmap_designer::geometry::world_bounds;
use seatmap_designer::{
    BulkRequest, Command, EditOutcome, LayoutEditor, ObjectId, PlacedObject, Point, ShapeKind,
};
use seatmap_core::LayoutError;
use seatmap_settings::{Config, SpacingMode};

fn counter() -> impl FnMut(ShapeKind) -> ObjectId {
    let mut n = 0;
    move |kind| {
        n += 1;
        ObjectId::new(format!("{}-{}", kind.id_prefix(), n))
    }
}

fn seat() -> PlacedObject {
    PlacedObject::rectangle("template", Point::new(0.0, 0.0), 20.0, 20.0)
}

#[test]
fn test_grid_count_and_cell_position() {
    let config = PlacementConfig::Grid(GridParams::new(4, 5, 30.0, 25.0, Point::new(10.0, 20.0)));
    let objects = PatternGenerator::generate(&seat(), &config, &mut counter());

    assert_eq!(objects.len(), 20);
    // Row-major: (row 2, col 3) is entry 2 * 5 + 3.
    assert_eq!(objects[13].position, Point::new(10.0 + 3.0 * 30.0, 20.0 + 2.0 * 25.0));
}

#[test]
fn test_radial_eight_at_fixed_radius() {
    let center = Point::new(300.0, 300.0);
    let config = PlacementConfig::Radial(RadialParams::new(center, 150.0, 8));
    let objects = PatternGenerator::generate(&seat(), &config, &mut counter());

    assert_eq!(objects.len(), 8);
    let angles: Vec<f64> = objects
        .iter()
        .map(|o| {
            assert!((o.position.distance_to(&center) - 150.0).abs() < 1e-9);
            let v = o.position - center;
            v.y.atan2(v.x).to_degrees().rem_euclid(360.0)
        })
        .collect();
    for pair in angles.windows(2) {
        assert!(((pair[1] - pair[0]) - 45.0).abs() < 1e-9);
    }
}

#[test]
fn test_radial_start_angle_offsets_first_copy() {
    let mut params = RadialParams::new(Point::new(0.0, 0.0), 10.0, 4);
    params.start_angle = 90.0;
    let positions = PlacementConfig::Radial(params).positions();
    assert!(positions[0].distance_to(&Point::new(0.0, 10.0)) < 1e-9);
}

#[test]
fn test_linear_runs_along_angle() {
    let config = PlacementConfig::Linear(LinearParams::new(Point::new(5.0, 5.0), 90.0, 12.0, 3));
    let positions = config.positions();
    assert_eq!(positions.len(), 3);
    assert!(positions[2].distance_to(&Point::new(5.0, 29.0)) < 1e-9);
}

#[test]
fn test_generated_ids_are_unique_for_groups() {
    let template = {
        let (shape, position) = seatmap_designer::GroupShape::from_world(vec![
            PlacedObject::rectangle("a", Point::new(0.0, 0.0), 10.0, 10.0),
            PlacedObject::circle("b", Point::new(20.0, 5.0), 5.0),
        ]);
        PlacedObject::new("pair", seatmap_designer::Shape::Group(shape), position)
    };
    let config = PlacementConfig::Grid(GridParams::new(2, 2, 40.0, 40.0, Point::new(0.0, 0.0)));
    let objects = PatternGenerator::generate(&template, &config, &mut counter());

    let mut seen = HashSet::new();
    for object in &objects {
        assert!(seen.insert(object.id.clone()));
        for id in object.descendant_ids() {
            assert!(seen.insert(id));
        }
    }
    assert_eq!(seen.len(), 12);
}

#[test]
fn test_validation_rejects_out_of_range_input() {
    let negative = PlacementConfig::Grid(GridParams::new(2, 2, -5.0, 10.0, Point::new(0.0, 0.0)));
    assert!(negative.validate(100).is_err());

    let empty = PlacementConfig::Radial(RadialParams::new(Point::new(0.0, 0.0), 10.0, 0));
    assert!(empty.validate(100).is_err());

    let nan = PlacementConfig::Linear(LinearParams::new(Point::new(f64::NAN, 0.0), 0.0, 10.0, 3));
    assert!(nan.validate(100).is_err());

    let too_many = PlacementConfig::Grid(GridParams::new(50, 50, 5.0, 5.0, Point::new(0.0, 0.0)));
    assert!(too_many.validate(100).is_err());
    assert!(too_many.validate(2500).is_ok());
}

#[test]
fn test_simple_auto_space_grid_does_not_overlap() {
    let template = PlacedObject::rectangle("t", Point::new(0.0, 0.0), 30.0, 12.0).with_rotation(30.0);
    let config = PlacementConfig::Grid(GridParams::new(3, 3, 1.0, 1.0, Point::new(0.0, 0.0)));
    let spaced = auto_space(&config, &template, SpacingMode::Simple, &SpacingRules::default());

    let objects = PatternGenerator::generate(&template, &spaced, &mut counter());
    for (i, a) in objects.iter().enumerate() {
        for b in &objects[i + 1..] {
            assert!(!world_bounds(a).intersects(&world_bounds(b)));
        }
    }
}

#[test]
fn test_auto_space_uses_text_estimate() {
    let text = PlacedObject::text("t", Point::new(0.0, 0.0), "A12", 20.0);
    let size = footprint(&text);
    assert!((size.width - 36.0).abs() < 1e-9);
    assert!((size.height - 24.0).abs() < 1e-9);
}

#[test]
fn test_auto_space_keeps_counts_and_origin() {
    let config = PlacementConfig::Linear(LinearParams::new(Point::new(7.0, 8.0), 0.0, 1.0, 6));
    let spaced = auto_space(&config, &seat(), SpacingMode::Smart, &SpacingRules::default());
    match spaced {
        PlacementConfig::Linear(l) => {
            assert_eq!(l.count, 6);
            assert_eq!(l.origin, Point::new(7.0, 8.0));
            assert!(l.spacing > 20.0);
        }
        other => panic!("pattern changed: {:?}", other),
    }
}

#[test]
fn test_bulk_command_is_one_history_entry() {
    let mut editor = LayoutEditor::new(Config::default());
    let config = PlacementConfig::Grid(GridParams::new(4, 5, 30.0, 30.0, Point::new(0.0, 0.0)));
    let outcome = editor
        .execute(Command::GenerateBulk(BulkRequest::new(seat(), config)))
        .unwrap();

    match outcome {
        EditOutcome::Generated(ids) => assert_eq!(ids.len(), 20),
        other => panic!("unexpected outcome {:?}", other),
    }
    assert_eq!(editor.objects().len(), 20);
    assert_eq!(editor.history().len(), 2);

    editor.undo();
    assert!(editor.objects().is_empty());
}

#[test]
fn test_invalid_bulk_request_leaves_document_untouched() {
    let mut editor = LayoutEditor::new(Config::default());
    let config = PlacementConfig::Radial(RadialParams::new(Point::new(0.0, 0.0), -1.0, 8));
    assert!(editor.generate_bulk(&BulkRequest::new(seat(), config)).is_err());
    assert!(editor.objects().is_empty());
    assert_eq!(editor.history().len(), 1);
}

#[test]
fn test_bulk_ids_do_not_collide_with_existing_objects() {
    let mut editor = LayoutEditor::new(Config::default());
    editor
        .load(vec![PlacedObject::rectangle("rect-2", Point::new(500.0, 500.0), 10.0, 10.0)])
        .unwrap();
    let config = PlacementConfig::Linear(LinearParams::new(Point::new(0.0, 0.0), 0.0, 30.0, 3));
    let ids = editor
        .generate_bulk(&BulkRequest::new(seat(), config).with_auto_spacing(SpacingMode::Simple))
        .unwrap();
    assert_eq!(ids.len(), 3);
    assert!(ids.iter().all(|id| id.as_str() != "rect-2"));
    assert_eq!(editor.objects().len(), 4);
}

#[test]
fn test_bulk_command_is_ignored_while_drawing_polygon() {
    let mut editor = LayoutEditor::new(Config::default());
    editor.execute(Command::StartPolygon).unwrap();
    let config = PlacementConfig::Grid(GridParams::new(2, 2, 30.0, 30.0, Point::new(0.0, 0.0)));

    let outcome = editor
        .execute(Command::GenerateBulk(BulkRequest::new(seat(), config.clone())))
        .unwrap();
    assert_eq!(outcome, EditOutcome::Ignored);
    assert!(editor.objects().is_empty());
    assert_eq!(editor.history().len(), 1);
    assert!(editor.interaction().is_drawing_polygon());

    let err = editor.generate_bulk(&BulkRequest::new(seat(), config)).unwrap_err();
    assert!(matches!(err.as_layout(), Some(LayoutError::GestureInProgress { .. })));
}

#[test]
fn test_configured_spacing_follows_bulk_spacing_mode() {
    let mut config = Config::default();
    config.bulk.spacing_mode = SpacingMode::Smart;
    let placement = PlacementConfig::Linear(LinearParams::new(Point::new(0.0, 0.0), 0.0, 1.0, 3));

    let mut configured = LayoutEditor::new(config.clone());
    configured
        .generate_bulk(&BulkRequest::new(seat(), placement.clone()).with_configured_spacing())
        .unwrap();
    let mut smart = LayoutEditor::new(config);
    smart
        .generate_bulk(&BulkRequest::new(seat(), placement).with_auto_spacing(SpacingMode::Smart))
        .unwrap();

    let positions = |editor: &LayoutEditor| -> Vec<Point> {
        editor.objects().iter().map(|o| o.position).collect()
    };
    assert_eq!(positions(&configured), positions(&smart));
    assert!(positions(&configured)[1].x > 20.0);
}

proptest! {
    #[test]
    fn prop_wider_template_never_shrinks_spacing(
        w in 1.0f64..500.0,
        grow in 0.0f64..500.0,
        h in 1.0f64..200.0,
        smart in any::<bool>(),
    ) {
        let mode = if smart { SpacingMode::Smart } else { SpacingMode::Simple };
        let rules = SpacingRules::default();
        let config = PlacementConfig::Grid(GridParams::new(2, 2, 1.0, 1.0, Point::new(0.0, 0.0)));
        let spacing_x = |width: f64| {
            let template = PlacedObject::rectangle("t", Point::new(0.0, 0.0), width, h);
            match auto_space(&config, &template, mode, &rules) {
                PlacementConfig::Grid(g) => g.spacing_x,
                _ => unreachable!(),
            }
        };
        prop_assert!(spacing_x(w + grow) >= spacing_x(w));
    }
}
