//! End-to-end tests of the trend graph pipeline.
//!
//! Covers the domain, scale, viewport, curve and series stages together,
//! using the fixtures from `biologger-test-utils`.

use biologger_graph::chart::{
    Domain, NormalizedExtent, Rect, SeriesBuilder, ViewportTable, denormalize, filter_history,
    graph_domain, normalize,
};
use biologger_graph::{
    DVec2, GraphConfig, GraphError, HistoryEntry, LoggingMode, PathCommand, VariableLibrary,
    monotone_path, monotone_tangents,
};
use biologger_test_utils::{
    assert_close, assert_no_overshoot, bodyweight, init_logging, mock_history, mood, ymd,
};

// ====================
// Domains and scale
// ====================

#[test]
fn test_summary_domain_without_history() {
    let var = bodyweight(LoggingMode::Summary);
    assert_eq!(graph_domain(&var, &[], 0.0), Domain::new(70.0, 90.0));
}

#[test]
fn test_summary_domain_ignores_outliers() {
    let var = bodyweight(LoggingMode::Summary);
    let cases: [&[f64]; 3] = [&[-50.0, 50.0], &[0.0], &[9.9, -9.9, 100.0]];
    for values in cases {
        assert_eq!(graph_domain(&var, values, 0.1), Domain::new(70.0, 90.0));
    }
}

#[test]
fn test_point_in_time_domain_containment() {
    let var = bodyweight(LoggingMode::PointInTime);
    let cases: [&[f64]; 4] = [&[-15.0, 5.0], &[0.0], &[25.0, 30.0], &[-3.0, -2.0, 1.0]];

    for values in cases {
        for padding in [0.0, 0.1] {
            let domain = graph_domain(&var, values, padding);
            assert!(domain.min <= 70.0 && domain.max >= 90.0, "{domain:?}");
            for v in values {
                assert!(domain.contains(80.0 + v), "{v} outside {domain:?}");
            }
        }
    }

    let domain = graph_domain(&var, &[-15.0, 5.0], 0.0);
    assert!(domain.min <= 65.0);
    assert!(domain.max >= 90.0);
}

#[test]
fn test_round_trip_grid() {
    let domains = [
        Domain::new(70.0, 90.0),
        Domain::new(0.0, 10.0),
        Domain::new(-2.5, 2.5),
        Domain::new(1e-4, 2e-4),
        Domain::new(-1e4, 3e4),
    ];
    for domain in &domains {
        for step in -20..=20 {
            let value = domain.center() + domain.span() * f64::from(step) / 10.0;
            let back = denormalize(normalize(value, domain), domain);
            assert_close(back, value, 1e-9 * (1.0 + value.abs()));
        }
    }
}

#[test]
fn test_domain_maps_onto_extent() {
    let domain = Domain::new(70.0, 90.0);
    let extent = NormalizedExtent::DEFAULT;
    assert_close(extent.normalize(70.0, &domain), -1.05, 1e-12);
    assert_close(extent.normalize(90.0, &domain), 1.05, 1e-12);
}

// ====================
// Curves
// ====================

#[test]
fn test_peak_has_flat_tangent_and_no_overshoot() {
    let points = [DVec2::new(0.0, 0.0), DVec2::new(10.0, 10.0), DVec2::new(20.0, 0.0)];
    assert_eq!(monotone_tangents(&points)[1], 0.0);

    let path = monotone_path(&points);
    assert_no_overshoot(&path, &points);
    for curve in path.cubic_curves() {
        let (low, high) = curve.y_extent();
        assert!(low >= -1e-12 && high <= 10.0 + 1e-12);
    }
}

#[test]
fn test_no_overshoot_on_jagged_data() {
    let points: Vec<DVec2> = (0..40)
        .map(|i| {
            let x = f64::from(i) * 7.5;
            let y = 50.0 + (f64::from(i) * 1.3).sin() * 30.0 + if i % 5 == 0 { 25.0 } else { 0.0 };
            DVec2::new(x, y)
        })
        .collect();

    let path = monotone_path(&points);
    assert_no_overshoot(&path, &points);
}

#[test]
fn test_steep_runs_stay_monotone() {
    let points = [
        DVec2::new(0.0, 0.0),
        DVec2::new(1.0, 0.1),
        DVec2::new(2.0, 50.0),
        DVec2::new(3.0, 50.1),
        DVec2::new(4.0, 100.0),
    ];
    let path = monotone_path(&points);
    assert_no_overshoot(&path, &points);
}

#[test]
fn test_curve_passes_through_points() {
    let points = [
        DVec2::new(0.0, 3.0),
        DVec2::new(4.0, 1.0),
        DVec2::new(5.0, 8.0),
        DVec2::new(9.0, 8.0),
    ];
    let path = monotone_path(&points);
    for (curve, pair) in path.cubic_curves().zip(points.windows(2)) {
        assert_eq!(curve.eval(0.0), pair[0]);
        assert_eq!(curve.eval(1.0), pair[1]);
    }
}

#[test]
fn test_two_points_are_a_straight_line() {
    let points = [DVec2::new(0.0, 0.0), DVec2::new(30.0, 15.0)];
    let path = monotone_path(&points);

    let curves: Vec<_> = path.cubic_curves().collect();
    assert_eq!(curves.len(), 1);
    assert!(curves[0].is_linear(1e-12));
    assert_eq!(path.to_svg(), "M 0 0 C 10 5, 20 10, 30 15");
}

#[test]
fn test_degenerate_point_counts() {
    assert_eq!(monotone_path(&[]).to_svg(), "");
    assert_eq!(monotone_path(&[DVec2::new(4.0, 2.0)]).to_svg(), "M 4 2");
}

// ====================
// Viewports
// ====================

#[test]
fn test_week_window_over_thirty_days() {
    let reference = ymd(2025, 4, 30);
    let mut history = mock_history(reference, 30);
    history.reverse();

    let week = ViewportTable::default().get("week").cloned().unwrap();
    let filtered = filter_history(&history, &week, reference);

    assert_eq!(filtered.len(), 8);
    assert!(filtered.iter().all(|e| e.date >= ymd(2025, 4, 23)));
    assert!(filtered.windows(2).all(|w| w[0].date < w[1].date));
    assert_eq!(filtered.last().map(|e| e.date), Some(reference));
}

#[test]
fn test_aggregation_non_imputation() {
    let day = ymd(2025, 4, 10);
    let history = vec![
        HistoryEntry::new(day).with_value("a", 2.0),
        HistoryEntry::new(day).with_value("a", 4.0).with_missing("b"),
    ];
    let month = ViewportTable::default().get("month").cloned().unwrap();
    let filtered = filter_history(&history, &month, day);

    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].value("a"), Some(3.0));
    assert_eq!(filtered[0].value("b"), None);
    assert!(!filtered[0].values.contains_key("b"));
}

// ====================
// Series building
// ====================

#[test]
fn test_build_default_library_over_year() {
    init_logging();
    let reference = ymd(2025, 6, 30);
    let history = mock_history(reference, 400);
    let library = VariableLibrary::default_library();
    let bounds = Rect::from_size(800.0, 240.0);
    let builder = SeriesBuilder::new(GraphConfig::default());

    for viewport in ["day", "week", "month", "year"] {
        let series = builder
            .build(library.graphable(), &history, viewport, reference, Some("sleep"), bounds)
            .unwrap();
        assert_eq!(series.len(), 5, "{viewport}");

        let plot = bounds.inset(&builder.config().insets);
        for s in &series {
            assert!(s.points.windows(2).all(|w| w[0].position.x < w[1].position.x));
            for point in &s.points {
                assert!(plot.contains(point.position), "{} {:?}", s.variable_id, point);
            }
            let commands = s.path.commands();
            if let Some((first, rest)) = commands.split_first() {
                assert!(matches!(first, PathCommand::MoveTo(_)));
                assert!(rest.iter().all(|c| matches!(c, PathCommand::CubicTo { .. })));
            }
        }
        // "waist" has no history: an empty series, not an error.
        let waist = series.iter().find(|s| s.variable_id == "waist").unwrap();
        assert!(waist.is_empty());
        assert_eq!(waist.path_data(), "");
    }
}

#[test]
fn test_padding_is_configurable() {
    let reference = ymd(2025, 6, 30);
    let history = vec![
        HistoryEntry::new(ymd(2025, 6, 29)).with_value("bodyweight", -15.0),
        HistoryEntry::new(reference).with_value("bodyweight", 5.0),
    ];
    let variables = [bodyweight(LoggingMode::PointInTime)];
    let bounds = Rect::from_size(400.0, 200.0);

    let plain = SeriesBuilder::default()
        .build(&variables, &history, "week", reference, None, bounds)
        .unwrap();
    assert_eq!(plain[0].domain, Domain::new(65.0, 90.0));

    let padded = SeriesBuilder::new(GraphConfig::default().with_domain_padding(0.1))
        .build(&variables, &history, "week", reference, None, bounds)
        .unwrap();
    assert_close(padded[0].domain.min, 62.5, 1e-9);
    assert_close(padded[0].domain.max, 92.5, 1e-9);
}

#[test]
fn test_frame_for_active_summary_variable() {
    let reference = ymd(2025, 6, 30);
    let history = mock_history(reference, 60);
    let variables = [mood(), bodyweight(LoggingMode::PointInTime)];

    let frame = SeriesBuilder::default()
        .build_frame(&variables, &history, "month", reference, Some("mood"), Rect::from_size(636.0, 200.0))
        .unwrap();

    assert!(frame.series[0].style.active);
    assert!(!frame.series[1].style.active);
    assert_eq!(frame.series[1].style.opacity, 0.25);
    assert_eq!(frame.series[0].domain, Domain::new(0.0, 10.0));

    let values: Vec<f64> = frame.value_ticks.iter().map(|t| t.value).collect();
    assert_eq!(values, [0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
    assert_eq!(frame.value_ticks[5].label, "10/10");
    assert_eq!(frame.time_ticks.len(), 5);
}

#[test]
fn test_unknown_viewport() {
    let result = SeriesBuilder::default().build(
        &[mood()],
        &[],
        "fortnight",
        ymd(2025, 1, 1),
        None,
        Rect::from_size(10.0, 10.0),
    );
    assert_eq!(result, Err(GraphError::UnknownViewport("fortnight".into())));
}
