use std::path::PathBuf;

use svg::parser::Event;
use svgr::{
    parse_file, parse_reader, parse_str, parse_str_with_sink, Color, Diagnostic, DocumentWalker, ElementRegistry,
    Error, NumberScan, PathSegment, Shape, Translation, WalkerOptions,
};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures").join(name)
}

fn close(a: f64, b: f64) -> bool { (a - b).abs() < 1e-9 }

#[test]
fn two_paths_in_document_order() {
    let document = parse_file(fixture("two_paths.svg"), WalkerOptions::default()).unwrap();
    assert_eq!(document.shapes.len(), 2);

    let left = &document.shapes[0];
    assert_eq!(left.id(), Some("left"));
    let c = left.color().unwrap();
    assert!(close(c.r, 0.2) && close(c.g, 0.4) && close(c.b, 0.6));
    assert_eq!(left.translation(), None);
    assert_eq!(left.segments().len(), 5);

    let right = &document.shapes[1];
    assert_eq!(right.id(), Some("right"));
    assert_eq!(right.color(), Some(Color::rgb(1.0, 0.0, 0.0)));
    assert_eq!(right.translation(), Some(Translation { x: 5.0, y: 10.0 }));
    assert_eq!(right.segments(), &[
	PathSegment::MoveTo { x: 20.0, y: 0.0 },
	PathSegment::LineTo { x: 30.0, y: 0.0 },
	PathSegment::LineTo { x: 30.0, y: 10.0 },
	PathSegment::LineTo { x: 20.0, y: 10.0 },
	PathSegment::ClosePath,
    ]);
    assert_eq!(right.translated_segments()[0], PathSegment::MoveTo { x: 25.0, y: 10.0 });

    assert!(document.diagnostics.is_empty());
}

#[test]
fn single_shape_stops_before_second_path() {
    let mut content = String::new();
    let events = svg::open(fixture("two_paths.svg"), &mut content).unwrap();

    let mut path_opens = 0;
    let counted = events.inspect(|event| {
	if let Event::Tag("path", _, _) = event {
	    path_opens += 1;
	}
    });

    let registry = ElementRegistry::default();
    let options = WalkerOptions { single_shape_only: true, ..WalkerOptions::default() };
    let document = DocumentWalker::new(&registry, options).walk(counted).unwrap();

    assert_eq!(document.shapes.len(), 1);
    assert_eq!(document.shapes[0].id(), Some("left"));
    assert_eq!(path_opens, 1);
}

#[test]
fn unrecognized_subtrees_are_walked_through() {
    let document = parse_file(fixture("nested.svg"), WalkerOptions::default()).unwrap();
    let ids: Vec<_> = document.shapes.iter().map(|s| s.id()).collect();
    assert_eq!(ids, vec![Some("curve"), Some("broken")]);

    let curve = &document.shapes[0];
    assert_eq!(curve.segments()[2],
	       PathSegment::CubicCurveTo { x1: 10.0, y1: -10.0, x2: 20.0, y2: -10.0, x: 20.0, y: 0.0 });
    // group transforms are not composed
    assert_eq!(curve.translation(), None);

    let broken = &document.shapes[1];
    assert_eq!(broken.segments().len(), 2);
    assert_eq!(broken.color(), None);
}

#[test]
fn strict_mode_lists_everything_skipped() {
    let options = WalkerOptions { strict: true, ..WalkerOptions::default() };
    let document = parse_file(fixture("nested.svg"), options).unwrap();
    assert_eq!(document.shapes.len(), 2);

    let unknown_tags: Vec<_> = document.diagnostics.iter()
	.filter_map(|d| match d {
	    Diagnostic::UnrecognizedTag(name) => Some(name.as_str()),
	    _ => None,
	})
	.collect();
    assert_eq!(unknown_tags, vec!["defs", "linearGradient", "g", "g", "circle"]);

    assert!(document.diagnostics.iter().any(|d| matches!(d,
	Diagnostic::Attribute { name, error: Error::MalformedPathData { .. }, .. } if name == "d")));
    assert!(document.diagnostics.iter().any(|d| matches!(d,
	Diagnostic::Attribute { name, error: Error::InvalidColorFormat(_), .. } if name == "fill")));
    assert!(document.diagnostics.iter().any(|d| matches!(d,
	Diagnostic::UnrecognizedAttribute { tag, name } if tag == "svg" && name == "xmlns")));
}

#[test]
fn groups_are_recognized_when_registered() {
    let mut content = String::new();
    let events = svg::open(fixture("nested.svg"), &mut content).unwrap();
    let registry = ElementRegistry::with_groups();
    let options = WalkerOptions { strict: true, ..WalkerOptions::default() };
    let document = DocumentWalker::new(&registry, options).walk(events).unwrap();

    assert_eq!(document.shapes.len(), 2);
    assert!(!document.diagnostics.iter().any(|d| matches!(d, Diagnostic::UnrecognizedTag(name) if name == "g")));
    assert!(!document.diagnostics.iter().any(|d| matches!(d, Diagnostic::UnbalancedClose { .. })));
}

#[test]
fn no_shapes_is_not_an_error() {
    let document = parse_file(fixture("empty.svg"), WalkerOptions::default()).unwrap();
    assert!(document.is_empty());
}

#[test]
fn missing_file_is_unreadable() {
    let err = parse_file(fixture("does-not-exist.svg"), WalkerOptions::default()).unwrap_err();
    assert!(matches!(err, Error::SourceUnreadable(_)));
}

#[test]
fn reader_and_string_agree() {
    let source = std::fs::read_to_string(fixture("two_paths.svg")).unwrap();
    let from_str = parse_str(&source, WalkerOptions::default()).unwrap();
    let from_reader = parse_reader(source.as_bytes(), WalkerOptions::default()).unwrap();
    assert_eq!(from_str.shapes, from_reader.shapes);
}

#[test]
fn sink_is_called_once_per_shape() {
    let source = std::fs::read_to_string(fixture("two_paths.svg")).unwrap();
    let mut ids = Vec::new();
    let mut sink = |shape: &Shape| ids.push(shape.id().unwrap_or_default().to_string());
    let document = parse_str_with_sink(&source, WalkerOptions::default(), &mut sink).unwrap();

    assert_eq!(document.shapes.len(), 2);
    assert_eq!(ids, vec!["left", "right"]);
}

#[test]
fn legacy_transform_scan() {
    let source = r#"<svg><path d="M0 0" transform="translate(-1.5, 2)"/></svg>"#;
    let options = WalkerOptions { transform_scan: NumberScan::DigitRuns, ..WalkerOptions::default() };
    let legacy = parse_str(source, options).unwrap();
    assert_eq!(legacy.shapes[0].translation(), Some(Translation { x: 1.0, y: 5.0 }));

    let default = parse_str(source, WalkerOptions::default()).unwrap();
    assert_eq!(default.shapes[0].translation(), Some(Translation { x: -1.5, y: 2.0 }));
}

#[test]
fn independent_parses_match() {
    let source = std::fs::read_to_string(fixture("nested.svg")).unwrap();
    let a = parse_str(&source, WalkerOptions::default()).unwrap();
    let b = parse_str(&source, WalkerOptions::default()).unwrap();
    assert_eq!(a.shapes, b.shapes);
}
