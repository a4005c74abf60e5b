//! The element models the walker knows how to build, and the tables that
//! bind attribute values onto them.

use tracing::warn;

use crate::color;
use crate::error::Result;
use crate::path;
use crate::transform::{self, NumberScan};
use crate::types::{Color, PathSegment, Translation};

/// Assigns one attribute value to a model. Errors are reported after the
/// value has been stored, so the model is never left half-assigned.
pub type Setter<T> = fn(&mut T, &str) -> Result<()>;

pub trait Bindable: Sized + 'static {
    /// Attribute names this model accepts, in binding order.
    const ATTRIBUTES: &'static [(&'static str, Setter<Self>)];

    /// `None` if `name` is not one of `ATTRIBUTES`.
    fn bind(&mut self, name: &str, value: &str) -> Option<Result<()>> {
	Self::ATTRIBUTES
	    .iter()
	    .find(|(attr, _)| *attr == name)
	    .map(|(_, setter)| setter(self, value))
    }

    fn accepts(name: &str) -> bool {
	Self::ATTRIBUTES.iter().any(|(attr, _)| *attr == name)
    }
}

/// The kinds of element a registry can map a tag name to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    RootMarker,
    Group,
    Shape,
}

impl ElementKind {
    pub fn instantiate(self) -> Model {
	match self {
	    ElementKind::RootMarker => Model::RootMarker(RootMarker::default()),
	    ElementKind::Group => Model::Group(Group::default()),
	    ElementKind::Shape => Model::Shape(Shape::default()),
	}
    }
}

/// A freshly built element, before it is placed on the walker's stack.
#[derive(Debug, Clone)]
pub enum Model {
    RootMarker(RootMarker),
    Group(Group),
    Shape(Shape),
}

/// An entry of the walker's stack of open elements.
///
/// Shapes live in the document being built from the moment they are
/// opened, so their entry only records their position there.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    RootMarker(RootMarker),
    Group(Group),
    Shape(usize),
}

impl Element {
    pub fn kind(&self) -> ElementKind {
	match self {
	    Element::RootMarker(_) => ElementKind::RootMarker,
	    Element::Group(_) => ElementKind::Group,
	    Element::Shape(_) => ElementKind::Shape,
	}
    }
}

/// The outermost `<svg>` element. Carries no geometry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RootMarker {
    pub id: Option<String>,
}

impl Bindable for RootMarker {
    const ATTRIBUTES: &'static [(&'static str, Setter<Self>)] = &[
	("id", RootMarker::set_id),
    ];
}

impl RootMarker {
    pub fn set_id(&mut self, id: &str) -> Result<()> {
	self.id = Some(String::from(id));
	Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Group {
    pub id: Option<String>,
}

impl Bindable for Group {
    const ATTRIBUTES: &'static [(&'static str, Setter<Self>)] = &[
	("id", Group::set_id),
    ];
}

impl Group {
    pub fn set_id(&mut self, id: &str) -> Result<()> {
	self.id = Some(String::from(id));
	Ok(())
    }
}

/// A `<path>` element: the raw attribute strings and the geometry and style
/// derived from them.
///
/// The derived fields are only ever updated by the setters, each of which
/// recomputes the state depending on the attribute it assigns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Shape {
    id: Option<String>,
    d: Option<String>,
    fill: Option<String>,
    transform: Option<String>,

    segments: Vec<PathSegment>,
    color: Option<Color>,
    translation: Option<Translation>,
    transform_scan: NumberScan,
}

impl Bindable for Shape {
    const ATTRIBUTES: &'static [(&'static str, Setter<Self>)] = &[
	("id", Shape::set_id),
	("d", Shape::set_d),
	("fill", Shape::set_fill),
	("transform", Shape::set_transform),
    ];
}

impl Shape {
    pub fn new() -> Self { Shape::default() }

    /// A shape whose `transform` is scanned with `scan`.
    pub fn with_transform_scan(scan: NumberScan) -> Self {
	Shape {
	    transform_scan: scan,
	    ..Shape::default()
	}
    }

    pub fn id(&self) -> Option<&str> { self.id.as_deref() }
    pub fn d(&self) -> Option<&str> { self.d.as_deref() }
    pub fn fill(&self) -> Option<&str> { self.fill.as_deref() }
    pub fn transform(&self) -> Option<&str> { self.transform.as_deref() }

    pub fn segments(&self) -> &[PathSegment] { &self.segments }

    /// `None` when no `fill` was given or it could not be decoded.
    pub fn color(&self) -> Option<Color> { self.color }

    pub fn translation(&self) -> Option<Translation> { self.translation }

    /// The segments with the translation, if any, applied.
    pub fn translated_segments(&self) -> Vec<PathSegment> {
	match self.translation {
	    Some(Translation { x, y }) => self.segments.iter().map(|s| s.translate(x, y)).collect(),
	    None => self.segments.clone(),
	}
    }

    pub fn set_id(&mut self, id: &str) -> Result<()> {
	self.id = Some(String::from(id));
	Ok(())
    }

    /// Replaces the geometry. Malformed trailing data is dropped; the error
    /// is still returned so callers can report it.
    pub fn set_d(&mut self, d: &str) -> Result<()> {
	self.d = Some(String::from(d));

	match path::try_parse(d) {
	    Ok(segments) => {
		self.segments = segments;
		Ok(())
	    },
	    Err(partial) => {
		warn!(offset = partial.offset, kept = partial.segments.len(), "malformed path data");
		let offset = partial.offset;
		self.segments = partial.segments;
		Err(crate::error::Error::MalformedPathData { offset })
	    },
	}
    }

    /// Replaces the fill. An undecodable color leaves the shape without one.
    pub fn set_fill(&mut self, fill: &str) -> Result<()> {
	self.fill = Some(String::from(fill));

	match color::parse(fill) {
	    Ok(color) => {
		self.color = Some(color);
		Ok(())
	    },
	    Err(err) => {
		warn!(fill, "ignoring fill");
		self.color = None;
		Err(err)
	    },
	}
    }

    pub fn set_transform(&mut self, transform: &str) -> Result<()> {
	self.transform = Some(String::from(transform));
	self.translation = transform::parse_with(transform, self.transform_scan);
	Ok(())
    }
}
