use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use svg::node::element::tag;
use svg::parser::Event;
use tracing::{debug, trace};

use crate::error::{Diagnostic, Error, Result};
use crate::registry::ElementRegistry;
use crate::sink::ShapeSink;
use crate::tag::{Bindable, Element, ElementKind, Model, Shape};
use crate::transform::NumberScan;

/// Attribute values of one tag, by name.
pub type Attributes = HashMap<String, String>;

#[derive(Debug, Clone, Default)]
pub struct WalkerOptions {
    /// Stop after the first shape has been opened.
    pub single_shape_only: bool,
    /// Record everything that is skipped as a `Diagnostic`.
    pub strict: bool,
    pub transform_scan: NumberScan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Idle,
    Parsing,
    Done,
}

/// What the event producer should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// The shapes of one document, in document order.
#[derive(Debug, Default)]
pub struct Document {
    pub shapes: Vec<Shape>,
    /// Empty unless the document was walked in strict mode.
    pub diagnostics: Vec<Diagnostic>,
}

impl Document {
    pub fn is_empty(&self) -> bool { self.shapes.is_empty() }
}

/// Builds a `Document` from a stream of tag events.
///
/// A walker handles exactly one document. Events can be fed one by one with
/// `open_tag`/`close_tag`, or all at once from the `svg` event parser with
/// `walk`.
pub struct DocumentWalker<'r, 's> {
    registry: &'r ElementRegistry,
    options: WalkerOptions,
    sink: Option<&'s mut dyn ShapeSink>,
    stack: Vec<Element>,
    document: Document,
    state: State,
}

impl<'r, 's> DocumentWalker<'r, 's> {
    pub fn new(registry: &'r ElementRegistry, options: WalkerOptions) -> Self {
	DocumentWalker {
	    registry,
	    options,
	    sink: None,
	    stack: Vec::new(),
	    document: Document::default(),
	    state: State::Idle,
	}
    }

    /// Every shape is also handed to `sink` once its attributes are bound.
    pub fn with_sink(mut self, sink: &'s mut dyn ShapeSink) -> Self {
	self.sink = Some(sink);
	self
    }

    pub fn state(&self) -> State { self.state }

    /// Number of recognized elements currently open.
    pub fn depth(&self) -> usize { self.stack.len() }

    pub fn stack(&self) -> &[Element] { &self.stack }

    pub fn shapes(&self) -> &[Shape] { &self.document.shapes }

    pub fn open_tag(&mut self, name: &str, attributes: &Attributes) -> Flow {
	match self.state {
	    State::Done => return Flow::Stop,
	    State::Idle => self.state = State::Parsing,
	    State::Parsing => (),
	}

	let kind = match self.registry.kind_for(name) {
	    Some(kind) => kind,
	    None => {
		trace!(tag = name, "skipping unrecognized tag");
		self.report(|| Diagnostic::UnrecognizedTag(String::from(name)));
		return Flow::Continue;
	    },
	};

	let model = match kind {
	    ElementKind::Shape => Model::Shape(Shape::with_transform_scan(self.options.transform_scan)),
	    other => other.instantiate(),
	};

	let element = match model {
	    Model::RootMarker(mut root) => {
		self.bind_all(name, &mut root, attributes);
		Element::RootMarker(root)
	    },
	    Model::Group(mut group) => {
		self.bind_all(name, &mut group, attributes);
		Element::Group(group)
	    },
	    Model::Shape(shape) => {
		let index = self.document.shapes.len();
		self.document.shapes.push(shape);
		self.bind_shape(name, index, attributes);

		if let Some(sink) = self.sink.as_mut() {
		    sink.accept(&self.document.shapes[index]);
		}
		Element::Shape(index)
	    },
	};

	debug!(tag = name, depth = self.stack.len(), "open {:?}", kind);
	self.stack.push(element);

	if kind == ElementKind::Shape && self.options.single_shape_only {
	    debug!("first shape found, stopping");
	    self.state = State::Done;
	    return Flow::Stop;
	}

	Flow::Continue
    }

    pub fn close_tag(&mut self, name: &str) -> Flow {
	if self.state == State::Done {
	    return Flow::Stop;
	}

	let registry = self.registry;
	let top = self.stack.last().map(Element::kind);
	let expected = top.and_then(|kind| registry.tag_for(kind));

	if expected == Some(name) {
	    self.stack.pop();
	    trace!(tag = name, depth = self.stack.len(), "close");
	} else {
	    trace!(tag = name, ?expected, "ignoring close");
	    // closes of unrecognized tags were already reported when opened
	    if registry.kind_for(name).is_some() {
		let expected = expected.map(String::from);
		self.report(|| Diagnostic::UnbalancedClose { name: String::from(name), expected });
	    }
	}

	Flow::Continue
    }

    /// Ends the walk and hands out the document. Elements still open are
    /// dropped.
    pub fn finish(mut self) -> Document {
	if !self.stack.is_empty() {
	    debug!(open = self.stack.len(), "document ended with open elements");
	}
	self.state = State::Done;
	self.document
    }

    /// Feeds every event of `events` until the walker asks to stop.
    ///
    /// A self-closing tag is an open immediately followed by a close.
    pub fn walk<'l, I>(mut self, events: I) -> Result<Document>
    where
	I: IntoIterator<Item = Event<'l>>,
    {
	for event in events {
	    let flow = match event {
		Event::Tag(name, kind, attributes) => {
		    let attributes: Attributes = attributes.iter()
			.map(|(key, value)| (key.clone(), value.to_string()))
			.collect();

		    match kind {
			tag::Type::Start => self.open_tag(name, &attributes),
			tag::Type::End => self.close_tag(name),
			tag::Type::Empty => match self.open_tag(name, &attributes) {
			    Flow::Continue => self.close_tag(name),
			    Flow::Stop => Flow::Stop,
			},
		    }
		},
		Event::Error(err) => return Err(Error::unreadable(err.to_string())),
		_ => Flow::Continue,
	    };

	    if flow == Flow::Stop {
		break;
	    }
	}

	Ok(self.finish())
    }

    fn report<F: FnOnce() -> Diagnostic>(&mut self, diagnostic: F) {
	if self.options.strict {
	    self.document.diagnostics.push(diagnostic());
	}
    }

    fn bind_all<T: Bindable>(&mut self, tag: &str, model: &mut T, attributes: &Attributes) {
	let mut failures = Vec::new();
	for (name, _) in T::ATTRIBUTES {
	    if let Some(Err(error)) = attributes.get(*name).and_then(|value| model.bind(name, value)) {
		failures.push((*name, error));
	    }
	}
	self.after_binding::<T>(tag, attributes, failures);
    }

    fn bind_shape(&mut self, tag: &str, index: usize, attributes: &Attributes) {
	let mut failures = Vec::new();
	let shape = &mut self.document.shapes[index];
	for (name, _) in Shape::ATTRIBUTES {
	    if let Some(value) = attributes.get(*name) {
		trace!(attribute = *name, value = value.as_str(), "bind");
		if let Some(Err(error)) = shape.bind(name, value) {
		    failures.push((*name, error));
		}
	    }
	}
	self.after_binding::<Shape>(tag, attributes, failures);
    }

    fn after_binding<T: Bindable>(&mut self, tag: &str, attributes: &Attributes, failures: Vec<(&str, Error)>) {
	if !self.options.strict {
	    return;
	}

	for (name, error) in failures {
	    self.document.diagnostics.push(Diagnostic::Attribute {
		tag: String::from(tag),
		name: String::from(name),
		error,
	    });
	}

	let mut unknown: Vec<&String> = attributes.keys().filter(|name| !T::accepts(name)).collect();
	unknown.sort();
	for name in unknown {
	    self.document.diagnostics.push(Diagnostic::UnrecognizedAttribute {
		tag: String::from(tag),
		name: name.clone(),
	    });
	}
    }
}

/// Parses an in-memory document.
pub fn parse_str(source: &str, options: WalkerOptions) -> Result<Document> {
    let registry = ElementRegistry::default();
    let events = svg::read(source)?;
    DocumentWalker::new(&registry, options).walk(events)
}

/// Like `parse_str`, forwarding every shape to `sink` as it is built.
pub fn parse_str_with_sink(source: &str, options: WalkerOptions, sink: &mut dyn ShapeSink) -> Result<Document> {
    let registry = ElementRegistry::default();
    let events = svg::read(source)?;
    DocumentWalker::new(&registry, options).with_sink(sink).walk(events)
}

pub fn parse_file<P: AsRef<Path>>(path: P, options: WalkerOptions) -> Result<Document> {
    let path = path.as_ref();
    let mut content = String::new();
    let events = svg::open(path, &mut content)?;
    debug!(path = %path.display(), "parsing");

    let registry = ElementRegistry::default();
    DocumentWalker::new(&registry, options).walk(events)
}

/// Reads all of `reader` before parsing. Content that is not UTF-8 is
/// unreadable.
pub fn parse_reader<R: Read>(mut reader: R, options: WalkerOptions) -> Result<Document> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    parse_str(&content, options)
}
