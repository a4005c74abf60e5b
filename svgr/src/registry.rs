use crate::tag::ElementKind;

/// Maps tag names to the element kind built for them, and back.
///
/// Several names may map to the same kind. Reverse lookups then resolve to
/// the name registered first.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementRegistry {
    entries: Vec<(String, ElementKind)>,
}

impl Default for ElementRegistry {
    fn default() -> Self {
	ElementRegistry::builder()
	    .register("path", ElementKind::Shape)
	    .register("svg", ElementKind::RootMarker)
	    .build()
    }
}

impl ElementRegistry {
    pub fn builder() -> RegistryBuilder {
	RegistryBuilder { entries: Vec::new() }
    }

    /// The default registry plus `<g>` as a group.
    pub fn with_groups() -> Self {
	ElementRegistry::builder()
	    .register("path", ElementKind::Shape)
	    .register("svg", ElementKind::RootMarker)
	    .register("g", ElementKind::Group)
	    .build()
    }

    pub fn kind_for(&self, tag: &str) -> Option<ElementKind> {
	self.entries.iter()
	    .find(|(name, _)| name == tag)
	    .map(|(_, kind)| *kind)
    }

    pub fn tag_for(&self, kind: ElementKind) -> Option<&str> {
	self.entries.iter()
	    .find(|(_, k)| *k == kind)
	    .map(|(name, _)| name.as_str())
    }

    pub fn tags(&self) -> impl Iterator<Item = (&str, ElementKind)> {
	self.entries.iter().map(|(name, kind)| (name.as_str(), *kind))
    }
}

pub struct RegistryBuilder {
    entries: Vec<(String, ElementKind)>,
}

impl RegistryBuilder {
    /// Registering a name twice replaces its kind but keeps its position.
    pub fn register(mut self, tag: impl Into<String>, kind: ElementKind) -> Self {
	let tag = tag.into();
	match self.entries.iter_mut().find(|(name, _)| *name == tag) {
	    Some(entry) => entry.1 = kind,
	    None => self.entries.push((tag, kind)),
	}
	self
    }

    pub fn build(self) -> ElementRegistry {
	ElementRegistry { entries: self.entries }
    }
}
