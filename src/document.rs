mod reader;

use crate::{
    bpmn::{DEFINITIONS, NAMESPACES, Namespace, PROCESS},
    error::{Error, Result},
};
use log::debug;
use reader::read_document;
use std::str::FromStr;

/// A parsed XML document.
///
/// Elements are stored flat in document order. Each element keeps the index
/// of its parent so child queries do not need a tree walk. A `Document` is
/// never mutated after it has been read.
#[derive(Debug, Clone)]
pub struct Document {
    elements: Vec<Element>,
}

#[derive(Debug, Clone)]
pub(crate) struct Element {
    namespace: Namespace,
    name: Box<str>,
    parent: Option<usize>,
}

impl Element {
    pub(crate) fn new(
        namespace: Namespace,
        name: impl Into<Box<str>>,
        parent: Option<usize>,
    ) -> Self {
        Self {
            namespace,
            name: name.into(),
            parent,
        }
    }

    fn is(&self, local_name: &str) -> bool {
        self.namespace == Namespace::Model && &*self.name == local_name
    }
}

impl Document {
    fn new(elements: Vec<Element>) -> Self {
        Self { elements }
    }

    /// Prefix to namespace table the document is queried with.
    pub fn namespaces(&self) -> &'static [(&'static str, &'static str)] {
        &NAMESPACES
    }

    /// Number of elements in any namespace.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Count BPMN model elements with `local_name` anywhere in the document.
    pub fn count(&self, local_name: &str) -> usize {
        self.elements.iter().filter(|e| e.is(local_name)).count()
    }

    /// Count BPMN model elements matching any of `local_names`.
    pub fn count_any(&self, local_names: &[&str]) -> usize {
        self.elements
            .iter()
            .filter(|e| local_names.iter().any(|name| e.is(name)))
            .count()
    }

    /// Count BPMN model `child` elements whose direct parent is a BPMN model `parent` element.
    pub fn count_children(&self, parent: &str, child: &str) -> usize {
        self.elements
            .iter()
            .filter(|e| e.is(child))
            .filter_map(|e| e.parent.and_then(|index| self.elements.get(index)))
            .filter(|p| p.is(parent))
            .count()
    }

    /// `true` if at least one BPMN model element with `local_name` exists.
    pub fn contains(&self, local_name: &str) -> bool {
        self.elements.iter().any(|e| e.is(local_name))
    }

    fn is_bpmn(&self) -> bool {
        self.contains(DEFINITIONS) || self.contains(PROCESS)
    }
}

/// Read `text` and check that it is a BPMN 2.0 document.
///
/// Fails with [`Error::MalformedInput`] if `text` is not well-formed XML and
/// with [`Error::NotBpmn`] if no `definitions` or `process` element exists in
/// the BPMN model namespace.
pub fn parse_and_validate(text: &str) -> Result<Document> {
    let document = read_document(quick_xml::NsReader::from_str(text))?;
    if !document.is_bpmn() {
        return Err(Error::NotBpmn);
    }
    debug!("READ DOCUMENT {} elements", document.len());
    Ok(document)
}

impl FromStr for Document {
    type Err = Error;

    /// Same as [`parse_and_validate`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_and_validate(s)
    }
}
