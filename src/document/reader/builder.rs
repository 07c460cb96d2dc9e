use crate::{
    bpmn::Namespace,
    document::{Document, Element},
};

//
// elements: [
//               definitions        parent: None
//               process            parent: Some(0)
//               laneSet            parent: Some(1)
//               lane               parent: Some(2)
//               task               parent: Some(1)
//           ]
// stack:    indexes of the currently open elements, innermost last.
//

#[derive(Default)]
pub(super) struct DocumentBuilder {
    elements: Vec<Element>,
    stack: Vec<usize>,
    root_closed: bool,
}

impl DocumentBuilder {
    pub(super) fn open(&mut self, namespace: Namespace, name: String) {
        let parent = self.stack.last().copied();
        self.stack.push(self.elements.len());
        self.elements.push(Element::new(namespace, name, parent));
    }

    pub(super) fn leaf(&mut self, namespace: Namespace, name: String) {
        self.open(namespace, name);
        self.close();
    }

    pub(super) fn close(&mut self) {
        if self.stack.pop().is_some() && self.stack.is_empty() {
            self.root_closed = true;
        }
    }

    pub(super) fn depth(&self) -> usize {
        self.stack.len()
    }

    pub(super) fn root_closed(&self) -> bool {
        self.root_closed
    }
}

impl From<DocumentBuilder> for Document {
    fn from(builder: DocumentBuilder) -> Self {
        Document::new(builder.elements)
    }
}
