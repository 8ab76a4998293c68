// Element tree capability
//
// Rules never see a concrete document type. Anything that can report its tag,
// read and write string attributes, and hand out its child elements can be
// matched and rewritten.

/// The view of a target document node that rules operate on.
pub trait ElementTree {
    /// Tag name of this element
    fn tag(&self) -> &str;

    /// Value of the named attribute, if present
    fn attribute(&self, name: &str) -> Option<&str>;

    /// Create or overwrite the named attribute
    fn set_attribute(&mut self, name: &str, value: &str);

    /// Remove the named attribute, returning whether it was present
    fn remove_attribute(&mut self, name: &str) -> bool;

    /// Direct child elements in document order
    fn child_elements_mut(&mut self) -> impl Iterator<Item = &mut Self>;
}

/// Simple owned element: tag, ordered attributes, ordered child elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute setter
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Builder-style child append
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }
}

impl ElementTree for Element {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.attributes.push((name.to_string(), value.to_string())),
        }
    }

    fn remove_attribute(&mut self, name: &str) -> bool {
        match self.attributes.iter().position(|(key, _)| key == name) {
            Some(index) => {
                self.attributes.remove(index);
                true
            }
            None => false,
        }
    }

    fn child_elements_mut(&mut self) -> impl Iterator<Item = &mut Self> {
        self.children.iter_mut()
    }
}
