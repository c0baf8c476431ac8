//! Namespace-aware traversal over an already-parsed element tree.
//!
//! Every lookup goes through [`Element`], which carries the namespace it was
//! created with. Multi-segment paths are plain chains of single-step lookups.

use roxmltree::Node;

/// Namespace of every element in an IPC-2581 revision C document
pub const IPC2581_NAMESPACE: &str = "http://webstds.ipc.org/2581";

/// An element node paired with the namespace its children are looked up in
#[derive(Debug, Clone, Copy)]
pub struct Element<'a, 'input> {
    node: Node<'a, 'input>,
    ns: &'a str,
}

impl<'a, 'input> Element<'a, 'input> {
    pub fn new(node: Node<'a, 'input>, ns: &'a str) -> Self {
        Self { node, ns }
    }

    /// Root element of a parsed document
    pub fn root(doc: &'a roxmltree::Document<'input>, ns: &'a str) -> Self {
        Self::new(doc.root_element(), ns)
    }

    /// Local tag name, without namespace
    pub fn tag(self) -> &'a str {
        self.node.tag_name().name()
    }

    /// Tag name for messages: the local name when the element lives in the
    /// configured namespace, `{ns}name` otherwise.
    pub fn display_tag(self) -> String {
        match self.node.tag_name().namespace() {
            Some(ns) if ns != self.ns => format!("{{{}}}{}", ns, self.tag()),
            _ => self.tag().to_string(),
        }
    }

    fn in_namespace(self) -> bool {
        self.node.tag_name().namespace().unwrap_or("") == self.ns
    }

    /// Whether this element is `name` in the configured namespace
    pub fn is(self, name: &str) -> bool {
        self.in_namespace() && self.tag() == name
    }

    pub fn attr(self, name: &str) -> Option<&'a str> {
        self.node.attribute(name)
    }

    pub fn has_attr(self, name: &str) -> bool {
        self.node.has_attribute(name)
    }

    /// Element children in document order (text and comments skipped)
    pub fn children(self) -> impl Iterator<Item = Element<'a, 'input>> {
        let ns = self.ns;
        self.node
            .children()
            .filter(|n| n.is_element())
            .map(move |node| Element { node, ns })
    }

    /// Children named `name`, in document order
    pub fn children_named<'n>(self, name: &'n str) -> impl Iterator<Item = Element<'a, 'input>> + 'n
    where
        'a: 'n,
        'input: 'n,
    {
        self.children().filter(move |c| c.is(name))
    }

    /// First child named `name`
    pub fn child(self, name: &str) -> Option<Element<'a, 'input>> {
        self.children().find(|c| c.is(name))
    }

    /// Follows `path` one child lookup at a time
    pub fn descend(self, path: &[&str]) -> Option<Element<'a, 'input>> {
        path.iter().try_fold(self, |el, name| el.child(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const XML: &str = r#"<IPC-2581 xmlns="http://webstds.ipc.org/2581">
  <Content roleRef="Owner">
    <LayerRef name="TOP"/>
    <!-- comment -->
    <LayerRef name="BOTTOM"/>
    <other:LayerRef xmlns:other="urn:other" name="FOREIGN"/>
  </Content>
  <Ecad><CadData><Step name="board"/></CadData></Ecad>
</IPC-2581>"#;

    #[test]
    fn child_lookup_respects_namespace() {
        let doc = roxmltree::Document::parse(XML).unwrap();
        let root = Element::root(&doc, IPC2581_NAMESPACE);
        assert!(root.is("IPC-2581"));

        let content = root.child("Content").unwrap();
        let names: Vec<_> = content
            .children_named("LayerRef")
            .filter_map(|l| l.attr("name"))
            .collect();
        assert_eq!(names, vec!["TOP", "BOTTOM"]);
    }

    #[test]
    fn descend_chains_single_steps() {
        let doc = roxmltree::Document::parse(XML).unwrap();
        let root = Element::root(&doc, IPC2581_NAMESPACE);
        let step = root.descend(&["Ecad", "CadData", "Step"]).unwrap();
        assert_eq!(step.attr("name"), Some("board"));
        assert!(root.descend(&["Ecad", "Missing", "Step"]).is_none());
    }

    #[test]
    fn wrong_namespace_does_not_match() {
        let doc = roxmltree::Document::parse(XML).unwrap();
        let root = Element::root(&doc, "urn:something-else");
        assert!(!root.is("IPC-2581"));
        assert!(root.child("Content").is_none());
        assert_eq!(
            root.display_tag(),
            "{http://webstds.ipc.org/2581}IPC-2581"
        );
    }

    #[test]
    fn empty_namespace_matches_plain_elements() {
        let doc = roxmltree::Document::parse(r#"<Circle diameter="1"/>"#).unwrap();
        let root = Element::root(&doc, "");
        assert!(root.is("Circle"));
        assert_eq!(root.display_tag(), "Circle");
    }
}
