//! In-memory visual tree
//!
//! The document is the only surface effects touch: they read element
//! geometry and attributes, write animated properties and text, and insert
//! wrapper or sibling nodes before binding. Hosts mirror the resulting
//! property values onto their real rendering tree.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::error::Result;
use crate::property::Property;
use crate::selector::Selector;

new_key_type! {
    /// Unique identifier for a node in a [`Document`]
    pub struct NodeId;
}

/// Layout rectangle in page coordinates (y grows downward from the page top)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height * 0.5
    }
}

/// Element payload
#[derive(Clone, Debug, Default)]
pub struct ElementData {
    pub tag: String,
    pub id: Option<String>,
    pub classes: SmallVec<[String; 2]>,
    /// Attributes in insertion order
    pub attributes: Vec<(String, String)>,
    pub rect: Rect,
    props: FxHashMap<Property, f32>,
}

/// What a node holds
#[derive(Clone, Debug)]
pub enum NodeKind {
    Element(ElementData),
    Text(String),
}

#[derive(Clone, Debug)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// The visual tree
pub struct Document {
    nodes: SlotMap<NodeId, Node>,
    body: NodeId,
    /// id attribute -> node, kept in sync by `set_id`
    ids: FxHashMap<String, NodeId>,
}

impl Document {
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let body = nodes.insert(Node {
            kind: NodeKind::Element(ElementData {
                tag: "body".to_string(),
                ..Default::default()
            }),
            parent: None,
            children: Vec::new(),
        });
        Self {
            nodes,
            body,
            ids: FxHashMap::default(),
        }
    }

    /// The root element
    pub fn body(&self) -> NodeId {
        self.body
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Total number of nodes, text nodes included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        // The body always exists
        false
    }

    // ========================================================================
    // Tree mutation
    // ========================================================================

    /// Create an element and append it as the last child of `parent`
    pub fn append_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        self.append_node(
            parent,
            NodeKind::Element(ElementData {
                tag: tag.to_string(),
                ..Default::default()
            }),
        )
    }

    /// Append a text node as the last child of `parent`
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.append_node(parent, NodeKind::Text(text.to_string()))
    }

    fn append_node(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = self.nodes.insert(Node {
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        match self.nodes.get_mut(parent) {
            Some(p) => p.children.push(id),
            None => {
                tracing::warn!("append to unknown parent, node left detached");
                if let Some(node) = self.nodes.get_mut(id) {
                    node.parent = None;
                }
            }
        }
        id
    }

    /// Remove every child of `id` (recursively)
    pub fn clear_children(&mut self, id: NodeId) {
        let children = match self.nodes.get_mut(id) {
            Some(node) => std::mem::take(&mut node.children),
            None => return,
        };
        for child in children {
            self.remove_subtree(child);
        }
    }

    fn remove_subtree(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.remove(id) {
            if let NodeKind::Element(ElementData { id: Some(name), .. }) = &node.kind {
                if self.ids.get(name) == Some(&id) {
                    self.ids.remove(name);
                }
            }
            for child in node.children {
                self.remove_subtree(child);
            }
        }
    }

    /// Replace all children of `id` with a single text node
    pub fn set_text(&mut self, id: NodeId, text: &str) {
        self.clear_children(id);
        self.append_text(id, text);
    }

    pub fn set_id(&mut self, node: NodeId, name: &str) {
        if let Some(el) = self.element_mut(node) {
            el.id = Some(name.to_string());
            self.ids.insert(name.to_string(), node);
        }
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(el) = self.element_mut(node) {
            if !el.classes.iter().any(|c| c == class) {
                el.classes.push(class.to_string());
            }
        }
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(el) = self.element_mut(node) {
            match el.attributes.iter_mut().find(|(k, _)| k == name) {
                Some((_, v)) => *v = value.to_string(),
                None => el.attributes.push((name.to_string(), value.to_string())),
            }
        }
    }

    pub fn set_rect(&mut self, node: NodeId, rect: Rect) {
        if let Some(el) = self.element_mut(node) {
            el.rect = rect;
        }
    }

    /// Write an animated property
    pub fn set_prop(&mut self, node: NodeId, prop: Property, value: f32) {
        if let Some(el) = self.element_mut(node) {
            el.props.insert(prop, value);
        }
    }

    // ========================================================================
    // Reads
    // ========================================================================

    pub fn element(&self, node: NodeId) -> Option<&ElementData> {
        match &self.nodes.get(node)?.kind {
            NodeKind::Element(el) => Some(el),
            NodeKind::Text(_) => None,
        }
    }

    fn element_mut(&mut self, node: NodeId) -> Option<&mut ElementData> {
        match &mut self.nodes.get_mut(node)?.kind {
            NodeKind::Element(el) => Some(el),
            NodeKind::Text(_) => None,
        }
    }

    pub fn kind(&self, node: NodeId) -> Option<&NodeKind> {
        self.nodes.get(node).map(|n| &n.kind)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node)?.parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(node)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn get_by_id(&self, name: &str) -> Option<NodeId> {
        self.ids.get(name).copied()
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)?
            .attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn rect(&self, node: NodeId) -> Option<Rect> {
        self.element(node).map(|el| el.rect)
    }

    /// Current value of an animated property (its default if never written)
    pub fn prop(&self, node: NodeId, prop: Property) -> f32 {
        self.element(node)
            .and_then(|el| el.props.get(&prop).copied())
            .unwrap_or_else(|| prop.default_value())
    }

    /// Written properties of an element, in [`Property::ALL`] order
    pub fn props(&self, node: NodeId) -> Vec<(Property, f32)> {
        let Some(el) = self.element(node) else {
            return Vec::new();
        };
        Property::ALL
            .iter()
            .filter_map(|p| el.props.get(p).map(|v| (*p, *v)))
            .collect()
    }

    /// Concatenated text of a subtree
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        let Some(n) = self.nodes.get(node) else {
            return;
        };
        if let NodeKind::Text(text) = &n.kind {
            out.push_str(text);
        }
        for child in &n.children {
            self.collect_text(*child, out);
        }
    }

    /// Serialize the children of `node` as markup
    pub fn inner_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        for child in self.children(node) {
            self.write_html(*child, &mut out);
        }
        out
    }

    fn write_html(&self, node: NodeId, out: &mut String) {
        let Some(n) = self.nodes.get(node) else {
            return;
        };
        match &n.kind {
            NodeKind::Text(text) => out.push_str(&escape_html(text)),
            NodeKind::Element(el) => {
                out.push('<');
                out.push_str(&el.tag);
                if let Some(id) = &el.id {
                    out.push_str(&format!(" id=\"{}\"", escape_html(id)));
                }
                if !el.classes.is_empty() {
                    out.push_str(&format!(" class=\"{}\"", escape_html(&el.classes.join(" "))));
                }
                for (k, v) in &el.attributes {
                    out.push_str(&format!(" {}=\"{}\"", k, escape_html(v)));
                }
                out.push('>');
                for child in &n.children {
                    self.write_html(*child, out);
                }
                out.push_str("</");
                out.push_str(&el.tag);
                out.push('>');
            }
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// All elements matching `selector`, in document order
    pub fn query_all(&self, selector: &str) -> Result<Vec<NodeId>> {
        let selector = Selector::parse(selector)?;
        Ok(self.select(&selector))
    }

    /// First element matching `selector`
    pub fn query(&self, selector: &str) -> Result<Option<NodeId>> {
        Ok(self.query_all(selector)?.into_iter().next())
    }

    /// Elements matching a pre-parsed selector, in document order
    pub fn select(&self, selector: &Selector) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![self.body];
        while let Some(node) = stack.pop() {
            if self.matches(node, selector) {
                out.push(node);
            }
            // Reverse so the first child is visited first
            stack.extend(self.children(node).iter().rev().copied());
        }
        out
    }

    fn matches(&self, node: NodeId, selector: &Selector) -> bool {
        if !self.matches_compound(node, selector.subject()) {
            return false;
        }
        // Descendant combinators only: greedy nearest-ancestor matching is exact
        let mut cursor = self.parent(node);
        for compound in selector.ancestors() {
            loop {
                let Some(ancestor) = cursor else {
                    return false;
                };
                cursor = self.parent(ancestor);
                if self.matches_compound(ancestor, compound) {
                    break;
                }
            }
        }
        true
    }

    fn matches_compound(&self, node: NodeId, compound: &crate::selector::Compound) -> bool {
        self.element(node)
            .map(|el| compound.matches(&el.tag, el.id.as_deref(), &el.classes))
            .unwrap_or(false)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Escape text for inclusion in markup
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Document, NodeId, NodeId, NodeId) {
        let mut doc = Document::new();
        let section = doc.append_element(doc.body(), "section");
        doc.set_id(section, "cards");
        let grid = doc.append_element(section, "div");
        doc.add_class(grid, "cards-grid");
        let a = doc.append_element(grid, "div");
        doc.add_class(a, "card");
        let b = doc.append_element(grid, "div");
        doc.add_class(b, "card");
        (doc, section, a, b)
    }

    #[test]
    fn test_query_document_order() {
        let (doc, _, a, b) = sample();
        assert_eq!(doc.query_all(".card").unwrap(), vec![a, b]);
        assert_eq!(doc.query_all("#cards .card").unwrap(), vec![a, b]);
        assert!(doc.query_all("#cards > .card").is_err());
        assert!(doc.query_all("#missing .card").unwrap().is_empty());
    }

    #[test]
    fn test_descendant_requires_all_ancestors() {
        let (doc, _, _, _) = sample();
        assert!(doc.query_all(".card #cards").unwrap().is_empty());
        assert_eq!(doc.query_all("section div div").unwrap().len(), 2);
    }

    #[test]
    fn test_props_default_and_write() {
        let (mut doc, _, a, _) = sample();
        assert_eq!(doc.prop(a, Property::Opacity), 1.0);
        doc.set_prop(a, Property::Opacity, 0.25);
        assert_eq!(doc.prop(a, Property::Opacity), 0.25);
        assert_eq!(doc.props(a), vec![(Property::Opacity, 0.25)]);
    }

    #[test]
    fn test_set_text_replaces_children() {
        let (mut doc, section, _, _) = sample();
        doc.set_text(section, "1,200");
        assert_eq!(doc.text_content(section), "1,200");
        assert_eq!(doc.children(section).len(), 1);
        assert!(doc.query_all(".card").unwrap().is_empty());
    }

    #[test]
    fn test_inner_html_escapes() {
        let mut doc = Document::new();
        let p = doc.append_element(doc.body(), "p");
        let span = doc.append_element(p, "span");
        doc.add_class(span, "word");
        doc.append_text(span, "a<b & c");
        assert_eq!(
            doc.inner_html(p),
            "<span class=\"word\">a&lt;b &amp; c</span>"
        );
    }

    #[test]
    fn test_removed_ids_are_forgotten() {
        let mut doc = Document::new();
        let wrapper = doc.append_element(doc.body(), "div");
        let inner = doc.append_element(wrapper, "div");
        doc.set_id(inner, "inner");
        assert_eq!(doc.get_by_id("inner"), Some(inner));
        doc.clear_children(wrapper);
        assert_eq!(doc.get_by_id("inner"), None);
        assert!(!doc.contains(inner));
        assert!(doc.element(inner).is_none());
    }
}
