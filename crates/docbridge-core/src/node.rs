//! Parsed HTML tree
//!
//! The html5ever DOM is reference counted and interior-mutable; the renderer
//! only reads, so the body is copied once into a plain owned tree.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::error::RenderError;

/// An HTML element with lower-cased tag and attribute names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<HtmlNode>,
}

/// A node of the parsed HTML tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlNode {
    /// Raw text, entities already decoded
    Text(String),
    /// An element with its children
    Element(Element),
}

impl HtmlNode {
    /// The element, if this is one
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            HtmlNode::Element(element) => Some(element),
            HtmlNode::Text(_) => None,
        }
    }

    /// Concatenated text of the subtree, without separators
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            HtmlNode::Text(text) => out.push_str(text),
            HtmlNode::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }
}

impl Element {
    /// Create an element without attributes
    pub fn new(tag: impl Into<String>, children: Vec<HtmlNode>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children,
        }
    }

    /// Value of an attribute
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Check whether the whitespace-separated `class` list contains `class`
    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    /// Check the tag name, ignoring case
    pub fn is(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }

    /// Check whether this is a `ul` or `ol`
    pub fn is_list(&self) -> bool {
        self.is("ul") || self.is("ol")
    }

    /// Iterate over the element children
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(HtmlNode::as_element)
    }

    /// Concatenated text of the subtree
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        for child in &self.children {
            child.collect_text(&mut text);
        }
        text
    }
}

/// Parse an HTML fragment or document and return the children of its body
///
/// Malformed markup is repaired by the HTML5 tree builder. Comments, the
/// doctype and processing instructions are dropped. Fails when elements are
/// nested deeper than `max_depth`.
pub fn parse_body(html: &str, max_depth: usize) -> Result<Vec<HtmlNode>, RenderError> {
    let dom = parse_document(RcDom::default(), Default::default()).one(html);

    let Some(body) = find_body(&dom.document) else {
        return Ok(Vec::new());
    };

    let mut nodes = Vec::new();
    for child in body.children.borrow().iter() {
        if let Some(node) = convert(child, 1, max_depth)? {
            nodes.push(node);
        }
    }
    Ok(nodes)
}

fn find_body(handle: &Handle) -> Option<Handle> {
    if let NodeData::Element { ref name, .. } = handle.data {
        if name.local.as_ref() == "body" {
            return Some(handle.clone());
        }
    }
    for child in handle.children.borrow().iter() {
        if let Some(body) = find_body(child) {
            return Some(body);
        }
    }
    None
}

fn convert(
    handle: &Handle,
    depth: usize,
    max_depth: usize,
) -> Result<Option<HtmlNode>, RenderError> {
    match handle.data {
        NodeData::Text { ref contents } => {
            Ok(Some(HtmlNode::Text(contents.borrow().to_string())))
        }
        NodeData::Element {
            ref name,
            ref attrs,
            ..
        } => {
            if depth > max_depth {
                return Err(RenderError::DocumentTooDeep { max: max_depth });
            }

            let attrs = attrs
                .borrow()
                .iter()
                .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                .collect();

            let mut children = Vec::new();
            for child in handle.children.borrow().iter() {
                if let Some(node) = convert(child, depth + 1, max_depth)? {
                    children.push(node);
                }
            }

            Ok(Some(HtmlNode::Element(Element {
                tag: name.local.to_string(),
                attrs,
                children,
            })))
        }
        _ => Ok(None),
    }
}
