//! Generic element tree.
//!
//! Names are compared by local name: `ns1:getUserReturn` matches
//! `getUserReturn`. Whitespace-only text between elements is expected to be
//! dropped by whoever parses the document.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Attribute marking an element as explicitly nil.
pub const NIL_ATTRIBUTE: &str = "xsi:nil";

/// One element of a wire document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    attributes: Vec<(String, String)>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<Node>,
}

impl Node {
    /// Creates an empty element.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Creates an element holding only text.
    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            ..Default::default()
        }
    }

    /// Appends a child, builder style.
    #[must_use]
    pub fn child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Appends several children, builder style.
    #[must_use]
    pub fn children_from(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    /// Sets an attribute, builder style.
    #[must_use]
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(key, value);
        self
    }

    /// Marks the element as explicitly nil.
    #[must_use]
    pub fn nil(self) -> Self {
        self.attribute(NIL_ATTRIBUTE, "true")
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The name without any namespace prefix.
    pub fn local_name(&self) -> &str {
        local(&self.name)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Looks up an attribute by its full or local name.
    pub fn attribute_value(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key || local(k) == local(key))
            .map(|(_, v)| v.as_str())
    }

    /// True when the element carries `xsi:nil="true"`.
    pub fn is_nil(&self) -> bool {
        self.attribute_value(NIL_ATTRIBUTE)
            .is_some_and(|v| v.trim() == "true" || v.trim() == "1")
    }

    /// True when the element has neither text nor children.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.children.is_empty()
    }

    pub fn matches(&self, name: &str) -> bool {
        self.local_name() == local(name)
    }

    /// First direct child with the given name.
    pub fn first_child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.matches(name))
    }

    /// Direct children with the given name, in document order.
    pub fn children_named<'a, 'n>(&'a self, name: &'n str) -> impl Iterator<Item = &'a Node> + use<'a, 'n> {
        self.children.iter().filter(move |c| c.matches(name))
    }

    /// First element named `name` in pre-order, starting with `self`.
    pub fn find(&self, name: &str) -> Option<&Node> {
        if self.matches(name) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(name))
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((key, value)),
        }
    }

    pub fn push(&mut self, child: Node) {
        self.children.push(child);
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Renders the element, cut to roughly `max` characters, for diagnostics.
    pub fn excerpt(&self, max: usize) -> String {
        let rendered = self.to_string();
        if rendered.len() <= max {
            return rendered;
        }
        let mut end = max;
        while !rendered.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &rendered[..end])
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.name)?;
        for (k, v) in &self.attributes {
            write!(f, " {}=\"{}\"", k, escape(v))?;
        }
        if self.is_empty() {
            return write!(f, "/>");
        }
        write!(f, ">{}", escape(&self.text))?;
        for child in &self.children {
            write!(f, "{child}")?;
        }
        write!(f, "</{}>", self.name)
    }
}

fn local(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
