//! Incremental construction of outgoing element trees.

use crate::Node;

/// Builds the content of one outgoing element.
///
/// Entity encoders write into a builder that the caller opened for them;
/// they never choose the name of the element they are written into.
#[derive(Debug, Clone)]
pub struct MessageBuilder {
    node: Node,
}

impl MessageBuilder {
    /// Opens a new element.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            node: Node::new(name),
        }
    }

    /// Adds a child holding only text.
    pub fn add(&mut self, name: &str, text: impl Into<String>) -> &mut Self {
        self.node.push(Node::with_text(name, text));
        self
    }

    /// Adds a child with no content: the empty-value marker `<name/>`.
    pub fn add_empty(&mut self, name: &str) -> &mut Self {
        self.node.push(Node::new(name));
        self
    }

    /// Adds a child whose content is written by `fill`.
    pub fn add_nested(&mut self, name: &str, fill: impl FnOnce(&mut MessageBuilder)) -> &mut Self {
        let mut child = MessageBuilder::new(name);
        fill(&mut child);
        self.node.push(child.finish());
        self
    }

    /// Sets the text content of the element being built.
    pub fn set_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.node.set_text(text);
        self
    }

    pub fn finish(self) -> Node {
        self.node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_elements_keep_insertion_order() {
        let mut b = MessageBuilder::new("in1");
        b.add("id", "10000")
            .add_nested("values", |v| {
                v.add("values", "a").add("values", "b");
            })
            .add_empty("description");
        let node = b.finish();
        assert_eq!(
            node.to_string(),
            "<in1><id>10000</id><values><values>a</values><values>b</values></values><description/></in1>"
        );
    }
}
