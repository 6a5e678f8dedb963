//! Outgoing remote calls: an operation name plus positional parameters.

use crate::Node;
use serde::{Deserialize, Serialize};

/// One positional parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Param {
    Text(String),
    Bool(bool),
    Int(i64),
    /// A structured value; the element name is replaced by the positional
    /// name when the request is laid out.
    Struct(Node),
}

impl Param {
    /// Text form of a scalar parameter; `None` for structured values.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Param::Text(s) => Some(s.clone()),
            Param::Bool(b) => Some(b.to_string()),
            Param::Int(i) => Some(i.to_string()),
            Param::Struct(_) => None,
        }
    }

    /// Lays the parameter out as an element called `name`.
    pub fn to_node(&self, name: &str) -> Node {
        match self {
            Param::Struct(node) => {
                let mut node = node.clone();
                node.rename(name);
                node
            }
            scalar => Node::with_text(name, scalar.as_text().unwrap_or_default()),
        }
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Param::Text(value.to_string())
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Param::Text(value)
    }
}

impl From<bool> for Param {
    fn from(value: bool) -> Self {
        Param::Bool(value)
    }
}

impl From<i64> for Param {
    fn from(value: i64) -> Self {
        Param::Int(value)
    }
}

impl From<u32> for Param {
    fn from(value: u32) -> Self {
        Param::Int(i64::from(value))
    }
}

impl From<Node> for Param {
    fn from(value: Node) -> Self {
        Param::Struct(value)
    }
}

/// A named remote operation with an ordered parameter list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    operation: String,
    params: Vec<Param>,
}

impl Request {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            params: Vec::new(),
        }
    }

    /// Appends a parameter, builder style.
    #[must_use]
    pub fn param(mut self, param: impl Into<Param>) -> Self {
        self.params.push(param.into());
        self
    }

    pub fn push(&mut self, param: impl Into<Param>) {
        self.params.push(param.into());
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Positional name of the parameter at `index`.
    pub fn param_name(index: usize) -> String {
        format!("in{index}")
    }

    /// Parameters laid out as `in0..inN` elements, in declared order.
    pub fn param_nodes(&self) -> Vec<Node> {
        self.params
            .iter()
            .enumerate()
            .map(|(i, p)| p.to_node(&Self::param_name(i)))
            .collect()
    }

    /// The operation element with its parameters as children.
    pub fn to_node(&self) -> Node {
        Node::new(self.operation.as_str()).children_from(self.param_nodes())
    }
}
