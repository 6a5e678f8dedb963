//! Wire-level building blocks for the jirasoap client.
//!
//! This crate knows nothing about JIRA entities. It defines:
//! - [`Node`]: a generic element tree used for response envelopes,
//!   entity fragments and structured request parameters alike
//! - [`MessageBuilder`]: incremental construction of outgoing element trees
//! - [`Request`] / [`Param`]: a named operation with an ordered, positional
//!   parameter list
//! - [`extract_scalar`] / [`extract_collection`]: locating result payloads
//!   inside a response envelope
//!
//! Serializing these trees to XML and moving them over HTTP is the job of a
//! transport implementation and lives outside this crate.

mod builder;
mod node;
mod request;
mod resolver;

pub use builder::MessageBuilder;
pub use node::{NIL_ATTRIBUTE, Node};
pub use request::{Param, Request};
pub use resolver::{COLLECTION_PATH, ResolveError, extract_collection, extract_scalar};
