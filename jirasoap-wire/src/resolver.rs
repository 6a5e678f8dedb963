//! Locating result payloads inside a response envelope.
//!
//! Scalar results are found by a global search for their element name. The
//! server names every result `<operation>Return`, so a name is unique within
//! one envelope as long as the operation's payload does not embed an element
//! of the same name.
//!
//! Collection results cannot be found that way: the array container and its
//! items share one element name. They are reached through a fixed structural
//! path instead, see [`COLLECTION_PATH`].

use crate::Node;
use thiserror::Error;

/// First-child chain from the envelope root to the array container:
/// `Envelope → Body → <operation>Response → <operation>Return`.
///
/// Each entry is a child index; the labels are only used in error messages.
pub const COLLECTION_PATH: &[(usize, &str)] = &[(0, "Body"), (0, "operation response"), (0, "result array")];

const EXCERPT: usize = 160;

/// The expected result node is not where the protocol puts it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("no <{element}> element in response (in {excerpt})")]
    MissingElement { element: String, excerpt: String },

    #[error("response has no {expected} at depth {depth} (in {excerpt})")]
    BrokenPath {
        depth: usize,
        expected: &'static str,
        excerpt: String,
    },
}

/// Finds the first element named `element` anywhere in `envelope`.
pub fn extract_scalar<'a>(envelope: &'a Node, element: &str) -> Result<&'a Node, ResolveError> {
    envelope.find(element).ok_or_else(|| ResolveError::MissingElement {
        element: element.to_string(),
        excerpt: envelope.excerpt(EXCERPT),
    })
}

/// Follows [`COLLECTION_PATH`] and returns every child of the array container
/// named `element`, in server order.
pub fn extract_collection<'a>(envelope: &'a Node, element: &str) -> Result<Vec<&'a Node>, ResolveError> {
    let mut current = envelope;
    for (depth, (index, expected)) in COLLECTION_PATH.iter().enumerate() {
        current = current
            .children()
            .get(*index)
            .ok_or_else(|| ResolveError::BrokenPath {
                depth: depth + 1,
                expected: *expected,
                excerpt: current.excerpt(EXCERPT),
            })?;
    }
    Ok(current.children_named(element).collect())
}
