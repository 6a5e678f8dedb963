//! Schema-driven decoding and encoding of entities.
//!
//! Decoding leaves a field unset when its element is missing or marked nil;
//! only a coercion's own rule (an empty integer reads as `0`) produces a value
//! from nothing. Encoding skips unset fields, which the server reads as
//! "leave unchanged" on update and "use the default" on create. An explicit
//! blank (`Some(String::new())`, `Some(vec![])`) is sent as an empty element,
//! which the server reads as "clear this field".

use crate::{Coercion, CoercionError, Entity};
use jirasoap_wire::{MessageBuilder, Node};

const FRAGMENT_EXCERPT: usize = 240;

/// Decodes one entity from `fragment`.
///
/// The first field that fails to convert aborts the whole entity; the error
/// names the entity, the field and the fragment.
pub fn decode<E: Entity>(fragment: &Node) -> Result<E, CoercionError> {
    let schema = E::schema();
    let mut entity = E::default();
    for descriptor in schema.descriptors() {
        descriptor
            .decode_into(&mut entity, fragment)
            .map_err(|source| CoercionError::Field {
                entity: schema.entity_name(),
                field: descriptor.field_name(),
                wire_tag: descriptor.wire_tag().unwrap_or("#text"),
                fragment: fragment.excerpt(FRAGMENT_EXCERPT),
                source: Box::new(source),
            })?;
    }
    Ok(entity)
}

/// Converts a bare result element, such as a count or a flag.
///
/// Failures carry a rendering of `node`.
pub fn decode_value<C: Coercion>(node: &Node) -> Result<C::Value, CoercionError> {
    C::decode(node).map_err(|source| CoercionError::Value {
        fragment: node.excerpt(FRAGMENT_EXCERPT),
        source: Box::new(source),
    })
}

/// Decodes every child of `container` named `item_tag`, in source order.
pub fn decode_collection<E: Entity>(container: &Node, item_tag: &str) -> Result<Vec<E>, CoercionError> {
    decode_each(container.children_named(item_tag))
}

/// Decodes each fragment in turn, stopping at the first failure.
pub fn decode_each<'a, E: Entity>(fragments: impl IntoIterator<Item = &'a Node>) -> Result<Vec<E>, CoercionError> {
    fragments.into_iter().map(decode::<E>).collect()
}

/// Writes every set field of `entity` into `out`, in declaration order.
pub fn encode<E: Entity>(entity: &E, out: &mut MessageBuilder) {
    for descriptor in E::schema().descriptors() {
        descriptor.encode_from(entity, out);
    }
}

/// Writes one `item_tag` element per entity into `out`.
pub fn encode_collection<E: Entity>(entities: &[E], item_tag: &str, out: &mut MessageBuilder) {
    for entity in entities {
        out.add_nested(item_tag, |b| encode(entity, b));
    }
}
