//! Declarative field ↔ wire-element ↔ coercion tables.
//!
//! Each entity type builds one [`EntitySchema`] the first time it is used and
//! keeps it for the life of the process. The codec walks the schema; no entity
//! carries marshalling code of its own.

use crate::coercion::{Coercion, CoercionError};
use jirasoap_wire::{MessageBuilder, Node};
use std::fmt;

type DecodeFn<E> = Box<dyn Fn(&mut E, &Node) -> Result<(), CoercionError> + Send + Sync>;
type EncodeFn<E> = Box<dyn Fn(&E, &mut MessageBuilder) + Send + Sync>;
type IsSetFn<E> = Box<dyn Fn(&E) -> bool + Send + Sync>;

/// Shared and mutable projections onto one storage slot of `E`.
///
/// Usually built with the [`slot!`](crate::slot) macro.
pub struct Slot<E, T> {
    get: fn(&E) -> &T,
    get_mut: fn(&mut E) -> &mut T,
}

impl<E, T> Slot<E, T> {
    pub const fn new(get: fn(&E) -> &T, get_mut: fn(&mut E) -> &mut T) -> Self {
        Self { get, get_mut }
    }

    pub fn get<'a>(&self, entity: &'a E) -> &'a T {
        (self.get)(entity)
    }

    pub fn get_mut<'a>(&self, entity: &'a mut E) -> &'a mut T {
        (self.get_mut)(entity)
    }
}

impl<E, T> Clone for Slot<E, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E, T> Copy for Slot<E, T> {}

/// Builds a [`Slot`] for a named field: `slot!(Priority, icon)`.
#[macro_export]
macro_rules! slot {
    ($entity:ty, $field:ident) => {
        $crate::Slot::<$entity, _>::new(|e| &e.$field, |e| &mut e.$field)
    };
}

/// Where a descriptor's value lives in a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireTarget {
    /// A named child element.
    Element(&'static str),
    /// The fragment's own text.
    Content,
}

/// One field of an entity: its name, wire element and coercion.
pub struct AttributeDescriptor<E> {
    field_name: &'static str,
    aliases: Vec<&'static str>,
    wire_tag: Option<&'static str>,
    repeatable: bool,
    decode: DecodeFn<E>,
    encode: EncodeFn<E>,
    is_set: IsSetFn<E>,
}

impl<E: 'static> AttributeDescriptor<E> {
    /// A single-valued field stored as `Option<C::Value>`.
    ///
    /// With `wire_tag = None` the value is the fragment's own text.
    pub fn scalar<C: Coercion>(
        field_name: &'static str,
        wire_tag: Option<&'static str>,
        slot: Slot<E, Option<C::Value>>,
    ) -> Self {
        let decode: DecodeFn<E> = match wire_tag {
            Some(tag) => Box::new(move |entity, fragment| {
                if let Some(node) = fragment.first_child(tag).filter(|n| !n.is_nil()) {
                    *slot.get_mut(entity) = Some(C::decode(node)?);
                }
                Ok(())
            }),
            None => Box::new(move |entity, fragment| {
                if !fragment.text().is_empty() {
                    *slot.get_mut(entity) = Some(C::decode(fragment)?);
                }
                Ok(())
            }),
        };
        let encode: EncodeFn<E> = match wire_tag {
            Some(tag) => Box::new(move |entity, out| {
                if let Some(value) = slot.get(entity) {
                    out.add_nested(tag, |b| C::encode(value, b));
                }
            }),
            None => Box::new(move |entity, out| {
                if let Some(value) = slot.get(entity) {
                    C::encode(value, out);
                }
            }),
        };
        Self {
            field_name,
            aliases: Vec::new(),
            wire_tag,
            repeatable: false,
            decode,
            encode,
            is_set: Box::new(move |entity| slot.get(entity).is_some()),
        }
    }

    /// A repeatable field stored as `Option<Vec<C::Value>>`.
    ///
    /// On the wire this is a container element named `wire_tag` holding one
    /// child of the same name per item. `Some(vec![])` is sent as the empty
    /// marker `<wire_tag/>`; `None` is not sent at all.
    pub fn repeated<C: Coercion>(
        field_name: &'static str,
        wire_tag: &'static str,
        slot: Slot<E, Option<Vec<C::Value>>>,
    ) -> Self {
        Self {
            field_name,
            aliases: Vec::new(),
            wire_tag: Some(wire_tag),
            repeatable: true,
            decode: Box::new(move |entity, fragment| {
                if let Some(container) = fragment.first_child(wire_tag).filter(|n| !n.is_nil()) {
                    let items = container
                        .children_named(wire_tag)
                        .map(C::decode)
                        .collect::<Result<Vec<_>, _>>()?;
                    *slot.get_mut(entity) = Some(items);
                }
                Ok(())
            }),
            encode: Box::new(move |entity, out| {
                if let Some(items) = slot.get(entity) {
                    out.add_nested(wire_tag, |container| {
                        for item in items {
                            container.add_nested(wire_tag, |b| C::encode(item, b));
                        }
                    });
                }
            }),
            is_set: Box::new(move |entity| slot.get(entity).is_some()),
        }
    }

    pub fn field_name(&self) -> &'static str {
        self.field_name
    }

    pub fn aliases(&self) -> &[&'static str] {
        &self.aliases
    }

    pub fn wire_tag(&self) -> Option<&'static str> {
        self.wire_tag
    }

    pub fn target(&self) -> WireTarget {
        self.wire_tag.map_or(WireTarget::Content, WireTarget::Element)
    }

    pub fn is_repeatable(&self) -> bool {
        self.repeatable
    }

    /// True when `name` is the field name or one of its aliases.
    pub fn answers_to(&self, name: &str) -> bool {
        self.field_name == name || self.aliases.contains(&name)
    }

    /// Reads this field out of `fragment` into `entity`.
    pub fn decode_into(&self, entity: &mut E, fragment: &Node) -> Result<(), CoercionError> {
        (self.decode)(entity, fragment)
    }

    /// Writes this field of `entity`, if set, into `out`.
    pub fn encode_from(&self, entity: &E, out: &mut MessageBuilder) {
        (self.encode)(entity, out);
    }

    pub fn is_set(&self, entity: &E) -> bool {
        (self.is_set)(entity)
    }
}

impl<E> fmt::Debug for AttributeDescriptor<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeDescriptor")
            .field("field_name", &self.field_name)
            .field("aliases", &self.aliases)
            .field("wire_tag", &self.wire_tag)
            .field("repeatable", &self.repeatable)
            .finish_non_exhaustive()
    }
}

/// Ordered descriptor table for one entity type.
///
/// Declaration order is the order fields are sent in; some operations are
/// positionally sensitive. Field names and aliases are unique; declaring a
/// duplicate panics while the schema is being built.
pub struct EntitySchema<E> {
    entity_name: &'static str,
    descriptors: Vec<AttributeDescriptor<E>>,
}

impl<E: 'static> EntitySchema<E> {
    pub fn new(entity_name: &'static str) -> Self {
        Self {
            entity_name,
            descriptors: Vec::new(),
        }
    }

    /// Starts a schema with the `id` and `name` fields every named entity has.
    pub fn named(
        entity_name: &'static str,
        id: Slot<E, Option<String>>,
        name: Slot<E, Option<String>>,
    ) -> Self {
        Self::new(entity_name)
            .declare::<crate::Text>("id", "id", id)
            .declare::<crate::Text>("name", "name", name)
    }

    /// Declares a single-valued field read from the child `wire_tag`.
    #[must_use]
    pub fn declare<C: Coercion>(
        self,
        field_name: &'static str,
        wire_tag: &'static str,
        slot: Slot<E, Option<C::Value>>,
    ) -> Self {
        self.push(AttributeDescriptor::scalar::<C>(field_name, Some(wire_tag), slot))
    }

    /// Declares a field read from the fragment's own text.
    ///
    /// Empty text reads as unset, so a blank value does not survive a round
    /// trip through such a field.
    #[must_use]
    pub fn declare_content<C: Coercion>(
        self,
        field_name: &'static str,
        slot: Slot<E, Option<C::Value>>,
    ) -> Self {
        self.push(AttributeDescriptor::scalar::<C>(field_name, None, slot))
    }

    /// Declares a repeatable field, see [`AttributeDescriptor::repeated`].
    #[must_use]
    pub fn declare_repeated<C: Coercion>(
        self,
        field_name: &'static str,
        wire_tag: &'static str,
        slot: Slot<E, Option<Vec<C::Value>>>,
    ) -> Self {
        self.push(AttributeDescriptor::repeated::<C>(field_name, wire_tag, slot))
    }

    /// Adds an alternate name for an already declared field.
    #[must_use]
    pub fn alias(mut self, alias: &'static str, field_name: &'static str) -> Self {
        assert!(
            self.descriptor(alias).is_none(),
            "{}: name `{alias}` is already taken",
            self.entity_name
        );
        let entity_name = self.entity_name;
        let descriptor = self
            .descriptors
            .iter_mut()
            .find(|d| d.field_name == field_name)
            .unwrap_or_else(|| panic!("{entity_name}: cannot alias unknown field `{field_name}`"));
        descriptor.aliases.push(alias);
        self
    }

    fn push(mut self, descriptor: AttributeDescriptor<E>) -> Self {
        assert!(
            self.descriptor(descriptor.field_name).is_none(),
            "{}: field `{}` declared twice",
            self.entity_name,
            descriptor.field_name
        );
        self.descriptors.push(descriptor);
        self
    }

    pub fn entity_name(&self) -> &'static str {
        self.entity_name
    }

    /// Descriptors in declaration order.
    pub fn descriptors(&self) -> &[AttributeDescriptor<E>] {
        &self.descriptors
    }

    /// Looks a descriptor up by field name or alias.
    pub fn descriptor(&self, name: &str) -> Option<&AttributeDescriptor<E>> {
        self.descriptors.iter().find(|d| d.answers_to(name))
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.descriptors.iter().map(|d| d.field_name)
    }

    /// Whether the named field currently holds a value in `entity`.
    pub fn is_set(&self, entity: &E, name: &str) -> Option<bool> {
        self.descriptor(name).map(|d| d.is_set(entity))
    }
}

impl<E> fmt::Debug for EntitySchema<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntitySchema")
            .field("entity_name", &self.entity_name)
            .field("descriptors", &self.descriptors)
            .finish()
    }
}
