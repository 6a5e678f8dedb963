use crate::{CoercionError, EntitySchema, codec};
use jirasoap_wire::{MessageBuilder, Node};

/// A domain object with a declared wire schema.
///
/// Entities are plain values: every decode builds a fresh one, and two
/// fetches of the same remote object give two independent values.
pub trait Entity: Default + 'static {
    /// The type's schema, built on first use.
    fn schema() -> &'static EntitySchema<Self>;

    /// Decodes an entity from its fragment.
    fn from_fragment(fragment: &Node) -> Result<Self, CoercionError> {
        codec::decode(fragment)
    }

    /// Encodes the set fields of this entity into `out`.
    fn write_to(&self, out: &mut MessageBuilder) {
        codec::encode(self, out);
    }

    /// Encodes this entity as a standalone element called `name`.
    fn to_node(&self, name: &str) -> Node {
        let mut out = MessageBuilder::new(name);
        self.write_to(&mut out);
        out.finish()
    }
}

/// The identity shape shared by every remote object.
pub trait NamedEntity: Entity {
    fn id(&self) -> Option<&str>;

    fn name(&self) -> Option<&str>;
}

/// Implements [`Entity`] for a struct, given a function that builds its
/// schema. The schema is built once, on first use.
macro_rules! entity {
    ($entity:ident, $build:expr) => {
        impl $crate::Entity for $entity {
            fn schema() -> &'static $crate::EntitySchema<Self> {
                static SCHEMA: ::std::sync::LazyLock<$crate::EntitySchema<$entity>> =
                    ::std::sync::LazyLock::new($build);
                &SCHEMA
            }
        }
    };
}

/// Like `entity!`, and also implements [`NamedEntity`] from the struct's
/// `id` and `name` fields.
macro_rules! named_entity {
    ($entity:ident, $build:expr) => {
        $crate::entity::entity!($entity, $build);

        impl $crate::NamedEntity for $entity {
            fn id(&self) -> Option<&str> {
                self.id.as_deref()
            }

            fn name(&self) -> Option<&str> {
                self.name.as_deref()
            }
        }
    };
}

pub(crate) use {entity, named_entity};
