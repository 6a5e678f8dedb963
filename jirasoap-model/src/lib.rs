//! Typed JIRA entities and the schema machinery that moves them on and off
//! the wire.
//!
//! - [`Coercion`]: paired conversion between wire text and a typed value
//! - [`EntitySchema`] / [`AttributeDescriptor`]: per-type, ordered
//!   field ↔ element ↔ coercion table, built once per type
//! - [`Entity`] / [`NamedEntity`]: what every domain object implements
//! - [`codec`]: generic decode/encode driven by a schema
//!
//! No entity has hand-written marshalling code; each one only declares its
//! schema.

pub mod codec;
mod coercion;
mod entities;
mod entity;
mod schema;

pub use coercion::{Boolean, Coercion, CoercionError, Date, Integer, Nested, ServerDate, Text, Timestamp};
pub use entities::{
    Attachment, Avatar, Comment, Component, CustomFieldValue, Field, FieldValue, Filter, Issue,
    IssueType, Priority, Project, Resolution, Scheme, ServerInfo, Status, TimeInfo, User, Version,
};
pub use entity::{Entity, NamedEntity};
pub use schema::{AttributeDescriptor, EntitySchema, Slot, WireTarget};
