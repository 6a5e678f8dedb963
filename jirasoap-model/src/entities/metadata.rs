//! Server-wide lookup values: priorities, resolutions, statuses and friends.

use crate::entity::named_entity;
use crate::{Boolean, EntitySchema, Text, slot};
use serde::{Deserialize, Serialize};

/// An issue priority. `color` is an HTML colour string such as `#cc0000`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Priority {
    pub id: Option<String>,
    pub name: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub description: Option<String>,
}

named_entity!(Priority, || {
    EntitySchema::named("Priority", slot!(Priority, id), slot!(Priority, name))
        .declare::<Text>("color", "color", slot!(Priority, color))
        .declare::<Text>("icon", "icon", slot!(Priority, icon))
        .declare::<Text>("description", "description", slot!(Priority, description))
});

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub id: Option<String>,
    pub name: Option<String>,
    pub icon: Option<String>,
    pub description: Option<String>,
}

named_entity!(Resolution, || {
    EntitySchema::named("Resolution", slot!(Resolution, id), slot!(Resolution, name))
        .declare::<Text>("icon", "icon", slot!(Resolution, icon))
        .declare::<Text>("description", "description", slot!(Resolution, description))
});

/// A custom field definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub id: Option<String>,
    pub name: Option<String>,
}

named_entity!(Field, || {
    EntitySchema::named("Field", slot!(Field, id), slot!(Field, name))
});

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueType {
    pub id: Option<String>,
    pub name: Option<String>,
    pub icon: Option<String>,
    pub description: Option<String>,
    pub subtask: Option<bool>,
}

named_entity!(IssueType, || {
    EntitySchema::named("IssueType", slot!(IssueType, id), slot!(IssueType, name))
        .declare::<Text>("icon", "icon", slot!(IssueType, icon))
        .declare::<Text>("description", "description", slot!(IssueType, description))
        .declare::<Boolean>("subtask", "subTask", slot!(IssueType, subtask))
});

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub id: Option<String>,
    pub name: Option<String>,
    pub icon: Option<String>,
    pub description: Option<String>,
}

named_entity!(Status, || {
    EntitySchema::named("Status", slot!(Status, id), slot!(Status, name))
        .declare::<Text>("icon", "icon", slot!(Status, icon))
        .declare::<Text>("description", "description", slot!(Status, description))
});

/// A notification, permission or issue-security scheme.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scheme {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub scheme_type: Option<String>,
}

named_entity!(Scheme, || {
    EntitySchema::named("Scheme", slot!(Scheme, id), slot!(Scheme, name))
        .declare::<Text>("description", "description", slot!(Scheme, description))
        .declare::<Text>("scheme_type", "type", slot!(Scheme, scheme_type))
        .alias("type", "scheme_type")
});
