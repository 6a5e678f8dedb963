use crate::entity::{entity, named_entity};
use crate::{Component, EntitySchema, Integer, Nested, Text, Timestamp, Version, slot};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// An issue.
///
/// Search results carry no comments or attachment contents. On create the
/// server ignores reporter, resolution, attachments, votes and status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub id: Option<String>,
    pub name: Option<String>,
    pub key: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub environment: Option<String>,
    pub type_id: Option<String>,
    pub status_id: Option<String>,
    pub priority_id: Option<String>,
    pub resolution_id: Option<String>,
    pub assignee_name: Option<String>,
    pub reporter_name: Option<String>,
    pub project_name: Option<String>,
    pub votes: Option<i64>,
    pub create_time: Option<DateTime<FixedOffset>>,
    pub last_updated: Option<DateTime<FixedOffset>>,
    pub due_date: Option<DateTime<FixedOffset>>,
    pub affects_versions: Option<Vec<Version>>,
    pub fix_versions: Option<Vec<Version>>,
    pub components: Option<Vec<Component>>,
    pub attachment_names: Option<Vec<String>>,
    pub custom_field_values: Option<Vec<CustomFieldValue>>,
}

named_entity!(Issue, || {
    EntitySchema::named("Issue", slot!(Issue, id), slot!(Issue, name))
        .declare::<Text>("key", "key", slot!(Issue, key))
        .declare::<Text>("summary", "summary", slot!(Issue, summary))
        .declare::<Text>("description", "description", slot!(Issue, description))
        .declare::<Text>("environment", "environment", slot!(Issue, environment))
        .declare::<Text>("type_id", "type", slot!(Issue, type_id))
        .declare::<Text>("status_id", "status", slot!(Issue, status_id))
        .declare::<Text>("priority_id", "priority", slot!(Issue, priority_id))
        .declare::<Text>("resolution_id", "resolution", slot!(Issue, resolution_id))
        .declare::<Text>("assignee_name", "assignee", slot!(Issue, assignee_name))
        .declare::<Text>("reporter_name", "reporter", slot!(Issue, reporter_name))
        .declare::<Text>("project_name", "project", slot!(Issue, project_name))
        .declare::<Integer>("votes", "votes", slot!(Issue, votes))
        .declare::<Timestamp>("create_time", "created", slot!(Issue, create_time))
        .declare::<Timestamp>("last_updated", "updated", slot!(Issue, last_updated))
        .declare::<Timestamp>("due_date", "duedate", slot!(Issue, due_date))
        .declare_repeated::<Nested<Version>>("affects_versions", "affectsVersions", slot!(Issue, affects_versions))
        .declare_repeated::<Nested<Version>>("fix_versions", "fixVersions", slot!(Issue, fix_versions))
        .declare_repeated::<Nested<Component>>("components", "components", slot!(Issue, components))
        .declare_repeated::<Text>("attachment_names", "attachmentNames", slot!(Issue, attachment_names))
        .declare_repeated::<Nested<CustomFieldValue>>(
            "custom_field_values",
            "customFieldValues",
            slot!(Issue, custom_field_values),
        )
        .alias("project_key", "project_name")
});

/// A field update for `updateIssue`.
///
/// `id` is the field's name (`summary`, `customfield_10060`), not a numeric
/// id. Use [`FieldValue::blank`] to clear a field; a value built with no
/// `values` at all leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValue {
    pub id: Option<String>,
    pub name: Option<String>,
    pub values: Option<Vec<String>>,
}

impl FieldValue {
    /// Element name used for each value in an update request.
    pub const ELEMENT: &'static str = "field";

    pub fn new<S: Into<String>>(id: impl Into<String>, values: impl IntoIterator<Item = S>) -> Self {
        Self {
            id: Some(id.into()),
            name: None,
            values: Some(values.into_iter().map(Into::into).collect()),
        }
    }

    /// Sets the field to blank: sent as an empty `values` element.
    pub fn blank(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: None,
            values: Some(Vec::new()),
        }
    }

    /// True when this value clears its field.
    pub fn is_blank(&self) -> bool {
        self.values.as_ref().is_some_and(Vec::is_empty)
    }
}

named_entity!(FieldValue, || {
    EntitySchema::named("FieldValue", slot!(FieldValue, id), slot!(FieldValue, name))
        .declare_repeated::<Text>("values", "values", slot!(FieldValue, values))
});

/// A custom field's value as embedded in an issue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomFieldValue {
    pub id: Option<String>,
    pub key: Option<String>,
    pub values: Option<Vec<String>>,
}

entity!(CustomFieldValue, || {
    EntitySchema::new("CustomFieldValue")
        .declare::<Text>("id", "customfieldId", slot!(CustomFieldValue, id))
        .declare::<Text>("key", "key", slot!(CustomFieldValue, key))
        .declare_repeated::<Text>("values", "values", slot!(CustomFieldValue, values))
});

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Option<String>,
    pub name: Option<String>,
    pub author: Option<String>,
    pub body: Option<String>,
    pub role_level: Option<String>,
    pub group_level: Option<String>,
    pub create_time: Option<DateTime<FixedOffset>>,
    pub last_updated: Option<DateTime<FixedOffset>>,
    pub update_author: Option<String>,
}

impl Comment {
    pub fn with_body(body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
            ..Default::default()
        }
    }
}

named_entity!(Comment, || {
    EntitySchema::named("Comment", slot!(Comment, id), slot!(Comment, name))
        .declare::<Text>("author", "author", slot!(Comment, author))
        .declare::<Text>("body", "body", slot!(Comment, body))
        .declare::<Text>("role_level", "roleLevel", slot!(Comment, role_level))
        .declare::<Text>("group_level", "groupLevel", slot!(Comment, group_level))
        .declare::<Timestamp>("create_time", "created", slot!(Comment, create_time))
        .declare::<Timestamp>("last_updated", "updated", slot!(Comment, last_updated))
        .declare::<Text>("update_author", "updateAuthor", slot!(Comment, update_author))
        .alias("original_author", "author")
});

/// Attachment metadata.
///
/// Only the metadata can be read through this API; the file itself lives at
/// [`Attachment::content_url`]. `content` is the own text of the fragment and
/// is only used when uploading.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: Option<String>,
    pub name: Option<String>,
    pub author: Option<String>,
    pub file_name: Option<String>,
    pub mime_type: Option<String>,
    /// Bytes.
    pub file_size: Option<i64>,
    pub create_time: Option<DateTime<FixedOffset>>,
    pub content: Option<String>,
}

impl Attachment {
    /// Download location: `{endpoint}/secure/attachment/{id}/{file_name}`.
    pub fn content_url(&self, endpoint_url: &str) -> Option<String> {
        let id = self.id.as_deref()?;
        let file_name = self.file_name.as_deref()?;
        Some(format!(
            "{}/secure/attachment/{id}/{file_name}",
            endpoint_url.trim_end_matches('/')
        ))
    }
}

named_entity!(Attachment, || {
    EntitySchema::named("Attachment", slot!(Attachment, id), slot!(Attachment, name))
        .declare::<Text>("author", "author", slot!(Attachment, author))
        .declare::<Text>("file_name", "filename", slot!(Attachment, file_name))
        .declare::<Text>("mime_type", "mimetype", slot!(Attachment, mime_type))
        .declare::<Integer>("file_size", "filesize", slot!(Attachment, file_size))
        .declare::<Timestamp>("create_time", "created", slot!(Attachment, create_time))
        .declare_content::<Text>("content", slot!(Attachment, content))
        .alias("filename", "file_name")
        .alias("content_type", "mime_type")
});
