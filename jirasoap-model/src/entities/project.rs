use crate::entity::named_entity;
use crate::{Boolean, EntitySchema, Integer, Nested, Scheme, ServerDate, Text, slot};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A project version.
///
/// `release_date` is the tentative release date and is independent of
/// `released`. The server keeps no time of day for it; see
/// [`ServerDate`](crate::ServerDate). New versions cannot be created with
/// `archived` set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub id: Option<String>,
    pub name: Option<String>,
    pub sequence: Option<i64>,
    pub released: Option<bool>,
    pub archived: Option<bool>,
    pub release_date: Option<DateTime<FixedOffset>>,
}

impl Version {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

named_entity!(Version, || {
    EntitySchema::named("Version", slot!(Version, id), slot!(Version, name))
        .declare::<Integer>("sequence", "sequence", slot!(Version, sequence))
        .declare::<Boolean>("released", "released", slot!(Version, released))
        .declare::<Boolean>("archived", "archived", slot!(Version, archived))
        .declare::<ServerDate>("release_date", "releaseDate", slot!(Version, release_date))
});

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub id: Option<String>,
    pub name: Option<String>,
}

named_entity!(Component, || {
    EntitySchema::named("Component", slot!(Component, id), slot!(Component, name))
});

/// A project. Creating one needs at least `name`, `key` and `lead`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: Option<String>,
    pub name: Option<String>,
    pub key: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub project_url: Option<String>,
    pub lead: Option<String>,
    pub issue_security_scheme: Option<Scheme>,
    pub notification_scheme: Option<Scheme>,
    pub permission_scheme: Option<Scheme>,
}

named_entity!(Project, || {
    EntitySchema::named("Project", slot!(Project, id), slot!(Project, name))
        .declare::<Text>("key", "key", slot!(Project, key))
        .declare::<Text>("description", "description", slot!(Project, description))
        .declare::<Text>("url", "url", slot!(Project, url))
        .declare::<Text>("project_url", "projectUrl", slot!(Project, project_url))
        .declare::<Text>("lead", "lead", slot!(Project, lead))
        .declare::<Nested<Scheme>>(
            "issue_security_scheme",
            "issueSecurityScheme",
            slot!(Project, issue_security_scheme),
        )
        .declare::<Nested<Scheme>>(
            "notification_scheme",
            "notificationScheme",
            slot!(Project, notification_scheme),
        )
        .declare::<Nested<Scheme>>(
            "permission_scheme",
            "permissionScheme",
            slot!(Project, permission_scheme),
        )
        .alias("lead_name", "lead")
});

/// A project or user avatar. `base64_data` holds the encoded image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Avatar {
    pub id: Option<String>,
    pub name: Option<String>,
    pub owner: Option<String>,
    pub avatar_type: Option<String>,
    pub content_type: Option<String>,
    pub base64_data: Option<String>,
    pub system: Option<bool>,
}

named_entity!(Avatar, || {
    EntitySchema::named("Avatar", slot!(Avatar, id), slot!(Avatar, name))
        .declare::<Text>("owner", "owner", slot!(Avatar, owner))
        .declare::<Text>("avatar_type", "type", slot!(Avatar, avatar_type))
        .declare::<Text>("content_type", "contentType", slot!(Avatar, content_type))
        .declare::<Text>("base64_data", "base64Data", slot!(Avatar, base64_data))
        .declare::<Boolean>("system", "system", slot!(Avatar, system))
        .alias("mime_type", "content_type")
});
