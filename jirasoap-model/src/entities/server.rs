use crate::entity::{entity, named_entity};
use crate::{Date, EntitySchema, Integer, Nested, Text, slot};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A user account. `name` is the login name; users have no id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Option<String>,
    pub name: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
}

named_entity!(User, || {
    EntitySchema::named("User", slot!(User, id), slot!(User, name))
        .declare::<Text>("full_name", "fullname", slot!(User, full_name))
        .declare::<Text>("email", "email", slot!(User, email))
        .alias("username", "name")
});

/// A saved search filter. `xml` is the filter definition as stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    pub id: Option<String>,
    pub name: Option<String>,
    pub author: Option<String>,
    pub project: Option<String>,
    pub description: Option<String>,
    pub xml: Option<String>,
}

named_entity!(Filter, || {
    EntitySchema::named("Filter", slot!(Filter, id), slot!(Filter, name))
        .declare::<Text>("author", "author", slot!(Filter, author))
        .declare::<Text>("project", "project", slot!(Filter, project))
        .declare::<Text>("description", "description", slot!(Filter, description))
        .declare::<Text>("xml", "xml", slot!(Filter, xml))
});

/// The server clock as reported in [`ServerInfo`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInfo {
    pub server_time: Option<String>,
    pub timezone: Option<String>,
}

entity!(TimeInfo, || {
    EntitySchema::new("TimeInfo")
        .declare::<Text>("server_time", "serverTime", slot!(TimeInfo, server_time))
        .declare::<Text>("timezone", "timeZoneId", slot!(TimeInfo, timezone))
});

/// Version and build information. `build_date` has no time component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerInfo {
    pub id: Option<String>,
    pub name: Option<String>,
    pub base_url: Option<String>,
    pub build_date: Option<NaiveDate>,
    pub build_number: Option<i64>,
    pub edition: Option<String>,
    pub version: Option<String>,
    pub server_time: Option<TimeInfo>,
}

named_entity!(ServerInfo, || {
    EntitySchema::named("ServerInfo", slot!(ServerInfo, id), slot!(ServerInfo, name))
        .declare::<Text>("base_url", "baseUrl", slot!(ServerInfo, base_url))
        .declare::<Date>("build_date", "buildDate", slot!(ServerInfo, build_date))
        .declare::<Integer>("build_number", "buildNumber", slot!(ServerInfo, build_number))
        .declare::<Text>("edition", "edition", slot!(ServerInfo, edition))
        .declare::<Text>("version", "version", slot!(ServerInfo, version))
        .declare::<Nested<TimeInfo>>("server_time", "serverTime", slot!(ServerInfo, server_time))
});
