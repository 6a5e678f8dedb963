//! Concrete JIRA entities.

mod issue;
mod metadata;
mod project;
mod server;

pub use issue::{Attachment, Comment, CustomFieldValue, FieldValue, Issue};
pub use metadata::{Field, IssueType, Priority, Resolution, Scheme, Status};
pub use project::{Avatar, Component, Project, Version};
pub use server::{Filter, ServerInfo, TimeInfo, User};
