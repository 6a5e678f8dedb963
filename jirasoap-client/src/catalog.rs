//! The remote operations exposed by the service.
//!
//! Each method names one wire operation, lays out its arguments after the
//! session token and decodes the `<operation>Return` element into the
//! declared result shape. Integer caps and flags are passed through as given;
//! the server does its own validation.

use crate::error::{ClientError, ClientResult};
use crate::session::Session;
use crate::transport::Transport;
use jirasoap_model::{
    Attachment, Avatar, Comment, Entity, Field, FieldValue, Filter, Integer,
    Issue, IssueType, Priority, Project, Resolution, Scheme, ServerInfo, Status, User, Version,
    codec,
};
use jirasoap_wire::{MessageBuilder, Node, Param, extract_collection, extract_scalar};

/// Borrowed view of a [`Session`] that issues remote calls.
pub struct RemoteProcedureCatalog<'s, T> {
    session: &'s mut Session<T>,
}

impl<'s, T: Transport> RemoteProcedureCatalog<'s, T> {
    pub(crate) fn new(session: &'s mut Session<T>) -> Self {
        Self { session }
    }

    // ── Lookups ──────────────────────────────────────────────────

    pub fn get_priorities(&mut self) -> ClientResult<Vec<Priority>> {
        self.fetch_all("getPriorities", Vec::new())
    }

    pub fn get_resolutions(&mut self) -> ClientResult<Vec<Resolution>> {
        self.fetch_all("getResolutions", Vec::new())
    }

    pub fn get_custom_fields(&mut self) -> ClientResult<Vec<Field>> {
        self.fetch_all("getCustomFields", Vec::new())
    }

    pub fn get_issue_types(&mut self) -> ClientResult<Vec<IssueType>> {
        self.fetch_all("getIssueTypes", Vec::new())
    }

    pub fn get_issue_types_for_project_with_id(&mut self, project_id: &str) -> ClientResult<Vec<IssueType>> {
        self.fetch_all("getIssueTypesForProject", vec![project_id.into()])
    }

    pub fn get_subtask_issue_types(&mut self) -> ClientResult<Vec<IssueType>> {
        self.fetch_all("getSubTaskIssueTypes", Vec::new())
    }

    pub fn get_subtask_issue_types_for_project_with_id(
        &mut self,
        project_id: &str,
    ) -> ClientResult<Vec<IssueType>> {
        self.fetch_all("getSubTaskIssueTypesForProject", vec![project_id.into()])
    }

    pub fn get_statuses(&mut self) -> ClientResult<Vec<Status>> {
        self.fetch_all("getStatuses", Vec::new())
    }

    pub fn get_notification_schemes(&mut self) -> ClientResult<Vec<Scheme>> {
        self.fetch_all("getNotificationSchemes", Vec::new())
    }

    pub fn get_favourite_filters(&mut self) -> ClientResult<Vec<Filter>> {
        self.fetch_all("getFavouriteFilters", Vec::new())
    }

    pub fn get_server_info(&mut self) -> ClientResult<ServerInfo> {
        self.fetch_one("getServerInfo", Vec::new())
    }

    /// Asks the server to reload custom field definitions.
    pub fn refresh_custom_fields(&mut self) -> ClientResult<bool> {
        self.fetch_void("refreshCustomFields", Vec::new())
    }

    pub fn get_user_with_name(&mut self, user_name: &str) -> ClientResult<User> {
        self.fetch_one("getUser", vec![user_name.into()])
    }

    // ── Projects ─────────────────────────────────────────────────

    pub fn get_project_with_key(&mut self, project_key: &str) -> ClientResult<Project> {
        self.fetch_one("getProjectByKey", vec![project_key.into()])
    }

    pub fn get_project_with_id(&mut self, project_id: &str) -> ClientResult<Project> {
        self.fetch_one("getProjectById", vec![project_id.into()])
    }

    pub fn create_project_with_project(&mut self, project: &Project) -> ClientResult<Project> {
        self.fetch_one("createProjectFromObject", vec![entity_param(project)])
    }

    pub fn get_project_avatar_for_key(&mut self, project_key: &str) -> ClientResult<Avatar> {
        self.fetch_one("getProjectAvatar", vec![project_key.into()])
    }

    pub fn get_project_avatars_for_key(
        &mut self,
        project_key: &str,
        include_defaults: bool,
    ) -> ClientResult<Vec<Avatar>> {
        self.fetch_all(
            "getProjectAvatars",
            vec![project_key.into(), include_defaults.into()],
        )
    }

    // ── Versions ─────────────────────────────────────────────────

    pub fn get_versions_for_project(&mut self, project_key: &str) -> ClientResult<Vec<Version>> {
        self.fetch_all("getVersions", vec![project_key.into()])
    }

    pub fn add_version_to_project(&mut self, project_key: &str, version: &Version) -> ClientResult<Version> {
        self.fetch_one("addVersion", vec![project_key.into(), entity_param(version)])
    }

    pub fn set_archive_state_for_version_for_project(
        &mut self,
        project_key: &str,
        version_name: &str,
        archived: bool,
    ) -> ClientResult<bool> {
        self.fetch_void(
            "archiveVersion",
            vec![project_key.into(), version_name.into(), archived.into()],
        )
    }

    pub fn release_version_for_project(&mut self, project_key: &str, version: &Version) -> ClientResult<bool> {
        self.fetch_void("releaseVersion", vec![project_key.into(), entity_param(version)])
    }

    // ── Issues ───────────────────────────────────────────────────

    pub fn get_issue_with_key(&mut self, issue_key: &str) -> ClientResult<Issue> {
        self.fetch_one("getIssue", vec![issue_key.into()])
    }

    pub fn get_issue_with_id(&mut self, issue_id: &str) -> ClientResult<Issue> {
        self.fetch_one("getIssueById", vec![issue_id.into()])
    }

    pub fn create_issue_with_issue(&mut self, issue: &Issue) -> ClientResult<Issue> {
        self.fetch_one("createIssue", vec![entity_param(issue)])
    }

    /// Sets the given fields on an issue and returns the updated issue.
    ///
    /// Use [`FieldValue::blank`] to clear a field.
    pub fn update_issue(&mut self, issue_key: &str, fields: &[FieldValue]) -> ClientResult<Issue> {
        let mut out = MessageBuilder::new("fields");
        codec::encode_collection(fields, FieldValue::ELEMENT, &mut out);
        self.fetch_one("updateIssue", vec![issue_key.into(), out.finish().into()])
    }

    /// Runs a JQL search. `None` uses the configured default cap.
    pub fn get_issues_from_jql_search(
        &mut self,
        jql: &str,
        max_results: Option<u32>,
    ) -> ClientResult<Vec<Issue>> {
        let max = max_results.unwrap_or(self.session.config().default_max_results);
        self.fetch_all("getIssuesFromJqlSearch", vec![jql.into(), max.into()])
    }

    pub fn get_issues_from_text_search_with_limit(
        &mut self,
        terms: &str,
        offset: u32,
        max_results: u32,
    ) -> ClientResult<Vec<Issue>> {
        self.fetch_all(
            "getIssuesFromTextSearchWithLimit",
            vec![terms.into(), offset.into(), max_results.into()],
        )
    }

    pub fn get_issues_from_filter_with_limit(
        &mut self,
        filter_id: &str,
        offset: u32,
        max_results: u32,
    ) -> ClientResult<Vec<Issue>> {
        self.fetch_all(
            "getIssuesFromFilterWithLimit",
            vec![filter_id.into(), offset.into(), max_results.into()],
        )
    }

    pub fn get_issue_count_for_filter(&mut self, filter_id: &str) -> ClientResult<i64> {
        self.fetch_int("getIssueCountForFilter", vec![filter_id.into()])
    }

    // ── Comments ─────────────────────────────────────────────────

    pub fn get_comment_with_id(&mut self, comment_id: &str) -> ClientResult<Comment> {
        self.fetch_one("getComment", vec![comment_id.into()])
    }

    pub fn get_comments_for_issue_with_key(&mut self, issue_key: &str) -> ClientResult<Vec<Comment>> {
        self.fetch_all("getComments", vec![issue_key.into()])
    }

    pub fn add_comment_to_issue(&mut self, issue_key: &str, comment: &Comment) -> ClientResult<bool> {
        self.fetch_void("addComment", vec![issue_key.into(), entity_param(comment)])
    }

    // ── Attachments ──────────────────────────────────────────────

    /// Attachment metadata only; see [`Attachment::content_url`] for where
    /// the bytes live.
    pub fn get_attachments_for_issue_with_key(&mut self, issue_key: &str) -> ClientResult<Vec<Attachment>> {
        self.fetch_all("getAttachmentsFromIssue", vec![issue_key.into()])
    }

    /// The service has no operation for attachment bytes.
    pub fn get_attachment_content(&mut self, _attachment: &Attachment) -> ClientResult<Vec<u8>> {
        Err(ClientError::NotImplemented("attachment content download"))
    }

    // ── Dispatch ─────────────────────────────────────────────────

    fn fetch_one<E: Entity>(&mut self, operation: &'static str, args: Vec<Param>) -> ClientResult<E> {
        let envelope = self.session.call(operation, args)?;
        let node = scalar_result(&envelope, operation)?;
        E::from_fragment(node).map_err(|source| ClientError::Coercion { operation, source })
    }

    fn fetch_all<E: Entity>(&mut self, operation: &'static str, args: Vec<Param>) -> ClientResult<Vec<E>> {
        let envelope = self.session.call(operation, args)?;
        let mut items = extract_collection(&envelope, &result_element(operation))
            .map_err(|source| ClientError::MalformedResponse { operation, source })?;
        if items.is_empty()
            && let Some(alternate) = alternate_result_element(operation)
        {
            items = extract_collection(&envelope, alternate)
                .map_err(|source| ClientError::MalformedResponse { operation, source })?;
        }
        codec::decode_each(items).map_err(|source| ClientError::Coercion { operation, source })
    }

    fn fetch_int(&mut self, operation: &'static str, args: Vec<Param>) -> ClientResult<i64> {
        let envelope = self.session.call(operation, args)?;
        let node = scalar_result(&envelope, operation)?;
        codec::decode_value::<Integer>(node).map_err(|source| ClientError::Coercion { operation, source })
    }

    /// Operations with no result report success as `true`.
    fn fetch_void(&mut self, operation: &'static str, args: Vec<Param>) -> ClientResult<bool> {
        self.session.call(operation, args)?;
        Ok(true)
    }
}

fn result_element(operation: &str) -> String {
    format!("{operation}Return")
}

/// Result names some server versions use instead of `<operation>Return`.
fn alternate_result_element(operation: &str) -> Option<&'static str> {
    match operation {
        "getSubTaskIssueTypesForProject" => Some("getSubtaskIssueTypesForProjectReturn"),
        _ => None,
    }
}

fn scalar_result<'a>(envelope: &'a Node, operation: &'static str) -> ClientResult<&'a Node> {
    extract_scalar(envelope, &result_element(operation))
        .map_err(|source| ClientError::MalformedResponse { operation, source })
}

fn entity_param<E: Entity>(entity: &E) -> Param {
    Param::Struct(entity.to_node(E::schema().entity_name()))
}
