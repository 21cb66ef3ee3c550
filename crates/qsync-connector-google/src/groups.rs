//! Directory group and membership models and operations.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::error::GoogleResult;
use crate::session::DirectorySession;

/// A distribution group in the directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryGroup {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Request body for creating a group.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupInsert {
    pub email: String,
    pub name: String,
}

/// Role of a group member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MemberRole {
    Owner,
    Manager,
    Member,
}

/// Type of a group member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MemberType {
    Customer,
    Group,
    User,
}

/// A membership record inside a group.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryMember {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub email: String,
    pub role: MemberRole,
    #[serde(rename = "type")]
    pub member_type: MemberType,
}

/// Request body for inserting a membership.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberInsert {
    pub email: String,
    pub role: MemberRole,
    #[serde(rename = "type")]
    pub member_type: MemberType,
}

impl MemberInsert {
    /// An individual-account membership with role `MEMBER`, the only kind
    /// this tool creates.
    #[must_use]
    pub fn user(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            role: MemberRole::Member,
            member_type: MemberType::User,
        }
    }
}

/// One page of a group list response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroupsPage {
    #[serde(default)]
    groups: Vec<DirectoryGroup>,
    #[serde(default)]
    next_page_token: Option<String>,
}

/// One page of a membership list response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MembersPage {
    #[serde(default)]
    members: Vec<DirectoryMember>,
    #[serde(default)]
    next_page_token: Option<String>,
}

impl DirectorySession {
    /// Fetches one group by its key (group email or unique ID).
    #[instrument(skip(self))]
    pub async fn get_group(&self, group_key: &str) -> GoogleResult<DirectoryGroup> {
        let url = format!("{}/groups/{}", self.client().base_url(), group_key);
        self.client().get(&url).await
    }

    /// Creates a group with the given display name and email.
    #[instrument(skip(self))]
    pub async fn insert_group(&self, name: &str, email: &str) -> GoogleResult<DirectoryGroup> {
        info!("Creating group: {email}");

        let url = format!("{}/groups", self.client().base_url());
        let body = GroupInsert {
            email: email.to_string(),
            name: name.to_string(),
        };
        let created: DirectoryGroup = self.client().post(&url, &body).await?;

        info!("Group created with ID: {}", created.id);

        Ok(created)
    }

    /// Lists all groups of the configured customer, following pagination.
    #[instrument(skip(self))]
    pub async fn list_groups(&self) -> GoogleResult<Vec<DirectoryGroup>> {
        let base = format!(
            "{}/groups?customer={}&maxResults={}",
            self.client().base_url(),
            urlencoding::encode(&self.config().customer),
            self.config().page_size
        );

        let mut groups = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let url = match &page_token {
                Some(token) => format!("{base}&pageToken={}", urlencoding::encode(token)),
                None => base.clone(),
            };
            let page: GroupsPage = self.client().get(&url).await?;
            groups.extend(page.groups);
            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(groups)
    }

    /// Lists the memberships of a group, following pagination.
    #[instrument(skip(self))]
    pub async fn list_members(&self, group_key: &str) -> GoogleResult<Vec<DirectoryMember>> {
        let base = format!(
            "{}/groups/{}/members?maxResults={}",
            self.client().base_url(),
            group_key,
            self.config().page_size
        );

        let mut members = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let url = match &page_token {
                Some(token) => format!("{base}&pageToken={}", urlencoding::encode(token)),
                None => base.clone(),
            };
            let page: MembersPage = self.client().get(&url).await?;
            members.extend(page.members);
            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(members)
    }

    /// Adds an individual account to a group with role `MEMBER`, type `USER`.
    #[instrument(skip(self))]
    pub async fn insert_member(
        &self,
        group_key: &str,
        email: &str,
    ) -> GoogleResult<DirectoryMember> {
        let url = format!("{}/groups/{}/members", self.client().base_url(), group_key);
        let body = MemberInsert::user(email);
        self.client().post(&url, &body).await
    }
}
