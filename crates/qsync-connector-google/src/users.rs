//! Directory account (user) models and operations.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::GoogleResult;
use crate::session::DirectorySession;

/// An individual mailbox account in the directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryUser {
    pub id: String,
    pub primary_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<UserName>,
    #[serde(default)]
    pub suspended: bool,
}

/// Name fields of a directory account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserName {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
}

/// One page of a user list response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsersPage {
    #[serde(default)]
    users: Vec<DirectoryUser>,
    #[serde(default)]
    next_page_token: Option<String>,
}

impl DirectorySession {
    /// Fetches one account by its key (primary email or unique ID).
    #[instrument(skip(self))]
    pub async fn get_user(&self, user_key: &str) -> GoogleResult<DirectoryUser> {
        let url = format!("{}/users/{}", self.client().base_url(), user_key);
        self.client().get(&url).await
    }

    /// Lists all accounts of the configured customer, following pagination.
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> GoogleResult<Vec<DirectoryUser>> {
        let base = format!(
            "{}/users?customer={}&maxResults={}",
            self.client().base_url(),
            urlencoding::encode(&self.config().customer),
            self.config().page_size
        );

        let mut users = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let url = match &page_token {
                Some(token) => format!("{base}&pageToken={}", urlencoding::encode(token)),
                None => base.clone(),
            };
            let page: UsersPage = self.client().get(&url).await?;
            users.extend(page.users);
            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(users)
    }
}
