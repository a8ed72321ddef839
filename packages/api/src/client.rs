//! # HTTP client for the PocketBase-compatible backend
//!
//! [`PocketBase`] implements [`RecordSource`] over the backend's REST API:
//!
//! | Operation | Request |
//! |-----------|---------|
//! | list | `GET /api/collections/{c}/records?page&perPage&sort&filter` |
//! | get one | `GET /api/collections/{c}/records/{id}` |
//! | create | `POST /api/collections/{c}/records` (JSON) |
//! | update | `PATCH /api/collections/{c}/records/{id}` (JSON) |
//! | delete | `DELETE /api/collections/{c}/records/{id}` (204) |
//! | health | `GET /api/health`, raced against a short timeout |
//!
//! Every request carries `Authorization: <token>` while a session is held. A request
//! that gets no HTTP answer fails with status `0`; any other failure carries the
//! backend's status and message.

use std::time::Duration;

use futures::future::{self, Either};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use store::{BackendError, ListQuery, Page, Record, RecordSource, SiteConfig};
use tracing::{debug, warn};

use crate::auth::AuthStore;
use crate::error::{from_status, from_transport};
use crate::models::{ProfileUpdate, UserInfo};

/// Collection holding user accounts.
pub const USERS: &str = "users";
/// Thumbnail size requested for avatars.
pub const AVATAR_THUMB: &str = "100x100";

const DEFAULT_HEALTH_TIMEOUT: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone)]
pub struct PocketBase {
    base_url: String,
    http: reqwest::Client,
    auth: AuthStore,
    health_timeout: Duration,
}

impl PocketBase {
    /// Client for `base_url` with an in-memory session.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
            auth: AuthStore::new(),
            health_timeout: DEFAULT_HEALTH_TIMEOUT,
        }
    }

    /// Client for the configured backend, restoring the persisted session.
    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(&config.backend.url)
            .with_auth_store(AuthStore::restore())
            .with_health_timeout(Duration::from_millis(config.backend.health_timeout_ms))
    }

    pub fn with_auth_store(mut self, auth: AuthStore) -> Self {
        self.auth = auth;
        self
    }

    pub fn with_health_timeout(mut self, timeout: Duration) -> Self {
        self.health_timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn auth_store(&self) -> &AuthStore {
        &self.auth
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn records_url(&self, collection: &str) -> String {
        self.url(&format!("/api/collections/{collection}/records"))
    }

    fn record_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{}", self.records_url(collection), id)
    }

    pub(crate) fn request(&self, method: Method, url: String) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match self.auth.token() {
            Some(token) => builder.header(reqwest::header::AUTHORIZATION, token),
            None => builder,
        }
    }

    /// Send and decode a JSON answer.
    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, BackendError> {
        let response = builder.send().await.map_err(from_transport)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(from_status(status, &body));
        }
        response.json::<T>().await.map_err(|e| {
            BackendError::new(status.as_u16(), format!("Unexpected response from server: {e}"))
        })
    }

    async fn send_no_content(&self, builder: RequestBuilder) -> Result<(), BackendError> {
        let response = builder.send().await.map_err(from_transport)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(from_status(status, &body));
        }
        Ok(())
    }

    /// URL of a user's avatar thumbnail, `None` when no avatar is set.
    pub fn file_url(&self, user: &UserInfo, thumb: Option<&str>) -> Option<String> {
        if !user.has_avatar() {
            return None;
        }
        let collection = if user.collection_id.is_empty() {
            user.collection_name.as_str()
        } else {
            user.collection_id.as_str()
        };
        let collection = if collection.is_empty() { USERS } else { collection };
        let mut url = self.url(&format!("/api/files/{collection}/{}/{}", user.id, user.avatar));
        if let Some(thumb) = thumb {
            url.push_str("?thumb=");
            url.push_str(thumb);
        }
        Some(url)
    }

    /// Update name, email and optionally the avatar of user `id` in one request.
    ///
    /// When `id` is the signed-in user the session's user model is refreshed.
    pub async fn update_profile(
        &self,
        id: &str,
        update: ProfileUpdate,
    ) -> Result<UserInfo, BackendError> {
        let mut form = reqwest::multipart::Form::new()
            .text("name", update.name)
            .text("email", update.email);
        if let Some(avatar) = update.avatar {
            let mime = avatar.mime();
            let part = reqwest::multipart::Part::bytes(avatar.bytes)
                .file_name(avatar.file_name)
                .mime_str(mime)
                .map_err(|e| BackendError::new(400, format!("Invalid avatar: {e}")))?;
            form = form.part("avatar", part);
        }

        let builder = self
            .request(Method::PATCH, self.record_url(USERS, id))
            .multipart(form);
        let user: UserInfo = self.send(builder).await.inspect_err(|err| {
            warn!(id, %err, "profile update failed");
        })?;
        if self.auth.user().is_some_and(|current| current.id == user.id) {
            self.auth.update_user(user.clone());
        }
        debug!(id, "profile updated");
        Ok(user)
    }
}

#[cfg(target_arch = "wasm32")]
async fn sleep(duration: Duration) {
    gloo_timers::future::sleep(duration).await;
}

#[cfg(not(target_arch = "wasm32"))]
async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}

impl RecordSource for PocketBase {
    async fn health(&self) -> bool {
        let probe = self.http.get(self.url("/api/health")).send();
        let timeout = sleep(self.health_timeout);
        futures::pin_mut!(probe, timeout);
        match future::select(probe, timeout).await {
            Either::Left((Ok(response), _)) => response.status().is_success(),
            Either::Left((Err(e), _)) => {
                warn!("health probe failed: {e}");
                false
            }
            Either::Right(_) => {
                warn!(timeout_ms = self.health_timeout.as_millis() as u64, "health probe timed out");
                false
            }
        }
    }

    async fn list<R: Record>(&self, query: &ListQuery) -> Result<Page<R>, BackendError> {
        debug!(collection = R::COLLECTION, page = query.page, "listing records");
        let builder = self
            .request(Method::GET, self.records_url(R::COLLECTION))
            .query(&query.to_params());
        self.send(builder).await
    }

    async fn get_one<R: Record>(&self, id: &str) -> Result<R, BackendError> {
        let builder = self.request(Method::GET, self.record_url(R::COLLECTION, id));
        self.send(builder).await
    }

    async fn create<R: Record>(&self, input: &R::Input) -> Result<R, BackendError> {
        let builder = self
            .request(Method::POST, self.records_url(R::COLLECTION))
            .json(input);
        self.send(builder).await
    }

    async fn update<R: Record>(&self, id: &str, patch: &R::Patch) -> Result<R, BackendError> {
        let builder = self
            .request(Method::PATCH, self.record_url(R::COLLECTION, id))
            .json(patch);
        self.send(builder).await
    }

    async fn delete<R: Record>(&self, id: &str) -> Result<(), BackendError> {
        let builder = self.request(Method::DELETE, self.record_url(R::COLLECTION, id));
        self.send_no_content(builder).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::token::token_expiring_at;
    use crate::auth::AuthRecord;
    use crate::models::AvatarUpload;
    use httpmock::prelude::*;
    use httpmock::MockServer;
    use serde_json::json;
    use store::models::{Dream, Letter, NewLetter, Review};
    use store::Filter;

    fn user() -> UserInfo {
        UserInfo {
            id: "u1".into(),
            collection_id: "_pb_users_auth_".into(),
            collection_name: "users".into(),
            email: "ada@example.com".into(),
            name: "Ada".into(),
            avatar: "ada_x1.png".into(),
            verified: true,
        }
    }

    fn signed_in(server: &MockServer) -> (PocketBase, String) {
        let client = PocketBase::new(server.base_url());
        let token = token_expiring_at(4_000_000_000);
        client.auth_store().save(AuthRecord {
            token: token.clone(),
            user: user(),
        });
        (client, token)
    }

    #[tokio::test]
    async fn test_list_sends_query_and_token() {
        let server = MockServer::start_async().await;
        let (client, token) = signed_in(&server);
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/collections/reviews/records")
                .query_param("page", "1")
                .query_param("perPage", "50")
                .query_param("sort", "-created")
                .query_param("filter", "category = \"Coffee\"")
                .header("Authorization", token.as_str());
            then.status(200).json_body(json!({
                "page": 1,
                "perPage": 50,
                "totalItems": 1,
                "totalPages": 1,
                "items": [{
                    "id": "r1",
                    "collectionName": "reviews",
                    "category": "Coffee",
                    "title": "Latte",
                    "description": "",
                    "rating": 7.5,
                    "user": "Ada",
                    "created": "2025-03-04 12:00:00.000Z",
                    "updated": "2025-03-04 12:00:00.000Z"
                }]
            }));
        });

        let query = ListQuery::newest_first()
            .with_per_page(50)
            .with_filter(Filter::equals("category", "Coffee"));
        let page = client.list::<Review>(&query).await.unwrap();
        mock.assert_async().await;
        assert_eq!(page.total_items, 1);
        assert_eq!(page.items[0].rating, 7.5);
    }

    #[tokio::test]
    async fn test_forbidden_maps_status_and_message() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/collections/dreams/records");
            then.status(403).json_body(json!({
                "code": 403,
                "message": "Only superusers can perform this action.",
                "data": {}
            }));
        });

        let client = PocketBase::new(server.base_url());
        let err = client
            .list::<Dream>(&ListQuery::newest_first())
            .await
            .unwrap_err();
        assert_eq!(err.status, 403);
        assert_eq!(
            err.describe("view these dreams"),
            "You do not have permission to view these dreams."
        );
    }

    #[tokio::test]
    async fn test_unreachable_server_is_status_zero() {
        let client = PocketBase::new("http://127.0.0.1:1");
        let err = client.get_one::<Letter>("l1").await.unwrap_err();
        assert_eq!(err.status, 0);
        assert!(!client.health().await);
    }

    #[tokio::test]
    async fn test_health_probe() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/health");
            then.status(200)
                .json_body(json!({"code": 200, "message": "API is healthy."}));
        });
        let client = PocketBase::new(server.base_url());
        assert!(client.health().await);
    }

    #[tokio::test]
    async fn test_slow_health_probe_times_out() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/health");
            then.status(200).delay(Duration::from_millis(1500));
        });
        let client = PocketBase::new(server.base_url())
            .with_health_timeout(Duration::from_millis(50));
        assert!(!client.health().await);
    }

    #[tokio::test]
    async fn test_create_posts_json_body() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/collections/letters/records")
                .json_body(json!({
                    "title": "Hi",
                    "to": "Mom",
                    "from": "Anonymous",
                    "content": "Miss you",
                    "user": "u1"
                }));
            then.status(200).json_body(json!({
                "id": "l1",
                "title": "Hi",
                "to": "Mom",
                "from": "Anonymous",
                "content": "Miss you",
                "user": "u1",
                "created": "2025-03-04 12:00:00.000Z",
                "updated": "2025-03-04 12:00:00.000Z"
            }));
        });

        let client = PocketBase::new(server.base_url());
        let letter = client
            .create::<Letter>(&NewLetter {
                title: "Hi".into(),
                to: "Mom".into(),
                from: "Anonymous".into(),
                content: "Miss you".into(),
                user: "u1".into(),
            })
            .await
            .unwrap();
        mock.assert_async().await;
        assert_eq!(letter.id, "l1");
        assert_eq!(letter.sender(), "Anonymous");
    }

    #[tokio::test]
    async fn test_delete_accepts_no_content() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(DELETE).path("/api/collections/dreams/records/d1");
            then.status(204);
        });
        let client = PocketBase::new(server.base_url());
        client.delete::<Dream>("d1").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_profile_update_refreshes_session() {
        let server = MockServer::start_async().await;
        let (client, _) = signed_in(&server);
        let rx = client.auth_store().subscribe();
        let mock = server.mock(|when, then| {
            when.method(PATCH).path("/api/collections/users/records/u1");
            then.status(200).json_body(json!({
                "id": "u1",
                "collectionId": "_pb_users_auth_",
                "collectionName": "users",
                "email": "grace@example.com",
                "name": "Grace",
                "avatar": "grace_x2.png",
                "verified": true
            }));
        });

        let updated = client
            .update_profile(
                "u1",
                ProfileUpdate {
                    name: "Grace".into(),
                    email: "grace@example.com".into(),
                    avatar: Some(AvatarUpload::new("grace.png", vec![137, 80, 78, 71])),
                },
            )
            .await
            .unwrap();
        mock.assert_async().await;
        assert_eq!(updated.name, "Grace");
        assert_eq!(client.auth_store().user().unwrap().name, "Grace");
        assert_eq!(
            rx.borrow().as_ref().map(|r| r.user.avatar.clone()).as_deref(),
            Some("grace_x2.png")
        );
    }

    #[test]
    fn avatar_file_url() {
        let client = PocketBase::new("http://127.0.0.1:8090/");
        assert_eq!(
            client.file_url(&user(), Some(AVATAR_THUMB)).as_deref(),
            Some("http://127.0.0.1:8090/api/files/_pb_users_auth_/u1/ada_x1.png?thumb=100x100")
        );
        let mut no_avatar = user();
        no_avatar.avatar.clear();
        assert_eq!(client.file_url(&no_avatar, None), None);
    }
}
