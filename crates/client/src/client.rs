//! REST client for the Kalvi API.
//!
//! Every call goes to `{base_url}/api/v1/...` with `Authorization: Bearer`
//! when the [`TokenStore`] holds a token. A 401 clears the stored token and
//! surfaces as [`ClientError::Unauthorized`]; the client never retries.

use std::sync::Arc;

use kalvi_core::editor::ExerciseEditor;
use kalvi_core::language::Language;
use kalvi_core::types::DbId;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::error::{extract_message, ClientError};
use crate::models::{
    Activity, ActivityInput, ActivityTypeInfo, AuthSession, ContentValidation, Credentials,
    CurriculumInput, DataResponse, Exercise, HealthStatus, Lesson, Level, MainActivity,
    MediaAsset, RenderView, UserProfile,
};
use crate::token::TokenStore;

pub type ClientResult<T> = Result<T, ClientError>;

/// HTTP client for one Kalvi API server.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    /// * `base_url` - server root, e.g. `http://localhost:3000`.
    pub fn new(base_url: impl Into<String>, tokens: impl TokenStore + 'static) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, Arc::new(tokens))
    }

    /// Reuse an existing [`reqwest::Client`] and a shared token store.
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        tokens: Arc<dyn TokenStore>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tokens,
        }
    }

    pub fn token_store(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    pub fn is_authenticated(&self) -> bool {
        self.tokens.token().is_some()
    }

    // ---- health & auth ----

    /// GET /health (outside `/api/v1`).
    pub async fn health(&self) -> ClientResult<HealthStatus> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        self.parse_response(response).await
    }

    /// Register a learner account and keep its access token.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> ClientResult<AuthSession> {
        let body = json!({"username": username, "email": email, "password": password});
        let session: AuthSession = self
            .send(self.request(Method::POST, "/auth/register").json(&body))
            .await?;
        self.tokens.set_token(&session.access_token)?;
        Ok(session)
    }

    /// Sign in and keep the access token.
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<AuthSession> {
        let session: AuthSession = self
            .send(
                self.request(Method::POST, "/auth/login")
                    .json(&Credentials { username, password }),
            )
            .await?;
        self.tokens.set_token(&session.access_token)?;
        tracing::debug!(user_id = session.user.id, "Signed in");
        Ok(session)
    }

    /// Trade a refresh token for a new pair and keep the new access token.
    pub async fn refresh(&self, refresh_token: &str) -> ClientResult<AuthSession> {
        let session: AuthSession = self
            .send(
                self.request(Method::POST, "/auth/refresh")
                    .json(&json!({"refresh_token": refresh_token})),
            )
            .await?;
        self.tokens.set_token(&session.access_token)?;
        Ok(session)
    }

    /// Revoke the server sessions, then forget the local token.
    pub async fn logout(&self) -> ClientResult<()> {
        let result = self
            .send_empty(self.request(Method::POST, "/auth/logout"))
            .await;
        self.tokens.clear()?;
        result
    }

    pub async fn me(&self) -> ClientResult<UserProfile> {
        self.send(self.request(Method::GET, "/auth/me")).await
    }

    // ---- activity types & content ----

    pub async fn activity_types(
        &self,
        lang: Option<Language>,
    ) -> ClientResult<Vec<ActivityTypeInfo>> {
        self.send_list(with_lang(self.request(Method::GET, "/activity-types"), lang))
            .await
    }

    pub async fn activity_template(&self, activity_type_id: i32) -> ClientResult<Value> {
        self.send(self.request(
            Method::GET,
            &format!("/activity-types/{activity_type_id}/template"),
        ))
        .await
    }

    pub async fn validate_content(
        &self,
        activity_type_id: i32,
        content: &Value,
    ) -> ClientResult<ContentValidation> {
        self.send(
            self.request(Method::POST, "/content/validate")
                .json(&json!({"activityTypeId": activity_type_id, "content": content})),
        )
        .await
    }

    // ---- levels ----

    pub async fn list_levels(&self, lang: Option<Language>) -> ClientResult<Vec<Level>> {
        self.send_list(with_lang(self.request(Method::GET, "/levels"), lang))
            .await
    }

    pub async fn get_level(&self, id: DbId, lang: Option<Language>) -> ClientResult<Level> {
        self.send(with_lang(
            self.request(Method::GET, &format!("/levels/{id}")),
            lang,
        ))
        .await
    }

    pub async fn create_level(&self, input: &CurriculumInput) -> ClientResult<Level> {
        self.send(self.request(Method::POST, "/levels").json(&input.to_body()))
            .await
    }

    pub async fn update_level(&self, id: DbId, input: &CurriculumInput) -> ClientResult<Level> {
        self.send(
            self.request(Method::PUT, &format!("/levels/{id}"))
                .json(&input.to_body()),
        )
        .await
    }

    pub async fn delete_level(&self, id: DbId) -> ClientResult<()> {
        self.send_empty(self.request(Method::DELETE, &format!("/levels/{id}")))
            .await
    }

    // ---- lessons ----

    pub async fn list_lessons(
        &self,
        level_id: DbId,
        lang: Option<Language>,
    ) -> ClientResult<Vec<Lesson>> {
        self.send_list(with_lang(
            self.request(Method::GET, &format!("/levels/{level_id}/lessons")),
            lang,
        ))
        .await
    }

    pub async fn get_lesson(&self, id: DbId, lang: Option<Language>) -> ClientResult<Lesson> {
        self.send(with_lang(
            self.request(Method::GET, &format!("/lessons/{id}")),
            lang,
        ))
        .await
    }

    pub async fn create_lesson(
        &self,
        level_id: DbId,
        input: &CurriculumInput,
    ) -> ClientResult<Lesson> {
        self.send(
            self.request(Method::POST, &format!("/levels/{level_id}/lessons"))
                .json(&input.to_body()),
        )
        .await
    }

    pub async fn update_lesson(&self, id: DbId, input: &CurriculumInput) -> ClientResult<Lesson> {
        self.send(
            self.request(Method::PUT, &format!("/lessons/{id}"))
                .json(&input.to_body()),
        )
        .await
    }

    pub async fn delete_lesson(&self, id: DbId) -> ClientResult<()> {
        self.send_empty(self.request(Method::DELETE, &format!("/lessons/{id}")))
            .await
    }

    // ---- main activities ----

    pub async fn list_main_activities(
        &self,
        lang: Option<Language>,
    ) -> ClientResult<Vec<MainActivity>> {
        self.send_list(with_lang(self.request(Method::GET, "/main-activities"), lang))
            .await
    }

    pub async fn get_main_activity(
        &self,
        id: DbId,
        lang: Option<Language>,
    ) -> ClientResult<MainActivity> {
        self.send(with_lang(
            self.request(Method::GET, &format!("/main-activities/{id}")),
            lang,
        ))
        .await
    }

    pub async fn create_main_activity(&self, input: &CurriculumInput) -> ClientResult<MainActivity> {
        self.send(
            self.request(Method::POST, "/main-activities")
                .json(&input.to_body()),
        )
        .await
    }

    pub async fn update_main_activity(
        &self,
        id: DbId,
        input: &CurriculumInput,
    ) -> ClientResult<MainActivity> {
        self.send(
            self.request(Method::PUT, &format!("/main-activities/{id}"))
                .json(&input.to_body()),
        )
        .await
    }

    pub async fn delete_main_activity(&self, id: DbId) -> ClientResult<()> {
        self.send_empty(self.request(Method::DELETE, &format!("/main-activities/{id}")))
            .await
    }

    // ---- activities ----

    pub async fn list_activities(
        &self,
        lesson_id: DbId,
        lang: Option<Language>,
    ) -> ClientResult<Vec<Activity>> {
        self.send_list(with_lang(
            self.request(Method::GET, &format!("/lessons/{lesson_id}/activities")),
            lang,
        ))
        .await
    }

    pub async fn get_activity(&self, id: DbId, lang: Option<Language>) -> ClientResult<Activity> {
        self.send(with_lang(
            self.request(Method::GET, &format!("/activities/{id}")),
            lang,
        ))
        .await
    }

    pub async fn create_activity(
        &self,
        lesson_id: DbId,
        input: &ActivityInput,
    ) -> ClientResult<Activity> {
        self.send(
            self.request(Method::POST, &format!("/lessons/{lesson_id}/activities"))
                .json(&input.to_body()),
        )
        .await
    }

    pub async fn update_activity(&self, id: DbId, input: &ActivityInput) -> ClientResult<Activity> {
        self.send(
            self.request(Method::PUT, &format!("/activities/{id}"))
                .json(&input.to_body()),
        )
        .await
    }

    pub async fn delete_activity(&self, id: DbId) -> ClientResult<()> {
        self.send_empty(self.request(Method::DELETE, &format!("/activities/{id}")))
            .await
    }

    pub async fn render_activity(&self, id: DbId) -> ClientResult<RenderView> {
        self.send(self.request(Method::GET, &format!("/activities/{id}/render")))
            .await
    }

    pub async fn preview_activity(
        &self,
        activity_type_id: i32,
        content: &Value,
    ) -> ClientResult<RenderView> {
        self.send(
            self.request(Method::POST, "/activities/preview")
                .json(&json!({"activityTypeId": activity_type_id, "content": content})),
        )
        .await
    }

    // ---- exercises ----

    pub async fn list_exercises(&self, activity_id: DbId) -> ClientResult<Vec<Exercise>> {
        self.send_list(self.request(
            Method::GET,
            &format!("/activities/{activity_id}/exercises"),
        ))
        .await
    }

    pub async fn create_exercise(
        &self,
        activity_id: DbId,
        content: &Value,
    ) -> ClientResult<Exercise> {
        self.send(
            self.request(Method::POST, &format!("/activities/{activity_id}/exercises"))
                .json(&json!({"content_json": content})),
        )
        .await
    }

    /// Replace every exercise of an activity with the editor's drafts.
    ///
    /// Nothing is sent while any draft is invalid JSON.
    pub async fn replace_exercises(
        &self,
        activity_id: DbId,
        editor: &ExerciseEditor,
    ) -> ClientResult<Vec<Exercise>> {
        let values = editor.values()?;
        self.send_list(
            self.request(Method::PUT, &format!("/activities/{activity_id}/exercises"))
                .json(&values),
        )
        .await
    }

    pub async fn get_exercise(&self, id: DbId) -> ClientResult<Exercise> {
        self.send(self.request(Method::GET, &format!("/exercises/{id}")))
            .await
    }

    pub async fn update_exercise(&self, id: DbId, content: &Value) -> ClientResult<Exercise> {
        self.send(
            self.request(Method::PUT, &format!("/exercises/{id}"))
                .json(&json!({"content_json": content})),
        )
        .await
    }

    pub async fn delete_exercise(&self, id: DbId) -> ClientResult<()> {
        self.send_empty(self.request(Method::DELETE, &format!("/exercises/{id}")))
            .await
    }

    // ---- multilingual views ----

    pub async fn multilingual_levels(&self) -> ClientResult<Vec<Level>> {
        self.send_list(self.request(Method::GET, "/multilingual/levels"))
            .await
    }

    pub async fn multilingual_activities(&self, lesson_id: DbId) -> ClientResult<Vec<Activity>> {
        self.send_list(
            self.request(Method::GET, "/multilingual/activities")
                .query(&[("lesson_id", lesson_id)]),
        )
        .await
    }

    // ---- media ----

    pub async fn upload_media(&self, file_name: &str, bytes: Vec<u8>) -> ClientResult<MediaAsset> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);
        self.send(self.request(Method::POST, "/media").multipart(form))
            .await
    }

    pub async fn get_media(&self, id: DbId) -> ClientResult<MediaAsset> {
        self.send(self.request(Method::GET, &format!("/media/{id}")))
            .await
    }

    // ---- private helpers ----

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}/api/v1{path}", self.base_url));
        match self.tokens.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ClientResult<T> {
        let response = builder.send().await?;
        self.parse_response(response).await
    }

    async fn send_list<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ClientResult<Vec<T>> {
        let envelope: DataResponse<T> = self.send(builder).await?;
        Ok(envelope.data)
    }

    async fn send_empty(&self, builder: RequestBuilder) -> ClientResult<()> {
        let response = builder.send().await?;
        self.ensure_success(response).await?;
        Ok(())
    }

    /// Turn non-2xx answers into errors. A 401 also drops the stored token.
    async fn ensure_success(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        let message = extract_message(&body, status.canonical_reason().unwrap_or("Error"));

        if status == StatusCode::UNAUTHORIZED {
            if let Err(err) = self.tokens.clear() {
                tracing::warn!(error = %err, "Failed to clear token after 401");
            }
            tracing::debug!(%message, "Session rejected; token cleared");
            return Err(ClientError::Unauthorized { message });
        }

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn parse_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<T> {
        let response = self.ensure_success(response).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

fn with_lang(builder: RequestBuilder, lang: Option<Language>) -> RequestBuilder {
    match lang {
        Some(lang) => builder.query(&[("lang", lang.code())]),
        None => builder,
    }
}
