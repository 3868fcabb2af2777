// crates/api/src/client.rs
//! Typed HTTP client for the media-monitoring backend.
//!
//! One method per endpoint, JSON in and out. All methods are plain reads or
//! one-shot writes; the only long-running operation (`start_bulk_processing`)
//! is fire-and-forget — the server answers before the work is done, the body
//! carries nothing the caller can rely on, and progress is observed solely
//! through [`ApiClient::bulk_progress`].

use std::time::Duration;

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::types::*;

/// Default request timeout. Polling callers run well under this; one-shot
/// AI actions (insight generation) can take the full minute server-side.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Client for the remote media-monitoring REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

/// `{"status": ..., "message": ..., "data": {...}}` envelope used by the
/// client/project creation endpoints.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

impl ApiClient {
    /// Create a client for the given base URL with the default timeout.
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client with an explicit request timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> ApiResult<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Ok(Self { http, base_url })
    }

    /// The base URL this client talks to (no trailing slash).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Map a non-2xx response to [`ApiError::Server`], passing 2xx through.
    async fn check(resp: Response) -> ApiResult<Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(ApiError::server(status.as_u16(), &body))
    }

    /// Decode a checked response body, mapping decode failures to
    /// [`ApiError::Malformed`] (a reachable server that sends garbage is not
    /// a network problem).
    async fn decode<T: DeserializeOwned>(resp: Response, context: &str) -> ApiResult<T> {
        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Malformed {
            context: format!("{context}: {e}"),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        tracing::debug!(path, "GET");
        let resp = self.http.get(self.url(path)).send().await?;
        let resp = Self::check(resp).await?;
        Self::decode(resp, path).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        tracing::debug!(path, "POST");
        let resp = self.http.post(self.url(path)).json(body).send().await?;
        let resp = Self::check(resp).await?;
        Self::decode(resp, path).await
    }

    // -- Dashboard ------------------------------------------------------------

    /// `GET /dashboard/stats`
    pub async fn dashboard_stats(&self) -> ApiResult<DashboardStats> {
        self.get_json("/dashboard/stats").await
    }

    /// `GET /media/latest/{n}`
    pub async fn latest_media(&self, n: u32) -> ApiResult<Vec<LatestItem>> {
        self.get_json(&format!("/media/latest/{n}")).await
    }

    // -- Bulk processing ------------------------------------------------------

    /// `POST /media/process/all` — kick off the bulk AI-processing job.
    ///
    /// Fire-and-forget: a 2xx status means the job is presumed running and
    /// the caller must begin polling [`ApiClient::bulk_progress`] regardless
    /// of what (if anything) the body says.
    pub async fn start_bulk_processing(&self) -> ApiResult<()> {
        let resp = self
            .http
            .post(self.url("/media/process/all"))
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }

    /// `GET /media/process/progress` — idempotent read of job progress.
    ///
    /// A payload missing any of `total`/`done`/`running` is malformed.
    pub async fn bulk_progress(&self) -> ApiResult<JobProgress> {
        self.get_json("/media/process/progress").await
    }

    // -- Media items ----------------------------------------------------------

    /// `GET /media/`
    pub async fn list_media(&self) -> ApiResult<Vec<MediaItem>> {
        self.get_json("/media/").await
    }

    /// `GET /media/{id}`
    pub async fn media_item(&self, media_id: &str) -> ApiResult<MediaItemDetail> {
        self.get_json(&format!("/media/{media_id}")).await
    }

    /// `POST /process/media-item/{id}` — analyze a single item.
    pub async fn process_media_item(&self, media_id: &str) -> ApiResult<()> {
        let resp = self
            .http
            .post(self.url(&format!("/process/media-item/{media_id}")))
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }

    // -- Clients / projects / sources -----------------------------------------

    /// `POST /clients/`
    pub async fn create_client(&self, client: &ClientCreate) -> ApiResult<CreatedClient> {
        let envelope: Envelope<CreatedClient> = self.post_json("/clients/", client).await?;
        Ok(envelope.data)
    }

    /// `GET /projects`
    pub async fn list_projects(&self) -> ApiResult<Vec<ProjectSummary>> {
        self.get_json("/projects").await
    }

    /// `POST /projects/`
    pub async fn create_project(&self, project: &ProjectCreate) -> ApiResult<CreatedProject> {
        let envelope: Envelope<CreatedProject> = self.post_json("/projects/", project).await?;
        Ok(envelope.data)
    }

    /// `GET /media-sources/`
    pub async fn list_media_sources(&self) -> ApiResult<Vec<MediaSource>> {
        self.get_json("/media-sources/").await
    }

    /// `POST /media-sources/`
    pub async fn create_media_source(&self, source: &MediaSourceCreate) -> ApiResult<MediaSource> {
        self.post_json("/media-sources/", source).await
    }

    // -- Scraping -------------------------------------------------------------

    /// `POST /scrape/rss?project_id&source_id`
    pub async fn scrape_rss(&self, project_id: &str, source_id: &str) -> ApiResult<ScrapeOutcome> {
        let resp = self
            .http
            .post(self.url("/scrape/rss"))
            .query(&[("project_id", project_id), ("source_id", source_id)])
            .send()
            .await?;
        let resp = Self::check(resp).await?;
        Self::decode(resp, "/scrape/rss").await
    }

    // -- Thematic areas -------------------------------------------------------

    /// `GET /project/{id}/thematics`
    pub async fn list_thematics(&self, project_id: &str) -> ApiResult<ProjectThematics> {
        self.get_json(&format!("/project/{project_id}/thematics"))
            .await
    }

    /// `POST /project/{id}/thematics`
    pub async fn create_thematic(
        &self,
        project_id: &str,
        name: &str,
        description: &str,
    ) -> ApiResult<ThematicArea> {
        let body = serde_json::json!({ "name": name, "description": description });
        self.post_json(&format!("/project/{project_id}/thematics"), &body)
            .await
    }

    /// `DELETE /project/thematic/{id}`
    pub async fn delete_thematic(&self, thematic_id: &str) -> ApiResult<()> {
        let resp = self
            .http
            .delete(self.url(&format!("/project/thematic/{thematic_id}")))
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }

    // -- Project analytics & insights -----------------------------------------

    /// `GET /project/{id}/dashboard`
    pub async fn project_dashboard(&self, project_id: &str) -> ApiResult<ProjectDashboard> {
        self.get_json(&format!("/project/{project_id}/dashboard"))
            .await
    }

    /// `GET /project/{id}/media/analysed`
    pub async fn project_analysed_media(
        &self,
        project_id: &str,
    ) -> ApiResult<Vec<AnalysedMediaItem>> {
        self.get_json(&format!("/project/{project_id}/media/analysed"))
            .await
    }

    /// `GET /project/{id}/insights/latest`
    ///
    /// The backend signals "no insight yet" either as a 404 or as a
    /// `{"status":"empty"}` body depending on deployment; both map to
    /// `Ok(None)`.
    pub async fn latest_insight(&self, project_id: &str) -> ApiResult<Option<InsightReport>> {
        let resp = self
            .http
            .get(self.url(&format!("/project/{project_id}/insights/latest")))
            .send()
            .await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let resp = Self::check(resp).await?;
        let value: serde_json::Value = Self::decode(resp, "insights/latest").await?;
        if value.get("executive_summary").is_none() {
            return Ok(None);
        }
        serde_json::from_value(value)
            .map(Some)
            .map_err(|e| ApiError::Malformed {
                context: format!("insights/latest: {e}"),
            })
    }

    /// `POST /project/{id}/insights/generate`
    pub async fn generate_insights(&self, project_id: &str) -> ApiResult<GeneratedInsight> {
        let resp = self
            .http
            .post(self.url(&format!("/project/{project_id}/insights/generate")))
            .send()
            .await?;
        let resp = Self::check(resp).await?;
        Self::decode(resp, "insights/generate").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    async fn client(server: &mockito::ServerGuard) -> ApiClient {
        ApiClient::new(server.url()).expect("client builds")
    }

    #[tokio::test]
    async fn dashboard_stats_parses() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/dashboard/stats")
            .with_status(200)
            .with_body(r#"{"total_projects":3,"total_items":42,"awaiting":10,"completed":32}"#)
            .create_async()
            .await;

        let stats = client(&server).await.dashboard_stats().await.unwrap();
        assert_eq!(stats.total_projects, 3);
        assert_eq!(stats.awaiting, 10);
    }

    #[tokio::test]
    async fn bulk_progress_missing_field_is_malformed() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/media/process/progress")
            .with_status(200)
            .with_body(r#"{"total":10,"done":3}"#)
            .create_async()
            .await;

        let err = client(&server).await.bulk_progress().await.unwrap_err();
        assert!(matches!(err, ApiError::Malformed { .. }), "got {err:?}");
    }

    #[tokio::test]
    async fn bulk_progress_parses() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/media/process/progress")
            .with_status(200)
            .with_body(r#"{"total":10,"done":3,"running":true}"#)
            .create_async()
            .await;

        let p = client(&server).await.bulk_progress().await.unwrap();
        assert_eq!(
            p,
            JobProgress {
                total: 10,
                done: 3,
                running: true
            }
        );
    }

    #[tokio::test]
    async fn start_bulk_ignores_response_body() {
        let mut server = mockito::Server::new_async().await;
        // The real endpoint returns {"status":"queued",...}; any 2xx body,
        // including an empty one, must be accepted.
        let _m = server
            .mock("POST", "/media/process/all")
            .with_status(200)
            .with_body("")
            .create_async()
            .await;

        client(&server)
            .await
            .start_bulk_processing()
            .await
            .expect("fire-and-forget start");
    }

    #[tokio::test]
    async fn non_2xx_surfaces_detail() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/scrape/rss")
            .match_query(mockito::Matcher::Any)
            .with_status(404)
            .with_body(r#"{"detail":"Source ID not found"}"#)
            .create_async()
            .await;

        let err = client(&server)
            .await
            .scrape_rss("p1", "missing")
            .await
            .unwrap_err();
        match err {
            ApiError::Server { status, detail } => {
                assert_eq!(status, 404);
                assert_eq!(detail, "Source ID not found");
            }
            other => panic!("expected Server, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_client_unwraps_envelope() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/clients/")
            .with_status(200)
            .with_body(
                r#"{"status":"success","message":"Client created successfully",
                    "data":{"id":"c1","name":"Acme","contact_email":null}}"#,
            )
            .create_async()
            .await;

        let created = client(&server)
            .await
            .create_client(&ClientCreate {
                name: "Acme".into(),
                contact_email: None,
            })
            .await
            .unwrap();
        assert_eq!(created.id, "c1");
        assert_eq!(created.name, "Acme");
    }

    #[tokio::test]
    async fn latest_insight_maps_404_to_none() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/project/p1/insights/latest")
            .with_status(404)
            .with_body(r#"{"detail":"No insights found for this project"}"#)
            .create_async()
            .await;

        let insight = client(&server).await.latest_insight("p1").await.unwrap();
        assert!(insight.is_none());
    }

    #[tokio::test]
    async fn latest_insight_maps_empty_status_to_none() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/project/p1/insights/latest")
            .with_status(200)
            .with_body(r#"{"status":"empty"}"#)
            .create_async()
            .await;

        let insight = client(&server).await.latest_insight("p1").await.unwrap();
        assert!(insight.is_none());
    }

    #[tokio::test]
    async fn latest_insight_parses_report() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/project/p1/insights/latest")
            .with_status(200)
            .with_body(
                r#"{"insight_id":"i1","project_id":"p1",
                    "generated_at":"2026-08-01T10:00:00","executive_summary":"All quiet."}"#,
            )
            .create_async()
            .await;

        let insight = client(&server)
            .await
            .latest_insight("p1")
            .await
            .unwrap()
            .expect("report present");
        assert_eq!(insight.id, "i1");
        assert_eq!(insight.executive_summary, "All quiet.");
    }

    #[tokio::test]
    async fn base_url_trailing_slash_is_normalized() {
        let client = ApiClient::new("http://127.0.0.1:8000/").unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:8000");
    }
}
