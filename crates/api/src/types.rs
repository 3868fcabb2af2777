// crates/api/src/types.rs
//! Wire types for the media-monitoring API.
//!
//! Field names mirror the JSON the backend emits (snake_case throughout),
//! so no serde renames are needed. Aggregate fields that come from SQL
//! `SUM()`/`COUNT()` can be absent or null on empty tables and default to 0.

use serde::{Deserialize, Serialize};

// =============================================================================
// Bulk processing job
// =============================================================================

/// Progress of the server-side bulk AI-processing job.
///
/// Invariant (enforced by the monitor's reducer, not here): `done <= total`
/// while `running`, and `done == total` once `running` flips false after a
/// completed run. The client only validates that all three fields exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobProgress {
    pub total: u64,
    pub done: u64,
    pub running: bool,
}

// =============================================================================
// Dashboard
// =============================================================================

/// Aggregate counters for the landing dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DashboardStats {
    pub total_projects: u64,
    pub total_items: u64,
    pub awaiting: u64,
    pub completed: u64,
}

/// One row of the "latest items" dashboard table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestItem {
    pub id: String,
    pub title: Option<String>,
    pub media_source_name: String,
    pub analysis_status: String,
}

// =============================================================================
// Media items
// =============================================================================

/// One row of the full media-item listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: String,
    pub raw_title: Option<String>,
    /// First ~120 characters of the article body.
    pub preview: Option<String>,
    pub url: Option<String>,
    pub analysis_status: String,
    pub scraped_at: Option<String>,
    pub source_name: Option<String>,
}

/// Full media item with its per-project AI analyses.
///
/// The analysis rows are `SELECT *` on the backend with no stable schema,
/// so they stay as raw JSON values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItemDetail {
    pub id: String,
    pub raw_title: Option<String>,
    pub raw_text: Option<String>,
    pub url: Option<String>,
    pub analysis_status: String,
    pub source_name: Option<String>,
    #[serde(default)]
    pub industry_name: Option<String>,
    #[serde(default)]
    pub industry_tactic: Option<String>,
    #[serde(default)]
    pub stakeholders: Option<String>,
    #[serde(default)]
    pub targeted_policy: Option<String>,
    #[serde(default)]
    pub geographical_focus: Option<String>,
    #[serde(default)]
    pub outcome_impact: Option<String>,
    #[serde(default)]
    pub project_analysis: Vec<serde_json::Value>,
}

// =============================================================================
// Clients / projects / sources
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientCreate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
}

/// Echo of a freshly created client.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatedClient {
    pub id: String,
    pub name: String,
    pub contact_email: Option<String>,
}

/// A media source attached to a project in the project listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSource {
    pub id: String,
    pub name: String,
    pub last_scraped_at: Option<String>,
}

/// One project in the project listing, with its themes and sources inlined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub id: String,
    pub name: String,
    pub client_name: Option<String>,
    #[serde(default)]
    pub thematic_areas: Vec<String>,
    #[serde(default)]
    pub media_sources: Vec<ProjectSource>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct ProjectCreate {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub client_id: String,
    pub category_ids: Vec<String>,
    pub collaborator_ids: Vec<String>,
    pub media_source_ids: Vec<String>,
    pub report_avenue_ids: Vec<String>,
    pub report_time_ids: Vec<String>,
    pub report_consultation_ids: Vec<String>,
}

/// Echo of a freshly created project.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatedProject {
    pub id: String,
    pub title: String,
    pub client_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaSource {
    pub id: String,
    pub name: String,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaSourceCreate {
    pub name: String,
    pub base_url: String,
}

// =============================================================================
// Scraping
// =============================================================================

/// Result of triggering an RSS scrape for one source.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScrapeOutcome {
    pub source: String,
    pub feed_url: String,
    /// Number of items pulled from the feed in this run.
    pub total: u64,
}

// =============================================================================
// Thematic areas
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThematicArea {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Response of `GET /project/{id}/thematics`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProjectThematics {
    pub project: serde_json::Value,
    pub thematic_areas: Vec<ThematicArea>,
}

// =============================================================================
// Project analytics
// =============================================================================

/// Generic `{label, count}` bucket used by most distribution lists.
/// The backend names the label field after the grouped column, so every
/// variant is aliased onto `label`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountBucket {
    #[serde(
        alias = "name",
        alias = "industry_name",
        alias = "industry_tactic",
        alias = "geographical_focus",
        alias = "outcome_impact"
    )]
    pub label: String,
    pub count: u64,
}

/// Per-project item counters. `SUM()` yields null on empty tables, so each
/// field tolerates both a missing key and an explicit null.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProjectCounts {
    #[serde(default, deserialize_with = "null_count")]
    pub total_items: u64,
    #[serde(default, deserialize_with = "null_count")]
    pub extracted_items: u64,
    #[serde(default, deserialize_with = "null_count")]
    pub awaiting_items: u64,
}

/// Deserialize a SQL aggregate that arrives as a number or null.
fn null_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<u64>::deserialize(deserializer)?;
    Ok(value.unwrap_or(0))
}

/// Header block of the project dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectHeader {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub client_id: Option<String>,
    pub client_name: Option<String>,
}

/// Full analytics payload of `GET /project/{id}/dashboard`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProjectDashboard {
    pub project: ProjectHeader,
    pub stats: ProjectCounts,
    #[serde(default)]
    pub sources: Vec<CountBucket>,
    #[serde(default)]
    pub themes: Vec<CountBucket>,
    #[serde(default)]
    pub industry_names: Vec<CountBucket>,
    #[serde(default)]
    pub tactics: Vec<CountBucket>,
    /// Stakeholder frequencies are computed server-side from a comma-joined
    /// column and arrive as a name→count map rather than a bucket list.
    #[serde(default)]
    pub stakeholders: std::collections::HashMap<String, u64>,
    #[serde(default)]
    pub geographical_focus: Vec<CountBucket>,
    #[serde(default)]
    pub outcomes: Vec<CountBucket>,
}

/// One analysed article of a project, with its AI findings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnalysedMediaItem {
    pub media_id: String,
    pub title: Option<String>,
    pub url: Option<String>,
    pub published_at: Option<String>,
    pub scraped_at: Option<String>,
    #[serde(default)]
    pub industry_name: Option<String>,
    #[serde(default)]
    pub industry_tactic: Option<String>,
    #[serde(default)]
    pub stakeholders: Option<String>,
    #[serde(default)]
    pub targeted_policy: Option<String>,
    #[serde(default)]
    pub geographical_focus: Option<String>,
    #[serde(default)]
    pub outcome_impact: Option<String>,
    /// True when the article matched at least one thematic area.
    #[serde(default)]
    pub relevant: bool,
    #[serde(default)]
    pub matched_thematic_areas: Vec<MatchedTheme>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MatchedTheme {
    pub id: String,
    pub name: String,
}

// =============================================================================
// AI insights
// =============================================================================

/// Latest generated insight report for a project.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InsightReport {
    #[serde(alias = "insight_id")]
    pub id: String,
    pub project_id: String,
    pub generated_at: Option<String>,
    pub executive_summary: String,
}

/// Response of `POST /project/{id}/insights/generate`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeneratedInsight {
    pub insight_id: String,
    /// The full AI report text.
    pub insights: String,
}
