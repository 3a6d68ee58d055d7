//! Structured analysis results produced by the backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// One structured analysis result attached to a conversation turn.
///
/// The `artifact_type` tells a renderer how to interpret `data`; the payload
/// itself is opaque at this layer. Artifacts are immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    /// Unique within a session, assigned at creation.
    pub id: Uuid,
    /// Kind of analysis this artifact carries.
    #[serde(rename = "type")]
    pub artifact_type: ArtifactType,
    /// Short display title.
    pub title: String,
    /// Optional longer description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Type-specific payload; opaque here.
    pub data: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-modified timestamp. Equal to `created_at` until an edit
    /// operation exists.
    pub updated_at: DateTime<Utc>,
}

/// Fixed set of artifact kinds a renderer knows how to display.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactType {
    /// Price recommendation with range and rationale.
    PricingAnalysis,
    /// Value-based pricing model breakdown.
    ValueBasedModel,
    /// Competitor positioning matrix.
    CompetitiveMatrix,
    /// Price/demand elasticity curve.
    ElasticityChart,
    /// Customer segment map.
    SegmentationMap,
    /// Price waterfall breakdown.
    WaterfallChart,
    /// Free-form markdown report.
    MarkdownReport,
    /// Tabular data.
    DataTable,
}

impl ArtifactType {
    /// Wire name for the artifact kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactType::PricingAnalysis => "pricing-analysis",
            ArtifactType::ValueBasedModel => "value-based-model",
            ArtifactType::CompetitiveMatrix => "competitive-matrix",
            ArtifactType::ElasticityChart => "elasticity-chart",
            ArtifactType::SegmentationMap => "segmentation-map",
            ArtifactType::WaterfallChart => "waterfall-chart",
            ArtifactType::MarkdownReport => "markdown-report",
            ArtifactType::DataTable => "data-table",
        }
    }
}
