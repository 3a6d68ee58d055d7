//! Deterministic stand-in for the analysis backend.
//!
//! Dispatches on keywords in the user message and replies with canned
//! pricing guidance. A configurable delay simulates backend latency so
//! front-ends can exercise their busy state; tests run with zero delay.

use crate::clock::{Clock, IdSource, RandomIds, SystemClock};
use crate::error::CoreError;
use crate::gateway::{AnalysisGateway, AnalysisReply, AnalysisRequest, FileParser};
use async_trait::async_trait;
use log::debug;
use pricecraft_config::GatewayConfig;
use pricecraft_protocol::{Artifact, ArtifactType};
use serde_json::{Map, Value, json};
use std::sync::Arc;
use std::time::Duration;

const PRICING_REPLY: &str = r#"Based on "The Strategy and Tactics of Pricing", I recommend starting with value-based pricing. Here are the key steps:

1. Identify your customer segments and their willingness to pay
2. Quantify the economic value you deliver to each segment
3. Set prices that capture a fair share of that value
4. Communicate the value proposition clearly

Would you like me to create a detailed pricing analysis for your specific situation?"#;

const ELASTICITY_REPLY: &str = r#"Price elasticity measures how demand changes when you adjust prices. For strategic pricing:

- Elastic demand (>1): Small price changes cause large demand shifts
- Inelastic demand (<1): Demand is relatively stable despite price changes
- Understanding your elasticity helps optimize pricing for maximum profitability

I can analyze your data to determine your price elasticity. Do you have sales and pricing data to upload?"#;

const COMPETITION_REPLY: &str = r#"For competitive pricing strategy, consider:

1. Value differentiation - Don't compete on price alone
2. Strategic positioning - Where do you want to be in the market?
3. Competitive response - Anticipate how competitors will react
4. Customer perception - Price signals quality and value

Would you like me to create a competitive pricing matrix?"#;

const CAPABILITIES_REPLY: &str = r#"I'm here to help with your pricing strategy questions. I can assist with:

- Value-based pricing methodology
- Price elasticity analysis
- Competitive pricing strategies
- Customer segmentation
- Pricing optimization
- Data analysis and visualization

What aspect of pricing strategy would you like to explore?"#;

/// Keyword-matching analysis backend with simulated latency.
///
/// Dispatch runs on the lowercased message, first match wins, in order:
/// "price"/"pricing", then "elasticity", then "competition", else a
/// generic capability overview. Only the pricing branch yields an
/// artifact.
pub struct StubBackend {
    chat_delay: Duration,
    parse_delay: Duration,
    ids: Arc<dyn IdSource>,
    clock: Arc<dyn Clock>,
}

impl StubBackend {
    /// Create a stub with config-driven latency and system id/time sources.
    pub fn new(gateway: &GatewayConfig) -> Self {
        Self::with_env(gateway, Arc::new(RandomIds), Arc::new(SystemClock))
    }

    /// Create a stub with zero latency, for tests and local tooling.
    pub fn instant() -> Self {
        Self::new(&GatewayConfig::instant())
    }

    /// Create a stub with injected id and time sources.
    pub fn with_env(
        gateway: &GatewayConfig,
        ids: Arc<dyn IdSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            chat_delay: Duration::from_millis(gateway.chat_delay_ms),
            parse_delay: Duration::from_millis(gateway.parse_delay_ms),
            ids,
            clock,
        }
    }

    fn pricing_artifact(&self) -> Artifact {
        let now = self.clock.now();
        Artifact {
            id: self.ids.next_id(),
            artifact_type: ArtifactType::PricingAnalysis,
            title: "Pricing Strategy Framework".to_string(),
            description: Some("Value-based pricing methodology overview".to_string()),
            data: Value::Object(Map::new()),
            created_at: now,
            updated_at: now,
        }
    }
}

#[async_trait]
impl AnalysisGateway for StubBackend {
    async fn respond(&self, request: AnalysisRequest) -> Result<AnalysisReply, CoreError> {
        tokio::time::sleep(self.chat_delay).await;

        let lowered = request.message.to_lowercase();
        let (message, artifact) = if lowered.contains("price") || lowered.contains("pricing") {
            (PRICING_REPLY, Some(self.pricing_artifact()))
        } else if lowered.contains("elasticity") {
            (ELASTICITY_REPLY, None)
        } else if lowered.contains("competition") {
            (COMPETITION_REPLY, None)
        } else {
            (CAPABILITIES_REPLY, None)
        };

        debug!(
            "stub reply selected (files={}, artifact={})",
            request.files.len(),
            artifact.is_some()
        );
        Ok(AnalysisReply {
            message: message.to_string(),
            artifact,
        })
    }
}

#[async_trait]
impl FileParser for StubBackend {
    async fn parse(&self, file_id: &str, file_type: Option<&str>) -> Result<Value, CoreError> {
        tokio::time::sleep(self.parse_delay).await;

        let kind = file_type.unwrap_or("");
        let data = if kind.contains("spreadsheet") || kind.contains("csv") {
            json!({
                "rows": 150,
                "columns": ["Product", "Price", "Cost", "Volume", "Revenue"],
                "summary": {
                    "avgPrice": 49.99,
                    "totalRevenue": 125000,
                    "profitMargin": 0.35,
                },
            })
        } else if kind.contains("pdf") {
            json!({
                "pages": 12,
                "sections": ["Executive Summary", "Market Analysis", "Pricing Strategy"],
                "keyInsights": [
                    "Current pricing below market average",
                    "High price sensitivity in segment A",
                    "Opportunity for premium positioning",
                ],
            })
        } else {
            json!({})
        };

        debug!("parsed file (file_id={file_id}, kind={kind})");
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::StubBackend;
    use crate::gateway::{AnalysisGateway, AnalysisRequest, FileParser};
    use pretty_assertions::assert_eq;
    use pricecraft_protocol::ArtifactType;
    use serde_json::json;

    fn request(message: &str) -> AnalysisRequest {
        AnalysisRequest {
            message: message.to_string(),
            files: Vec::new(),
        }
    }

    #[tokio::test]
    async fn pricing_keyword_yields_artifact() {
        let stub = StubBackend::instant();
        let reply = stub
            .respond(request("What price should I charge?"))
            .await
            .expect("reply");
        assert!(reply.message.contains("value-based pricing"));
        let artifact = reply.artifact.expect("artifact");
        assert_eq!(artifact.artifact_type, ArtifactType::PricingAnalysis);
        assert_eq!(artifact.title, "Pricing Strategy Framework");
        assert_eq!(artifact.created_at, artifact.updated_at);
    }

    #[tokio::test]
    async fn elasticity_keyword_has_no_artifact() {
        let stub = StubBackend::instant();
        let reply = stub
            .respond(request("Tell me about elasticity"))
            .await
            .expect("reply");
        assert!(reply.message.contains("Price elasticity"));
        assert_eq!(reply.artifact, None);
    }

    #[tokio::test]
    async fn pricing_branch_wins_over_later_keywords() {
        let stub = StubBackend::instant();
        let reply = stub
            .respond(request("How does PRICE elasticity affect competition?"))
            .await
            .expect("reply");
        assert!(reply.artifact.is_some());
    }

    #[tokio::test]
    async fn unmatched_message_gets_capability_overview() {
        let stub = StubBackend::instant();
        let reply = stub.respond(request("hello there")).await.expect("reply");
        assert!(reply.message.contains("pricing strategy questions"));
        assert_eq!(reply.artifact, None);
    }

    #[tokio::test]
    async fn parse_shapes_follow_file_type() {
        let stub = StubBackend::instant();

        let sheet = stub
            .parse("file-1", Some("text/csv"))
            .await
            .expect("csv parse");
        assert_eq!(sheet["rows"], json!(150));
        assert_eq!(sheet["summary"]["avgPrice"], json!(49.99));

        let report = stub
            .parse("file-2", Some("application/pdf"))
            .await
            .expect("pdf parse");
        assert_eq!(report["pages"], json!(12));

        let unknown = stub.parse("file-3", None).await.expect("unknown parse");
        assert_eq!(unknown, json!({}));
    }
}
