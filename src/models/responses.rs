use crate::models::domain::{FindPathResult, MatchedTreeResult};
use serde::{Deserialize, Serialize};

/// Response for the discovery scan endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoverTreesResponse {
    pub matches: Vec<MatchedTreeResult>,
}

/// Response for the relationship path endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindRelationshipResponse {
    #[serde(flatten)]
    pub result: FindPathResult,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
