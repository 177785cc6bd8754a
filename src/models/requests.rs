use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to find the relationship path between two people in the
/// caller's own tree
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindRelationshipRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "person1_id", rename = "person1Id")]
    pub person1_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "person2_id", rename = "person2Id")]
    pub person2_id: String,
}
