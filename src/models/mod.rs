// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    ComparablePerson, Connection, FamilyMember, FindPathResult, MatchThresholds, MatchedMemberInfo,
    MatchedPair, MatchedPairDetail, MatchedTreeResult, PairScore, PathStep, Profile, RawPerson,
    ScoringWeights, TreeComparison,
};
pub use requests::FindRelationshipRequest;
pub use responses::{DiscoverTreesResponse, ErrorResponse, FindRelationshipResponse, HealthResponse};
