//! Kin Algo - Family tree similarity service for KinKonnect
//!
//! This library compares users' family trees to surface plausible shared
//! family. It normalizes sparse person records, scores cross-tree pairs,
//! and aggregates greedy one-to-one pairings into a tree-level verdict.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{find_relationship_path, normalize_person, score_pair, TreeMatcher};
pub use models::{
    ComparablePerson, FamilyMember, MatchThresholds, MatchedTreeResult, Profile, RawPerson,
    ScoringWeights, TreeComparison,
};
