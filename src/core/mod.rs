// Core algorithm exports
pub mod filters;
pub mod matcher;
pub mod normalize;
pub mod paths;
pub mod scoring;

pub use filters::{has_named_person, CommunityPrefilter};
pub use matcher::TreeMatcher;
pub use normalize::{normalize_person, parse_birth_year};
pub use paths::find_relationship_path;
pub use scoring::score_pair;
