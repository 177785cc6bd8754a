// Service exports
pub mod auth;
pub mod cache;
pub mod store;

pub use auth::{AuthError, AuthVerifier};
pub use cache::{CacheError, CacheKey, CacheManager};
pub use store::{StoreClient, StoreCollections, StoreError};
