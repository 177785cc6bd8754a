use crate::core::{has_named_person, normalize_person, CommunityPrefilter, TreeMatcher};
use crate::models::{
    ComparablePerson, DiscoverTreesResponse, ErrorResponse, FamilyMember, HealthResponse,
    MatchedPair, MatchedPairDetail, MatchedTreeResult, Profile, RawPerson,
};
use crate::services::{AuthVerifier, CacheKey, CacheManager, StoreClient, StoreError};
use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<StoreClient>,
    pub cache: Arc<CacheManager>,
    pub matcher: TreeMatcher,
    pub auth: AuthVerifier,
}

/// Configure discovery routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/discovery/scan", web::post().to(discover_trees));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

fn unauthorized(message: String) -> HttpResponse {
    HttpResponse::Unauthorized().json(ErrorResponse {
        error: "unauthenticated".to_string(),
        message,
        status_code: 401,
    })
}

fn profile_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse {
        error: "profile_not_found".to_string(),
        message: "Caller's profile not found. Please complete your profile.".to_string(),
        status_code: 404,
    })
}

fn deadline_exceeded() -> HttpResponse {
    HttpResponse::GatewayTimeout().json(ErrorResponse {
        error: "deadline_exceeded".to_string(),
        message: "The search took too long and timed out. This can happen if there are many \
                  users or very large family trees. Please try again later."
            .to_string(),
        status_code: 504,
    })
}

fn internal_error() -> HttpResponse {
    // Caller id stays in the logs; the body carries no caller data.
    HttpResponse::InternalServerError().json(ErrorResponse {
        error: "internal".to_string(),
        message: "An internal error occurred. Please try again later.".to_string(),
        status_code: 500,
    })
}

/// Scan all other visible users' trees for plausible family overlap.
///
/// POST /api/v1/discovery/scan
///
/// The caller identity comes from the bearer token; the body is empty.
/// Results are in candidate iteration order, not sorted by score.
async fn discover_trees(
    state: web::Data<AppState>,
    http_req: actix_web::HttpRequest,
) -> impl Responder {
    let caller_uid = match state.auth.caller_uid(&http_req) {
        Ok(uid) => uid,
        Err(e) => {
            tracing::warn!("Unauthenticated discovery call: {}", e);
            return unauthorized(e.to_string());
        }
    };

    // Correlation id tying together all log lines of one scan
    let scan_id = uuid::Uuid::new_v4().to_string();
    tracing::info!("Discovery scan {} requested by {}", scan_id, caller_uid);

    let caller_profile = match state.store.get_profile(&caller_uid).await {
        Ok(profile) => profile,
        Err(StoreError::NotFound(_)) => {
            tracing::warn!("Caller profile not found: {}", caller_uid);
            return profile_not_found();
        }
        Err(StoreError::DeadlineExceeded) => return deadline_exceeded(),
        Err(e) => {
            tracing::error!("Failed to fetch caller profile for {}: {}", caller_uid, e);
            return internal_error();
        }
    };

    // Private callers do not receive discovery. Matching symmetry is not
    // guaranteed; private candidates are excluded separately below.
    if !caller_profile.discoverable() {
        tracing::info!("Caller {} is in private mode, aborting scan", caller_uid);
        return HttpResponse::Ok().json(DiscoverTreesResponse { matches: vec![] });
    }

    let konnected_ids = match state.store.get_konnection_ids(&caller_uid).await {
        Ok(ids) => ids,
        Err(StoreError::DeadlineExceeded) => return deadline_exceeded(),
        Err(e) => {
            tracing::error!("Failed to fetch konnections for {}: {}", caller_uid, e);
            return internal_error();
        }
    };
    tracing::info!(
        "Caller {} has {} existing konnections, excluded from the scan",
        caller_uid,
        konnected_ids.len()
    );

    let caller_members = match state.store.get_family_members(&caller_uid).await {
        Ok(members) => members,
        Err(StoreError::DeadlineExceeded) => return deadline_exceeded(),
        Err(e) => {
            tracing::error!("Failed to fetch family members for {}: {}", caller_uid, e);
            return internal_error();
        }
    };

    let prefilter = CommunityPrefilter::from_profile(&caller_profile);
    tracing::info!(
        "Religion/caste pre-filtering {} for caller {}",
        if prefilter.is_some() { "active" } else { "skipped" },
        caller_uid
    );

    let my_raw_tree = assemble_raw_tree(caller_profile, caller_members);
    if !has_named_person(&my_raw_tree) {
        tracing::info!("Caller {}'s tree has no named individuals, returning 0 matches", caller_uid);
        return HttpResponse::Ok().json(DiscoverTreesResponse { matches: vec![] });
    }
    let my_tree: Vec<ComparablePerson> = my_raw_tree.iter().map(normalize_person).collect();
    tracing::info!("Caller {}'s comparable tree has {} members", caller_uid, my_tree.len());

    let candidate_ids = match state.store.list_user_ids().await {
        Ok(ids) => ids,
        Err(StoreError::DeadlineExceeded) => return deadline_exceeded(),
        Err(e) => {
            tracing::error!("Failed to list users for scan by {}: {}", caller_uid, e);
            return internal_error();
        }
    };

    let mut matches: Vec<MatchedTreeResult> = Vec::new();
    let mut prefiltered_out = 0usize;
    let mut private_skipped = 0usize;

    for candidate_id in candidate_ids {
        if candidate_id == caller_uid || konnected_ids.contains(&candidate_id) {
            continue;
        }

        let candidate_profile = match state.store.get_profile(&candidate_id).await {
            Ok(profile) => profile,
            Err(StoreError::NotFound(_)) => {
                tracing::warn!("Candidate profile missing, skipped: {}", candidate_id);
                continue;
            }
            Err(StoreError::DeadlineExceeded) => return deadline_exceeded(),
            Err(e) => {
                // One bad record never aborts the whole scan
                tracing::warn!("Candidate fetch failed, skipped {}: {}", candidate_id, e);
                continue;
            }
        };

        if !candidate_profile.discoverable() {
            private_skipped += 1;
            tracing::debug!("Skipped private candidate {}", candidate_id);
            continue;
        }

        if let Some(filter) = &prefilter {
            if !filter.accepts(&candidate_profile) {
                prefiltered_out += 1;
                tracing::debug!("Candidate {} pre-filtered out on religion/caste", candidate_id);
                continue;
            }
        }

        let candidate_members = match fetch_candidate_members(&state, &candidate_id).await {
            Ok(members) => members,
            Err(StoreError::DeadlineExceeded) => return deadline_exceeded(),
            Err(e) => {
                tracing::warn!("Candidate tree fetch failed, skipped {}: {}", candidate_id, e);
                continue;
            }
        };
        let member_count = candidate_members.len();

        let candidate_name = candidate_profile.display_name();
        let other_raw_tree = assemble_raw_tree(candidate_profile, candidate_members);
        if !has_named_person(&other_raw_tree) {
            tracing::debug!("Candidate {}'s tree has no named individuals, skipped", candidate_id);
            continue;
        }
        let other_tree: Vec<ComparablePerson> =
            other_raw_tree.iter().map(normalize_person).collect();

        let comparison = state.matcher.compare(&my_tree, &other_tree);
        tracing::debug!(
            "Compared caller {} with {}: similar={}, score={:.1}, pairs={}",
            caller_uid,
            candidate_id,
            comparison.is_similar,
            comparison.score,
            comparison.contributing_pairs.len()
        );

        if comparison.is_similar {
            tracing::info!(
                "Match found with {} (score {:.1}, {} pairs)",
                candidate_id,
                comparison.score,
                comparison.contributing_pairs.len()
            );
            matches.push(build_match_result(
                candidate_id,
                candidate_name,
                member_count,
                comparison.score,
                &comparison.contributing_pairs,
            ));
        }
    }

    tracing::info!(
        "Scan {} complete for {}: {} matches ({} pre-filtered, {} private skipped)",
        scan_id,
        caller_uid,
        matches.len(),
        prefiltered_out,
        private_skipped
    );

    HttpResponse::Ok().json(DiscoverTreesResponse { matches })
}

/// The owner's profile and their family members form one tree.
fn assemble_raw_tree(profile: Profile, members: Vec<FamilyMember>) -> Vec<RawPerson> {
    let mut tree = Vec::with_capacity(members.len() + 1);
    tree.push(RawPerson::Owner(profile));
    tree.extend(members.into_iter().map(RawPerson::Member));
    tree
}

/// Candidate family-member lists are cached briefly; a cache failure only
/// means a fresh store read.
async fn fetch_candidate_members(
    state: &AppState,
    user_id: &str,
) -> Result<Vec<FamilyMember>, StoreError> {
    let key = CacheKey::tree(user_id);
    if let Ok(members) = state.cache.get::<Vec<FamilyMember>>(&key).await {
        return Ok(members);
    }

    let members = state.store.get_family_members(user_id).await?;
    if let Err(e) = state.cache.set(&key, &members).await {
        tracing::warn!("Failed to cache tree for {}: {}", user_id, e);
    }
    Ok(members)
}

fn build_match_result(
    candidate_id: String,
    candidate_name: String,
    member_count: usize,
    score: f64,
    pairs: &[MatchedPair],
) -> MatchedTreeResult {
    let detailed_contributing_pairs: Vec<MatchedPairDetail> = pairs
        .iter()
        .map(|pair| MatchedPairDetail {
            person1_id: pair.person1.id.clone(),
            person1_name: pair.person1.display_name(),
            person1_details: pair.person1.detail_line(),
            person2_id: pair.person2.id.clone(),
            person2_name: pair.person2.display_name(),
            person2_details: pair.person2.detail_line(),
            pair_score: pair.pair_score,
            match_reasons: pair.reasons.clone(),
        })
        .collect();

    MatchedTreeResult {
        matched_user_id: candidate_id,
        matched_user_name: candidate_name,
        score: (score * 10.0).round() / 10.0,
        total_members_in_tree: member_count + 1,
        detailed_contributing_pairs,
        my_matched_persons: pairs.iter().map(|p| p.person1.to_member_info()).collect(),
        other_matched_persons: pairs.iter().map(|p| p.person2.to_member_info()).collect(),
    }
}
