use crate::core::find_relationship_path;
use crate::models::{
    ErrorResponse, FindRelationshipRequest, FindRelationshipResponse, RawPerson,
};
use crate::routes::discovery::AppState;
use crate::services::StoreError;
use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

/// Configure relationship routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/relationship/find", web::post().to(find_relationship));
}

/// Explain how two people in the caller's own tree are related.
///
/// POST /api/v1/relationship/find
async fn find_relationship(
    state: web::Data<AppState>,
    http_req: actix_web::HttpRequest,
    req: web::Json<FindRelationshipRequest>,
) -> impl Responder {
    let caller_uid = match state.auth.caller_uid(&http_req) {
        Ok(uid) => uid,
        Err(e) => {
            tracing::warn!("Unauthenticated relationship call: {}", e);
            return HttpResponse::Unauthorized().json(ErrorResponse {
                error: "unauthenticated".to_string(),
                message: e.to_string(),
                status_code: 401,
            });
        }
    };

    if let Err(e) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "validation_error".to_string(),
            message: e.to_string(),
            status_code: 400,
        });
    }
    if req.person1_id == req.person2_id {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "validation_error".to_string(),
            message: "person1Id and person2Id must differ".to_string(),
            status_code: 400,
        });
    }

    tracing::info!(
        "Relationship lookup by {}: {} -> {}",
        caller_uid,
        req.person1_id,
        req.person2_id
    );

    let profile = match state.store.get_profile(&caller_uid).await {
        Ok(profile) => profile,
        Err(StoreError::NotFound(_)) => {
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "profile_not_found".to_string(),
                message: "Caller's profile not found. Please complete your profile.".to_string(),
                status_code: 404,
            });
        }
        Err(e) => {
            tracing::error!("Failed to fetch profile for {}: {}", caller_uid, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "internal".to_string(),
                message: "An internal error occurred. Please try again later.".to_string(),
                status_code: 500,
            });
        }
    };

    let members = match state.store.get_family_members(&caller_uid).await {
        Ok(members) => members,
        Err(e) => {
            tracing::error!("Failed to fetch family members for {}: {}", caller_uid, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "internal".to_string(),
                message: "An internal error occurred. Please try again later.".to_string(),
                status_code: 500,
            });
        }
    };

    let mut tree: Vec<RawPerson> = Vec::with_capacity(members.len() + 1);
    tree.push(RawPerson::Owner(profile));
    tree.extend(members.into_iter().map(RawPerson::Member));

    let known = |id: &str| tree.iter().any(|p| p.id() == id);
    if !known(&req.person1_id) || !known(&req.person2_id) {
        return HttpResponse::NotFound().json(ErrorResponse {
            error: "person_not_found".to_string(),
            message: "One or both persons are not in your family tree.".to_string(),
            status_code: 404,
        });
    }

    let result = find_relationship_path(&req.person1_id, &req.person2_id, &tree);
    tracing::info!(
        "Relationship lookup by {}: path_found={}, hops={}",
        caller_uid,
        result.path_found,
        result.path.len().saturating_sub(1)
    );

    HttpResponse::Ok().json(FindRelationshipResponse { result })
}
