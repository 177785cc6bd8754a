// HTTP tests for the document store client, backed by mockito

use kin_algo::services::store::{StoreClient, StoreCollections, StoreError};

fn client_for(server: &mockito::ServerGuard) -> StoreClient {
    StoreClient::new(
        server.url(),
        "test_key".to_string(),
        "test_project".to_string(),
        "test_db".to_string(),
        StoreCollections {
            users: "users".to_string(),
            family_members: "family_members".to_string(),
            konnections: "konnections".to_string(),
        },
    )
}

#[tokio::test]
async fn test_get_profile_parses_document() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/databases/test_db/collections/users/documents")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "documents": [{
                    "$id": "user-1",
                    "name": "Arjun Sharma",
                    "aliasName": "Raju",
                    "dob": "1950-03-14",
                    "bornPlace": "Chennai, India",
                    "religion": "Hindu",
                    "caste": "Iyer",
                    "isPublic": true
                }]
            }"#,
        )
        .create_async()
        .await;

    let profile = client_for(&server).get_profile("user-1").await.unwrap();
    mock.assert_async().await;

    assert_eq!(profile.id, "user-1");
    assert_eq!(profile.name.as_deref(), Some("Arjun Sharma"));
    assert_eq!(profile.alias_name.as_deref(), Some("Raju"));
    assert!(profile.discoverable());
}

#[tokio::test]
async fn test_get_profile_missing_is_not_found() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/databases/test_db/collections/users/documents")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(r#"{"documents": []}"#)
        .create_async()
        .await;

    let result = client_for(&server).get_profile("ghost").await;
    assert!(matches!(result, Err(StoreError::NotFound(_))));
}

#[tokio::test]
async fn test_unauthorized_status_maps_to_unauthorized() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/databases/test_db/collections/users/documents")
        .match_query(mockito::Matcher::Any)
        .with_status(401)
        .create_async()
        .await;

    let result = client_for(&server).list_user_ids().await;
    assert!(matches!(result, Err(StoreError::Unauthorized)));
}

#[tokio::test]
async fn test_gateway_timeout_maps_to_deadline_exceeded() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/databases/test_db/collections/users/documents")
        .match_query(mockito::Matcher::Any)
        .with_status(504)
        .create_async()
        .await;

    let result = client_for(&server).list_user_ids().await;
    assert!(matches!(result, Err(StoreError::DeadlineExceeded)));
}

#[tokio::test]
async fn test_list_user_ids_reads_document_ids() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/databases/test_db/collections/users/documents")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(r#"{"documents": [{"$id": "user-1"}, {"$id": "user-2"}, {"noId": true}]}"#)
        .create_async()
        .await;

    let ids = client_for(&server).list_user_ids().await.unwrap();
    assert_eq!(ids, vec!["user-1".to_string(), "user-2".to_string()]);
}

#[tokio::test]
async fn test_get_family_members_skips_malformed_documents() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/databases/test_db/collections/family_members/documents")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(
            r#"{
                "documents": [
                    {"$id": "m1", "ownerId": "user-1", "name": "Rajesh", "relationship": "Father"},
                    "not an object"
                ]
            }"#,
        )
        .create_async()
        .await;

    let members = client_for(&server).get_family_members("user-1").await.unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].name.as_deref(), Some("Rajesh"));
    assert_eq!(members[0].relationship.as_deref(), Some("Father"));
}

#[tokio::test]
async fn test_get_konnection_ids_collects_set() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/databases/test_db/collections/konnections/documents")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(
            r#"{
                "documents": [
                    {"$id": "k1", "konnectedUserId": "user-2"},
                    {"$id": "k2", "konnectedUserId": "user-3"},
                    {"$id": "k3", "konnectedUserId": "user-2"}
                ]
            }"#,
        )
        .create_async()
        .await;

    let ids = client_for(&server).get_konnection_ids("user-1").await.unwrap();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains("user-2"));
    assert!(ids.contains("user-3"));
}

#[tokio::test]
async fn test_missing_documents_array_is_invalid_response() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/databases/test_db/collections/users/documents")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(r#"{"total": 0}"#)
        .create_async()
        .await;

    let result = client_for(&server).list_user_ids().await;
    assert!(matches!(result, Err(StoreError::InvalidResponse(_))));
}
