use profile_provisioner::error::Error;
use profile_provisioner::profile::ProfileRecord;
use profile_provisioner::ProfileProvisioner;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn get_returns_the_stored_document() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/docs/v1/users/u123"))
        .and(header("apikey", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "email": "a@b.com",
            "displayName": "",
            "photoURL": "",
            "createdAt": "2024-05-01T12:00:00Z",
            "lastLoginAt": "2024-05-01T12:00:00Z"
        })))
        .mount(&server)
        .await;

    let provisioner = ProfileProvisioner::new(&server.uri(), "test-key");
    let record = provisioner
        .store()
        .collection("users")
        .doc("u123")
        .get()
        .execute::<ProfileRecord>()
        .await
        .unwrap()
        .expect("document should exist");

    assert_eq!(record.email, "a@b.com");
    assert_eq!(record.display_name, "");
    assert_eq!(record.photo_url, "");
    assert!(record.created_at.is_some());
}

#[tokio::test]
async fn get_returns_none_for_a_missing_document() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/docs/v1/users/unknown"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let provisioner = ProfileProvisioner::new(&server.uri(), "test-key");
    let record = provisioner
        .store()
        .collection("users")
        .doc("unknown")
        .get()
        .execute::<ProfileRecord>()
        .await
        .unwrap();

    assert!(record.is_none());
}

#[tokio::test]
async fn plain_set_replaces_the_document() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/docs/v1/users/u123"))
        .and(body_json(json!({"email": "new@b.com"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let provisioner = ProfileProvisioner::new(&server.uri(), "test-key");
    provisioner
        .store()
        .collection("users")
        .doc("u123")
        .set(&json!({"email": "new@b.com"}))
        .execute()
        .await
        .unwrap();
}

#[tokio::test]
async fn get_maps_server_errors_to_store_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/docs/v1/users/u123"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .mount(&server)
        .await;

    let provisioner = ProfileProvisioner::new(&server.uri(), "test-key");
    let result = provisioner
        .store()
        .collection("users")
        .doc("u123")
        .get()
        .execute::<ProfileRecord>()
        .await;

    assert!(matches!(result, Err(Error::Store { status: 500, .. })));
}
