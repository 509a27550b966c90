use delve::provider::{ContentProvider, GitHubProvider, ProviderError};
use serde_json::json;
use wiremock::{
    matchers::{header, method, path, query_param, query_param_is_missing},
    Mock, MockServer, ResponseTemplate,
};

// ============================================================================
// Helper Functions
// ============================================================================

fn provider_for(server: &MockServer) -> GitHubProvider {
    GitHubProvider::new("octo/spoon".to_string(), None, Some(server.uri()))
}

fn provider_with_token(server: &MockServer) -> GitHubProvider {
    GitHubProvider::new(
        "octo/spoon".to_string(),
        Some("test-token".to_string()),
        Some(server.uri()),
    )
}

// ============================================================================
// list_directory
// ============================================================================

#[tokio::test]
async fn test_list_directory_partitions_files_and_dirs() {
    let mock_server = MockServer::start().await;

    let body = json!([
        { "name": "README.md", "type": "file", "sha": "f1" },
        { "name": "internal", "type": "dir", "sha": "d1" },
        { "name": "link", "type": "symlink", "sha": "s1" },
        { "name": "vendored", "type": "submodule", "sha": "s2" },
        { "name": "main.go", "type": "file", "sha": "f2" },
    ]);

    Mock::given(method("GET"))
        .and(path("/repos/octo/spoon/contents/"))
        .and(query_param("ref", "abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    let listing = provider.list_directory("", Some("abc123")).await.unwrap();

    let file_names: Vec<&str> = listing.files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(file_names, ["README.md", "main.go"]);
    assert_eq!(listing.dirs, ["internal"]);
    // Non file/dir entries are ignored, and the listing reports the
    // reference it resolved against.
    assert_eq!(listing.reference, "abc123");
}

#[tokio::test]
async fn test_list_directory_latest_resolves_head_sha() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/spoon/commits"))
        .and(query_param("per_page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "sha": "headsha" }])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/spoon/contents/src"))
        .and(query_param("ref", "headsha"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    let listing = provider.list_directory("src", None).await.unwrap();

    assert_eq!(listing.reference, "headsha");
    assert!(listing.files.is_empty());
    assert!(listing.dirs.is_empty());
}

#[tokio::test]
async fn test_list_directory_404_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/spoon/contents/gone"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    let err = provider
        .list_directory("gone", Some("abc123"))
        .await
        .unwrap_err();

    match &err {
        ProviderError::NotFound { path } => assert_eq!(path, "gone"),
        other => panic!("expected NotFound, got {other:?}"),
    }
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_list_directory_500_is_retryable_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/spoon/contents/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    let err = provider
        .list_directory("", Some("abc123"))
        .await
        .unwrap_err();

    match &err {
        ProviderError::Api { status, .. } => assert_eq!(*status, 500),
        other => panic!("expected Api, got {other:?}"),
    }
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_requests_carry_auth_and_agent_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/spoon/contents/"))
        .and(header("Authorization", "Bearer test-token"))
        .and(header("User-Agent", "delve"))
        .and(header("Accept", "application/vnd.github+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let provider = provider_with_token(&mock_server);
    assert!(provider.list_directory("", Some("abc123")).await.is_ok());
}

// ============================================================================
// get_file
// ============================================================================

#[tokio::test]
async fn test_get_file_resolves_content_locator() {
    let mock_server = MockServer::start().await;

    let body = json!({
        "name": "README.md",
        "type": "file",
        "sha": "f1",
        "download_url": "https://raw.example/README.md",
    });

    Mock::given(method("GET"))
        .and(path("/repos/octo/spoon/contents/README.md"))
        .and(query_param("ref", "abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    let handle = provider
        .get_file("README.md", Some("abc123"))
        .await
        .unwrap();

    assert_eq!(handle.name, "README.md");
    assert_eq!(handle.sha, "f1");
    assert_eq!(
        handle.download_url.as_deref(),
        Some("https://raw.example/README.md")
    );
}

// ============================================================================
// previous_reference
// ============================================================================

#[tokio::test]
async fn test_previous_reference_returns_second_entry() {
    let mock_server = MockServer::start().await;

    // Newest-first history starting at the given reference: [r2, r1].
    // The previous reference is r1, not r2.
    Mock::given(method("GET"))
        .and(path("/repos/octo/spoon/commits"))
        .and(query_param("path", "internal"))
        .and(query_param("sha", "r2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "sha": "r2" }, { "sha": "r1" }])),
        )
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    let prev = provider
        .previous_reference("internal", Some("r2"))
        .await
        .unwrap();
    assert_eq!(prev, "r1");
}

#[tokio::test]
async fn test_previous_reference_single_entry_is_no_prior_history() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/spoon/commits"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "sha": "r1" }])))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    let err = provider
        .previous_reference("internal", Some("r1"))
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::NoPriorHistory));
}

#[tokio::test]
async fn test_previous_reference_empty_history_is_no_prior_history() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/spoon/commits"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    let err = provider.previous_reference("", None).await.unwrap_err();
    assert!(matches!(err, ProviderError::NoPriorHistory));
}

#[tokio::test]
async fn test_previous_reference_at_root_omits_path_param() {
    let mock_server = MockServer::start().await;

    // The root's history is the whole repository's history; no path filter.
    Mock::given(method("GET"))
        .and(path("/repos/octo/spoon/commits"))
        .and(query_param("per_page", "2"))
        .and(query_param_is_missing("path"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "sha": "r2" }, { "sha": "r1" }])),
        )
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    let prev = provider.previous_reference("", None).await.unwrap();
    assert_eq!(prev, "r1");
}
