use orphan_tags::cli::{run_cleanup_workflow, CleanupOptions, FailureKind};
use orphan_tags::context::RepoCoordinates;
use orphan_tags::hosting::{DeleteCall, MockFailure, MockHostingClient};

fn mock_repo() -> RepoCoordinates {
    RepoCoordinates::new("mockOwner", "mockRepo").expect("valid coordinates")
}

fn run(client: &MockHostingClient) -> Result<orphan_tags::cli::CleanupSummary, orphan_tags::cli::Failure> {
    run_cleanup_workflow(client, &mock_repo(), &CleanupOptions::default())
}

// ============================================================================
// Deletion decisions
// ============================================================================

#[test]
fn test_deletes_tag_for_missing_branch() {
    let tag = "v1.0.1-iamnotthereanymore.1";
    let client = MockHostingClient::new().with_branch("main").with_tag(tag);

    run(&client).expect("run should succeed");

    assert_eq!(
        client.delete_calls(),
        vec![DeleteCall::new(
            "mockOwner",
            "mockRepo",
            "tags/v1.0.1-iamnotthereanymore.1"
        )]
    );
}

#[test]
fn test_keeps_tag_for_existing_branch() {
    let client = MockHostingClient::new()
        .with_branches(["main", "feature/iamstillhere"])
        .with_tag("v1.0.1-iamstillhere.1");

    let summary = run(&client).expect("run should succeed");

    assert!(client.delete_calls().is_empty());
    assert_eq!(summary.kept, vec!["v1.0.1-iamstillhere.1"]);
}

#[test]
fn test_never_deletes_plain_release_tags() {
    let client = MockHostingClient::new()
        .with_branches(["main", "feature/iamstillhere"])
        .with_tag("v1.0.1");

    let summary = run(&client).expect("non-matching tags are not errors");

    assert!(client.delete_calls().is_empty());
    assert_eq!(summary.unrecognized, vec!["v1.0.1"]);
}

#[test]
fn test_malformed_tag_names_are_ignored() {
    let client = MockHostingClient::new()
        .with_branch("main")
        .with_ref("refs/tags/v1.0.1}")
        .with_tag("v1.0-short.1")
        .with_tag("v1.0.0-nodigits.x");

    run(&client).expect("non-matching tags are not errors");

    assert!(client.delete_calls().is_empty());
}

#[test]
fn test_empty_feature_id_is_deleted_without_bare_prefix_branch() {
    let client = MockHostingClient::new().with_branch("main").with_tag("v1.0.0-.1");

    let summary = run(&client).expect("run should succeed");

    assert_eq!(
        client.delete_calls(),
        vec![DeleteCall::new("mockOwner", "mockRepo", "tags/v1.0.0-.1")]
    );
    assert_eq!(summary.deleted, vec!["v1.0.0-.1"]);
}

#[test]
fn test_empty_feature_id_is_kept_when_bare_prefix_branch_exists() {
    let client = MockHostingClient::new()
        .with_branches(["main", "feature/"])
        .with_tag("v1.0.0-.1");

    let summary = run(&client).expect("run should succeed");

    assert!(client.delete_calls().is_empty());
    assert_eq!(summary.kept, vec!["v1.0.0-.1"]);
}

#[test]
fn test_mixed_tags_only_orphans_deleted_in_listing_order() {
    let client = MockHostingClient::new()
        .with_branches(["main", "feature/keep-me", "feature/api.v2"])
        .with_tag("v2.0.0-gone-b.3")
        .with_tag("v1.0.0")
        .with_tag("v1.1.0-keep-me.1")
        .with_tag("v1.1.0-gone-a.1")
        .with_tag("v1.2.0-api.v2.7")
        .with_tag("v1.1.0-gone-a.2");

    let summary = run(&client).expect("run should succeed");

    let deleted: Vec<String> = client
        .delete_calls()
        .into_iter()
        .map(|call| call.reference)
        .collect();
    assert_eq!(
        deleted,
        vec![
            "tags/v2.0.0-gone-b.3",
            "tags/v1.1.0-gone-a.1",
            "tags/v1.1.0-gone-a.2",
        ]
    );
    assert_eq!(summary.evaluated, 6);
    assert_eq!(summary.kept, vec!["v1.1.0-keep-me.1", "v1.2.0-api.v2.7"]);
}

#[test]
fn test_each_orphan_deleted_exactly_once() {
    let client = MockHostingClient::new()
        .with_branch("main")
        .with_tag("v1.0.0-a.1")
        .with_tag("v1.0.0-b.1");

    run(&client).expect("run should succeed");

    let calls = client.delete_calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(
        calls.iter().filter(|c| c.reference == "tags/v1.0.0-a.1").count(),
        1
    );
}

#[test]
fn test_branch_match_requires_feature_prefix() {
    let client = MockHostingClient::new()
        .with_branches(["main", "login", "features/login", "feature/login-v2"])
        .with_tag("v1.0.0-login.1");

    run(&client).expect("run should succeed");

    assert_eq!(client.delete_calls().len(), 1);
}

#[test]
fn test_runs_are_idempotent_against_unchanged_state() {
    let client = MockHostingClient::new()
        .with_branches(["main", "feature/alive"])
        .with_tag("v1.0.0-alive.1")
        .with_tag("v1.0.0-dead.1")
        .with_tag("v1.0.0");

    let first = run(&client).expect("first run");
    let after_first = client.delete_calls();
    let second = run(&client).expect("second run");
    let all = client.delete_calls();

    assert_eq!(first, second);
    assert_eq!(after_first.len(), 1);
    assert_eq!(&all[..1], &all[1..]);
}

#[test]
fn test_dry_run_issues_no_deletes() {
    let client = MockHostingClient::new()
        .with_branch("main")
        .with_tag("v1.0.0-gone.1");

    let summary = run_cleanup_workflow(
        &client,
        &mock_repo(),
        &CleanupOptions { dry_run: true },
    )
    .expect("dry run should succeed");

    assert!(client.delete_calls().is_empty());
    assert!(summary.dry_run);
    assert_eq!(summary.deleted, vec!["v1.0.0-gone.1"]);
}

// ============================================================================
// Failure handling
// ============================================================================

#[test]
fn test_structured_branch_listing_error_is_reported_verbatim() {
    let client = MockHostingClient::new()
        .failing_branches(MockFailure::Api("GitHub API error".to_string()))
        .with_tag("v1.0.1");

    let failure = run(&client).expect_err("run should fail");

    assert_eq!(failure.kind, FailureKind::Structured);
    assert_eq!(failure.message, "GitHub API error");
    assert!(client.delete_calls().is_empty());
}

#[test]
fn test_unstructured_branch_listing_error_uses_generic_message() {
    let client = MockHostingClient::new()
        .failing_branches(MockFailure::Unknown("just a string".to_string()))
        .with_tag("v1.0.0-gone.1");

    let failure = run(&client).expect_err("run should fail");

    assert_eq!(failure.kind, FailureKind::Unknown);
    assert_eq!(failure.message, "An unknown error occurred");
    assert!(client.delete_calls().is_empty());
}

#[test]
fn test_failing_delete_stops_remaining_tags() {
    let client = MockHostingClient::new()
        .with_branch("main")
        .with_tag("v1.0.0-first.1")
        .with_tag("v1.0.0-second.1")
        .with_tag("v1.0.0-third.1")
        .failing_delete(
            "tags/v1.0.0-second.1",
            MockFailure::Api("Reference does not exist".to_string()),
        );

    let failure = run(&client).expect_err("run should fail");

    assert_eq!(failure.message, "Reference does not exist");
    let attempted: Vec<String> = client
        .delete_calls()
        .into_iter()
        .map(|call| call.reference)
        .collect();
    assert_eq!(attempted, vec!["tags/v1.0.0-first.1", "tags/v1.0.0-second.1"]);
}
