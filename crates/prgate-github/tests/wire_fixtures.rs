//! Payload fixtures in the shape GitHub returns, fed through the adapter
//! without touching the network.

use prgate_core::{MergeClient, PrGateError, PullRequestSource};
use prgate_github::{
    assemble_pull_request, ApiFile, ApiPullRequest, GithubClient, GithubConfig,
};

const PULLS: &str = r#"[
  {
    "url": "https://api.github.com/repos/study/algorithms/pulls/31",
    "number": 31,
    "state": "open",
    "title": "[Baekjoon] 23-03-21",
    "user": { "login": "alice", "id": 1, "type": "User" },
    "labels": [
      { "id": 10, "name": "Alice", "color": "ededed" },
      { "id": 11, "name": "week-3", "color": "ededed" }
    ],
    "created_at": "2023-03-21T11:04:52Z",
    "updated_at": "2023-03-21T11:10:00Z",
    "draft": false
  },
  {
    "number": 32,
    "title": "[Leetcode] 23-03-21",
    "user": { "login": "bob" },
    "labels": [],
    "created_at": "2023-03-21T13:00:00Z"
  }
]"#;

const FILES_31: &str = r#"[
  { "sha": "a1", "filename": "teamfolder/baekjoon/1000_alice.cpp", "status": "added", "additions": 20 },
  { "sha": "a2", "filename": "teamfolder/baekjoon/999_alice.cpp", "status": "removed", "deletions": 4 },
  { "sha": "a3", "filename": "teamfolder/baekjoon/1001_alice.py", "status": "modified" }
]"#;

#[test]
fn pulls_payload_decodes() {
    let pulls: Vec<ApiPullRequest> = serde_json::from_str(PULLS).unwrap();
    assert_eq!(pulls.len(), 2);
    assert_eq!(pulls[0].user.login, "alice");
    assert_eq!(pulls[0].labels.len(), 2);
    assert!(pulls[1].labels.is_empty());
}

#[test]
fn assembled_pull_request_drops_removed_files() {
    let mut pulls: Vec<ApiPullRequest> = serde_json::from_str(PULLS).unwrap();
    let files: Vec<ApiFile> = serde_json::from_str(FILES_31).unwrap();

    let pr = assemble_pull_request(pulls.remove(0), files);

    assert_eq!(pr.number, 31);
    assert_eq!(pr.author_id, "alice");
    assert_eq!(pr.labels, vec!["Alice", "week-3"]);
    assert_eq!(
        pr.files,
        vec![
            "teamfolder/baekjoon/1000_alice.cpp",
            "teamfolder/baekjoon/1001_alice.py"
        ]
    );
    assert_eq!(pr.created_at.to_rfc3339(), "2023-03-21T11:04:52+00:00");
}

/// Nothing listens on port 1; both collaborators must surface domain errors.
#[tokio::test]
async fn unreachable_api_maps_to_domain_errors() {
    let config = GithubConfig::new("study", "algorithms").with_api_url("http://127.0.0.1:1");
    let client = GithubClient::new(config).unwrap();

    let err = client.open_pull_requests().await.unwrap_err();
    assert!(matches!(err, PrGateError::Source(_)));

    let err = client.merge(31).await.unwrap_err();
    assert!(matches!(err, PrGateError::Merge { number: 31, .. }));
}
