use story_core::{ApiError, Story, StoryDraft};

fn story(url: &str) -> Story {
    serde_json::from_value(serde_json::json!({
        "storyId": "s1",
        "title": "Test Story",
        "author": "Alice",
        "url": url,
        "username": "alice",
        "createdAt": "2024-01-01T00:00:00.000Z"
    }))
    .unwrap()
}

#[test]
fn hostname_strips_scheme_port_and_path() {
    let s = story("https://example.com:8080/path?q=1");
    assert_eq!(s.hostname().unwrap(), "example.com");
}

#[test]
fn hostname_of_relative_url_is_malformed() {
    let s = story("/just/a/path");
    assert!(matches!(s.hostname(), Err(ApiError::MalformedUrl(_))));
}

#[test]
fn hostname_of_hostless_url_is_malformed() {
    let s = story("mailto:alice@example.com");
    assert!(matches!(s.hostname(), Err(ApiError::MalformedUrl(_))));
}

#[test]
fn draft_round_trips_editable_fields() {
    let s = story("https://example.com/article");
    let draft = s.draft();
    assert_eq!(
        draft,
        StoryDraft {
            title: "Test Story".into(),
            author: "Alice".into(),
            url: "https://example.com/article".into(),
        }
    );

    // the draft serializes exactly the fields an update call sends
    let body = serde_json::to_value(&draft).unwrap();
    assert_eq!(
        body,
        serde_json::json!({
            "title": "Test Story",
            "author": "Alice",
            "url": "https://example.com/article"
        })
    );
}

#[test]
fn story_deserializes_camel_case_record() {
    let s = story("https://example.com");
    assert_eq!(s.id(), "s1");
    assert_eq!(s.username, "alice");
    assert_eq!(s.created_at.to_rfc3339(), "2024-01-01T00:00:00+00:00");
}
