// Wire payload assertions: what each tool actually POSTs for a given
// argument object, captured through a scripted client.

mod common;

use common::ScriptedClient;
use devrev_mcp::tools::ToolRegistry;
use serde_json::json;

#[tokio::test]
async fn test_create_work_sends_only_supplied_fields() {
    let registry = ToolRegistry::new();
    let client = ScriptedClient::new()
        .respond("works.create", 201, r#"{"work": {"id": "work_9"}}"#)
        .respond("works.create", 201, r#"{"work": {"id": "work_10"}}"#);

    let minimal = json!({
        "type": "issue",
        "title": "Login fails on refresh",
        "applies_to_part": "part_1"
    });
    registry
        .dispatch("create_work", minimal.as_object(), &client)
        .await
        .unwrap();
    assert_eq!(client.payload_sent_to("works.create").unwrap(), minimal);

    let full = json!({
        "type": "ticket",
        "title": "Customer cannot export",
        "applies_to_part": "part_2",
        "body": "Export button is greyed out.",
        "owned_by": ["user_1", "user_2"]
    });
    registry
        .dispatch("create_work", full.as_object(), &client)
        .await
        .unwrap();
    assert_eq!(client.payload_sent_to("works.create").unwrap(), full);
}

#[tokio::test]
async fn test_null_optionals_are_dropped_from_the_payload() {
    let registry = ToolRegistry::new();
    let client = ScriptedClient::new().respond("works.create", 200, r#"{"work": {}}"#);

    let arguments = json!({
        "type": "issue",
        "title": "t",
        "applies_to_part": "part_1",
        "body": null
    });
    registry
        .dispatch("create_work", arguments.as_object(), &client)
        .await
        .unwrap();

    let payload = client.payload_sent_to("works.create").unwrap();
    assert_eq!(
        payload,
        json!({"type": "issue", "title": "t", "applies_to_part": "part_1"})
    );
}

#[tokio::test]
async fn test_list_works_passes_every_filter_through() {
    let registry = ToolRegistry::new();
    let client = ScriptedClient::new().respond("works.list", 200, r#"{"works": []}"#);

    let arguments = json!({
        "type": ["issue", "ticket"],
        "applies_to_part": ["part_1"],
        "created_by": ["user_1"],
        "modified_by": ["user_2"],
        "owned_by": ["user_3"],
        "state": ["open", "in_progress"],
        "custom_fields": [{"field": "tnt__region", "value": "emea"}],
        "sla_summary": {"after": "2025-01-01T00:00:00Z"},
        "sort_by": ["created_date:desc"],
        "rev_orgs": ["rev_1"],
        "subtype": ["bug"],
        "target_close_date": {"before": "2025-06-30T00:00:00Z"},
        "target_start_date": {"after": "2025-01-01T00:00:00Z"},
        "actual_close_date": {"before": "2025-12-31T00:00:00Z"},
        "actual_start_date": {"after": "2025-02-01T00:00:00Z"},
        "created_date": {"after": "2024-01-01T00:00:00Z", "before": "2025-01-01T00:00:00Z"},
        "modified_date": {"after": "2025-03-01T00:00:00Z"},
        "sprint": ["sprint_7"],
        "cursor": {"next_cursor": "abc", "mode": "after"}
    });
    registry
        .dispatch("list_works", arguments.as_object(), &client)
        .await
        .unwrap();

    assert_eq!(client.payload_sent_to("works.list").unwrap(), arguments);
}

#[tokio::test]
async fn test_list_works_minimal_filter_sends_only_the_type() {
    let registry = ToolRegistry::new();
    let client = ScriptedClient::new().respond("works.list", 200, r#"{"works": []}"#);

    let arguments = json!({"type": ["task"]});
    registry
        .dispatch("list_works", arguments.as_object(), &client)
        .await
        .unwrap();

    assert_eq!(client.payload_sent_to("works.list").unwrap(), arguments);
}

#[tokio::test]
async fn test_list_parts_passes_every_filter_through() {
    let registry = ToolRegistry::new();
    let client = ScriptedClient::new().respond("parts.list", 200, r#"{"parts": []}"#);

    let arguments = json!({
        "type": "enhancement",
        "cursor": {"next_cursor": "xyz", "mode": "before"},
        "owned_by": ["user_1"],
        "parent_part": ["part_0"],
        "created_by": ["user_2"],
        "modified_by": ["user_3"],
        "sort_by": ["name:asc"],
        "accounts": ["account_1"],
        "target_close_date": {"before": "2025-09-30T00:00:00Z"},
        "target_start_date": {"after": "2025-07-01T00:00:00Z"},
        "actual_close_date": {"before": "2025-12-01T00:00:00Z"},
        "actual_start_date": {"after": "2025-08-01T00:00:00Z"}
    });
    registry
        .dispatch("list_parts", arguments.as_object(), &client)
        .await
        .unwrap();

    assert_eq!(client.payload_sent_to("parts.list").unwrap(), arguments);
}

#[tokio::test]
async fn test_list_meetings_sends_supplied_filters_only() {
    let registry = ToolRegistry::new();
    let client = ScriptedClient::new().respond("meetings.list", 200, r#"{"meetings": []}"#);

    let arguments = json!({
        "channel": ["zoom"],
        "organizer": ["user_1"],
        "state": ["scheduled"],
        "limit": 25
    });
    registry
        .dispatch("list_meetings", arguments.as_object(), &client)
        .await
        .unwrap();

    assert_eq!(client.payload_sent_to("meetings.list").unwrap(), arguments);
}

#[tokio::test]
async fn test_update_part_carries_identifier_and_updates() {
    let registry = ToolRegistry::new();
    let client = ScriptedClient::new().respond("parts.update", 200, r#"{"part": {}}"#);

    let arguments = json!({
        "id": "part_1",
        "type": "enhancement",
        "name": "Search revamp",
        "owned_by": ["user_4"],
        "description": "Rebuild the search pipeline.",
        "target_close_date": "2025-10-01T00:00:00Z",
        "target_start_date": "2025-08-01T00:00:00Z",
        "stage": "in_development"
    });
    let text = registry
        .dispatch("update_part", arguments.as_object(), &client)
        .await
        .unwrap();
    assert_eq!(text, r#"Part updated successfully: part_1: {"part":{}}"#);

    assert_eq!(client.payload_sent_to("parts.update").unwrap(), arguments);
}

#[tokio::test]
async fn test_add_timeline_entry_renames_fields_for_the_wire() {
    let registry = ToolRegistry::new();
    let client = ScriptedClient::new().respond(
        "timeline-entries.create",
        200,
        r#"{"timeline_entry": {"id": "entry_1"}}"#,
    );

    let arguments = json!({"id": "work_1", "timeline_entry": "Deployed the fix to staging."});
    let text = registry
        .dispatch("add_timeline_entry", arguments.as_object(), &client)
        .await
        .unwrap();
    assert_eq!(
        text,
        r#"Timeline entry created successfully: {"id":"entry_1"}"#
    );

    // The work item id travels as `object` and the text as a comment `body`.
    assert_eq!(
        client.payload_sent_to("timeline-entries.create").unwrap(),
        json!({
            "object": "work_1",
            "body": "Deployed the fix to staging.",
            "type": "timeline_comment"
        })
    );
}

#[tokio::test]
async fn test_get_sprints_defaults_to_active_state() {
    let registry = ToolRegistry::new();
    let client = ScriptedClient::new()
        .respond("vistas.groups.list", 200, r#"{"vista_group": []}"#)
        .respond("vistas.groups.list", 200, r#"{"vista_group": []}"#);

    let arguments = json!({"ancestor_part_id": "part_1"});
    let text = registry
        .dispatch("get_sprints", arguments.as_object(), &client)
        .await
        .unwrap();
    assert_eq!(text, "Sprints for 'part_1': []");
    assert_eq!(
        client.payload_sent_to("vistas.groups.list").unwrap(),
        json!({"ancestor_part_id": "part_1", "state": "active"})
    );

    let arguments = json!({"ancestor_part_id": "part_1", "state": "completed"});
    registry
        .dispatch("get_sprints", arguments.as_object(), &client)
        .await
        .unwrap();
    assert_eq!(
        client.payload_sent_to("vistas.groups.list").unwrap(),
        json!({"ancestor_part_id": "part_1", "state": "completed"})
    );
}

#[tokio::test]
async fn test_update_work_subtype_patch_shapes() {
    let registry = ToolRegistry::new();
    let client = ScriptedClient::new()
        .respond("works.update", 200, "{}")
        .respond("works.update", 200, "{}")
        .respond("works.update", 200, "{}");

    // No subtype argument: the payload has no subtype key.
    let arguments = json!({"id": "work_1", "type": "issue"});
    registry
        .dispatch("update_work", arguments.as_object(), &client)
        .await
        .unwrap();
    let payload = client.payload_sent_to("works.update").unwrap();
    assert_eq!(payload, json!({"id": "work_1", "type": "issue"}));

    // Setting a subtype flattens the wrapper into a plain string.
    let arguments = json!({
        "id": "work_1",
        "type": "issue",
        "subtype": {"subtype": "bug"}
    });
    registry
        .dispatch("update_work", arguments.as_object(), &client)
        .await
        .unwrap();
    let payload = client.payload_sent_to("works.update").unwrap();
    assert_eq!(
        payload,
        json!({"id": "work_1", "type": "issue", "subtype": "bug"})
    );

    // Dropping sends the explicit null sentinel.
    let arguments = json!({
        "id": "work_1",
        "type": "issue",
        "subtype": {"drop": true}
    });
    registry
        .dispatch("update_work", arguments.as_object(), &client)
        .await
        .unwrap();
    let payload = client.payload_sent_to("works.update").unwrap();
    assert!(payload.as_object().unwrap().contains_key("subtype"));
    assert_eq!(payload["subtype"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_update_work_rejects_malformed_subtype_arguments() {
    let registry = ToolRegistry::new();
    let client = ScriptedClient::new();

    let arguments = json!({"id": "work_1", "type": "issue", "subtype": "bug"});
    let err = registry
        .dispatch("update_work", arguments.as_object(), &client)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), r#"Invalid subtype parameter: "bug""#);

    let arguments = json!({"id": "work_1", "type": "issue", "subtype": {"drop": false}});
    let err = registry
        .dispatch("update_work", arguments.as_object(), &client)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), r#"Invalid subtype parameter: {"drop":false}"#);

    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn test_repeated_dispatch_builds_identical_payload_bytes() {
    let registry = ToolRegistry::new();
    let client = ScriptedClient::new()
        .respond("works.list", 200, r#"{"works": []}"#)
        .respond("works.list", 200, r#"{"works": []}"#);

    let arguments = json!({
        "type": ["issue", "ticket"],
        "owned_by": ["user_3"],
        "created_date": {"after": "2025-01-01T00:00:00Z"},
        "cursor": {"next_cursor": "abc", "mode": "after"}
    });

    registry
        .dispatch("list_works", arguments.as_object(), &client)
        .await
        .unwrap();
    registry
        .dispatch("list_works", arguments.as_object(), &client)
        .await
        .unwrap();

    let calls = client.calls();
    assert_eq!(calls.len(), 2);
    let first = serde_json::to_string(&calls[0].payload).unwrap();
    let second = serde_json::to_string(&calls[1].payload).unwrap();
    assert_eq!(first, second);
}
