// The fixed DevRev tool catalog
//
// One ToolSpec per tool: its listing metadata (name, description, input
// schema), the endpoint it posts to, its message labels, and a prepare
// function that validates arguments and assembles the payload. The
// dispatcher stays generic; everything tool-specific lives in this table.

use crate::error::Result;
use crate::http::ApiNamespace;
use crate::tools::args::{display_value, ToolArguments};
use crate::tools::payload::PayloadBuilder;
use serde_json::{json, Value};

/// Namespaces the hybrid search endpoint accepts
pub const SEARCH_NAMESPACES: &[&str] = &["article", "issue", "ticket", "part", "dev_user"];

/// Work types that carry a stage diagram
pub const TRANSITION_WORK_TYPES: &[&str] = &["issue", "ticket", "task"];

/// A validated tool call, ready to post
#[derive(Debug)]
pub struct PreparedCall {
    pub payload: Value,
    /// Success label, rendered with the call's identifying arguments
    pub success_label: String,
}

/// An endpoint-backed tool: one POST, interpreted with the shared rules
pub struct EndpointTool {
    pub namespace: ApiNamespace,
    pub endpoint: &'static str,
    /// Label used in "<label> failed with status <code>" reports
    pub failure_label: &'static str,
    /// Body field worth embedding on success; None embeds the whole body
    pub detail_field: Option<&'static str>,
    pub prepare: fn(ToolArguments<'_>) -> Result<PreparedCall>,
}

/// How a tool is fulfilled once its name resolves
pub enum ToolKind {
    Endpoint(EndpointTool),
    /// The works.get / schemas.aggregated.get / stage-diagrams.get chain
    StageTransitions,
}

/// A single registered tool
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
    pub kind: ToolKind,
}

fn prepare_search(args: ToolArguments<'_>) -> Result<PreparedCall> {
    let payload = PayloadBuilder::new(args)
        .require("query")?
        .require_one_of("namespace", SEARCH_NAMESPACES)?
        .build();
    let success_label = format!("Search results for '{}'", display_value(&payload["query"]));
    Ok(PreparedCall {
        payload,
        success_label,
    })
}

fn prepare_get_current_user(_args: ToolArguments<'_>) -> Result<PreparedCall> {
    Ok(PreparedCall {
        payload: json!({}),
        success_label: "Current user information".to_string(),
    })
}

fn prepare_get_work(args: ToolArguments<'_>) -> Result<PreparedCall> {
    let payload = PayloadBuilder::new(args).require("id")?.build();
    let success_label = format!("Object information for '{}'", display_value(&payload["id"]));
    Ok(PreparedCall {
        payload,
        success_label,
    })
}

fn prepare_create_work(args: ToolArguments<'_>) -> Result<PreparedCall> {
    let payload = PayloadBuilder::new(args)
        .require("type")?
        .require("title")?
        .require("applies_to_part")?
        .optional("body")
        .optional("owned_by")
        .build();
    Ok(PreparedCall {
        payload,
        success_label: "Object created successfully".to_string(),
    })
}

fn prepare_update_work(args: ToolArguments<'_>) -> Result<PreparedCall> {
    let payload = PayloadBuilder::new(args)
        .require("id")?
        .require("type")?
        .optional("title")
        .optional("body")
        .optional("modified_by")
        .optional("owned_by")
        .optional("applies_to_part")
        .optional("stage")
        .optional("sprint")
        .subtype_patch("subtype")?
        .build();
    let success_label = format!(
        "Object updated successfully: {}",
        display_value(&payload["id"])
    );
    Ok(PreparedCall {
        payload,
        success_label,
    })
}

fn prepare_list_works(args: ToolArguments<'_>) -> Result<PreparedCall> {
    let payload = PayloadBuilder::new(args)
        .require("type")?
        .optional("applies_to_part")
        .optional("created_by")
        .optional("modified_by")
        .optional("owned_by")
        .optional("state")
        .optional("custom_fields")
        .optional("sla_summary")
        .optional("sort_by")
        .optional("rev_orgs")
        .optional("subtype")
        .optional("target_close_date")
        .optional("target_start_date")
        .optional("actual_close_date")
        .optional("actual_start_date")
        .optional("created_date")
        .optional("modified_date")
        .optional("sprint")
        .optional("cursor")
        .build();
    Ok(PreparedCall {
        payload,
        success_label: "Works listed successfully".to_string(),
    })
}

fn prepare_get_part(args: ToolArguments<'_>) -> Result<PreparedCall> {
    let payload = PayloadBuilder::new(args).require("id")?.build();
    let success_label = format!("Part information for '{}'", display_value(&payload["id"]));
    Ok(PreparedCall {
        payload,
        success_label,
    })
}

fn prepare_create_part(args: ToolArguments<'_>) -> Result<PreparedCall> {
    let payload = PayloadBuilder::new(args)
        .require("type")?
        .require("name")?
        .require("owned_by")?
        .require("parent_part")?
        .optional("description")
        .build();
    Ok(PreparedCall {
        payload,
        success_label: "Part created successfully".to_string(),
    })
}

fn prepare_update_part(args: ToolArguments<'_>) -> Result<PreparedCall> {
    let payload = PayloadBuilder::new(args)
        .require("id")?
        .require("type")?
        .optional("name")
        .optional("owned_by")
        .optional("description")
        .optional("target_close_date")
        .optional("target_start_date")
        .optional("stage")
        .build();
    let success_label = format!(
        "Part updated successfully: {}",
        display_value(&payload["id"])
    );
    Ok(PreparedCall {
        payload,
        success_label,
    })
}

fn prepare_list_parts(args: ToolArguments<'_>) -> Result<PreparedCall> {
    let payload = PayloadBuilder::new(args)
        .require("type")?
        .optional("cursor")
        .optional("owned_by")
        .optional("parent_part")
        .optional("created_by")
        .optional("modified_by")
        .optional("sort_by")
        .optional("accounts")
        .optional("target_close_date")
        .optional("target_start_date")
        .optional("actual_close_date")
        .optional("actual_start_date")
        .build();
    Ok(PreparedCall {
        payload,
        success_label: "Parts listed successfully".to_string(),
    })
}

fn prepare_list_meetings(args: ToolArguments<'_>) -> Result<PreparedCall> {
    let payload = PayloadBuilder::new(args)
        .optional("channel")
        .optional("created_by")
        .optional("created_date")
        .optional("cursor")
        .optional("ended_date")
        .optional("external_ref")
        .optional("limit")
        .optional("members")
        .optional("modified_date")
        .optional("organizer")
        .optional("scheduled_date")
        .optional("sort_by")
        .optional("state")
        .build();
    Ok(PreparedCall {
        payload,
        success_label: "Meetings listed successfully".to_string(),
    })
}

fn prepare_add_timeline_entry(args: ToolArguments<'_>) -> Result<PreparedCall> {
    // The argument names differ from the wire names here: the work item id
    // becomes `object` and the entry text becomes a timeline_comment `body`.
    let payload = PayloadBuilder::new(args)
        .require_as("id", "object")?
        .require_as("timeline_entry", "body")?
        .fixed("type", json!("timeline_comment"))
        .build();
    Ok(PreparedCall {
        payload,
        success_label: "Timeline entry created successfully".to_string(),
    })
}

fn prepare_get_sprints(args: ToolArguments<'_>) -> Result<PreparedCall> {
    let payload = PayloadBuilder::new(args)
        .require("ancestor_part_id")?
        .optional_or("state", json!("active"))
        .build();
    let success_label = format!(
        "Sprints for '{}'",
        display_value(&payload["ancestor_part_id"])
    );
    Ok(PreparedCall {
        payload,
        success_label,
    })
}

fn prepare_list_subtypes(args: ToolArguments<'_>) -> Result<PreparedCall> {
    let payload = PayloadBuilder::new(args).require("leaf_type")?.build();
    Ok(PreparedCall {
        payload,
        success_label: "Subtypes listed successfully".to_string(),
    })
}

fn prepare_get_vista(args: ToolArguments<'_>) -> Result<PreparedCall> {
    let payload = PayloadBuilder::new(args).require("id")?.build();
    let success_label = format!("Vista information for '{}'", display_value(&payload["id"]));
    Ok(PreparedCall {
        payload,
        success_label,
    })
}

/// JSON schema for a date range filter
fn date_range_schema(description: &str) -> Value {
    json!({
        "type": "object",
        "description": description,
        "properties": {
            "after": {"type": "string", "description": "Start of the range (RFC 3339)"},
            "before": {"type": "string", "description": "End of the range (RFC 3339)"}
        }
    })
}

/// JSON schema for a pagination cursor
fn cursor_schema() -> Value {
    json!({
        "type": "object",
        "description": "Pagination cursor from a previous response",
        "properties": {
            "next_cursor": {"type": "string"},
            "mode": {"type": "string", "description": "Either 'after' or 'before'"}
        }
    })
}

/// JSON schema for a list-of-ids filter
fn id_list_schema(description: &str) -> Value {
    json!({
        "type": "array",
        "description": description,
        "items": {"type": "string"}
    })
}

/// Build the full tool catalog in listing order
pub fn all() -> Vec<ToolSpec> {
    vec![
        ToolSpec {
            name: "search",
            description: "Search DevRev using the hybrid search engine",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {"type": "string", "description": "The search query string"},
                    "namespace": {
                        "type": "string",
                        "enum": SEARCH_NAMESPACES,
                        "description": "The namespace to search in"
                    }
                },
                "required": ["query", "namespace"]
            }),
            kind: ToolKind::Endpoint(EndpointTool {
                namespace: ApiNamespace::Public,
                endpoint: "search.hybrid",
                failure_label: "Search",
                detail_field: None,
                prepare: prepare_search,
            }),
        },
        ToolSpec {
            name: "get_current_user",
            description: "Fetch the DevRev user record behind the configured API token",
            input_schema: json!({
                "type": "object",
                "properties": {}
            }),
            kind: ToolKind::Endpoint(EndpointTool {
                namespace: ApiNamespace::Public,
                endpoint: "dev-users.self",
                failure_label: "Get current user",
                detail_field: None,
                prepare: prepare_get_current_user,
            }),
        },
        ToolSpec {
            name: "get_work",
            description: "Get all information about a DevRev work item (issue, ticket, or task) using its ID",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "id": {"type": "string", "description": "The ID of the work item"}
                },
                "required": ["id"]
            }),
            kind: ToolKind::Endpoint(EndpointTool {
                namespace: ApiNamespace::Public,
                endpoint: "works.get",
                failure_label: "Get object",
                detail_field: Some("work"),
                prepare: prepare_get_work,
            }),
        },
        ToolSpec {
            name: "create_work",
            description: "Create a new work item (issue or ticket) in DevRev",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "type": {
                        "type": "string",
                        "enum": ["issue", "ticket"],
                        "description": "The type of work item to create"
                    },
                    "title": {"type": "string", "description": "Title of the work item"},
                    "applies_to_part": {
                        "type": "string",
                        "description": "The part the work item applies to"
                    },
                    "body": {"type": "string", "description": "Body text of the work item"},
                    "owned_by": id_list_schema("User IDs that own the work item")
                },
                "required": ["type", "title", "applies_to_part"]
            }),
            kind: ToolKind::Endpoint(EndpointTool {
                namespace: ApiNamespace::Public,
                endpoint: "works.create",
                failure_label: "Create object",
                detail_field: Some("work"),
                prepare: prepare_create_work,
            }),
        },
        ToolSpec {
            name: "update_work",
            description: "Update an existing work item, including stage, sprint, ownership, and subtype changes",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "id": {"type": "string", "description": "The ID of the work item to update"},
                    "type": {"type": "string", "description": "The type of the work item"},
                    "title": {"type": "string"},
                    "body": {"type": "string"},
                    "modified_by": id_list_schema("User IDs recorded as modifiers"),
                    "owned_by": id_list_schema("User IDs that own the work item"),
                    "applies_to_part": id_list_schema("Parts the work item applies to"),
                    "stage": {"type": "string", "description": "Stage name to move the work item to"},
                    "sprint": {"type": "string", "description": "Sprint to assign the work item to"},
                    "subtype": {
                        "type": "object",
                        "description": "Subtype change; pass {\"drop\": true} to unset the subtype",
                        "properties": {
                            "subtype": {"type": "string", "description": "The subtype to set"},
                            "drop": {"type": "boolean", "description": "Unset the subtype instead of setting one"}
                        }
                    }
                },
                "required": ["id", "type"]
            }),
            kind: ToolKind::Endpoint(EndpointTool {
                namespace: ApiNamespace::Public,
                endpoint: "works.update",
                failure_label: "Update object",
                detail_field: None,
                prepare: prepare_update_work,
            }),
        },
        ToolSpec {
            name: "list_works",
            description: "List work items filtered by type, ownership, state, dates, and sprint",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "type": {
                        "type": "array",
                        "items": {"type": "string", "enum": ["issue", "ticket", "task"]},
                        "description": "Work item types to list"
                    },
                    "applies_to_part": id_list_schema("Filter by applicable parts"),
                    "created_by": id_list_schema("Filter by creators"),
                    "modified_by": id_list_schema("Filter by last modifiers"),
                    "owned_by": id_list_schema("Filter by owners"),
                    "state": id_list_schema("Filter by states"),
                    "custom_fields": {
                        "type": "array",
                        "description": "Custom field selectors, passed through unchanged",
                        "items": {"type": "object"}
                    },
                    "sla_summary": date_range_schema("Filter by SLA summary window"),
                    "sort_by": id_list_schema("Sort specifiers, e.g. created_date:asc"),
                    "rev_orgs": id_list_schema("Filter by rev orgs"),
                    "subtype": id_list_schema("Filter by subtypes"),
                    "target_close_date": date_range_schema("Filter by target close date"),
                    "target_start_date": date_range_schema("Filter by target start date"),
                    "actual_close_date": date_range_schema("Filter by actual close date"),
                    "actual_start_date": date_range_schema("Filter by actual start date"),
                    "created_date": date_range_schema("Filter by creation date"),
                    "modified_date": date_range_schema("Filter by modification date"),
                    "sprint": id_list_schema("Filter by sprints"),
                    "cursor": cursor_schema()
                },
                "required": ["type"]
            }),
            kind: ToolKind::Endpoint(EndpointTool {
                namespace: ApiNamespace::Public,
                endpoint: "works.list",
                failure_label: "List works",
                detail_field: None,
                prepare: prepare_list_works,
            }),
        },
        ToolSpec {
            name: "get_part",
            description: "Get all information about a DevRev part using its ID",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "id": {"type": "string", "description": "The ID of the part"}
                },
                "required": ["id"]
            }),
            kind: ToolKind::Endpoint(EndpointTool {
                namespace: ApiNamespace::Public,
                endpoint: "parts.get",
                failure_label: "Get part",
                detail_field: Some("part"),
                prepare: prepare_get_part,
            }),
        },
        ToolSpec {
            name: "create_part",
            description: "Create a new part (enhancement) in DevRev",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "type": {
                        "type": "string",
                        "enum": ["enhancement"],
                        "description": "The type of part to create"
                    },
                    "name": {"type": "string", "description": "Name of the part"},
                    "owned_by": id_list_schema("User IDs that own the part"),
                    "parent_part": id_list_schema("Parent part IDs"),
                    "description": {"type": "string", "description": "Description of the part"}
                },
                "required": ["type", "name", "owned_by", "parent_part"]
            }),
            kind: ToolKind::Endpoint(EndpointTool {
                namespace: ApiNamespace::Public,
                endpoint: "parts.create",
                failure_label: "Create part",
                detail_field: Some("part"),
                prepare: prepare_create_part,
            }),
        },
        ToolSpec {
            name: "update_part",
            description: "Update an existing part, including stage and ownership changes",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "id": {"type": "string", "description": "The ID of the part to update"},
                    "type": {"type": "string", "description": "The type of the part"},
                    "name": {"type": "string"},
                    "owned_by": id_list_schema("User IDs that own the part"),
                    "description": {"type": "string"},
                    "target_close_date": {"type": "string", "description": "Target close date (RFC 3339)"},
                    "target_start_date": {"type": "string", "description": "Target start date (RFC 3339)"},
                    "stage": {"type": "string", "description": "Stage name to move the part to"}
                },
                "required": ["id", "type"]
            }),
            kind: ToolKind::Endpoint(EndpointTool {
                namespace: ApiNamespace::Public,
                endpoint: "parts.update",
                failure_label: "Update part",
                detail_field: None,
                prepare: prepare_update_part,
            }),
        },
        ToolSpec {
            name: "list_parts",
            description: "List parts filtered by type, ownership, hierarchy, and dates",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "type": {"type": "string", "description": "Part type to list, e.g. enhancement"},
                    "cursor": cursor_schema(),
                    "owned_by": id_list_schema("Filter by owners"),
                    "parent_part": id_list_schema("Filter by parent parts"),
                    "created_by": id_list_schema("Filter by creators"),
                    "modified_by": id_list_schema("Filter by last modifiers"),
                    "sort_by": id_list_schema("Sort specifiers"),
                    "accounts": id_list_schema("Filter by accounts"),
                    "target_close_date": date_range_schema("Filter by target close date"),
                    "target_start_date": date_range_schema("Filter by target start date"),
                    "actual_close_date": date_range_schema("Filter by actual close date"),
                    "actual_start_date": date_range_schema("Filter by actual start date")
                },
                "required": ["type"]
            }),
            kind: ToolKind::Endpoint(EndpointTool {
                namespace: ApiNamespace::Public,
                endpoint: "parts.list",
                failure_label: "List parts",
                detail_field: None,
                prepare: prepare_list_parts,
            }),
        },
        ToolSpec {
            name: "list_meetings",
            description: "List meetings filtered by channel, organizer, members, and dates",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "channel": id_list_schema("Filter by meeting channels"),
                    "created_by": id_list_schema("Filter by creators"),
                    "created_date": date_range_schema("Filter by creation date"),
                    "cursor": cursor_schema(),
                    "ended_date": date_range_schema("Filter by end date"),
                    "external_ref": id_list_schema("Filter by external references"),
                    "limit": {"type": "integer", "description": "Maximum number of meetings to return"},
                    "members": id_list_schema("Filter by members"),
                    "modified_date": date_range_schema("Filter by modification date"),
                    "organizer": id_list_schema("Filter by organizers"),
                    "scheduled_date": date_range_schema("Filter by scheduled date"),
                    "sort_by": id_list_schema("Sort specifiers"),
                    "state": id_list_schema("Filter by meeting states")
                }
            }),
            kind: ToolKind::Endpoint(EndpointTool {
                namespace: ApiNamespace::Public,
                endpoint: "meetings.list",
                failure_label: "List meetings",
                detail_field: None,
                prepare: prepare_list_meetings,
            }),
        },
        ToolSpec {
            name: "add_timeline_entry",
            description: "Add a timeline comment to a DevRev object",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "id": {"type": "string", "description": "The ID of the object to comment on"},
                    "timeline_entry": {"type": "string", "description": "The comment text"}
                },
                "required": ["id", "timeline_entry"]
            }),
            kind: ToolKind::Endpoint(EndpointTool {
                namespace: ApiNamespace::Public,
                endpoint: "timeline-entries.create",
                failure_label: "Create timeline entry",
                detail_field: Some("timeline_entry"),
                prepare: prepare_add_timeline_entry,
            }),
        },
        ToolSpec {
            name: "get_sprints",
            description: "List the sprints under an ancestor part",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "ancestor_part_id": {
                        "type": "string",
                        "description": "Part whose sprint tree to list"
                    },
                    "state": {
                        "type": "string",
                        "description": "Sprint state filter; defaults to active"
                    }
                },
                "required": ["ancestor_part_id"]
            }),
            kind: ToolKind::Endpoint(EndpointTool {
                namespace: ApiNamespace::Public,
                endpoint: "vistas.groups.list",
                failure_label: "Get sprints",
                detail_field: Some("vista_group"),
                prepare: prepare_get_sprints,
            }),
        },
        ToolSpec {
            name: "list_subtypes",
            description: "List the subtypes available for a leaf type",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "leaf_type": {
                        "type": "string",
                        "description": "Leaf type to list subtypes for, e.g. issue"
                    }
                },
                "required": ["leaf_type"]
            }),
            kind: ToolKind::Endpoint(EndpointTool {
                namespace: ApiNamespace::Public,
                endpoint: "schemas.subtypes.list",
                failure_label: "List subtypes",
                detail_field: Some("subtypes"),
                prepare: prepare_list_subtypes,
            }),
        },
        ToolSpec {
            name: "get_vista",
            description: "Get all information about a DevRev vista using its ID",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "id": {"type": "string", "description": "The ID of the vista"}
                },
                "required": ["id"]
            }),
            kind: ToolKind::Endpoint(EndpointTool {
                namespace: ApiNamespace::Internal,
                endpoint: "vistas.get",
                failure_label: "get_vista",
                detail_field: Some("vista"),
                prepare: prepare_get_vista,
            }),
        },
        ToolSpec {
            name: "valid_stage_transition",
            description: "Resolve which stage transitions are currently valid for a work item",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "id": {"type": "string", "description": "The ID of the work item"},
                    "type": {
                        "type": "string",
                        "enum": TRANSITION_WORK_TYPES,
                        "description": "The type of the work item"
                    }
                },
                "required": ["id", "type"]
            }),
            kind: ToolKind::StageTransitions,
        },
    ]
}
