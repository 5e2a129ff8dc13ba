// Stage-transition resolution for work items
//
// Answering "where can this work item go next" takes three dependent
// lookups: the work item itself (for its current stage, type, and subtype),
// the aggregated schema for that type/subtype (for the stage diagram id),
// and the stage diagram (for the transition table). Each hop only makes
// sense with the previous hop's output, so the chain runs sequentially and
// stops at the first failed call. Failures are reported with a hop-specific
// label so the caller can tell which lookup went wrong.
//
// Upstream data anomalies (a work item with no stage, a schema with no
// diagram id) are not failures. They read as "nothing to transition to"
// and surface through the ordinary no-transitions message.

use crate::error::Result;
use crate::http::{ApiNamespace, DevRevClient};
use crate::tools::args::{display_value, ToolArguments};
use crate::tools::catalog::TRANSITION_WORK_TYPES;
use serde_json::{json, Map, Value};

/// Resolve the valid stage transitions for a work item
///
/// Arguments: `id` (the work item) and `type` (one of issue, ticket, task).
/// Returns the result message for every completed resolution, including
/// remote failures. Only transport errors propagate as `Err`.
pub async fn resolve(args: ToolArguments<'_>, client: &dyn DevRevClient) -> Result<String> {
    let id = args.require("id")?.clone();
    let work_type = args.require_one_of("type", TRANSITION_WORK_TYPES)?;
    let id_text = display_value(&id);

    // Hop 1: the work item, for its current stage and schema coordinates.
    let response = client
        .post(ApiNamespace::Public, "works.get", json!({ "id": id }))
        .await?;
    if !response.is_success() {
        return Ok(format!(
            "Get work item failed with status {}: {}",
            response.status, response.text
        ));
    }
    // An undecodable 2xx body reads as empty; the lookups below then find
    // nothing and the call lands on the no-transitions message.
    let body = response.json().unwrap_or(Value::Null);
    let work = body.get("work").cloned().unwrap_or(Value::Null);

    let current_stage = work
        .get("stage")
        .and_then(|stage| stage.get("stage"))
        .and_then(|stage| stage.get("id"))
        .and_then(Value::as_str)
        .map(str::to_string);
    let item_type = work
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or(work_type)
        .to_string();
    let subtype = work.get("subtype").filter(|value| !value.is_null()).cloned();

    // Hop 2: the aggregated schema for that type/subtype pair.
    let mut schema_query = Map::new();
    schema_query.insert("type".to_string(), Value::String(item_type));
    if let Some(subtype) = subtype {
        schema_query.insert("subtype".to_string(), subtype);
    }
    let response = client
        .post(
            ApiNamespace::Public,
            "schemas.aggregated.get",
            Value::Object(schema_query),
        )
        .await?;
    if !response.is_success() {
        return Ok(format!(
            "Get schema failed with status {}: {}",
            response.status, response.text
        ));
    }
    let body = response.json().unwrap_or(Value::Null);
    let diagram_id = body
        .get("schema")
        .and_then(|schema| schema.get("stage_diagram_id"))
        .and_then(|diagram| diagram.get("id"))
        .filter(|value| !value.is_null())
        .cloned();
    let Some(diagram_id) = diagram_id else {
        return Ok(no_transitions(&id_text));
    };

    // Hop 3: the stage diagram holding the transition table.
    let response = client
        .post(
            ApiNamespace::Public,
            "stage-diagrams.get",
            json!({ "id": diagram_id }),
        )
        .await?;
    if !response.is_success() {
        return Ok(format!(
            "Get stage diagram for Get stage transitions failed with status {}: {}",
            response.status, response.text
        ));
    }
    let body = response.json().unwrap_or(Value::Null);

    let transitions = body
        .get("stage_diagram")
        .and_then(|diagram| diagram.get("stages"))
        .and_then(Value::as_array)
        .and_then(|stages| find_stage_transitions(stages, current_stage.as_deref()));

    match transitions {
        Some(transitions) => Ok(format!(
            "Valid Transitions for '{}': {}",
            id_text,
            Value::Array(transitions)
        )),
        None => Ok(no_transitions(&id_text)),
    }
}

/// Locate the diagram entry for the item's current stage and return its
/// transition list when it is non-empty
fn find_stage_transitions(stages: &[Value], current_stage: Option<&str>) -> Option<Vec<Value>> {
    let current_stage = current_stage?;
    let entry = stages.iter().find(|entry| {
        entry
            .get("stage")
            .and_then(|stage| stage.get("id"))
            .and_then(Value::as_str)
            == Some(current_stage)
    })?;

    let transitions = entry.get("transitions").and_then(Value::as_array)?;
    if transitions.is_empty() {
        None
    } else {
        Some(transitions.clone())
    }
}

fn no_transitions(id: &str) -> String {
    format!("No valid transitions found for '{}'", id)
}
