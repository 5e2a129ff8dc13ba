// Tool registry and dispatch
//
// Design Decision: Table-driven dispatch instead of a per-tool match
//
// Rationale: All endpoint-backed tools share one fulfillment shape
// (validate, build payload, POST, interpret), so the per-tool knowledge
// lives in catalog entries and dispatch stays a single code path. Adding a
// tool means adding a ToolSpec, not another arm in a long conditional.
//
// Trade-offs:
// - Uniformity: the one tool that is not a single POST (stage transitions)
//   gets its own ToolKind variant rather than a degenerate endpoint entry
// - Lookup: names resolve through a map built once at startup; an unknown
//   name is rejected before any argument is inspected

pub mod args;
pub mod catalog;
pub mod payload;
pub mod response;
pub mod transitions;

pub use args::ToolArguments;
pub use catalog::{EndpointTool, PreparedCall, ToolKind, ToolSpec};
pub use payload::{FieldPatch, PayloadBuilder};

use crate::error::{DevRevMcpError, Result};
use crate::http::DevRevClient;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// The catalog, indexed by tool name
///
/// Built once at startup and shared for the life of the server. Listing
/// order is the catalog's declaration order; lookup is by name.
pub struct ToolRegistry {
    specs: Vec<ToolSpec>,
    index: HashMap<&'static str, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        let specs = catalog::all();
        let index = specs
            .iter()
            .enumerate()
            .map(|(position, spec)| (spec.name, position))
            .collect();
        Self { specs, index }
    }

    /// All registered tools in listing order
    pub fn specs(&self) -> &[ToolSpec] {
        &self.specs
    }

    pub fn get(&self, name: &str) -> Option<&ToolSpec> {
        self.index.get(name).map(|&position| &self.specs[position])
    }

    /// Fulfill one tool call end to end
    ///
    /// The name is resolved first, then arguments are validated, then the
    /// HTTP work happens; a call never reaches the network with an unknown
    /// name or bad arguments. The returned string is the single text block
    /// of the tool result. Remote non-2xx statuses are part of that string;
    /// only validation and transport problems are `Err`.
    pub async fn dispatch(
        &self,
        name: &str,
        arguments: Option<&Map<String, Value>>,
        client: &dyn DevRevClient,
    ) -> Result<String> {
        let spec = self
            .get(name)
            .ok_or_else(|| DevRevMcpError::UnknownTool(name.to_string()))?;
        let args = ToolArguments::new(arguments);

        match &spec.kind {
            ToolKind::Endpoint(tool) => {
                let prepared = (tool.prepare)(args)?;
                tracing::debug!(
                    tool = spec.name,
                    endpoint = tool.endpoint,
                    "calling DevRev endpoint"
                );
                let response = client
                    .post(tool.namespace, tool.endpoint, prepared.payload)
                    .await?;
                Ok(response::interpret(
                    &response,
                    &prepared.success_label,
                    tool.failure_label,
                    tool.detail_field,
                ))
            }
            ToolKind::StageTransitions => {
                tracing::debug!(tool = spec.name, "resolving stage transitions");
                transitions::resolve(args, client).await
            }
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
