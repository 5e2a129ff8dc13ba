// Library interface for the DevRev MCP server
// This exposes the core functionality as a library that can be:
// - Driven end-to-end from integration tests without a child process
// - Embedded into another host that already owns the stdio streams

pub mod config;
pub mod error;
pub mod http;
pub mod server;
pub mod tools;

// Re-export commonly used types for convenience
pub use config::ApiConfig;
pub use error::{DevRevMcpError, Result};
pub use http::{ApiNamespace, ApiResponse, DevRevClient, HttpDevRevClient};
pub use server::McpServer;
pub use tools::ToolRegistry;
