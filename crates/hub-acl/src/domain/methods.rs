//! Deal-scoped Hub methods and where each one finds its deal id.
//!
//! Unary methods carry the deal in the request message. Streaming methods
//! send it as call metadata because their messages are raw chunks.

use crate::extractors::DealSource;

/// A Hub RPC guarded by the deal ACL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HubMethod {
    /// Full gRPC path (e.g. "/hub.Hub/StartTask")
    pub path: &'static str,
    /// Where the deal id comes from
    pub source: DealSource,
    /// Brief description
    pub description: &'static str,
}

impl HubMethod {
    const fn field(path: &'static str, description: &'static str) -> Self {
        Self {
            path,
            source: DealSource::Field,
            description,
        }
    }

    const fn metadata(path: &'static str, description: &'static str) -> Self {
        Self {
            path,
            source: DealSource::Metadata,
            description,
        }
    }
}

pub const START_TASK: &str = "/hub.Hub/StartTask";
pub const TASK_STATUS: &str = "/hub.Hub/TaskStatus";
pub const PUSH_TASK: &str = "/hub.Hub/PushTask";
pub const PULL_TASK: &str = "/hub.Hub/PullTask";

/// Built-in method table.
pub static HUB_METHODS: &[HubMethod] = &[
    HubMethod::field(START_TASK, "Start a container on resources bought under a deal"),
    HubMethod::field(TASK_STATUS, "Query a task running under a deal"),
    HubMethod::metadata(PUSH_TASK, "Upload a task image for a deal (client stream)"),
    HubMethod::metadata(PULL_TASK, "Download a committed task image (server stream)"),
];

/// Look up a built-in method by path.
pub fn hub_method(path: &str) -> Option<&'static HubMethod> {
    HUB_METHODS.iter().find(|method| method.path == path)
}
