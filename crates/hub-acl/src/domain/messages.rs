//! # Hub Messages
//!
//! Request types of the Hub's deal-scoped RPCs. Field-sourced requests carry
//! an optional `deal` the way the protobuf messages do; metadata-sourced ones
//! (streams) carry no deal at all and rely on the `deal` call metadata.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Deal as it appears on the wire.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Deal {
    pub id: String,
    pub buyer_id: String,
    pub supplier_id: String,
    pub price: String,
}

impl Deal {
    /// Wire deal carrying only an id.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}

/// Container to run for a task.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerSpec {
    pub image: String,
    pub registry: String,
    pub env: BTreeMap<String, String>,
    pub commit_on_stop: bool,
}

/// `StartTask`: run a container on resources bought under a deal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StartTaskRequest {
    pub deal: Option<Deal>,
    pub container: ContainerSpec,
}

/// `TaskStatus`: query a task running under a deal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskStatusRequest {
    pub deal: Option<Deal>,
    pub task_id: String,
}

/// `PushTask`: one chunk of an image upload. Deal comes from metadata.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PushTaskChunk {
    pub chunk: Vec<u8>,
}

/// `PullTask`: download a committed task image. Deal comes from metadata.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PullTaskRequest {
    pub task_id: String,
}

crate::impl_as_deal_id!(StartTaskRequest, TaskStatusRequest);
