use thiserror::Error;

use crate::model::topology::{EdgeId, NodeId};

/// Construction-time failures. All of these abort simulator creation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TopologyError {
    #[error("topology has no nodes")]
    EmptyNodes,

    #[error("topology has no edges")]
    EmptyEdges,

    #[error("self-loop on node {0}")]
    SelfLoop(String),

    #[error("no edge between nodes {0} and {1}")]
    MissingEdge(NodeId, NodeId),

    #[error("no path between {from} and {to}")]
    NoRoute { from: String, to: String },
}

/// Contract and invariant violations raised while stepping the engine.
/// None of these are transient; nothing is retried.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimError {
    #[error("action {0} outside the action space [0, 3]")]
    InvalidAction(u32),

    #[error("episode already terminated, call reset first")]
    EpisodeFinished,

    #[error("no free wavelength slot on edge {edge}")]
    CapacityViolation { edge: EdgeId },
}
