//! Graph-specific error types.

use pl_core::{LinkId, ObjectId, PlError, VertexId};

/// Graph construction and validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A link refers to a vertex that doesn't exist.
    InvalidVertexRef { link: LinkId, vertex: VertexId },

    /// A link starts and ends on the same vertex.
    SelfLink { link: LinkId, vertex: VertexId },

    /// Two links join the same ordered vertex pair.
    DuplicateLink { link: LinkId, from: VertexId, to: VertexId },

    /// Two vertices carry the same model object.
    DuplicateObject { object: ObjectId },

    /// Adjacency list is inconsistent with the link table.
    InconsistentAdjacency { link: LinkId, vertex: VertexId },
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphError::InvalidVertexRef { link, vertex } => {
                write!(f, "Link {} refers to non-existent vertex {}", link, vertex)
            }
            GraphError::SelfLink { link, vertex } => {
                write!(f, "Link {} connects vertex {} to itself", link, vertex)
            }
            GraphError::DuplicateLink { link, from, to } => {
                write!(f, "Link {} duplicates an existing link {} -> {}", link, from, to)
            }
            GraphError::DuplicateObject { object } => {
                write!(f, "Object {} appears on more than one vertex", object)
            }
            GraphError::InconsistentAdjacency { link, vertex } => {
                write!(
                    f,
                    "Link {} in vertex {}'s adjacency list but doesn't touch that vertex",
                    link, vertex
                )
            }
        }
    }
}

impl std::error::Error for GraphError {}

impl From<GraphError> for PlError {
    fn from(err: GraphError) -> Self {
        PlError::Invariant {
            what: err.to_string(),
        }
    }
}
