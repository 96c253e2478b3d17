//! Model-layer error types.

use pl_core::{ObjectId, PlError};

use crate::component::PassageRole;

pub type ModelResult<T> = Result<T, ModelError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Object not found: {id}")]
    ObjectNotFound { id: ObjectId },

    #[error("Object '{name}' is not a {expected}")]
    WrongKind { name: String, expected: &'static str },

    #[error("Component '{name}' has no {role:?} passage")]
    NoSuchPassage { name: String, role: PassageRole },

    #[error("Component '{name}' {role:?} passage is already connected")]
    AlreadyConnected { name: String, role: PassageRole },

    #[error("Node '{node}' has no downstream object on loop '{loop_name}'")]
    OpenLoopSide { loop_name: String, node: String },

    #[error("Node '{node}' is not connected to anything")]
    DetachedNode { node: String },

    #[error("'{container}' cannot contain '{child}'")]
    InvalidContainment { container: String, child: String },

    #[error("Component '{name}' has no hydraulic connections")]
    NotConnectable { name: String },

    #[error("Core error: {0}")]
    Core(#[from] PlError),
}
