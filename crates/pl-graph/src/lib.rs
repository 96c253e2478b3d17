//! pl-graph: directed connection graph over model objects.
//!
//! Provides:
//! - Vertex/link data structures keyed by model object IDs
//! - Incremental graph builder with validation
//! - Run queries (`path`, `between`) used to cut a loop side into branches
//!
//! # Example
//!
//! ```
//! use pl_core::ObjectId;
//! use pl_graph::GraphBuilder;
//!
//! let inlet = ObjectId::from_index(0);
//! let pump = ObjectId::from_index(1);
//! let outlet = ObjectId::from_index(2);
//!
//! let mut builder = GraphBuilder::new();
//! builder.link_objects(inlet, pump);
//! builder.link_objects(pump, outlet);
//! let graph = builder.build().unwrap();
//!
//! assert_eq!(graph.path(inlet, outlet).unwrap(), vec![inlet, pump, outlet]);
//! ```

pub mod builder;
pub mod error;
pub mod graph;
pub(crate) mod validate;

pub use builder::GraphBuilder;
pub use error::GraphError;
pub use graph::{Graph, Link, Vertex};
