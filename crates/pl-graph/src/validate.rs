//! Graph validation logic.

use std::collections::HashSet;

use pl_core::{LinkId, PlResult, VertexId};

use crate::error::GraphError;
use crate::graph::{Link, Vertex};

/// Validate the graph structure: link endpoints exist, no self links,
/// no duplicate links, no object on two vertices.
pub(crate) fn validate_structure(vertices: &[Vertex], links: &[Link]) -> PlResult<()> {
    let mut objects = HashSet::new();
    for vertex in vertices {
        if !objects.insert(vertex.object) {
            return Err(GraphError::DuplicateObject {
                object: vertex.object,
            }
            .into());
        }
    }

    let mut pairs = HashSet::new();
    for link in links {
        for end in [link.from, link.to] {
            if end.slot() >= vertices.len() {
                return Err(GraphError::InvalidVertexRef {
                    link: link.id,
                    vertex: end,
                }
                .into());
            }
        }

        if link.from == link.to {
            return Err(GraphError::SelfLink {
                link: link.id,
                vertex: link.from,
            }
            .into());
        }

        if !pairs.insert((link.from, link.to)) {
            return Err(GraphError::DuplicateLink {
                link: link.id,
                from: link.from,
                to: link.to,
            }
            .into());
        }
    }

    Ok(())
}

/// Validate one direction of adjacency for consistency.
pub(crate) fn validate_adjacency(
    vertices: &[Vertex],
    links: &[Link],
    offsets: &[usize],
    flat: &[LinkId],
    end: impl Fn(&Link) -> VertexId,
) -> PlResult<()> {
    if offsets.len() != vertices.len() + 1 || flat.len() != links.len() {
        return Err(GraphError::InconsistentAdjacency {
            link: LinkId::from_index(0),
            vertex: vertices.first().map_or(VertexId::from_index(0), |v| v.id),
        }
        .into());
    }

    let mut seen: HashSet<LinkId> = HashSet::new();
    for vertex in vertices {
        let idx = vertex.id.slot();
        for &link_id in &flat[offsets[idx]..offsets[idx + 1]] {
            let Some(link) = links.get(link_id.slot()) else {
                return Err(GraphError::InconsistentAdjacency {
                    link: link_id,
                    vertex: vertex.id,
                }
                .into());
            };
            if end(link) != vertex.id || !seen.insert(link_id) {
                return Err(GraphError::InconsistentAdjacency {
                    link: link_id,
                    vertex: vertex.id,
                }
                .into());
            }
        }
    }

    Ok(())
}
