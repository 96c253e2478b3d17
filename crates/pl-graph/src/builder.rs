//! Incremental graph builder.

use std::collections::HashMap;

use pl_core::{LinkId, ObjectId, PlResult, VertexId};

use crate::graph::{Graph, Link, Vertex};
use crate::validate;

/// Builder for constructing a graph incrementally.
///
/// Use `add_vertex` and `add_link` (or `link_objects`) to build up the
/// graph, then call `build()` to validate and freeze it into a `Graph`.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    vertices: Vec<Vertex>,
    links: Vec<Link>,
    by_object: HashMap<ObjectId, VertexId>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex for `object`, or return the existing one.
    pub fn add_vertex(&mut self, object: ObjectId) -> VertexId {
        if let Some(&id) = self.by_object.get(&object) {
            return id;
        }
        let id = VertexId::from_usize(self.vertices.len());
        self.vertices.push(Vertex { id, object });
        self.by_object.insert(object, id);
        id
    }

    /// Add a raw link between two vertices. Endpoints are checked by `build()`.
    pub fn add_link(&mut self, from: VertexId, to: VertexId) -> LinkId {
        let id = LinkId::from_usize(self.links.len());
        self.links.push(Link { id, from, to });
        id
    }

    /// Link two model objects, adding their vertices as needed.
    ///
    /// Linking the same ordered pair twice returns the first link.
    pub fn link_objects(&mut self, from: ObjectId, to: ObjectId) -> LinkId {
        let from = self.add_vertex(from);
        let to = self.add_vertex(to);
        if let Some(existing) = self.links.iter().find(|l| l.from == from && l.to == to) {
            return existing.id;
        }
        self.add_link(from, to)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Build and validate the graph, returning an immutable `Graph`.
    pub fn build(self) -> PlResult<Graph> {
        validate::validate_structure(&self.vertices, &self.links)?;

        let (out_offsets, out_links) = Self::build_adjacency(&self.vertices, &self.links, |l| l.from);
        let (in_offsets, in_links) = Self::build_adjacency(&self.vertices, &self.links, |l| l.to);

        validate::validate_adjacency(&self.vertices, &self.links, &out_offsets, &out_links, |l| {
            l.from
        })?;
        validate::validate_adjacency(&self.vertices, &self.links, &in_offsets, &in_links, |l| l.to)?;

        Ok(Graph {
            vertices: self.vertices,
            links: self.links,
            by_object: self.by_object,
            out_offsets,
            out_links,
            in_offsets,
            in_links,
        })
    }

    /// Compact adjacency keyed by `end(link)`, keeping link insertion order.
    fn build_adjacency(
        vertices: &[Vertex],
        links: &[Link],
        end: impl Fn(&Link) -> VertexId,
    ) -> (Vec<usize>, Vec<LinkId>) {
        let mut per_vertex: Vec<Vec<LinkId>> = vec![Vec::new(); vertices.len()];
        for link in links {
            if let Some(list) = per_vertex.get_mut(end(link).slot()) {
                list.push(link.id);
            }
        }

        let mut offsets = Vec::with_capacity(vertices.len() + 1);
        let mut flat = Vec::with_capacity(links.len());
        offsets.push(0);
        for list in per_vertex {
            flat.extend(list);
            offsets.push(flat.len());
        }
        (offsets, flat)
    }
}
