//! Core graph data structures.

use std::collections::{HashMap, HashSet};

use pl_core::{LinkId, ObjectId, VertexId};

/// A vertex stands for one model object (node, component, splitter, mixer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vertex {
    pub id: VertexId,
    pub object: ObjectId,
}

/// A directed hydraulic connection: fluid leaves `from` and enters `to`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: LinkId,
    pub from: VertexId,
    pub to: VertexId,
}

/// The graph: a validated, immutable set of vertices and links.
///
/// Adjacency is stored in compressed form for both directions. Within a
/// vertex, links keep their insertion order so splitter outlets come back
/// in the order they were wired.
#[derive(Debug, Clone)]
pub struct Graph {
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) links: Vec<Link>,
    pub(crate) by_object: HashMap<ObjectId, VertexId>,

    /// Vertex i's outgoing links are `out_links[out_offsets[i]..out_offsets[i+1]]`.
    pub(crate) out_offsets: Vec<usize>,
    pub(crate) out_links: Vec<LinkId>,

    /// Vertex i's incoming links are `in_links[in_offsets[i]..in_offsets[i+1]]`.
    pub(crate) in_offsets: Vec<usize>,
    pub(crate) in_links: Vec<LinkId>,
}

impl Graph {
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Get a vertex by ID (returns None if ID out of bounds).
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id.slot())
    }

    /// Vertex carrying `object`, if the object is part of this graph.
    pub fn vertex_of(&self, object: ObjectId) -> Option<VertexId> {
        self.by_object.get(&object).copied()
    }

    pub fn contains(&self, object: ObjectId) -> bool {
        self.by_object.contains_key(&object)
    }

    /// Model objects in vertex order.
    pub fn objects(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.vertices.iter().map(|v| v.object)
    }

    fn out_of(&self, v: VertexId) -> &[LinkId] {
        let idx = v.slot();
        if idx >= self.vertices.len() {
            return &[];
        }
        &self.out_links[self.out_offsets[idx]..self.out_offsets[idx + 1]]
    }

    fn in_of(&self, v: VertexId) -> &[LinkId] {
        let idx = v.slot();
        if idx >= self.vertices.len() {
            return &[];
        }
        &self.in_links[self.in_offsets[idx]..self.in_offsets[idx + 1]]
    }

    fn vertex_successors(&self, v: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.out_of(v).iter().map(|l| self.links[l.slot()].to)
    }

    fn vertex_predecessors(&self, v: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.in_of(v).iter().map(|l| self.links[l.slot()].from)
    }

    fn object_at(&self, v: VertexId) -> ObjectId {
        self.vertices[v.slot()].object
    }

    /// Objects directly downstream of `object`, in wiring order.
    pub fn successors(&self, object: ObjectId) -> Vec<ObjectId> {
        match self.vertex_of(object) {
            Some(v) => self.vertex_successors(v).map(|s| self.object_at(s)).collect(),
            None => Vec::new(),
        }
    }

    /// Objects directly upstream of `object`, in wiring order.
    pub fn predecessors(&self, object: ObjectId) -> Vec<ObjectId> {
        match self.vertex_of(object) {
            Some(v) => self.vertex_predecessors(v).map(|p| self.object_at(p)).collect(),
            None => Vec::new(),
        }
    }

    /// First path from `from` to `to`, both ends included.
    ///
    /// Successors are explored in wiring order, so on a linear run the
    /// result is that run.
    pub fn path(&self, from: ObjectId, to: ObjectId) -> Option<Vec<ObjectId>> {
        let start = self.vertex_of(from)?;
        let goal = self.vertex_of(to)?;

        let mut visited = vec![false; self.vertices.len()];
        // (vertex, index of the next successor to try)
        let mut stack: Vec<(VertexId, usize)> = vec![(start, 0)];
        visited[start.slot()] = true;

        while let Some(top) = stack.last_mut() {
            let (v, next) = *top;
            if v == goal {
                return Some(stack.iter().map(|(v, _)| self.object_at(*v)).collect());
            }
            let outs = self.out_of(v);
            if next >= outs.len() {
                stack.pop();
                continue;
            }
            top.1 += 1;
            let succ = self.links[outs[next].slot()].to;
            if !visited[succ.slot()] {
                visited[succ.slot()] = true;
                stack.push((succ, 0));
            }
        }
        None
    }

    /// Every object lying on some path from `from` to `to`, in flow order.
    ///
    /// Flow order lists an object only after all of its upstream objects in
    /// the set. Parallel branches come out one after another in wiring
    /// order, so a splitter's first branch is listed completely before the
    /// second one starts.
    pub fn between(&self, from: ObjectId, to: ObjectId) -> Vec<ObjectId> {
        let (Some(start), Some(goal)) = (self.vertex_of(from), self.vertex_of(to)) else {
            return Vec::new();
        };

        let forward = self.reach(start, |g, v| g.vertex_successors(v).collect());
        if !forward.contains(&goal) {
            return Vec::new();
        }
        let backward = self.reach(goal, |g, v| g.vertex_predecessors(v).collect());
        let members: HashSet<VertexId> = forward.intersection(&backward).copied().collect();

        let mut pending: HashMap<VertexId, usize> = members
            .iter()
            .map(|&v| {
                let n = self
                    .vertex_predecessors(v)
                    .filter(|p| members.contains(p))
                    .count();
                (v, n)
            })
            .collect();

        let mut order = Vec::with_capacity(members.len());
        let mut stack = vec![start];
        while let Some(v) = stack.pop() {
            order.push(self.object_at(v));
            let ready: Vec<VertexId> = self
                .vertex_successors(v)
                .filter(|s| members.contains(s))
                .filter(|s| {
                    let count = pending.entry(*s).or_insert(0);
                    *count = count.saturating_sub(1);
                    *count == 0
                })
                .collect();
            stack.extend(ready.into_iter().rev());
        }
        order
    }

    fn reach<F>(&self, start: VertexId, next: F) -> HashSet<VertexId>
    where
        F: Fn(&Self, VertexId) -> Vec<VertexId>,
    {
        let mut seen = HashSet::new();
        let mut stack = vec![start];
        while let Some(v) = stack.pop() {
            if seen.insert(v) {
                stack.extend(next(self, v));
            }
        }
        seen
    }
}
