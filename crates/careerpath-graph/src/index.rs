use careerpath_core::{Edge, Vertex, VertexId};
use std::collections::{HashMap, HashSet};

/// Forward and reverse adjacency over the effective edge set.
///
/// Edges whose endpoints are not in the vertex list are dropped, and a
/// repeated `source -> target` pair is kept once. Per-key ordering follows the
/// order of the edge list.
#[derive(Debug, Clone, Default)]
pub struct GraphIndex {
    vertex_ids: Vec<VertexId>,
    vertex_set: HashSet<VertexId>,
    children: HashMap<VertexId, Vec<VertexId>>,
    incoming: HashMap<VertexId, Vec<VertexId>>,
    edges: Vec<Edge>,
}

impl GraphIndex {
    pub fn build(vertices: &[Vertex], edges: &[Edge]) -> Self {
        let mut known: HashSet<&VertexId> = HashSet::with_capacity(vertices.len());
        let mut vertex_ids = Vec::with_capacity(vertices.len());
        for vertex in vertices {
            if known.insert(&vertex.id) {
                vertex_ids.push(vertex.id.clone());
            } else {
                tracing::warn!("Ignoring duplicate vertex {}", vertex.id);
            }
        }

        let mut children: HashMap<VertexId, Vec<VertexId>> = HashMap::new();
        let mut incoming: HashMap<VertexId, Vec<VertexId>> = HashMap::new();
        let mut seen_pairs: HashSet<(&VertexId, &VertexId)> = HashSet::new();
        let mut effective = Vec::with_capacity(edges.len());

        for edge in edges {
            if !known.contains(&edge.source) || !known.contains(&edge.target) {
                tracing::warn!(
                    "Dropping edge {} -> {} because an endpoint is missing from the vertex list",
                    edge.source,
                    edge.target
                );
                continue;
            }
            if !seen_pairs.insert((&edge.source, &edge.target)) {
                continue;
            }

            children
                .entry(edge.source.clone())
                .or_default()
                .push(edge.target.clone());
            incoming
                .entry(edge.target.clone())
                .or_default()
                .push(edge.source.clone());
            effective.push(edge.clone());
        }

        let vertex_set = vertex_ids.iter().cloned().collect();
        Self {
            vertex_ids,
            vertex_set,
            children,
            incoming,
            edges: effective,
        }
    }

    /// Unique vertex ids in input order.
    pub fn vertex_ids(&self) -> &[VertexId] {
        &self.vertex_ids
    }

    pub fn contains(&self, id: &VertexId) -> bool {
        self.vertex_set.contains(id)
    }

    pub fn children(&self, id: &VertexId) -> &[VertexId] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn parents(&self, id: &VertexId) -> &[VertexId] {
        self.incoming.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_root(&self, id: &VertexId) -> bool {
        !self.incoming.contains_key(id)
    }

    /// Vertices without an incoming edge, in vertex order.
    pub fn roots(&self) -> impl Iterator<Item = &VertexId> {
        self.vertex_ids.iter().filter(|id| self.is_root(id))
    }

    /// The edges that survived validation, in input order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Every vertex reachable from `id`, excluding `id` itself unless a cycle
    /// leads back to it.
    pub fn descendants(&self, id: &VertexId) -> HashSet<VertexId> {
        let mut out = HashSet::new();
        let mut stack: Vec<&VertexId> = self.children(id).iter().collect();

        while let Some(current) = stack.pop() {
            if out.insert(current.clone()) {
                stack.extend(self.children(current));
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertices(ids: &[&str]) -> Vec<Vertex> {
        ids.iter().map(|id| Vertex::new(*id, *id)).collect()
    }

    fn id(s: &str) -> VertexId {
        VertexId::from(s)
    }

    #[test]
    fn test_children_and_incoming_keep_edge_order() {
        let index = GraphIndex::build(
            &vertices(&["R", "C2", "C1", "G1"]),
            &[Edge::new("R", "C1"), Edge::new("R", "C2"), Edge::new("C1", "G1")],
        );

        assert_eq!(index.children(&id("R")), &[id("C1"), id("C2")]);
        assert_eq!(index.parents(&id("G1")), &[id("C1")]);
        assert!(index.children(&id("G1")).is_empty());
        assert_eq!(index.roots().cloned().collect::<Vec<_>>(), vec![id("R")]);
    }

    #[test]
    fn test_unknown_endpoints_are_dropped() {
        let index = GraphIndex::build(
            &vertices(&["1", "1A"]),
            &[Edge::new("1", "1A"), Edge::new("1", "ghost"), Edge::new("ghost", "1A")],
        );

        assert_eq!(index.edges(), &[Edge::new("1", "1A")]);
        assert_eq!(index.children(&id("1")), &[id("1A")]);
        assert_eq!(index.parents(&id("1A")), &[id("1")]);
        assert!(!index.contains(&id("ghost")));
    }

    #[test]
    fn test_duplicate_edges_and_vertices_collapse() {
        let mut input = vertices(&["A", "B"]);
        input.push(Vertex::new("A", "again"));
        let index = GraphIndex::build(&input, &[Edge::new("A", "B"), Edge::new("A", "B")]);

        assert_eq!(index.vertex_ids(), &[id("A"), id("B")]);
        assert_eq!(index.children(&id("A")).len(), 1);
        assert_eq!(index.edges().len(), 1);
    }

    #[test]
    fn test_descendants_exclude_self() {
        let index = GraphIndex::build(
            &vertices(&["R", "C1", "C2", "G1"]),
            &[Edge::new("R", "C1"), Edge::new("R", "C2"), Edge::new("C1", "G1")],
        );

        let all = index.descendants(&id("R"));
        assert_eq!(all.len(), 3);
        assert!(!all.contains(&id("R")));
        assert_eq!(index.descendants(&id("C1")), HashSet::from([id("G1")]));
        assert!(index.descendants(&id("G1")).is_empty());
        assert!(index.descendants(&id("missing")).is_empty());
    }

    #[test]
    fn test_descendants_terminate_on_cycles() {
        let index = GraphIndex::build(
            &vertices(&["A", "B"]),
            &[Edge::new("A", "B"), Edge::new("B", "A")],
        );
        let found = index.descendants(&id("A"));
        assert_eq!(found, HashSet::from([id("A"), id("B")]));
    }

    #[test]
    fn test_descendants_of_deep_chain() {
        let ids: Vec<String> = (0..50_000).map(|i| format!("1n{i}")).collect();
        let vs: Vec<Vertex> = ids.iter().map(|i| Vertex::new(i.as_str(), "")).collect();
        let es: Vec<Edge> = ids
            .windows(2)
            .map(|w| Edge::new(w[0].as_str(), w[1].as_str()))
            .collect();
        let index = GraphIndex::build(&vs, &es);
        assert_eq!(index.descendants(&id("1n0")).len(), 49_999);
    }
}
