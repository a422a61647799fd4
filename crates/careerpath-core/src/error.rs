use crate::VertexId;
use thiserror::Error;

/// Malformed-input errors. These abort the current layout pass only.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("cycle detected at vertex {vertex} (path: {})", format_path(.path))]
    CycleDetected {
        vertex: VertexId,
        /// Vertices on the traversal stack when `vertex` was revisited.
        path: Vec<VertexId>,
    },
}

fn format_path(path: &[VertexId]) -> String {
    path.iter()
        .map(VertexId::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_message_lists_path() {
        let err = GraphError::CycleDetected {
            vertex: VertexId::from("A"),
            path: vec![VertexId::from("A"), VertexId::from("B")],
        };
        assert_eq!(
            err.to_string(),
            "cycle detected at vertex A (path: A -> B)"
        );
    }
}
