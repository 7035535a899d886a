//! Connected components over implicitly defined undirected graphs.

/// Find the connected components of an undirected graph with
/// `vertex_count` vertices.
///
/// `arc_present(i, j)` is queried once for every pair `i < j`. Components are
/// discovered with an explicit work stack, so deep chains of merges never
/// grow the call stack. Components are ordered by their smallest vertex,
/// which also comes first in the component. The remaining vertices follow in
/// depth-first discovery order, lower neighbors first. With
/// `prune_singletons`, components of a single vertex are left out.
pub fn coherent_subgraphs<F>(
    vertex_count: usize,
    mut arc_present: F,
    prune_singletons: bool,
) -> Vec<Vec<usize>>
where
    F: FnMut(usize, usize) -> bool,
{
    let mut neighbors: Vec<Vec<usize>> = vec![Vec::new(); vertex_count];
    for i in 0..vertex_count {
        for j in (i + 1)..vertex_count {
            if arc_present(i, j) {
                neighbors[i].push(j);
                neighbors[j].push(i);
            }
        }
    }

    let mut visited = vec![false; vertex_count];
    let mut components = Vec::new();
    let mut stack = Vec::new();

    for start in 0..vertex_count {
        if visited[start] {
            continue;
        }

        let mut component = Vec::new();
        stack.push(start);
        while let Some(vertex) = stack.pop() {
            if visited[vertex] {
                continue;
            }
            visited[vertex] = true;
            component.push(vertex);
            // Neighbors are ascending; push in reverse so the lowest pops first.
            stack.extend(
                neighbors[vertex]
                    .iter()
                    .rev()
                    .copied()
                    .filter(|&neighbor| !visited[neighbor]),
            );
        }

        if prune_singletons && component.len() == 1 {
            continue;
        }
        components.push(component);
    }

    components
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_is_one_component() {
        let components = coherent_subgraphs(4, |i, j| j == i + 1, false);
        assert_eq!(components, vec![vec![0, 1, 2, 3]]);
    }

    #[test]
    fn test_singletons() {
        let arcs = |i: usize, j: usize| (i, j) == (0, 2);
        assert_eq!(
            coherent_subgraphs(3, arcs, false),
            vec![vec![0, 2], vec![1]]
        );
        assert_eq!(coherent_subgraphs(3, arcs, true), vec![vec![0, 2]]);
    }

    #[test]
    fn test_long_chain() {
        let components = coherent_subgraphs(3_000, |i, j| j == i + 1, true);
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].len(), 3_000);
    }

    #[test]
    fn test_discovery_order() {
        // 0 - 3, 0 - 2, 3 - 1: depth-first from 0 visits 2 before 3, then 1.
        let arcs = |i: usize, j: usize| matches!((i, j), (0, 3) | (0, 2) | (1, 3));
        assert_eq!(coherent_subgraphs(4, arcs, false), vec![vec![0, 2, 3, 1]]);

        // A star around 2 with an extra arc 3 - 4: 0 first, then 2, then
        // 2's remaining neighbors going deep through 3 before 5.
        let arcs = |i: usize, j: usize| {
            matches!((i, j), (0, 2) | (1, 2) | (2, 3) | (2, 5) | (3, 4))
        };
        assert_eq!(
            coherent_subgraphs(6, arcs, false),
            vec![vec![0, 2, 1, 3, 4, 5]]
        );
    }

    #[test]
    fn test_empty_graph() {
        assert!(coherent_subgraphs(0, |_, _| true, false).is_empty());
    }
}
