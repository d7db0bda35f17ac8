//! Maximal clique enumeration via Bron-Kerbosch, without pivoting (§4.5).
//!
//! Grounded on the `bron_kerbosch` helper embedded in
//! `OS_project/part7/maxclique.c` alongside `graph_find_all_maximal_cliques`:
//! that routine tries every candidate in turn rather than selecting a pivot
//! vertex to skip over (see DESIGN.md for why pivoting was left out).

use fixedbitset::FixedBitSet;

use crate::graph::Graph;

fn build_adjacency_matrix(g: &Graph) -> Vec<FixedBitSet> {
    let n = g.len();
    let mut adj = vec![FixedBitSet::with_capacity(n); n];
    for u in 0..n {
        for entry in g.neighbors(u) {
            if entry.to != u {
                adj[u].insert(entry.to);
            }
        }
    }
    adj
}

fn bron_kerbosch(
    adj: &[FixedBitSet],
    r: &mut Vec<usize>,
    mut p: FixedBitSet,
    mut x: FixedBitSet,
    cliques: &mut Vec<Vec<usize>>,
) {
    if p.is_clear() && x.is_clear() {
        cliques.push(r.clone());
        return;
    }

    // No pivot selection: every vertex still in `p` is tried in turn, as in
    // the original's unpivoted helper.
    let candidates: Vec<usize> = p.ones().collect();
    for v in candidates {
        if !p.contains(v) {
            continue;
        }
        r.push(v);
        let p_next = {
            let mut t = p.clone();
            t.intersect_with(&adj[v]);
            t
        };
        let x_next = {
            let mut t = x.clone();
            t.intersect_with(&adj[v]);
            t
        };
        bron_kerbosch(adj, r, p_next, x_next, cliques);
        r.pop();
        p.set(v, false);
        x.insert(v);
    }
}

/// Every maximal clique of `g` (a clique that cannot be extended by adding
/// one more vertex), found via unpivoted Bron-Kerbosch.
pub fn find_all_maximal_cliques(g: &Graph) -> Vec<Vec<usize>> {
    let n = g.len();
    if n == 0 {
        return Vec::new();
    }

    let adj = build_adjacency_matrix(g);
    let mut p = FixedBitSet::with_capacity(n);
    p.insert_range(0..n);
    let x = FixedBitSet::with_capacity(n);

    let mut cliques = Vec::new();
    let mut r = Vec::new();
    bron_kerbosch(&adj, &mut r, p.clone(), x, &mut cliques);
    let _ = p;
    cliques
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut cliques: Vec<Vec<usize>>) -> Vec<Vec<usize>> {
        for c in cliques.iter_mut() {
            c.sort();
        }
        cliques.sort();
        cliques
    }

    #[test]
    fn triangle_has_one_maximal_clique() {
        let mut g = Graph::create(3).unwrap();
        g.add_edge(0, 1).unwrap();
        g.add_edge(1, 2).unwrap();
        g.add_edge(2, 0).unwrap();
        let cliques = sorted(find_all_maximal_cliques(&g));
        assert_eq!(cliques, vec![vec![0, 1, 2]]);
    }

    #[test]
    fn two_triangles_sharing_an_edge() {
        // 0-1-2 triangle and 1-2-3 triangle share edge {1,2}.
        let mut g = Graph::create(4).unwrap();
        g.add_edge(0, 1).unwrap();
        g.add_edge(1, 2).unwrap();
        g.add_edge(2, 0).unwrap();
        g.add_edge(1, 3).unwrap();
        g.add_edge(2, 3).unwrap();
        let cliques = sorted(find_all_maximal_cliques(&g));
        assert_eq!(cliques, vec![vec![0, 1, 2], vec![1, 2, 3]]);
    }

    #[test]
    fn isolated_vertex_is_its_own_maximal_clique() {
        let mut g = Graph::create(3).unwrap();
        g.add_edge(0, 1).unwrap();
        let cliques = sorted(find_all_maximal_cliques(&g));
        assert_eq!(cliques, vec![vec![0, 1], vec![2]]);
    }

    #[test]
    fn empty_edgeless_graph_each_vertex_maximal() {
        let g = Graph::create(3).unwrap();
        let cliques = sorted(find_all_maximal_cliques(&g));
        assert_eq!(cliques, vec![vec![0], vec![1], vec![2]]);
    }
}
