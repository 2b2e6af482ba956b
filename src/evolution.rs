//! Evolution chain decomposition.
//!
//! A lineage is stored as a directed graph of evolution edges. The detail view
//! shows it as rows, one per root-to-sink path, so a branching lineage such as
//! Eevee's produces one row per evolution with the shared ancestors repeated.
//!
//! Malformed lineage data never fails the request: edges pointing outside the
//! lineage are ignored, and cycles are cut so every path stays finite.

use schema::{EvolutionEdge, EvolutionLineage, EvolutionNode};
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// One display row: `links[i]` is the condition between `species[i]` and `species[i + 1]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvolutionChain {
    pub species: Vec<EvolutionNode>,
    pub links: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeView {
    pub from: u32,
    pub to: u32,
    pub condition: String,
}

/// Everything the detail view needs to draw a lineage
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvolutionDisplay {
    pub members: Vec<EvolutionNode>,
    pub edges: Vec<EdgeView>,
    pub chains: Vec<EvolutionChain>,
}

impl EvolutionDisplay {
    pub fn from_lineage(lineage: &EvolutionLineage) -> Self {
        Self::from_parts(&lineage.nodes, &lineage.edges)
    }

    pub fn from_parts(nodes: &[EvolutionNode], edges: &[EvolutionEdge]) -> Self {
        EvolutionDisplay {
            members: nodes.to_vec(),
            edges: edges
                .iter()
                .map(|edge| EdgeView {
                    from: edge.from,
                    to: edge.to,
                    condition: edge.condition(),
                })
                .collect(),
            chains: build_chains(nodes, edges),
        }
    }
}

// Position of a node on the path currently being walked
struct Frame {
    node: usize,
    next_child: usize,
    extended: bool,
}

/// Decompose a lineage graph into linear display chains.
///
/// Chains come out in root order (roots in `nodes` order), and within a root
/// in the order its branches appear in `edges`.
pub fn build_chains(nodes: &[EvolutionNode], edges: &[EvolutionEdge]) -> Vec<EvolutionChain> {
    if nodes.is_empty() {
        return Vec::new();
    }
    if edges.is_empty() {
        return vec![single_row(nodes)];
    }

    // First occurrence wins if a species is listed twice
    let mut index: HashMap<u32, usize> = HashMap::with_capacity(nodes.len());
    for (i, node) in nodes.iter().enumerate() {
        index.entry(node.species_id).or_insert(i);
    }

    let kept: Vec<(usize, usize, &EvolutionEdge)> = edges
        .iter()
        .filter_map(|edge| match (index.get(&edge.from), index.get(&edge.to)) {
            (Some(&from), Some(&to)) => Some((from, to, edge)),
            _ => None,
        })
        .collect();

    if kept.len() < edges.len() {
        debug!(
            dropped = edges.len() - kept.len(),
            "ignoring evolution edges that reference species outside the lineage"
        );
    }
    if kept.is_empty() {
        return vec![single_row(nodes)];
    }

    let mut children: Vec<Vec<(usize, &EvolutionEdge)>> = vec![Vec::new(); nodes.len()];
    let mut in_degree = vec![0usize; nodes.len()];
    for &(from, to, edge) in &kept {
        children[from].push((to, edge));
        in_degree[to] += 1;
    }

    let mut roots: Vec<usize> = (0..nodes.len())
        .filter(|&i| in_degree[i] == 0 && index.get(&nodes[i].species_id) == Some(&i))
        .collect();
    if roots.is_empty() {
        // Every node has a parent, so the lineage is cyclic
        let (fallback, _, _) = kept[0];
        debug!(
            species_id = nodes[fallback].species_id,
            "lineage has no root, starting from the first edge source"
        );
        roots.push(fallback);
    }

    let mut chains = Vec::new();
    for root in roots {
        walk_paths(root, nodes, &children, &mut chains);
    }
    chains
}

fn single_row(nodes: &[EvolutionNode]) -> EvolutionChain {
    EvolutionChain {
        species: nodes.to_vec(),
        links: Vec::new(),
    }
}

/// Depth-first walk from `root`, emitting one chain per maximal path.
fn walk_paths(
    root: usize,
    nodes: &[EvolutionNode],
    children: &[Vec<(usize, &EvolutionEdge)>],
    chains: &mut Vec<EvolutionChain>,
) {
    let mut on_path = vec![false; nodes.len()];
    let mut stack = vec![Frame {
        node: root,
        next_child: 0,
        extended: false,
    }];
    let mut links: Vec<String> = Vec::new();
    on_path[root] = true;

    while let Some(frame) = stack.last_mut() {
        match children[frame.node].get(frame.next_child) {
            Some(&(child, edge)) => {
                frame.next_child += 1;
                if on_path[child] {
                    debug!(
                        from = nodes[frame.node].species_id,
                        to = nodes[child].species_id,
                        "cutting cyclic evolution edge"
                    );
                    continue;
                }
                frame.extended = true;
                on_path[child] = true;
                links.push(edge.condition());
                stack.push(Frame {
                    node: child,
                    next_child: 0,
                    extended: false,
                });
            }
            None => {
                if !frame.extended {
                    chains.push(EvolutionChain {
                        species: stack.iter().map(|f| nodes[f.node].clone()).collect(),
                        links: links.clone(),
                    });
                }
                if let Some(done) = stack.pop() {
                    on_path[done.node] = false;
                }
                links.pop();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use schema::EvolutionMethod;

    fn node(species_id: u32, name: &str) -> EvolutionNode {
        EvolutionNode {
            species_id,
            name: name.to_string(),
            depth: 0,
            is_special: false,
            sort_order: species_id,
        }
    }

    fn edge(from: u32, to: u32, method: EvolutionMethod) -> EvolutionEdge {
        EvolutionEdge {
            from,
            to,
            method,
            sort_order: 0,
        }
    }

    fn ids(chain: &EvolutionChain) -> Vec<u32> {
        chain.species.iter().map(|n| n.species_id).collect()
    }

    #[test]
    fn test_no_edges_gives_single_row_of_all_nodes() {
        let nodes = vec![node(128, "Tauros")];
        let chains = build_chains(&nodes, &[]);

        assert_eq!(chains.len(), 1);
        assert_eq!(ids(&chains[0]), vec![128]);
        assert!(chains[0].links.is_empty());

        let nodes = vec![node(1, "A"), node(2, "B")];
        let chains = build_chains(&nodes, &[]);
        assert_eq!(chains.len(), 1);
        assert_eq!(ids(&chains[0]), vec![1, 2]);
    }

    #[test]
    fn test_empty_lineage_has_no_rows() {
        assert!(build_chains(&[], &[]).is_empty());
    }

    #[test]
    fn test_straight_line() {
        let nodes = vec![node(1, "Bulbasaur"), node(2, "Ivysaur"), node(3, "Venusaur")];
        let edges = vec![
            edge(1, 2, EvolutionMethod::Level(16)),
            edge(2, 3, EvolutionMethod::Level(32)),
        ];
        let chains = build_chains(&nodes, &edges);

        assert_eq!(chains.len(), 1);
        assert_eq!(ids(&chains[0]), vec![1, 2, 3]);
        assert_eq!(chains[0].links, vec!["Lv. 16", "Lv. 32"]);
    }

    #[test]
    fn test_branch_repeats_shared_prefix() {
        let nodes = vec![node(1, "A"), node(2, "B"), node(3, "C")];
        let edges = vec![
            edge(1, 2, EvolutionMethod::Trade),
            edge(1, 3, EvolutionMethod::UseItem("Moon Stone".to_string())),
        ];
        let chains = build_chains(&nodes, &edges);

        assert_eq!(chains.len(), 2);
        assert_eq!(ids(&chains[0]), vec![1, 2]);
        assert_eq!(ids(&chains[1]), vec![1, 3]);
        assert_eq!(chains[0].links, vec!["Trade"]);
        assert_eq!(chains[1].links, vec!["Use Moon Stone"]);
    }

    #[test]
    fn test_branches_follow_edge_order_not_node_order() {
        let nodes = vec![node(133, "Eevee"), node(134, "Vaporeon"), node(135, "Jolteon")];
        let edges = vec![
            edge(133, 135, EvolutionMethod::UseItem("Thunder Stone".to_string())),
            edge(133, 134, EvolutionMethod::UseItem("Water Stone".to_string())),
        ];
        let chains = build_chains(&nodes, &edges);

        assert_eq!(ids(&chains[0]), vec![133, 135]);
        assert_eq!(ids(&chains[1]), vec![133, 134]);
    }

    #[test]
    fn test_branch_after_linear_prefix() {
        // Pichu -> Pikachu -> {Raichu, Alolan Raichu}
        let nodes = vec![node(172, "Pichu"), node(25, "Pikachu"), node(26, "Raichu"), node(10100, "Raichu")];
        let edges = vec![
            edge(172, 25, EvolutionMethod::Friendship(220)),
            edge(25, 26, EvolutionMethod::UseItem("Thunder Stone".to_string())),
            edge(25, 10100, EvolutionMethod::FormChange),
        ];
        let chains = build_chains(&nodes, &edges);

        assert_eq!(chains.len(), 2);
        assert_eq!(ids(&chains[0]), vec![172, 25, 26]);
        assert_eq!(ids(&chains[1]), vec![172, 25, 10100]);
        assert_eq!(chains[1].links, vec!["Friendship 220+", "Form change"]);
    }

    #[test]
    fn test_diamond_yields_one_row_per_path() {
        let nodes = vec![node(1, "A"), node(2, "B"), node(3, "C"), node(4, "D")];
        let edges = vec![
            edge(1, 2, EvolutionMethod::Level(10)),
            edge(1, 3, EvolutionMethod::Level(20)),
            edge(2, 4, EvolutionMethod::Trade),
            edge(3, 4, EvolutionMethod::Trade),
        ];
        let chains = build_chains(&nodes, &edges);

        let rows: Vec<Vec<u32>> = chains.iter().map(ids).collect();
        assert_eq!(rows, vec![vec![1, 2, 4], vec![1, 3, 4]]);
    }

    #[test]
    fn test_unconnected_member_gets_its_own_row() {
        let nodes = vec![node(1, "A"), node(2, "B"), node(9, "Loner")];
        let edges = vec![edge(1, 2, EvolutionMethod::Level(5))];
        let chains = build_chains(&nodes, &edges);

        let rows: Vec<Vec<u32>> = chains.iter().map(ids).collect();
        assert_eq!(rows, vec![vec![1, 2], vec![9]]);
    }

    #[test]
    fn test_dangling_edges_are_ignored() {
        let nodes = vec![node(1, "A"), node(2, "B")];
        let edges = vec![
            edge(1, 2, EvolutionMethod::Level(5)),
            edge(2, 99, EvolutionMethod::Trade),
            edge(98, 1, EvolutionMethod::Trade),
        ];
        let chains = build_chains(&nodes, &edges);

        assert_eq!(chains.len(), 1);
        assert_eq!(ids(&chains[0]), vec![1, 2]);
        assert_eq!(chains[0].links, vec!["Lv. 5"]);
    }

    #[test]
    fn test_only_dangling_edges_falls_back_to_single_row() {
        let nodes = vec![node(1, "A"), node(2, "B")];
        let edges = vec![edge(1, 50, EvolutionMethod::Trade)];
        let chains = build_chains(&nodes, &edges);

        assert_eq!(chains.len(), 1);
        assert_eq!(ids(&chains[0]), vec![1, 2]);
        assert!(chains[0].links.is_empty());
    }

    #[test]
    fn test_self_loop_terminates() {
        let nodes = vec![node(1, "A")];
        let edges = vec![edge(1, 1, EvolutionMethod::FormChange)];
        let chains = build_chains(&nodes, &edges);

        assert_eq!(chains.len(), 1);
        assert_eq!(ids(&chains[0]), vec![1]);
        assert!(chains[0].links.is_empty());
    }

    #[test]
    fn test_rootless_cycle_starts_from_first_edge_source() {
        let nodes = vec![node(1, "A"), node(2, "B"), node(3, "C")];
        let edges = vec![
            edge(2, 3, EvolutionMethod::Level(2)),
            edge(3, 1, EvolutionMethod::Level(3)),
            edge(1, 2, EvolutionMethod::Level(1)),
        ];
        let chains = build_chains(&nodes, &edges);

        assert_eq!(chains.len(), 1);
        assert_eq!(ids(&chains[0]), vec![2, 3, 1]);
        assert_eq!(chains[0].links, vec!["Lv. 2", "Lv. 3"]);
    }

    #[test]
    fn test_cycle_below_a_root_is_cut() {
        // A -> B -> C -> B
        let nodes = vec![node(1, "A"), node(2, "B"), node(3, "C")];
        let edges = vec![
            edge(1, 2, EvolutionMethod::Level(1)),
            edge(2, 3, EvolutionMethod::Level(2)),
            edge(3, 2, EvolutionMethod::Level(3)),
        ];
        let chains = build_chains(&nodes, &edges);

        assert_eq!(chains.len(), 1);
        assert_eq!(ids(&chains[0]), vec![1, 2, 3]);
        assert_eq!(chains[0].links.len(), chains[0].species.len() - 1);
    }

    #[test]
    fn test_duplicate_node_is_not_a_second_root() {
        let nodes = vec![node(1, "A"), node(2, "B"), node(1, "A again")];
        let edges = vec![edge(1, 2, EvolutionMethod::Level(7))];
        let chains = build_chains(&nodes, &edges);

        assert_eq!(chains.len(), 1);
        assert_eq!(ids(&chains[0]), vec![1, 2]);
    }

    #[test]
    fn test_build_chains_is_deterministic() {
        let nodes = vec![node(133, "Eevee"), node(134, "Vaporeon"), node(700, "Sylveon")];
        let edges = vec![
            edge(133, 134, EvolutionMethod::UseItem("Water Stone".to_string())),
            edge(133, 700, EvolutionMethod::KnownMoveType(schema::PokemonType::Fairy)),
        ];
        assert_eq!(build_chains(&nodes, &edges), build_chains(&nodes, &edges));
    }

    #[test]
    fn test_display_carries_members_edges_and_chains() {
        let lineage = EvolutionLineage {
            id: 40,
            nodes: vec![node(92, "Gastly"), node(93, "Haunter"), node(94, "Gengar")],
            edges: vec![
                edge(92, 93, EvolutionMethod::Level(25)),
                edge(93, 94, EvolutionMethod::Trade),
            ],
        };
        let display = EvolutionDisplay::from_lineage(&lineage);

        assert_eq!(display.members.len(), 3);
        assert_eq!(
            display.edges[1],
            EdgeView {
                from: 93,
                to: 94,
                condition: "Trade".to_string()
            }
        );
        assert_eq!(display.chains.len(), 1);
        assert_eq!(ids(&display.chains[0]), vec![92, 93, 94]);
    }
}
