//! Planarized-block stage, produced by the planarizer.
//!
//! Format: `NODES → [VIRTUAL_NODES] → EDGES`, where each edge line is a full
//! chain `n1 v… n2`. Chains come back in whatever orientation the planarizer
//! liked, so each one is re-oriented against the original edge map before it
//! is recorded; its split edges then inherit the original labels.

use std::fmt::Write as _;

use indexmap::{IndexMap, IndexSet};

use crate::model::{EdgeChain, LabelEdge};
use crate::record::{self, Grammar, LineResult, fields, num, wrong_state};
use crate::split::split_chain;
use crate::{Error, Result};

/// One block after planarization.
#[derive(Debug, Clone, Default)]
pub struct PlanarizedBlock {
    pub nodes: IndexSet<i64>,
    pub virtual_nodes: IndexSet<i64>,
    /// Chains keyed by their canonical `(n1, n2)`.
    pub edge_chains: IndexMap<(i64, i64), EdgeChain>,
    /// Concrete segments with label slots distributed, keyed by endpoint
    /// pair, in chain order.
    pub split_edges: IndexMap<(i64, i64), LabelEdge>,
    /// Highest node number seen, virtual nodes included.
    pub node_num_max: i64,
}

#[derive(Clone, Copy)]
enum State {
    Init,
    Nodes,
    VirtualNodes,
    Edges,
}

struct Parser<'a> {
    original_edges: &'a IndexMap<(i64, i64), LabelEdge>,
    block: PlanarizedBlock,
}

impl Grammar for Parser<'_> {
    type State = State;

    fn try_transition(&mut self, state: State, line: &str) -> Option<State> {
        match (state, line) {
            (State::Init, "NODES") => Some(State::Nodes),
            (State::Nodes, "VIRTUAL_NODES") => Some(State::VirtualNodes),
            (State::Nodes | State::VirtualNodes, "EDGES") => Some(State::Edges),
            _ => None,
        }
    }

    fn parse_line(&mut self, state: State, line: &str) -> LineResult {
        match state {
            State::Init => wrong_state(),
            State::Nodes => {
                let val = parse_node_line(line)?;
                self.block.node_num_max = self.block.node_num_max.max(val);
                self.block.nodes.insert(val);
                Ok(())
            }
            State::VirtualNodes => {
                let val = parse_node_line(line)?;
                self.block.node_num_max = self.block.node_num_max.max(val);
                self.block.virtual_nodes.insert(val);
                Ok(())
            }
            State::Edges => {
                let mut chain = EdgeChain::from_line(line)?;
                if !self.original_edges.contains_key(&chain.key()) {
                    chain.flip();
                }
                self.block.edge_chains.insert(chain.key(), chain);
                Ok(())
            }
        }
    }
}

fn parse_node_line(line: &str) -> std::result::Result<i64, String> {
    const MSG: &str = "Wrong node syntax";
    let f = fields(line);
    if f.len() != 1 {
        return Err(MSG.to_string());
    }
    num(f[0], MSG)
}

/// Parses one block's planarizer output against the original edge map.
///
/// Every chain must match an original edge after at most one flip; the split
/// edges of each chain are generated here, in chain order.
pub fn parse(
    text: &str,
    original_edges: &IndexMap<(i64, i64), LabelEdge>,
) -> Result<PlanarizedBlock> {
    let mut p = Parser {
        original_edges,
        block: PlanarizedBlock {
            node_num_max: -1,
            ..PlanarizedBlock::default()
        },
    };
    record::drive(&mut p, State::Init, text)?;
    let mut block = p.block;

    for chain in block.edge_chains.values() {
        let (n1, n2) = chain.key();
        let origin = original_edges
            .get(&(n1, n2))
            .ok_or(Error::UnmatchedChain { n1, n2 })?;
        for split in split_chain(chain, origin) {
            block.split_edges.insert(split.key(), split);
        }
    }

    tracing::debug!(
        nodes = block.nodes.len(),
        virtual_nodes = block.virtual_nodes.len(),
        chains = block.edge_chains.len(),
        split_edges = block.split_edges.len(),
        "parsed planarized block"
    );
    Ok(block)
}

impl PlanarizedBlock {
    /// Input text for the embedding finder: every node, then every chain
    /// broken into its two-node segments.
    pub fn emit_for_embedding(&self) -> String {
        let mut out = String::new();
        out.push_str("NODES\n");
        for num in &self.nodes {
            let _ = writeln!(out, "{num}");
        }
        for num in &self.virtual_nodes {
            let _ = writeln!(out, "{num}");
        }
        out.push('\n');
        out.push_str("EDGES\n");
        for chain in self.edge_chains.values() {
            if chain.virtual_nodes.is_empty() {
                let _ = writeln!(out, "{} {}", chain.n1, chain.n2);
                continue;
            }
            let _ = writeln!(out, "{} {}", chain.n1, chain.virtual_nodes[0]);
            for pair in chain.virtual_nodes.windows(2) {
                let _ = writeln!(out, "{} {}", pair[0], pair[1]);
            }
            let _ = writeln!(
                out,
                "{} {}",
                chain.virtual_nodes[chain.virtual_nodes.len() - 1],
                chain.n2
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LabelBlock, LabelSide};

    fn original_edges() -> IndexMap<(i64, i64), LabelEdge> {
        let mut labeled = LabelEdge::from_nodes(2, 3);
        labeled.label1 = LabelBlock {
            side: LabelSide::Cw,
            width: 12.0,
            height: 4.0,
        };
        labeled.label_mid = LabelBlock {
            side: LabelSide::Center,
            width: 6.0,
            height: 2.0,
        };
        labeled.label2 = LabelBlock {
            side: LabelSide::Ccw,
            width: 8.0,
            height: 3.0,
        };
        let mut edges = IndexMap::new();
        edges.insert((1, 2), LabelEdge::from_nodes(1, 2));
        edges.insert((2, 3), labeled);
        edges
    }

    const PLANARIZED: &str = "\
NODES
1
2
3
VIRTUAL_NODES
4
EDGES
1 2
3 4 2
";

    #[test]
    fn flips_a_reversed_chain_to_canonical_orientation() {
        let block = parse(PLANARIZED, &original_edges()).unwrap();
        let chain = &block.edge_chains[&(2, 3)];
        assert_eq!(chain.n1, 2);
        assert_eq!(chain.n2, 3);
        assert_eq!(chain.virtual_nodes, vec![4]);
        assert_eq!(block.node_num_max, 4);
    }

    #[test]
    fn distributes_labels_over_split_edges() {
        let block = parse(PLANARIZED, &original_edges()).unwrap();
        assert_eq!(block.split_edges.len(), 3);

        let first = &block.split_edges[&(2, 4)];
        assert_eq!(first.label1.width, 12.0);
        assert_eq!(first.label_mid.width, 6.0);
        assert!(first.label2.is_zero());

        let last = &block.split_edges[&(4, 3)];
        assert!(last.label1.is_zero());
        assert!(last.label_mid.is_zero());
        assert_eq!(last.label2.side, LabelSide::Ccw);
    }

    #[test]
    fn chain_matching_no_original_edge_is_structural() {
        let err = parse("NODES\n1\n5\nEDGES\n1 5\n", &original_edges()).unwrap_err();
        assert!(matches!(err, Error::UnmatchedChain { n1: 5, n2: 1 }));
    }

    #[test]
    fn virtual_nodes_section_is_optional() {
        let block = parse("NODES\n1\n2\nEDGES\n1 2\n", &original_edges()).unwrap();
        assert!(block.virtual_nodes.is_empty());
        assert_eq!(block.split_edges.len(), 1);
    }

    #[test]
    fn emits_embedding_input_as_two_node_segments() {
        let block = parse(PLANARIZED, &original_edges()).unwrap();
        assert_eq!(
            block.emit_for_embedding(),
            "NODES\n1\n2\n3\n4\n\nEDGES\n1 2\n2 4\n4 3\n"
        );
    }

    #[test]
    fn breaks_a_two_virtual_chain_into_three_segments() {
        let mut edges = IndexMap::new();
        edges.insert((1, 2), LabelEdge::from_nodes(1, 2));
        let block = parse(
            "NODES\n1\n2\nVIRTUAL_NODES\n5\n6\nEDGES\n1 5 6 2\n",
            &edges,
        )
        .unwrap();
        assert_eq!(
            block.emit_for_embedding(),
            "NODES\n1\n2\n5\n6\n\nEDGES\n1 5\n5 6\n6 2\n"
        );
        assert_eq!(block.split_edges.len(), 3);
    }
}
