//! Original-graph stage: `TOP NODE → GAPS → NODES → EDGES`.
//!
//! This is the only stage a user authors by hand. It fixes the canonical
//! orientation of every edge (the orientation its record appears in) and the
//! gap constants the rest of the pipeline sizes virtual nodes with.

use std::fmt::Write as _;

use indexmap::IndexMap;

use crate::model::{Gaps, LabelEdge, LabelNode};
use crate::record::{self, Grammar, LineResult, fields, num, wrong_state};
use crate::{Error, Result};

/// Fully parsed original graph.
#[derive(Debug, Clone)]
pub struct OriginalGraph {
    pub top_node: i64,
    pub gaps: Gaps,
    pub nodes: IndexMap<i64, LabelNode>,
    /// Keyed by `(n1, n2)` in canonical (first-seen) orientation.
    pub edges: IndexMap<(i64, i64), LabelEdge>,
    /// Highest node number seen; virtual node numbering starts above it.
    pub node_num_max: i64,
}

#[derive(Clone, Copy)]
enum State {
    Init,
    TopNode,
    Gaps,
    Nodes,
    Edges,
}

struct Parser {
    top_node: Option<i64>,
    gaps: Option<Gaps>,
    nodes: IndexMap<i64, LabelNode>,
    edges: IndexMap<(i64, i64), LabelEdge>,
    node_num_max: i64,
}

impl Parser {
    fn new() -> Self {
        Self {
            top_node: None,
            gaps: None,
            nodes: IndexMap::new(),
            edges: IndexMap::new(),
            node_num_max: -1,
        }
    }
}

impl Grammar for Parser {
    type State = State;

    fn try_transition(&mut self, state: State, line: &str) -> Option<State> {
        match (state, line) {
            (State::Init, "TOP NODE") => Some(State::TopNode),
            (State::TopNode, "GAPS") => Some(State::Gaps),
            (State::Gaps, "NODES") => Some(State::Nodes),
            (State::Nodes, "EDGES") => Some(State::Edges),
            _ => None,
        }
    }

    fn parse_line(&mut self, state: State, line: &str) -> LineResult {
        match state {
            State::Init => wrong_state(),
            State::TopNode => {
                if self.top_node.is_some() {
                    return Err("Duped top node".to_string());
                }
                let f = fields(line);
                if f.len() != 1 {
                    return Err("Wrong top node syntax".to_string());
                }
                self.top_node = Some(num(f[0], "Wrong top node syntax")?);
                Ok(())
            }
            State::Gaps => {
                if self.gaps.is_some() {
                    return Err("Duped gaps".to_string());
                }
                let f = fields(line);
                if f.len() != 2 {
                    return Err("Wrong gaps syntax".to_string());
                }
                self.gaps = Some(Gaps {
                    horizontal: num(f[0], "Wrong gaps syntax")?,
                    vertical: num(f[1], "Wrong gaps syntax")?,
                });
                Ok(())
            }
            State::Nodes => {
                let node = LabelNode::from_line(line)?;
                self.node_num_max = self.node_num_max.max(node.num);
                self.nodes.insert(node.num, node);
                Ok(())
            }
            State::Edges => {
                let edge = LabelEdge::from_line(line)?;
                self.edges.insert(edge.key(), edge);
                Ok(())
            }
        }
    }
}

/// Parses the original input graph.
///
/// Beyond the per-line grammar, the artifact must declare a top node and the
/// gap pair, and every edge endpoint must name a declared node.
pub fn parse(text: &str) -> Result<OriginalGraph> {
    let mut p = Parser::new();
    record::drive(&mut p, State::Init, text)?;

    let top_node = p.top_node.ok_or(Error::MissingTopNode)?;
    let gaps = p.gaps.ok_or(Error::MissingGaps)?;
    for &(n1, n2) in p.edges.keys() {
        for node in [n1, n2] {
            if !p.nodes.contains_key(&node) {
                return Err(Error::MissingNode { node });
            }
        }
    }

    tracing::debug!(
        nodes = p.nodes.len(),
        edges = p.edges.len(),
        top_node,
        "parsed original graph"
    );
    Ok(OriginalGraph {
        top_node,
        gaps,
        nodes: p.nodes,
        edges: p.edges,
        node_num_max: p.node_num_max,
    })
}

impl OriginalGraph {
    /// Input text for the decomposer: bare node ids, then edge pairs.
    pub fn emit_for_decomposition(&self) -> String {
        let mut out = String::new();
        out.push_str("NODES\n");
        for node in self.nodes.values() {
            let _ = writeln!(out, "{}", node.num);
        }
        out.push('\n');
        out.push_str("EDGES\n");
        for &(n1, n2) in self.edges.keys() {
            let _ = writeln!(out, "{n1} {n2}");
        }
        out.push('\n');
        out
    }
}
