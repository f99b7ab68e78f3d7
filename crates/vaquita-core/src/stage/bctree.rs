//! Block/cut-vertex tree stage, produced by the decomposer.
//!
//! Format: `CUT_VERTICES` records, then zero or more block groups
//! `BLOCK_BEGIN → BLOCK_CUT_VERTICES → BLOCK_ORDINARY_VERTICES →
//! BLOCK_EDGES → BLOCK_END`. Each block is the induced subgraph on its
//! cut-vertex and ordinary nodes.

use std::fmt::Write as _;

use indexmap::{IndexMap, IndexSet};

use crate::record::{self, Grammar, LineResult, fields, num, wrong_state};
use crate::Result;

/// A node shared by two or more blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CutVertex {
    pub cv_index: i64,
    pub node_num: i64,
    /// The blocks this vertex participates in.
    pub block_indices: Vec<i64>,
}

impl CutVertex {
    fn from_line(line: &str) -> std::result::Result<Self, String> {
        const MSG: &str = "wrong cut vertex syntax";
        let f = fields(line);
        if f.len() < 4 {
            return Err(MSG.to_string());
        }
        let mut block_indices = Vec::with_capacity(f.len() - 2);
        for field in &f[2..] {
            block_indices.push(num(field, MSG)?);
        }
        Ok(Self {
            cv_index: num(f[0], MSG)?,
            node_num: num(f[1], MSG)?,
            block_indices,
        })
    }
}

/// One biconnected component.
#[derive(Debug, Clone, Default)]
pub struct Block {
    /// Block number as read from the artifact.
    pub block_index: i64,
    /// Cut-vertex node number → cut-vertex index. The index is carried on
    /// the wire but nothing downstream consumes it.
    pub cut_vertices: IndexMap<i64, i64>,
    pub ordinary_nodes: Vec<i64>,
    pub edges: IndexSet<(i64, i64)>,
}

impl Block {
    /// Input text for the planarizer. `virtual_node_start` tells it where
    /// the numbering for any virtual nodes it introduces must begin.
    pub fn emit_for_planarization(&self, virtual_node_start: i64) -> String {
        let mut out = String::new();
        out.push_str("NODES\n");
        for num in self.cut_vertices.keys() {
            let _ = writeln!(out, "{num}");
        }
        for num in &self.ordinary_nodes {
            let _ = writeln!(out, "{num}");
        }
        out.push('\n');
        out.push_str("VIRTUAL NODE START\n");
        let _ = writeln!(out, "{virtual_node_start}");
        out.push_str("EDGES\n");
        for &(n1, n2) in &self.edges {
            let _ = writeln!(out, "{n1} {n2}");
        }
        out.push('\n');
        out
    }
}

/// Parsed decomposition artifact.
#[derive(Debug, Clone, Default)]
pub struct BcTree {
    /// Keyed by cut-vertex node number.
    pub cut_vertices: IndexMap<i64, CutVertex>,
    /// Keyed by arrival order, starting at 1. The decomposer numbers blocks
    /// the same way, so these coincide with [`Block::block_index`] for
    /// well-formed input.
    pub blocks: IndexMap<i64, Block>,
}

#[derive(Clone, Copy)]
enum State {
    Init,
    CutVertices,
    BlockBegin,
    BlockCutVertices,
    BlockOrdinaryVertices,
    BlockEdges,
    BlockEnd,
}

#[derive(Default)]
struct Parser {
    tree: BcTree,
    current: Block,
    next_block_key: i64,
}

impl Grammar for Parser {
    type State = State;

    fn try_transition(&mut self, state: State, line: &str) -> Option<State> {
        match (state, line) {
            (State::Init, "CUT_VERTICES") => Some(State::CutVertices),
            (State::CutVertices | State::BlockEnd, "BLOCK_BEGIN") => {
                self.current = Block::default();
                Some(State::BlockBegin)
            }
            (State::BlockBegin, "BLOCK_CUT_VERTICES") => Some(State::BlockCutVertices),
            (State::BlockCutVertices, "BLOCK_ORDINARY_VERTICES") => {
                Some(State::BlockOrdinaryVertices)
            }
            (State::BlockOrdinaryVertices, "BLOCK_EDGES") => Some(State::BlockEdges),
            (State::BlockEdges, "BLOCK_END") => {
                self.next_block_key += 1;
                let done = std::mem::take(&mut self.current);
                self.tree.blocks.insert(self.next_block_key, done);
                Some(State::BlockEnd)
            }
            _ => None,
        }
    }

    fn parse_line(&mut self, state: State, line: &str) -> LineResult {
        match state {
            State::Init | State::BlockEnd => wrong_state(),
            State::CutVertices => {
                let cv = CutVertex::from_line(line)?;
                self.tree.cut_vertices.insert(cv.node_num, cv);
                Ok(())
            }
            State::BlockBegin => {
                let f = fields(line);
                if f.len() != 1 {
                    return Err("Wrong top block num syntax".to_string());
                }
                self.current.block_index = num(f[0], "Wrong top block num syntax")?;
                Ok(())
            }
            State::BlockCutVertices => {
                const MSG: &str = "Wrong top block cut vertex syntax";
                let f = fields(line);
                if f.len() != 2 {
                    return Err(MSG.to_string());
                }
                let node_num: i64 = num(f[0], MSG)?;
                let cv_index: i64 = num(f[1], MSG)?;
                self.current.cut_vertices.insert(node_num, cv_index);
                Ok(())
            }
            State::BlockOrdinaryVertices => {
                const MSG: &str = "Wrong top block ordinary vertex syntax";
                let f = fields(line);
                if f.len() != 1 {
                    return Err(MSG.to_string());
                }
                self.current.ordinary_nodes.push(num(f[0], MSG)?);
                Ok(())
            }
            State::BlockEdges => {
                const MSG: &str = "Wrong top block edge syntax";
                let f = fields(line);
                if f.len() != 2 {
                    return Err(MSG.to_string());
                }
                let n1: i64 = num(f[0], MSG)?;
                let n2: i64 = num(f[1], MSG)?;
                self.current.edges.insert((n1, n2));
                Ok(())
            }
        }
    }
}

/// Parses the decomposer's output.
pub fn parse(text: &str) -> Result<BcTree> {
    let mut p = Parser::default();
    record::drive(&mut p, State::Init, text)?;
    tracing::debug!(
        cut_vertices = p.tree.cut_vertices.len(),
        blocks = p.tree.blocks.len(),
        "parsed block cut tree"
    );
    Ok(p.tree)
}
