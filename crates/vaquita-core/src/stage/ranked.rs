//! Ranked-digraph stage, produced by the arranger for directed graphs.
//!
//! The arranger emits `NODES`, `VIRTUAL_NODES`, `EDGES` (each edge a routed
//! node path), `RANKS` (one line per rank, nodes in position order), and two
//! incidence sections that carry no information this side needs. Section
//! headers may appear in any order, so every header is accepted from every
//! state.

use indexmap::IndexMap;
use serde::Serialize;

use crate::record::{self, Grammar, LineResult, fields, num, wrong_state};
use crate::{Error, Result};

/// A node placed on the unit square by [`RankedLayout::assign_ranks_and_pos`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedNode {
    pub num: i64,
    pub is_virtual: bool,
    /// Rank index, top to bottom. `None` until assignment runs, or if the
    /// arranger left the node off every rank.
    pub rank: Option<usize>,
    /// Position within the rank.
    pub pos: Option<usize>,
    pub x: f64,
    pub y: f64,
}

impl RankedNode {
    fn new(num: i64, is_virtual: bool) -> Self {
        Self {
            num,
            is_virtual,
            rank: None,
            pos: None,
            x: 0.0,
            y: 0.0,
        }
    }
}

/// Parsed arranger output plus the derived unit-square placement.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedLayout {
    pub nodes: IndexMap<i64, RankedNode>,
    /// Routed node paths, one per original edge.
    pub edges: Vec<Vec<i64>>,
    /// Node numbers per rank, in position order.
    pub ranks: Vec<Vec<i64>>,
    /// Widest rank, filled in by assignment.
    pub max_pos: usize,
    pub label_radius: f64,
    pub text_offset: f64,
}

impl RankedLayout {
    /// Spreads every ranked node over the unit square: rank `i` of `R` lands
    /// at `x = (i+1)/(R+1)`, position `j` of a `P`-wide rank at
    /// `y = (j+1)/(P+1)`. The label radius is scaled down by whichever of
    /// rank count and widest rank is larger, so circles never overlap in the
    /// crowded direction.
    pub fn assign_ranks_and_pos(&mut self) -> Result<()> {
        let num_ranks = self.ranks.len();
        if num_ranks == 0 {
            return Err(Error::NoRanks);
        }
        for (i, rank) in self.ranks.iter().enumerate() {
            let num_positions = rank.len();
            self.max_pos = self.max_pos.max(num_positions);
            for (j, &node_num) in rank.iter().enumerate() {
                let node = self
                    .nodes
                    .get_mut(&node_num)
                    .ok_or(Error::MissingNode { node: node_num })?;
                node.rank = Some(i);
                node.pos = Some(j);
                node.x = (i as f64 + 1.0) / (num_ranks as f64 + 1.0);
                node.y = (j as f64 + 1.0) / (num_positions as f64 + 1.0);
            }
        }
        let crowded = self.max_pos.max(num_ranks);
        self.label_radius = 1.5 / (crowded as f64 * 6.0);
        self.text_offset = self.label_radius / 4.0;
        Ok(())
    }
}

#[derive(Clone, Copy)]
enum State {
    Init,
    Nodes,
    VirtualNodes,
    Edges,
    Ranks,
    IncidenceLeft,
    IncidenceRight,
}

#[derive(Default)]
struct Parser {
    layout: RankedLayout,
}

impl Parser {
    fn parse_node(&mut self, line: &str, is_virtual: bool) -> LineResult {
        const MSG: &str = "wrong node syntax";
        let f = fields(line);
        if f.len() != 1 {
            return Err(MSG.to_string());
        }
        let n: i64 = num(f[0], MSG)?;
        self.layout.nodes.insert(n, RankedNode::new(n, is_virtual));
        Ok(())
    }
}

impl Grammar for Parser {
    type State = State;

    fn try_transition(&mut self, _state: State, line: &str) -> Option<State> {
        match line {
            "NODES" => Some(State::Nodes),
            "VIRTUAL_NODES" => Some(State::VirtualNodes),
            "EDGES" => Some(State::Edges),
            "RANKS" => Some(State::Ranks),
            "INCIDENCE_LEFT" => Some(State::IncidenceLeft),
            "INCIDENCE_RIGHT" => Some(State::IncidenceRight),
            _ => None,
        }
    }

    fn parse_line(&mut self, state: State, line: &str) -> LineResult {
        match state {
            State::Init => wrong_state(),
            State::Nodes => self.parse_node(line, false),
            State::VirtualNodes => self.parse_node(line, true),
            State::Edges => {
                const MSG: &str = "wrong edge syntax";
                let f = fields(line);
                if f.len() < 2 {
                    return Err(MSG.to_string());
                }
                let mut path = Vec::with_capacity(f.len());
                for c in &f {
                    path.push(num(c, MSG)?);
                }
                self.layout.edges.push(path);
                Ok(())
            }
            State::Ranks => {
                const MSG: &str = "wrong rank syntax";
                let f = fields(line);
                let mut positions = Vec::with_capacity(f.len());
                for c in &f {
                    positions.push(num(c, MSG)?);
                }
                self.layout.ranks.push(positions);
                Ok(())
            }
            State::IncidenceLeft | State::IncidenceRight => Ok(()),
        }
    }
}

/// Parses the digraph arranger's output.
pub fn parse(text: &str) -> Result<RankedLayout> {
    let mut p = Parser::default();
    record::drive(&mut p, State::Init, text)?;
    tracing::debug!(
        nodes = p.layout.nodes.len(),
        edges = p.layout.edges.len(),
        ranks = p.layout.ranks.len(),
        "parsed ranked layout"
    );
    Ok(p.layout)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARRANGED: &str = "\
NODES
1
2
3
VIRTUAL_NODES
4
EDGES
1 4 3
1 2
RANKS
1
2 4
3
INCIDENCE_LEFT
1 2 4
INCIDENCE_RIGHT
1 4 2
";

    #[test]
    fn parses_nodes_paths_and_ranks() {
        let layout = parse(ARRANGED).unwrap();
        assert_eq!(layout.nodes.len(), 4);
        assert!(layout.nodes[&4].is_virtual);
        assert!(!layout.nodes[&2].is_virtual);
        assert_eq!(layout.edges, vec![vec![1, 4, 3], vec![1, 2]]);
        assert_eq!(layout.ranks, vec![vec![1], vec![2, 4], vec![3]]);
    }

    #[test]
    fn assignment_spreads_nodes_over_the_unit_square() {
        let mut layout = parse(ARRANGED).unwrap();
        layout.assign_ranks_and_pos().unwrap();

        let n1 = &layout.nodes[&1];
        assert_eq!(n1.rank, Some(0));
        assert_eq!(n1.pos, Some(0));
        assert_eq!(n1.x, 1.0 / 4.0);
        assert_eq!(n1.y, 1.0 / 2.0);

        let n4 = &layout.nodes[&4];
        assert_eq!(n4.rank, Some(1));
        assert_eq!(n4.pos, Some(1));
        assert_eq!(n4.x, 2.0 / 4.0);
        assert_eq!(n4.y, 2.0 / 3.0);

        assert_eq!(layout.max_pos, 2);
        assert_eq!(layout.label_radius, 1.5 / 18.0);
        assert_eq!(layout.text_offset, 1.5 / 18.0 / 4.0);
    }

    #[test]
    fn widest_rank_drives_the_radius_when_wider_than_deep() {
        let mut layout = parse("NODES\n1\n2\n3\nRANKS\n1 2 3\n").unwrap();
        layout.assign_ranks_and_pos().unwrap();
        assert_eq!(layout.max_pos, 3);
        assert_eq!(layout.label_radius, 1.5 / 18.0);
    }

    #[test]
    fn sections_are_accepted_in_any_order() {
        let layout = parse("RANKS\n7\nNODES\n7\n").unwrap();
        assert_eq!(layout.ranks, vec![vec![7]]);
        assert!(layout.nodes.contains_key(&7));
    }

    #[test]
    fn bad_rank_line_reports_rank_syntax() {
        let err = parse("RANKS\n1 x\n").unwrap_err();
        assert_eq!(err.to_string(), "syntax error on line 2 [wrong rank syntax]");
    }

    #[test]
    fn incidence_sections_are_skipped() {
        let layout = parse("INCIDENCE_LEFT\nanything goes here\n").unwrap();
        assert!(layout.nodes.is_empty());
    }

    #[test]
    fn no_ranks_is_a_named_error() {
        let mut layout = parse("NODES\n1\n").unwrap();
        assert!(matches!(
            layout.assign_ranks_and_pos().unwrap_err(),
            Error::NoRanks
        ));
    }

    #[test]
    fn rank_position_without_a_node_is_a_named_error() {
        let mut layout = parse("RANKS\n9\n").unwrap();
        assert!(matches!(
            layout.assign_ranks_and_pos().unwrap_err(),
            Error::MissingNode { node: 9 }
        ));
    }
}
