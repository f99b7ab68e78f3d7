//! Visibility-representation stage, produced by the vis-rep finder for the
//! whole graph: the drawing area, one horizontal extent per node, and one
//! vertical attachment line per split edge.

use indexmap::IndexMap;

use crate::Result;
use crate::model::{VisRepEdge, VisRepNode};
use crate::record::{self, Grammar, LineResult, fields, num, wrong_state};

/// Parsed visibility representation.
#[derive(Debug, Clone, Default)]
pub struct VisRep {
    pub width: f64,
    pub height: f64,
    pub nodes: IndexMap<i64, VisRepNode>,
    pub edges: IndexMap<(i64, i64), VisRepEdge>,
}

#[derive(Clone, Copy)]
enum State {
    Init,
    Area,
    Nodes,
    Edges,
}

#[derive(Default)]
struct Parser {
    rep: VisRep,
}

impl Grammar for Parser {
    type State = State;

    fn try_transition(&mut self, state: State, line: &str) -> Option<State> {
        match (state, line) {
            (State::Init, "AREA") => Some(State::Area),
            (State::Area, "NODES") => Some(State::Nodes),
            (State::Nodes, "EDGES") => Some(State::Edges),
            _ => None,
        }
    }

    fn parse_line(&mut self, state: State, line: &str) -> LineResult {
        match state {
            State::Init => wrong_state(),
            State::Area => {
                const MSG: &str = "Wrong area syntax";
                let f = fields(line);
                if f.len() != 2 {
                    return Err(MSG.to_string());
                }
                self.rep.width = num(f[0], MSG)?;
                self.rep.height = num(f[1], MSG)?;
                Ok(())
            }
            State::Nodes => {
                let node = VisRepNode::from_line(line)?;
                self.rep.nodes.insert(node.num, node);
                Ok(())
            }
            State::Edges => {
                let edge = VisRepEdge::from_line(line)?;
                self.rep.edges.insert((edge.n1, edge.n2), edge);
                Ok(())
            }
        }
    }
}

/// Parses the vis-rep finder's output for the whole graph.
pub fn parse(text: &str) -> Result<VisRep> {
    let mut p = Parser::default();
    record::drive(&mut p, State::Init, text)?;
    tracing::debug!(
        width = p.rep.width,
        height = p.rep.height,
        nodes = p.rep.nodes.len(),
        edges = p.rep.edges.len(),
        "parsed visibility representation"
    );
    Ok(p.rep)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FlipTag;

    const VIS_REP: &str = "\
AREA
100.0 80.0

NODES
1 0.0 40.0 70.0
2 10.0 30.0 35.0
EDGES
1 2 20.0 70.0 35.0 FLIPPED
";

    #[test]
    fn parses_area_nodes_and_edges() {
        let rep = parse(VIS_REP).unwrap();
        assert_eq!(rep.width, 100.0);
        assert_eq!(rep.height, 80.0);
        assert_eq!(rep.nodes[&1].x_right, 40.0);
        assert_eq!(rep.nodes[&2].y, 35.0);
        let e = &rep.edges[&(1, 2)];
        assert_eq!(e.x, 20.0);
        assert_eq!(e.flip, FlipTag::Flipped);
    }

    #[test]
    fn later_area_line_overwrites_the_earlier_one() {
        let rep = parse("AREA\n1.0 2.0\n3.0 4.0\nNODES\nEDGES\n").unwrap();
        assert_eq!(rep.width, 3.0);
        assert_eq!(rep.height, 4.0);
    }

    #[test]
    fn area_line_needs_exactly_two_fields() {
        let err = parse("AREA\n1.0 2.0 3.0\n").unwrap_err();
        assert_eq!(err.to_string(), "syntax error on line 2 [Wrong area syntax]");
    }

    #[test]
    fn short_node_line_is_rejected() {
        let err = parse("AREA\n1.0 2.0\nNODES\n1 0.0 40.0\n").unwrap_err();
        assert_eq!(err.to_string(), "syntax error on line 4 [wrong node syntax]");
    }

    #[test]
    fn data_before_area_header_is_rejected() {
        let err = parse("1.0 2.0\n").unwrap_err();
        assert_eq!(err.to_string(), "syntax error on line 1 [wrong state]");
    }
}
