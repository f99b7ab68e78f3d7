//! Record vocabulary shared across the pipeline stages.
//!
//! Nodes and edges carry label *dimensions* only; label text is the caller's
//! concern. Node numbers are plain integers assigned upstream, with virtual
//! node numbers kept disjoint from (and above) every original number.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::record::{fields, num};

/// Which side of its edge a label hangs on, relative to the edge's canonical
/// orientation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LabelSide {
    #[default]
    Center,
    Cw,
    Ccw,
}

impl FromStr for LabelSide {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "CENTER" => Ok(Self::Center),
            "CW" => Ok(Self::Cw),
            "CCW" => Ok(Self::Ccw),
            _ => Err(()),
        }
    }
}

impl fmt::Display for LabelSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Center => "CENTER",
            Self::Cw => "CW",
            Self::Ccw => "CCW",
        })
    }
}

/// Whether the visibility-representation stage mirrored an edge's label
/// sides while routing it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlipTag {
    Flipped,
    #[default]
    NotFlipped,
}

impl FromStr for FlipTag {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "FLIPPED" => Ok(Self::Flipped),
            "NOTFLIPPED" => Ok(Self::NotFlipped),
            _ => Err(()),
        }
    }
}

impl fmt::Display for FlipTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Flipped => "FLIPPED",
            Self::NotFlipped => "NOTFLIPPED",
        })
    }
}

/// Horizontal and vertical spacing constants for the whole drawing. Virtual
/// node boxes are sized as twice each gap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gaps {
    pub horizontal: f64,
    pub vertical: f64,
}

/// One label slot of an edge: placement side plus box dimensions. A slot
/// nothing was assigned to stays zero-sized and centered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelBlock {
    pub side: LabelSide,
    pub width: f64,
    pub height: f64,
}

impl LabelBlock {
    pub fn is_zero(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

impl fmt::Display for LabelBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.side, self.width, self.height)
    }
}

/// A node of the original graph with its label dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelNode {
    pub num: i64,
    pub width: f64,
    pub height: f64,
}

impl LabelNode {
    pub(crate) fn from_line(line: &str) -> std::result::Result<Self, String> {
        const MSG: &str = "wrong node syntax";
        let f = fields(line);
        if f.len() != 3 {
            return Err(MSG.to_string());
        }
        Ok(Self {
            num: num(f[0], MSG)?,
            width: num(f[1], MSG)?,
            height: num(f[2], MSG)?,
        })
    }

    pub(crate) fn to_line(&self) -> String {
        format!("{} {} {}", self.num, self.width, self.height)
    }
}

/// An edge with its three label slots: near `n1`, near the middle, near
/// `n2`. The `(n1, n2)` orientation an edge first appears in is canonical
/// and fixes what the side tags mean for the rest of the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelEdge {
    pub n1: i64,
    pub n2: i64,
    pub label1: LabelBlock,
    pub label_mid: LabelBlock,
    pub label2: LabelBlock,
}

impl LabelEdge {
    /// An edge between two nodes with all three label slots empty.
    pub fn from_nodes(n1: i64, n2: i64) -> Self {
        Self {
            n1,
            n2,
            label1: LabelBlock::default(),
            label_mid: LabelBlock::default(),
            label2: LabelBlock::default(),
        }
    }

    pub(crate) fn from_line(line: &str) -> std::result::Result<Self, String> {
        const MSG: &str = "wrong edge syntax";
        let f = fields(line);
        if f.len() != 11 {
            return Err(MSG.to_string());
        }
        let side = |s: &str| -> std::result::Result<LabelSide, String> {
            s.parse().map_err(|_| "wrong position token".to_string())
        };
        Ok(Self {
            n1: num(f[0], MSG)?,
            n2: num(f[1], MSG)?,
            label1: LabelBlock {
                side: side(f[2])?,
                width: num(f[3], MSG)?,
                height: num(f[4], MSG)?,
            },
            label_mid: LabelBlock {
                side: side(f[5])?,
                width: num(f[6], MSG)?,
                height: num(f[7], MSG)?,
            },
            label2: LabelBlock {
                side: side(f[8])?,
                width: num(f[9], MSG)?,
                height: num(f[10], MSG)?,
            },
        })
    }

    /// The 11-field wire record consumed by the visibility-representation
    /// finder.
    pub(crate) fn to_line(&self) -> String {
        format!(
            "{} {} {} {} {}",
            self.n1, self.n2, self.label1, self.label_mid, self.label2
        )
    }

    pub fn key(&self) -> (i64, i64) {
        (self.n1, self.n2)
    }

    pub(crate) fn set_label1(&mut self, origin: &LabelEdge) {
        self.label1 = origin.label1;
    }

    pub(crate) fn set_label_mid(&mut self, origin: &LabelEdge) {
        self.label_mid = origin.label_mid;
    }

    pub(crate) fn set_label2(&mut self, origin: &LabelEdge) {
        self.label2 = origin.label2;
    }
}

/// One original edge as realized by the planarizer: endpoints plus the
/// virtual nodes threaded between them, in path order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeChain {
    pub n1: i64,
    pub n2: i64,
    pub virtual_nodes: Vec<i64>,
}

impl EdgeChain {
    pub(crate) fn from_line(line: &str) -> std::result::Result<Self, String> {
        const MSG: &str = "wrong edge syntax";
        let f = fields(line);
        if f.len() < 2 {
            return Err(MSG.to_string());
        }
        let mut nodes = Vec::with_capacity(f.len());
        for field in &f {
            nodes.push(num::<i64>(field, MSG)?);
        }
        Ok(Self {
            n1: nodes[0],
            n2: nodes[nodes.len() - 1],
            virtual_nodes: nodes[1..nodes.len() - 1].to_vec(),
        })
    }

    /// Reverses the chain's orientation: endpoints swap and the virtual
    /// sequence runs backwards. Applying it twice restores the chain.
    pub fn flip(&mut self) {
        std::mem::swap(&mut self.n1, &mut self.n2);
        self.virtual_nodes.reverse();
    }

    pub fn key(&self) -> (i64, i64) {
        (self.n1, self.n2)
    }
}

/// Horizontal extent and vertical level assigned to a node by the
/// visibility-representation finder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisRepNode {
    pub num: i64,
    pub x_left: f64,
    pub x_right: f64,
    pub y: f64,
}

impl VisRepNode {
    pub(crate) fn from_line(line: &str) -> std::result::Result<Self, String> {
        const MSG: &str = "wrong node syntax";
        let f = fields(line);
        if f.len() != 4 {
            return Err(MSG.to_string());
        }
        Ok(Self {
            num: num(f[0], MSG)?,
            x_left: num(f[1], MSG)?,
            x_right: num(f[2], MSG)?,
            y: num(f[3], MSG)?,
        })
    }
}

/// Routed attachment geometry for one split edge: the vertical line at `x`
/// runs between the `y1` and `y2` levels of its endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisRepEdge {
    pub n1: i64,
    pub n2: i64,
    pub x: f64,
    pub y1: f64,
    pub y2: f64,
    pub flip: FlipTag,
}

impl VisRepEdge {
    pub(crate) fn from_line(line: &str) -> std::result::Result<Self, String> {
        const MSG: &str = "wrong edge syntax";
        let f = fields(line);
        if f.len() != 6 {
            return Err(MSG.to_string());
        }
        Ok(Self {
            n1: num(f[0], MSG)?,
            n2: num(f[1], MSG)?,
            x: num(f[2], MSG)?,
            y1: num(f[3], MSG)?,
            y2: num(f[4], MSG)?,
            flip: f[5].parse().map_err(|_| MSG.to_string())?,
        })
    }
}
