use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Axis-aligned rectangle anchored at its lower-left corner, y up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Text anchor for the label this rectangle frames.
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }
}

/// A placed node: its visibility extent plus the label midpoint the
/// synthesis derived from the incident edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderNode {
    pub num: i64,
    pub width: f64,
    pub height: f64,
    pub x_left: f64,
    pub x_right: f64,
    pub y: f64,
    /// Horizontal center of the label box, kept inside `[x_left, x_right]`.
    pub x_mid: f64,
    pub is_virtual: bool,
}

impl RenderNode {
    /// The drawable label box, centered at `(x_mid, y)`. Virtual nodes carry
    /// one too, though drawings usually leave them invisible.
    pub fn label_rect(&self) -> Rect {
        Rect {
            x: self.x_mid - self.width / 2.0,
            y: self.y - self.height / 2.0,
            width: self.width,
            height: self.height,
        }
    }
}

/// A placed split edge: up to three label rectangles and the connector
/// polyline between its endpoint boxes. A label slot is `None` when the
/// underlying label has no area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderEdge {
    pub n1: i64,
    pub n2: i64,
    pub label1: Option<Rect>,
    pub label_mid: Option<Rect>,
    pub label2: Option<Rect>,
    /// Vertical-attachment route: out of `n1`'s box, along the attachment
    /// line, into `n2`'s box.
    pub line: Vec<Point>,
}

/// The final drawing: canvas size plus every node and edge in layout order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drawing {
    pub width: f64,
    pub height: f64,
    pub nodes: Vec<RenderNode>,
    pub edges: Vec<RenderEdge>,
}
