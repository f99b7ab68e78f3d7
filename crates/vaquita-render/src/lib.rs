#![forbid(unsafe_code)]

//! Turns a completed pipeline (original graph, planarized blocks, visibility
//! representation) into drawable geometry: label-aware node boxes, edge label
//! rectangles, and connector polylines.

pub mod geometry;
pub mod model;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("node {node} has no incident split edge")]
    ZeroDegreeNode { node: i64 },
    #[error("node {node} is missing from the visibility representation")]
    MissingVisRepNode { node: i64 },
    #[error("edge ({n1}, {n2}) is missing from the visibility representation")]
    MissingVisRepEdge { n1: i64, n2: i64 },
}

pub type Result<T> = std::result::Result<T, Error>;

pub use geometry::synthesize_drawing;
pub use model::{Drawing, Point, Rect, RenderEdge, RenderNode};
