#![forbid(unsafe_code)]

//! Stage parsers and layout model for the block-based graph drawing
//! pipeline (headless).
//!
//! Design goals:
//! - field-exact wire formats toward the external layout tools
//! - deterministic, testable outputs (insertion-ordered maps throughout)
//! - fail-fast parsing with line-accurate syntax errors

pub mod emit;
pub mod error;
pub mod model;
pub(crate) mod record;
pub mod split;
pub mod stage;

pub use emit::emit_vis_rep_input;
pub use error::{Error, Result};
pub use model::{
    EdgeChain, FlipTag, Gaps, LabelBlock, LabelEdge, LabelNode, LabelSide, VisRepEdge, VisRepNode,
};
pub use split::split_chain;
