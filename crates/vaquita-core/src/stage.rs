//! Format-specific parsers for the pipeline's stage artifacts.
//!
//! Each stage owns the text one external layout tool produced: the original
//! labeled graph, the block/cut-vertex tree from the decomposer, each
//! block's planarized edge chains, the combinatorial embedding, and the
//! visibility representation. [`ranked`] parses the arranged-digraph output
//! of the standalone ranking tool.

pub mod bctree;
pub mod embedding;
pub mod original;
pub mod planarized;
pub mod ranked;
pub mod visrep;
