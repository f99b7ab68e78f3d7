#![forbid(unsafe_code)]

//! `vaquita` is a headless driver for block-based planar graph drawing.
//!
//! The combinatorial work (biconnected decomposition, planarization, embedding
//! search, visibility representation) lives in external command-line tools
//! that speak plain-text stage formats. This crate parses every stage
//! artifact, threads node and face counters across blocks, and synthesizes
//! final render geometry.
//!
//! # Features
//!
//! - `render`: enable drawing synthesis (`vaquita::render`)

pub use vaquita_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use vaquita_render::model::{Drawing, Point, Rect, RenderEdge, RenderNode};
    pub use vaquita_render::synthesize_drawing;

    use indexmap::IndexMap;
    use vaquita_core::stage::bctree::{self, BcTree};
    use vaquita_core::stage::embedding::{self, Embedding};
    use vaquita_core::stage::original::{self, OriginalGraph};
    use vaquita_core::stage::planarized::{self, PlanarizedBlock};
    use vaquita_core::stage::visrep;

    #[derive(Debug, thiserror::Error)]
    pub enum PipelineError {
        #[error(transparent)]
        Stage(#[from] vaquita_core::Error),
        #[error(transparent)]
        Render(#[from] vaquita_render::Error),
    }

    pub type Result<T> = std::result::Result<T, PipelineError>;

    /// Stateful driver for one drawing pass.
    ///
    /// The pipeline never spawns the external tools itself. Each `*_input`
    /// method emits the text to hand to a tool, and the matching `ingest_*`
    /// method accepts the tool's output. In between, the pipeline threads the
    /// two cross-block counters: the floor above which planarizers may number
    /// virtual nodes, and the global face index. This is intended for callers
    /// that would otherwise drive the stage parsers by hand and carry both
    /// counters themselves.
    ///
    /// Blocks must be processed sequentially: planarize and ingest one block
    /// before requesting the planarization input of the next, or virtual node
    /// ranges of different blocks will overlap.
    #[derive(Debug, Clone)]
    pub struct Pipeline {
        original: OriginalGraph,
        tree: BcTree,
        planarized: IndexMap<i64, PlanarizedBlock>,
        embeddings: IndexMap<i64, Embedding>,
        node_max: i64,
        face_index: i64,
    }

    impl Pipeline {
        pub fn new(original_text: &str) -> Result<Self> {
            let original = original::parse(original_text)?;
            let node_max = original.node_num_max;
            Ok(Self {
                original,
                tree: BcTree::default(),
                planarized: IndexMap::new(),
                embeddings: IndexMap::new(),
                node_max,
                face_index: 1,
            })
        }

        pub fn decomposition_input(&self) -> String {
            self.original.emit_for_decomposition()
        }

        pub fn ingest_decomposition(&mut self, text: &str) -> Result<()> {
            self.tree = bctree::parse(text)?;
            Ok(())
        }

        /// Block keys in decomposition order. Empty until
        /// [`ingest_decomposition`](Self::ingest_decomposition) has run.
        pub fn block_keys(&self) -> Vec<i64> {
            self.tree.blocks.keys().copied().collect()
        }

        /// Planarizer input for one block. The emitted text pins the block's
        /// virtual node numbering to start one above every node number seen so
        /// far, so earlier blocks must already be ingested.
        pub fn planarization_input(&self, block: i64) -> Result<String> {
            let b = self
                .tree
                .blocks
                .get(&block)
                .ok_or(vaquita_core::Error::MissingBlock { block })?;
            Ok(b.emit_for_planarization(self.node_max + 1))
        }

        pub fn ingest_planarized(&mut self, block: i64, text: &str) -> Result<()> {
            let parsed = planarized::parse(text, &self.original.edges)?;
            if self.node_max < parsed.node_num_max {
                self.node_max = parsed.node_num_max;
            }
            self.planarized.insert(block, parsed);
            Ok(())
        }

        pub fn embedding_input(&self, block: i64) -> Result<String> {
            let b = self
                .planarized
                .get(&block)
                .ok_or(vaquita_core::Error::MissingBlock { block })?;
            Ok(b.emit_for_embedding())
        }

        /// Parses one block's embedding and advances the global face counter,
        /// so face indices stay unique across blocks.
        pub fn ingest_embedding(&mut self, block: i64, text: &str) -> Result<()> {
            let parsed = embedding::parse(text, self.face_index)?;
            self.face_index = parsed.face_index_end;
            self.embeddings.insert(block, parsed);
            Ok(())
        }

        /// Merged input for the visibility-representation solver. Requires
        /// every decomposed block to be planarized and embedded.
        pub fn vis_rep_input(&self) -> Result<String> {
            Ok(vaquita_core::emit_vis_rep_input(
                &self.original,
                &self.tree,
                &self.planarized,
                &self.embeddings,
            )?)
        }

        /// Parses the solver's output and synthesizes the final drawing.
        pub fn drawing(&self, vis_rep_text: &str) -> Result<Drawing> {
            let vis_rep = visrep::parse(vis_rep_text)?;
            Ok(synthesize_drawing(
                &self.original,
                &self.planarized,
                &vis_rep,
            )?)
        }
    }
}
