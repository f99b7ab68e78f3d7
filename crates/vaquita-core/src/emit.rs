//! Assembles the vis-rep finder's input from every completed stage: gaps and
//! nodes from the original graph, split edges from the planarized blocks,
//! incidences and faces from the embeddings, and the unification groups that
//! tell the finder how blocks share their cut vertices.

use std::fmt::Write as _;

use indexmap::IndexMap;

use crate::stage::bctree::BcTree;
use crate::stage::embedding::Embedding;
use crate::stage::original::OriginalGraph;
use crate::stage::planarized::PlanarizedBlock;
use crate::{Error, Result};

/// Concatenates per-block clockwise neighbor lists into one map. A cut
/// vertex picks up neighbors from every block it belongs to, in block order.
fn merge_incidences(embeddings: &IndexMap<i64, Embedding>) -> IndexMap<i64, Vec<i64>> {
    let mut merged: IndexMap<i64, Vec<i64>> = IndexMap::new();
    for embedding in embeddings.values() {
        for (&node, neighbors) in &embedding.incidences {
            merged.entry(node).or_default().extend_from_slice(neighbors);
        }
    }
    merged
}

/// Input text for the vis-rep finder.
///
/// `planarized` and `embeddings` are keyed by block as produced by the
/// per-block pipeline. Fails when a cut vertex (or the top node) cannot be
/// attached to a face, or when a referenced block has no embedding.
pub fn emit_vis_rep_input(
    original: &OriginalGraph,
    tree: &BcTree,
    planarized: &IndexMap<i64, PlanarizedBlock>,
    embeddings: &IndexMap<i64, Embedding>,
) -> Result<String> {
    let h_gap = original.gaps.horizontal;
    let v_gap = original.gaps.vertical;
    let mut out = String::new();

    out.push_str("GAPS\n");
    let _ = writeln!(out, "{h_gap} {v_gap}");
    out.push('\n');

    out.push_str("NODES\n");
    for node in original.nodes.values() {
        let _ = writeln!(out, "{}", node.to_line());
    }
    for block in planarized.values() {
        for vn in &block.virtual_nodes {
            let _ = writeln!(out, "{} {} {}", vn, h_gap * 2.0, v_gap * 2.0);
        }
    }

    out.push_str("EDGES\n");
    for block in planarized.values() {
        for edge in block.split_edges.values() {
            let _ = writeln!(out, "{}", edge.to_line());
        }
    }

    out.push_str("INCIDENCES\n");
    for (node, neighbors) in &merge_incidences(embeddings) {
        let _ = write!(out, "{node}");
        for n in neighbors {
            let _ = write!(out, " {n}");
        }
        out.push('\n');
    }

    out.push_str("BLOCKS\n");
    for (key, block) in &tree.blocks {
        let _ = write!(out, "{key}");
        for num in block.cut_vertices.keys() {
            let _ = write!(out, " {num}");
        }
        for num in &block.ordinary_nodes {
            let _ = write!(out, " {num}");
        }
        out.push('\n');
    }

    out.push_str("FACES\n");
    for embedding in embeddings.values() {
        for face in embedding.faces.values() {
            let _ = write!(out, "{}", face.index);
            for n in &face.incident_nodes {
                let _ = write!(out, " {n}");
            }
            out.push('\n');
        }
    }

    out.push_str("UNIFICATION GROUPS\n");
    for (ug_index, cv) in tree.cut_vertices.values().enumerate() {
        let _ = write!(out, "{} {}", ug_index + 1, cv.node_num);
        for &block_index in &cv.block_indices {
            let embedding = embeddings
                .get(&block_index)
                .ok_or(Error::MissingBlock { block: block_index })?;
            let att = embedding
                .biggest_face(cv.node_num)
                .ok_or(Error::FacelessCutVertex { node: cv.node_num })?;
            let _ = write!(
                out,
                " {} {} {} {}",
                block_index, att.face_index, att.next_node, att.prev_node
            );
        }
        out.push('\n');
    }

    out.push_str("ROOT\n");
    let top = original.top_node;
    let mut best: Option<(i64, usize)> = None;
    for (&key, block) in &tree.blocks {
        if !block.cut_vertices.contains_key(&top) && !block.ordinary_nodes.contains(&top) {
            continue;
        }
        let size = block.cut_vertices.len() + block.ordinary_nodes.len() + block.edges.len();
        if best.is_none_or(|(_, max)| size > max) {
            best = Some((key, size));
        }
    }
    let (root_block, _) = best.ok_or(Error::UnplacedTopNode { node: top })?;
    let embedding = embeddings
        .get(&root_block)
        .ok_or(Error::MissingBlock { block: root_block })?;
    let att = embedding
        .biggest_face(top)
        .ok_or(Error::FacelessCutVertex { node: top })?;
    let _ = writeln!(out, "{} {} {}", root_block, top, att.face_index);

    Ok(out)
}
