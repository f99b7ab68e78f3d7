//! Drawing synthesis over a finished visibility representation.
//!
//! Two passes: every split edge first pulls its attachment x into both
//! endpoint nodes, then node label midpoints are the clamped averages and
//! edge geometry is laid out against them.

use indexmap::IndexMap;

use vaquita_core::model::{FlipTag, LabelBlock, LabelEdge, LabelSide, VisRepEdge};
use vaquita_core::stage::original::OriginalGraph;
use vaquita_core::stage::planarized::PlanarizedBlock;
use vaquita_core::stage::visrep::VisRep;

use crate::model::{Drawing, Point, Rect, RenderEdge, RenderNode};
use crate::{Error, Result};

struct Accum {
    width: f64,
    height: f64,
    x_left: f64,
    x_right: f64,
    y: f64,
    is_virtual: bool,
    x_sum: f64,
    degree: u32,
}

/// Builds the drawable model. Node boxes come from the original graph where
/// the node is original and from doubled gaps where it is virtual; every
/// split edge must have an attachment line in `vis_rep`, and every node must
/// end up with at least one incident split edge.
pub fn synthesize_drawing(
    original: &OriginalGraph,
    planarized: &IndexMap<i64, PlanarizedBlock>,
    vis_rep: &VisRep,
) -> Result<Drawing> {
    let h_gap = original.gaps.horizontal;
    let v_gap = original.gaps.vertical;

    let mut accums: IndexMap<i64, Accum> = IndexMap::new();
    for (&num, vn) in &vis_rep.nodes {
        let (width, height, is_virtual) = match original.nodes.get(&num) {
            Some(n) => (n.width, n.height, false),
            None => (h_gap * 2.0, v_gap * 2.0, true),
        };
        accums.insert(
            num,
            Accum {
                width,
                height,
                x_left: vn.x_left,
                x_right: vn.x_right,
                y: vn.y,
                is_virtual,
                x_sum: 0.0,
                degree: 0,
            },
        );
    }

    let mut placed: Vec<(&LabelEdge, &VisRepEdge)> = Vec::new();
    for block in planarized.values() {
        for split in block.split_edges.values() {
            let (n1, n2) = split.key();
            let vis = vis_rep
                .edges
                .get(&(n1, n2))
                .ok_or(Error::MissingVisRepEdge { n1, n2 })?;
            for num in [n1, n2] {
                let acc = accums
                    .get_mut(&num)
                    .ok_or(Error::MissingVisRepNode { node: num })?;
                acc.x_sum += vis.x;
                acc.degree += 1;
            }
            placed.push((split, vis));
        }
    }

    let mut nodes: IndexMap<i64, RenderNode> = IndexMap::new();
    for (&num, acc) in &accums {
        if acc.degree == 0 {
            return Err(Error::ZeroDegreeNode { node: num });
        }
        let mid = acc.x_sum / f64::from(acc.degree);
        let half = acc.width / 2.0;
        let x_mid = if mid - half < acc.x_left {
            acc.x_left + half
        } else if mid + half > acc.x_right {
            acc.x_right - half
        } else {
            mid
        };
        nodes.insert(
            num,
            RenderNode {
                num,
                width: acc.width,
                height: acc.height,
                x_left: acc.x_left,
                x_right: acc.x_right,
                y: acc.y,
                x_mid,
                is_virtual: acc.is_virtual,
            },
        );
    }

    let mut edges = Vec::with_capacity(placed.len());
    for (split, vis) in placed {
        let n1 = nodes
            .get(&split.n1)
            .ok_or(Error::MissingVisRepNode { node: split.n1 })?;
        let n2 = nodes
            .get(&split.n2)
            .ok_or(Error::MissingVisRepNode { node: split.n2 })?;
        edges.push(RenderEdge {
            n1: split.n1,
            n2: split.n2,
            label1: end_label_rect(&split.label1, vis, n1, vis.y1 > vis.y2),
            label_mid: mid_label_rect(split, vis, n1, n2),
            label2: end_label_rect(&split.label2, vis, n2, vis.y1 < vis.y2),
            line: connector(n1, n2, vis),
        });
    }

    Ok(Drawing {
        width: vis_rep.width,
        height: vis_rep.height,
        nodes: nodes.into_values().collect(),
        edges,
    })
}

/// Left edge of a label rectangle relative to the attachment line. `CW` and
/// `CCW` are taken along the edge's direction of travel, so which side of
/// the line they land on depends on the travel direction and the flip tag.
fn label_left(block: &LabelBlock, vis: &VisRepEdge) -> f64 {
    if block.side == LabelSide::Center {
        return vis.x - block.width / 2.0;
    }
    let toward_right = matches!(
        (block.side, vis.y1 > vis.y2),
        (LabelSide::Ccw, true) | (LabelSide::Cw, false)
    );
    let toward_right = match vis.flip {
        FlipTag::NotFlipped => toward_right,
        FlipTag::Flipped => !toward_right,
    };
    if toward_right {
        vis.x
    } else {
        vis.x - block.width
    }
}

/// `below` hangs the label under the node box, otherwise it sits on top.
fn end_label_rect(
    block: &LabelBlock,
    vis: &VisRepEdge,
    node: &RenderNode,
    below: bool,
) -> Option<Rect> {
    if block.width <= 0.0 || block.height <= 0.0 {
        return None;
    }
    let y = if below {
        node.y - node.height / 2.0 - block.height
    } else {
        node.y + node.height / 2.0
    };
    Some(Rect {
        x: label_left(block, vis),
        y,
        width: block.width,
        height: block.height,
    })
}

/// Centered between the end labels' facing edges, even when those labels
/// are zero-size.
fn mid_label_rect(
    split: &LabelEdge,
    vis: &VisRepEdge,
    n1: &RenderNode,
    n2: &RenderNode,
) -> Option<Rect> {
    let block = &split.label_mid;
    if block.width <= 0.0 || block.height <= 0.0 {
        return None;
    }
    let cy = if vis.y1 > vis.y2 {
        ((n1.y - n1.height / 2.0 - split.label1.height)
            + (n2.y + n2.height / 2.0 + split.label2.height))
            / 2.0
    } else {
        ((n1.y + n1.height / 2.0 + split.label1.height)
            + (n2.y - n2.height / 2.0 - split.label2.height))
            / 2.0
    };
    Some(Rect {
        x: label_left(block, vis),
        y: cy - block.height / 2.0,
        width: block.width,
        height: block.height,
    })
}

fn connector(n1: &RenderNode, n2: &RenderNode, vis: &VisRepEdge) -> Vec<Point> {
    let (exit, entry) = if n1.y > n2.y {
        (n1.y - n1.height / 2.0, n2.y + n2.height / 2.0)
    } else {
        (n1.y + n1.height / 2.0, n2.y - n2.height / 2.0)
    };
    vec![
        Point {
            x: n1.x_mid,
            y: n1.y,
        },
        Point { x: vis.x, y: exit },
        Point {
            x: vis.x,
            y: entry,
        },
        Point {
            x: n2.x_mid,
            y: n2.y,
        },
    ]
}
