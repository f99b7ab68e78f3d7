//! Distributes an original edge's labels over its planarized chain.
//!
//! Planarization turns one logical edge into `n1 → v… → n2`. Label data
//! still lives on the original edge, so each concrete segment must inherit
//! the slot that lands nearest to it: the near-1 label on the first segment,
//! the near-2 label on the last, and the mid label on the interior segment
//! closest to the chain's middle. Every other slot stays zero-sized.

use crate::model::{EdgeChain, LabelEdge};

/// Expands `chain` (already in canonical orientation) into one [`LabelEdge`]
/// per segment. A chain with `k` virtual nodes yields `k + 1` segments, and
/// exactly one segment carries each nonzero label slot of `origin`.
pub fn split_chain(chain: &EdgeChain, origin: &LabelEdge) -> Vec<LabelEdge> {
    let virtuals = &chain.virtual_nodes;
    let k = virtuals.len();

    if k == 0 {
        return vec![origin.clone()];
    }

    if k == 1 {
        let mut first = LabelEdge::from_nodes(chain.n1, virtuals[0]);
        let mut last = LabelEdge::from_nodes(virtuals[0], chain.n2);
        first.set_label1(origin);
        first.set_label_mid(origin);
        last.set_label2(origin);
        return vec![first, last];
    }

    let mut out = Vec::with_capacity(k + 1);

    let mut first = LabelEdge::from_nodes(chain.n1, virtuals[0]);
    first.set_label1(origin);
    out.push(first);

    // k - 1 interior segments; the one nearest the middle of the chain gets
    // the mid label. The min keeps k = 2 in range, where the single interior
    // segment is the middle.
    let mid = (k / 2).min(k - 2);
    for i in 0..k - 1 {
        let mut seg = LabelEdge::from_nodes(virtuals[i], virtuals[i + 1]);
        if i == mid {
            seg.set_label_mid(origin);
        }
        out.push(seg);
    }

    let mut last = LabelEdge::from_nodes(virtuals[k - 1], chain.n2);
    last.set_label2(origin);
    out.push(last);
    out
}
