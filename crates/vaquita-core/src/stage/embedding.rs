//! Planar-embedding stage, produced by the embedding finder for one block.
//!
//! Format: `INCIDENCES → FACES`. An incidence line lists a node and its
//! neighbors in clockwise order. A face line carries the finder's own face
//! number first, which is discarded; face indices are assigned from a running
//! counter instead so they stay unique across all blocks of a graph.

use indexmap::IndexMap;

use crate::Result;
use crate::record::{self, Grammar, LineResult, fields, num, wrong_state};

/// One face of a block's planar embedding.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    pub index: i64,
    /// Boundary cycle in embedding order.
    pub incident_nodes: Vec<i64>,
}

impl Face {
    fn from_line(line: &str, index: i64) -> std::result::Result<Self, String> {
        const MSG: &str = "wrong face syntax";
        let f = fields(line);
        if f.is_empty() {
            return Err(MSG.to_string());
        }
        let _: i64 = num(f[0], MSG)?;
        let mut incident_nodes = Vec::with_capacity(f.len() - 1);
        for c in &f[1..] {
            incident_nodes.push(num(c, MSG)?);
        }
        Ok(Face {
            index,
            incident_nodes,
        })
    }
}

/// Where a block hangs off a cut vertex: the chosen face and the cut
/// vertex's two neighbors along its boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceAttachment {
    pub face_index: i64,
    /// Clockwise neighbor of the cut vertex on the face boundary.
    pub next_node: i64,
    /// Counter-clockwise neighbor.
    pub prev_node: i64,
}

/// Planar embedding of one block.
#[derive(Debug, Clone, Default)]
pub struct Embedding {
    /// Clockwise neighbor lists keyed by node number.
    pub incidences: IndexMap<i64, Vec<i64>>,
    /// Faces keyed by their assigned global index.
    pub faces: IndexMap<i64, Face>,
    /// One past the last index assigned here; the next block starts from it.
    pub face_index_end: i64,
}

impl Embedding {
    /// Picks the largest face whose boundary contains `cut_vertex`, along
    /// with the cut vertex's neighbors on that boundary. Ties go to the
    /// face seen first. `None` means no face touches the cut vertex, which
    /// the caller must treat as an inconsistent embedding.
    pub fn biggest_face(&self, cut_vertex: i64) -> Option<FaceAttachment> {
        let mut best: Option<&Face> = None;
        for face in self.faces.values() {
            if !face.incident_nodes.contains(&cut_vertex) {
                continue;
            }
            let bigger = match best {
                Some(b) => face.incident_nodes.len() > b.incident_nodes.len(),
                None => true,
            };
            if bigger {
                best = Some(face);
            }
        }
        let face = best?;
        let len = face.incident_nodes.len();
        let pos = face.incident_nodes.iter().position(|&n| n == cut_vertex)?;
        Some(FaceAttachment {
            face_index: face.index,
            next_node: face.incident_nodes[(pos + 1) % len],
            prev_node: face.incident_nodes[(pos + len - 1) % len],
        })
    }
}

#[derive(Clone, Copy)]
enum State {
    Init,
    Incidences,
    Faces,
}

struct Parser {
    embedding: Embedding,
    face_index: i64,
}

impl Grammar for Parser {
    type State = State;

    fn try_transition(&mut self, state: State, line: &str) -> Option<State> {
        match (state, line) {
            (State::Init, "INCIDENCES") => Some(State::Incidences),
            (State::Incidences, "FACES") => Some(State::Faces),
            _ => None,
        }
    }

    fn parse_line(&mut self, state: State, line: &str) -> LineResult {
        match state {
            State::Init => wrong_state(),
            State::Incidences => {
                const MSG: &str = "wrong incidence syntax";
                let f = fields(line);
                if f.is_empty() {
                    return Err(MSG.to_string());
                }
                let node: i64 = num(f[0], MSG)?;
                let mut neighbors = Vec::with_capacity(f.len() - 1);
                for c in &f[1..] {
                    neighbors.push(num(c, MSG)?);
                }
                self.embedding.incidences.insert(node, neighbors);
                Ok(())
            }
            State::Faces => {
                let face = Face::from_line(line, self.face_index)?;
                self.face_index += 1;
                self.embedding.faces.insert(face.index, face);
                Ok(())
            }
        }
    }
}

/// Parses one block's embedding, numbering its faces from
/// `face_index_start`.
pub fn parse(text: &str, face_index_start: i64) -> Result<Embedding> {
    let mut p = Parser {
        embedding: Embedding::default(),
        face_index: face_index_start,
    };
    record::drive(&mut p, State::Init, text)?;
    let mut embedding = p.embedding;
    embedding.face_index_end = p.face_index;
    tracing::debug!(
        incidences = embedding.incidences.len(),
        faces = embedding.faces.len(),
        face_index_end = embedding.face_index_end,
        "parsed embedding"
    );
    Ok(embedding)
}
