pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A data line violated its record grammar, or a section header arrived
    /// in a state that does not admit it. Line numbers count every physical
    /// line of the stage text, including comments and blanks.
    #[error("syntax error on line {line} [{message}]")]
    Syntax { line: usize, message: String },

    #[error("edge chain ({n1}, {n2}) matches no original edge")]
    UnmatchedChain { n1: i64, n2: i64 },

    #[error("cut vertex {node} lies on no face")]
    FacelessCutVertex { node: i64 },

    #[error("node {node} is referenced but never declared")]
    MissingNode { node: i64 },

    #[error("block {block} was never parsed")]
    MissingBlock { block: i64 },

    #[error("top node {node} belongs to no block")]
    UnplacedTopNode { node: i64 },

    #[error("no top node declared")]
    MissingTopNode,

    #[error("no gaps declared")]
    MissingGaps,

    #[error("ranked layout declares no ranks")]
    NoRanks,
}
