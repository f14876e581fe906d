use thiserror::Error;

//─────────────────────────────────────────────────────────────────────────────

/// Error type for trace graph construction and queries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// An edge token did not match `<source><destination><weight>`.
    #[error("Malformed edge token '{token}': {reason}")]
    MalformedEdgeToken { token: String, reason: String },

    /// The edge list contained no tokens at all.
    #[error("Edge list is empty, cannot build a trace graph.")]
    EmptyEdgeList,

    /// A trace string such as `A-B-C` could not be split into nodes.
    #[error("Malformed trace '{0}'")]
    MalformedTrace(String),

    /// Both the hop bound and the latency bound were left open.
    #[error("Search needs a finite hop bound or a finite latency bound")]
    UnboundedSearch,

    /// The search ran past one of the configured `SearchLimits`.
    #[error("Search exceeded its bound after {rounds} round(s) with {frontier} walk(s) in the frontier")]
    SearchBoundExceeded { rounds: usize, frontier: usize },
}
