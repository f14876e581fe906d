// error module
mod error;
// level-synchronous trace search
mod explorer;
// graph construction and latency aggregation
mod trace_graph;

//─────────────────────────────────────────────────────────────────────────────
// Public re-exports.
//─────────────────────────────────────────────────────────────────────────────
pub use error::GraphError;
pub use explorer::{HopLimit, SearchLimits};
pub use trace_graph::{format_trace, parse_trace, Latency, TraceGraph};
