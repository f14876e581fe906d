// trace_graph.rs
// ──────────────────────────────────────────────────────────────────────────────
// A directed, edge-weighted graph of service calls.  Every edge carries the
// latency of one call; a trace is a walk through the graph and its latency
// is the sum of the edges it crosses.  The graph is built once from an edge
// list such as `AB5,BC4,CD8` and is read-only afterwards.
// ──────────────────────────────────────────────────────────────────────────────
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

use super::error::GraphError;
use super::explorer::SearchLimits;

/// A node (service) symbol. Multi-character symbols are allowed.
pub type Node = String;

/// A walk through the graph. Nodes may repeat.
pub type Trace = Vec<Node>;

/// Aggregated latency of a trace.
///
/// `NoSuchTrace` is kept apart from `Defined(0)`: a single-node trace has a
/// latency of zero, a trace that crosses a missing edge has none at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Latency {
    Defined(u64),
    NoSuchTrace,
}

impl Latency {
    /// Returns the numeric latency, if any.
    pub fn value(self) -> Option<u64> {
        match self {
            Latency::Defined(total) => Some(total),
            Latency::NoSuchTrace => None,
        }
    }

    /// Folds one edge lookup into the accumulator. Once poisoned, stays poisoned.
    fn extend(self, edge: Option<u32>) -> Self {
        match (self, edge) {
            (Latency::Defined(total), Some(weight)) => Latency::Defined(total + u64::from(weight)),
            _ => Latency::NoSuchTrace,
        }
    }
}

impl fmt::Display for Latency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Latency::Defined(total) => write!(f, "{}", total),
            Latency::NoSuchTrace => write!(f, "NO SUCH TRACE"),
        }
    }
}

/// Service-call latency graph.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TraceGraph {
    /// Known node alphabet, kept sorted so expansion order is stable.
    nodes: BTreeSet<Node>,
    /// source -> destination -> latency
    edges: HashMap<Node, HashMap<Node, u32>>,
    limits: SearchLimits,
}

impl TraceGraph {
    /// Builds a graph from a comma-separated edge list.
    ///
    /// Each token is `<source><destination><weight>`: a run of non-digit
    /// symbol characters followed by a run of digits. The symbol part is
    /// split at `-` when present (`auth-db12`), otherwise it must be exactly
    /// two characters. Whitespace around tokens is ignored and empty tokens
    /// are skipped. A later edge for the same ordered pair replaces the
    /// earlier one.
    ///
    /// # Errors
    /// Any malformed token rejects the whole edge list with
    /// `GraphError::MalformedEdgeToken`; an edge list without tokens is
    /// `GraphError::EmptyEdgeList`.
    pub fn parse(edge_list: &str) -> Result<Self, GraphError> {
        let mut graph = TraceGraph::default();
        let mut seen_any = false;

        for token in edge_list.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let (source, destination, weight) = parse_edge_token(token)?;
            graph.insert_edge(source, destination, weight);
            seen_any = true;
        }

        if !seen_any {
            return Err(GraphError::EmptyEdgeList);
        }
        Ok(graph)
    }

    /// Unions a declared alphabet into the node set.
    pub fn with_alphabet<I, S>(mut self, alphabet: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Node>,
    {
        self.nodes.extend(alphabet.into_iter().map(Into::into));
        self
    }

    /// Replaces the defensive caps applied by `enumerate_paths`.
    pub fn with_search_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    fn insert_edge(&mut self, source: Node, destination: Node, weight: u32) {
        self.nodes.insert(source.clone());
        self.nodes.insert(destination.clone());
        self.edges.entry(source).or_default().insert(destination, weight);
    }

    /// Returns the node alphabet in ascending symbol order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(HashMap::len).sum()
    }

    pub fn search_limits(&self) -> SearchLimits {
        self.limits
    }

    /// Returns the latency of the edge `source -> destination`, if defined.
    pub fn weight(&self, source: &str, destination: &str) -> Option<u32> {
        self.edges
            .get(source)
            .and_then(|targets| targets.get(destination))
            .copied()
    }

    /// Returns the outgoing edges of `node` in alphabet order.
    pub fn successors<'a>(&'a self, node: &'a str) -> impl Iterator<Item = (&'a Node, u32)> + 'a {
        self.nodes
            .iter()
            .filter_map(move |dest| self.weight(node, dest).map(|weight| (dest, weight)))
    }

    /// Sums the edge latencies along `path`.
    ///
    /// Every consecutive pair is looked up, even after a missing edge has
    /// already made the result `NoSuchTrace`. Paths of zero or one node have a
    /// latency of zero.
    pub fn path_latency<S: AsRef<str>>(&self, path: &[S]) -> Latency {
        path.windows(2)
            .map(|pair| self.weight(pair[0].as_ref(), pair[1].as_ref()))
            .fold(Latency::Defined(0), Latency::extend)
    }
}

impl FromStr for TraceGraph {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TraceGraph::parse(s)
    }
}

/// Splits a dash-separated trace such as `A-E-B-C-D` into its nodes.
pub fn parse_trace(text: &str) -> Result<Trace, GraphError> {
    let trace: Trace = text.trim().split('-').map(|n| n.trim().to_string()).collect();
    if trace.iter().any(String::is_empty) {
        return Err(GraphError::MalformedTrace(text.to_string()));
    }
    Ok(trace)
}

/// Formats a trace the same way `parse_trace` reads it.
pub fn format_trace<S: AsRef<str>>(trace: &[S]) -> String {
    trace
        .iter()
        .map(|node| node.as_ref())
        .collect::<Vec<&str>>()
        .join("-")
}

fn parse_edge_token(token: &str) -> Result<(Node, Node, u32), GraphError> {
    let malformed = |reason: &str| GraphError::MalformedEdgeToken {
        token: token.to_string(),
        reason: reason.to_string(),
    };

    let symbols_len = token.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    let (symbols, digits) = token.split_at(symbols_len);

    if digits.is_empty() {
        return Err(malformed("missing trailing weight digits"));
    }
    if symbols.chars().any(|c| c.is_ascii_digit() || c.is_whitespace()) {
        return Err(malformed("node symbols may not contain digits or whitespace"));
    }
    let weight: u32 = digits
        .parse()
        .map_err(|_| malformed("weight does not fit in 32 bits"))?;

    let (source, destination) = match symbols.split_once('-') {
        Some((source, destination)) => {
            if source.is_empty() || destination.is_empty() || destination.contains('-') {
                return Err(malformed("expected exactly one `source-destination` pair"));
            }
            (source.to_string(), destination.to_string())
        }
        None => {
            let mut chars = symbols.chars();
            match (chars.next(), chars.next(), chars.next()) {
                (Some(source), Some(destination), None) => {
                    (source.to_string(), destination.to_string())
                }
                _ => {
                    return Err(malformed(
                        "expected two one-character nodes or a `source-destination` pair",
                    ))
                }
            }
        }
    };

    Ok((source, destination, weight))
}
