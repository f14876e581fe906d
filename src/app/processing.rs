//! Query execution for each subcommand.
//!
//! Every function here loads or receives a `TraceGraph`, runs one kind of
//! query and returns the lines to print. Progress goes to the verbose log.

use super::cli::{GraphSource, DEFAULT_EDGE_LIST};
use super::error::AppError;
use super::file_handler;
use super::{verbose_eprintln, verbose_println}; // Macros for conditional logging.
use crate::fixture;
use crate::graph::{format_trace, parse_trace, GraphError, HopLimit, Latency, SearchLimits, TraceGraph};

/// Builds the graph named by `source`: inline text, a file, or the default
/// sample edge list, with any declared alphabet unioned in.
pub fn load_graph(source: &GraphSource, quiet_mode: bool) -> Result<TraceGraph, AppError> {
    verbose_println!(quiet_mode, "\n[STEP 1] Loading trace graph...");
    let edge_list = match (&source.graph, &source.graph_file) {
        (Some(inline), _) => inline.clone(),
        (None, Some(path)) => {
            verbose_println!(quiet_mode, "   => Reading edges from {}", path.display());
            file_handler::read_edge_list(path, quiet_mode)?
        }
        (None, None) => {
            verbose_println!(quiet_mode, "   => Using default edge list");
            DEFAULT_EDGE_LIST.to_string()
        }
    };

    let mut graph = TraceGraph::parse(&edge_list).map_err(|e| {
        verbose_eprintln!(quiet_mode, "Edge list rejected: {}", e);
        e
    })?;
    if let Some(alphabet) = &source.alphabet {
        graph = graph.with_alphabet(
            alphabet
                .split(',')
                .map(str::trim)
                .filter(|symbol| !symbol.is_empty()),
        );
    }

    verbose_println!(
        quiet_mode,
        "   => {} node(s), {} edge(s)",
        graph.node_count(),
        graph.edge_count()
    );
    verbose_println!(
        quiet_mode,
        "   => Alphabet: {}",
        graph.nodes().map(String::as_str).collect::<Vec<&str>>().join(",")
    );
    Ok(graph)
}

/// Latency of a dash-separated trace.
pub fn latency_query(graph: &TraceGraph, trace_text: &str, quiet_mode: bool) -> Result<Vec<String>, AppError> {
    let trace = parse_trace(trace_text)?;
    verbose_println!(quiet_mode, "\n[STEP 2] Latency of {}", format_trace(trace.as_slice()));
    let latency = graph.path_latency(trace.as_slice());
    verbose_println!(quiet_mode, "   => {}", latency);
    Ok(vec![latency.to_string()])
}

/// Parameters of a `traces` query.
#[derive(Debug, Clone)]
pub struct TraceQuery {
    pub from: String,
    pub to: String,
    pub min_hops: usize,
    pub max_hops: HopLimit,
    pub max_latency: Option<u64>,
}

/// Every qualifying trace, one per line as `<trace> <latency>`, then a count line.
pub fn traces_query(graph: &TraceGraph, query: &TraceQuery, quiet_mode: bool) -> Result<Vec<String>, AppError> {
    verbose_println!(
        quiet_mode,
        "\n[STEP 2] Traces {} -> {}, hops >= {}, max hops {:?}, max latency {:?}",
        query.from,
        query.to,
        query.min_hops,
        query.max_hops,
        query.max_latency
    );

    let walks = graph
        .enumerate_paths(&query.from, &query.to, query.min_hops, query.max_hops, query.max_latency)
        .map_err(|e| {
            verbose_eprintln!(quiet_mode, "Trace search failed: {}", e);
            e
        })?;
    verbose_println!(quiet_mode, "   => Found {} trace(s).", walks.len());

    let mut lines: Vec<String> = walks
        .iter()
        .map(|walk| format!("{} {}", format_trace(walk.as_slice()), graph.path_latency(walk.as_slice())))
        .collect();
    lines.push(format!("Total: {}", walks.len()));
    Ok(lines)
}

/// Lowest latency between two nodes.
pub fn shortest_query(graph: &TraceGraph, from: &str, to: &str, quiet_mode: bool) -> Result<Vec<String>, AppError> {
    verbose_println!(quiet_mode, "\n[STEP 2] Shortest latency {} -> {}", from, to);
    let latency = graph.shortest_latency(from, to)?;
    verbose_println!(quiet_mode, "   => {}", latency);
    Ok(vec![latency.to_string()])
}

/// Runs the ten standard queries against `graph`.
///
/// Output lines read `Output #<n>: <value>`. Latencies print as a number or
/// `NO SUCH TRACE`; counts print as a number.
pub fn report(graph: &TraceGraph, quiet_mode: bool) -> Result<Vec<String>, AppError> {
    verbose_println!(quiet_mode, "\n[STEP 2] Running standard report...");
    let latency = |trace: &str| -> Result<String, GraphError> {
        Ok(graph.path_latency(parse_trace(trace)?.as_slice()).to_string())
    };

    let outputs: Vec<String> = vec![
        latency("A-B-C")?,
        latency("A-D")?,
        latency("A-D-C")?,
        latency("A-E-B-C-D")?,
        latency("A-E-D")?,
        graph
            .count_traces("C", "C", 0, HopLimit::Bounded(3), None)?
            .to_string(),
        graph
            .count_traces("A", "C", 4, HopLimit::Bounded(4), None)?
            .to_string(),
        graph.shortest_latency("A", "C")?.to_string(),
        graph.shortest_latency("B", "B")?.to_string(),
        graph.count_traces_below("C", "C", 30)?.to_string(),
    ];

    let undefined = outputs
        .iter()
        .filter(|o| o.as_str() == Latency::NoSuchTrace.to_string())
        .count();
    verbose_println!(
        quiet_mode,
        "   => {} output(s), {} without a trace",
        outputs.len(),
        undefined
    );

    Ok(outputs
        .into_iter()
        .enumerate()
        .map(|(i, value)| format!("Output #{}: {}", i + 1, value))
        .collect())
}

/// Search limits from optional overrides, defaulting the rest.
pub fn search_limits(max_rounds: Option<usize>, max_frontier: Option<usize>) -> SearchLimits {
    let defaults = SearchLimits::default();
    SearchLimits {
        max_rounds: max_rounds.unwrap_or(defaults.max_rounds),
        max_frontier: max_frontier.unwrap_or(defaults.max_frontier),
    }
}

/// Renders the offer CSV fixture.
pub fn fixture_csv(include_header: bool, quiet_mode: bool) -> Result<String, AppError> {
    verbose_println!(quiet_mode, "\n[STEP 1] Rendering offer fixture...");
    let csv = fixture::render_offers_csv(include_header)?;
    verbose_println!(quiet_mode, "   => {} line(s)", csv.lines().count());
    Ok(csv)
}
