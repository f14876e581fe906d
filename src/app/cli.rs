use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Edge list used when neither `--graph` nor `--graph-file` is given.
pub const DEFAULT_EDGE_LIST: &str = "AB5,BC4,CD8,DC8,DE6,AD5,CE2,EB3,AE7";

#[derive(Parser, Debug)]
#[clap(author, version, about = "Answers latency queries over a graph of service-call traces.", long_about = None)]
pub struct Cli {
    /// Suppress verbose logging, only printing query results or errors.
    #[clap(short, long, global = true)]
    pub quiet: bool,

    /// File that receives the verbose log.
    #[clap(long, global = true, default_value = "trace-latency.log")]
    pub log_file: PathBuf,

    #[clap(subcommand)]
    pub command: Command,
}

/// Where the edge list comes from.
#[derive(Args, Debug, Clone, Default)]
pub struct GraphSource {
    /// Inline edge list, e.g. `AB5,BC4,CD8`
    #[clap(short, long, conflicts_with = "graph_file")]
    pub graph: Option<String>,

    /// File holding a comma-separated edge list
    #[clap(long)]
    pub graph_file: Option<PathBuf>,

    /// Extra node symbols to add to the alphabet, comma-separated
    #[clap(long)]
    pub alphabet: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Total latency of a trace such as `A-B-C`.
    Latency {
        #[clap(flatten)]
        source: GraphSource,

        /// Dash-separated trace
        trace: String,
    },

    /// List every trace between two nodes within hop and latency bounds.
    Traces {
        #[clap(flatten)]
        source: GraphSource,

        #[clap(long)]
        from: String,

        #[clap(long)]
        to: String,

        #[clap(long, default_value_t = 0)]
        min_hops: usize,

        /// Omit for no hop bound (then --max-latency is required)
        #[clap(long)]
        max_hops: Option<usize>,

        #[clap(long)]
        max_latency: Option<u64>,

        /// Abort after this many expansion rounds
        #[clap(long)]
        max_rounds: Option<usize>,

        /// Abort once a frontier holds more walks than this
        #[clap(long)]
        max_frontier: Option<usize>,
    },

    /// Lowest latency between two nodes.
    Shortest {
        #[clap(flatten)]
        source: GraphSource,

        #[clap(long)]
        from: String,

        #[clap(long)]
        to: String,
    },

    /// Run the ten standard queries and print their outputs.
    Report {
        #[clap(flatten)]
        source: GraphSource,
    },

    /// Write the synthetic offer CSV fixture.
    Fixture {
        /// Output file; stdout when omitted
        #[clap(short, long)]
        output: Option<PathBuf>,

        /// Leave out the header line
        #[clap(long)]
        no_header: bool,
    },
}
