use super::error::GraphError;
use super::trace_graph::{Latency, Trace, TraceGraph};

//─────────────────────────────────────────────────────────────────────────────

/// Upper bound on the number of hops a search may take.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HopLimit {
    Bounded(usize),
    Unbounded,
}

impl HopLimit {
    /// True while another expansion round is permitted after `hops` rounds.
    fn allows(self, hops: usize) -> bool {
        match self {
            HopLimit::Bounded(max) => hops < max,
            HopLimit::Unbounded => true,
        }
    }
}

impl From<Option<usize>> for HopLimit {
    fn from(value: Option<usize>) -> Self {
        value.map_or(HopLimit::Unbounded, HopLimit::Bounded)
    }
}

/// Hard caps that stop a runaway search, e.g. a zero-latency cycle searched
/// without a hop bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchLimits {
    /// Maximum number of expansion rounds (hops).
    pub max_rounds: usize,
    /// Maximum number of partial walks held in one frontier.
    pub max_frontier: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_rounds: 10_000,
            max_frontier: 1_000_000,
        }
    }
}

impl TraceGraph {
    /// Enumerates every walk from `start` to `end` whose hop count lies in
    /// `[min_hops, max_hops]` and whose latency is at most `max_latency`.
    ///
    /// The search is level-synchronous: each round extends every walk in the
    /// frontier by one edge, visiting successors in alphabet order, and drops
    /// any extension that is over the latency cap. Walks are reported in the
    /// order found (hop count ascending). The zero-hop walk `[start]` is
    /// never reported.
    ///
    /// # Errors
    /// `GraphError::UnboundedSearch` if neither `max_hops` nor `max_latency`
    /// is finite. `GraphError::SearchBoundExceeded` if the search outgrows
    /// the graph's `SearchLimits`.
    pub fn enumerate_paths(
        &self,
        start: &str,
        end: &str,
        min_hops: usize,
        max_hops: HopLimit,
        max_latency: Option<u64>,
    ) -> Result<Vec<Trace>, GraphError> {
        if max_hops == HopLimit::Unbounded && max_latency.is_none() {
            return Err(GraphError::UnboundedSearch);
        }

        let limits = self.search_limits();
        // Each frontier entry carries its running latency.
        let mut frontier: Vec<(Trace, u64)> = vec![(vec![start.to_string()], 0)];
        let mut found: Vec<Trace> = Vec::new();
        let mut hops = 0;

        while max_hops.allows(hops) {
            if hops >= limits.max_rounds {
                return Err(GraphError::SearchBoundExceeded {
                    rounds: hops,
                    frontier: frontier.len(),
                });
            }

            let next = self.expand(&frontier, max_latency, limits.max_frontier).ok_or(
                GraphError::SearchBoundExceeded {
                    rounds: hops + 1,
                    frontier: limits.max_frontier.saturating_add(1),
                },
            )?;
            if next.is_empty() {
                break;
            }

            frontier = next;
            hops += 1;
            if hops >= min_hops {
                found.extend(
                    frontier
                        .iter()
                        .filter(|(walk, _)| walk.last().map(String::as_str) == Some(end))
                        .map(|(walk, _)| walk.clone()),
                );
            }
        }

        Ok(found)
    }

    /// Extends every walk by one edge, keeping extensions within the latency cap.
    ///
    /// Returns `None` as soon as the new frontier holds more than `max_frontier` walks.
    fn expand(
        &self,
        frontier: &[(Trace, u64)],
        max_latency: Option<u64>,
        max_frontier: usize,
    ) -> Option<Vec<(Trace, u64)>> {
        let mut next = Vec::new();
        for (walk, total) in frontier {
            let Some(last) = walk.last() else {
                continue;
            };
            for (dest, weight) in self.successors(last) {
                let extended = total + u64::from(weight);
                if max_latency.is_some_and(|cap| extended > cap) {
                    continue;
                }
                if next.len() == max_frontier {
                    return None;
                }
                let mut candidate = walk.clone();
                candidate.push(dest.clone());
                next.push((candidate, extended));
            }
        }
        Some(next)
    }

    /// Number of walks `enumerate_paths` finds for the same arguments.
    pub fn count_traces(
        &self,
        start: &str,
        end: &str,
        min_hops: usize,
        max_hops: HopLimit,
        max_latency: Option<u64>,
    ) -> Result<usize, GraphError> {
        self.enumerate_paths(start, end, min_hops, max_hops, max_latency)
            .map(|walks| walks.len())
    }

    /// Lowest latency over all walks from `start` to `end` of at most
    /// `node_count` hops, or `NoSuchTrace` when there is none.
    pub fn shortest_latency(&self, start: &str, end: &str) -> Result<Latency, GraphError> {
        let walks = self.enumerate_paths(start, end, 0, HopLimit::Bounded(self.node_count()), None)?;
        Ok(walks
            .iter()
            .filter_map(|walk| self.path_latency(walk.as_slice()).value())
            .min()
            .map_or(Latency::NoSuchTrace, Latency::Defined))
    }

    /// Number of walks from `start` to `end` whose latency is strictly below
    /// `ceiling`, with no bound on hop count.
    pub fn count_traces_below(&self, start: &str, end: &str, ceiling: u64) -> Result<usize, GraphError> {
        let Some(cap) = ceiling.checked_sub(1) else {
            return Ok(0);
        };
        let walks = self.enumerate_paths(start, end, 0, HopLimit::Unbounded, Some(cap))?;
        Ok(walks
            .iter()
            .filter(|walk| matches!(self.path_latency(walk.as_slice()), Latency::Defined(total) if total < ceiling))
            .count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn sample() -> TraceGraph {
        TraceGraph::parse("AB5,BC4,CD8,DC8,DE6,AD5,CE2,EB3,AE7").unwrap()
    }

    fn as_set(walks: &[Trace]) -> BTreeSet<String> {
        walks.iter().map(|w| w.join("-")).collect()
    }

    #[test]
    fn round_trips_through_c_with_at_most_three_hops() {
        let g = sample();
        let walks = g.enumerate_paths("C", "C", 0, HopLimit::Bounded(3), None).unwrap();
        assert_eq!(walks.len(), 2);
        assert_eq!(
            as_set(&walks),
            ["C-D-C", "C-E-B-C"]
                .iter()
                .map(|s| s.to_string())
                .collect::<BTreeSet<String>>()
        );
    }

    #[test]
    fn a_to_c_with_exactly_four_hops() {
        let g = sample();
        let walks = g.enumerate_paths("A", "C", 4, HopLimit::Bounded(4), None).unwrap();
        assert_eq!(walks.len(), 3);
        assert_eq!(
            as_set(&walks),
            ["A-B-C-D-C", "A-D-C-D-C", "A-D-E-B-C"]
                .iter()
                .map(|s| s.to_string())
                .collect::<BTreeSet<String>>()
        );
    }

    #[test]
    fn shortest_latencies() {
        let g = sample();
        assert_eq!(g.shortest_latency("A", "C").unwrap(), Latency::Defined(9));
        assert_eq!(g.shortest_latency("B", "B").unwrap(), Latency::Defined(9));
        // Nothing reaches A.
        assert_eq!(g.shortest_latency("B", "A").unwrap(), Latency::NoSuchTrace);
    }

    #[test]
    fn c_round_trips_below_thirty() {
        let g = sample();
        let walks = g.enumerate_paths("C", "C", 0, HopLimit::Unbounded, Some(29)).unwrap();
        let below: Vec<&Trace> = walks
            .iter()
            .filter(|w| matches!(g.path_latency(w.as_slice()), Latency::Defined(t) if t < 30))
            .collect();
        assert_eq!(below.len(), 7);
        assert_eq!(g.count_traces_below("C", "C", 30).unwrap(), 7);
    }

    #[test]
    fn hop_counts_stay_within_window() {
        let g = sample();
        for (min, max) in [(0, 1), (1, 3), (2, 2), (3, 6), (5, 5)] {
            let walks = g
                .enumerate_paths("A", "C", min, HopLimit::Bounded(max), None)
                .unwrap();
            for walk in &walks {
                let hops = walk.len() - 1;
                assert!(hops >= min.max(1) && hops <= max, "{:?} outside [{}, {}]", walk, min, max);
                assert_eq!(walk.first().map(String::as_str), Some("A"));
                assert_eq!(walk.last().map(String::as_str), Some("C"));
            }
        }
    }

    #[test]
    fn every_walk_respects_latency_cap() {
        let g = sample();
        for cap in [0, 5, 9, 17, 30] {
            let walks = g
                .enumerate_paths("A", "E", 0, HopLimit::Bounded(8), Some(cap))
                .unwrap();
            for walk in &walks {
                let total = g.path_latency(walk.as_slice()).value().unwrap();
                assert!(total <= cap, "{:?} has latency {} > {}", walk, total, cap);
            }
        }
    }

    #[test]
    fn zero_hop_window_reports_nothing() {
        let g = sample();
        assert!(g.enumerate_paths("A", "A", 0, HopLimit::Bounded(0), None).unwrap().is_empty());
    }

    #[test]
    fn unknown_start_yields_no_walks() {
        let g = sample();
        assert!(g.enumerate_paths("Q", "C", 0, HopLimit::Bounded(4), None).unwrap().is_empty());
    }

    #[test]
    fn dead_end_stops_search_early() {
        let g = TraceGraph::parse("AB1,BC1").unwrap();
        let walks = g
            .enumerate_paths("A", "C", 0, HopLimit::Bounded(usize::MAX), None)
            .unwrap();
        assert_eq!(walks, vec![vec!["A".to_string(), "B".to_string(), "C".to_string()]]);
    }

    #[test]
    fn both_bounds_open_is_rejected() {
        let g = sample();
        assert_eq!(
            g.enumerate_paths("A", "C", 0, HopLimit::Unbounded, None),
            Err(GraphError::UnboundedSearch)
        );
    }

    #[test]
    fn zero_latency_cycle_hits_round_cap() {
        let g = TraceGraph::parse("AA0").unwrap().with_search_limits(SearchLimits {
            max_rounds: 50,
            max_frontier: 1_000,
        });
        let err = g
            .enumerate_paths("A", "A", 0, HopLimit::Unbounded, Some(10))
            .unwrap_err();
        assert_eq!(err, GraphError::SearchBoundExceeded { rounds: 50, frontier: 1 });
    }

    #[test]
    fn frontier_cap_is_enforced() {
        let g = TraceGraph::parse("AB1,BA1,AA1,BB1").unwrap().with_search_limits(SearchLimits {
            max_rounds: 100,
            max_frontier: 16,
        });
        // Frontier doubles each round: 2, 4, 8, 16, then the fifth round overflows.
        let err = g
            .enumerate_paths("A", "B", 0, HopLimit::Bounded(10), None)
            .unwrap_err();
        assert_eq!(err, GraphError::SearchBoundExceeded { rounds: 5, frontier: 17 });
    }

    #[test]
    fn frontier_cap_stops_expansion_at_the_cap() {
        let edges: Vec<String> = ["A", "B", "C", "D", "E"]
            .iter()
            .flat_map(|s| ["A", "B", "C", "D", "E"].iter().map(move |d| format!("{}{}0", s, d)))
            .collect();
        let g = TraceGraph::parse(&edges.join(",")).unwrap().with_search_limits(SearchLimits {
            max_rounds: 100,
            max_frontier: 100,
        });
        let err = g
            .enumerate_paths("A", "E", 0, HopLimit::Bounded(6), None)
            .unwrap_err();
        assert_eq!(err, GraphError::SearchBoundExceeded { rounds: 3, frontier: 101 });
    }

    #[test]
    fn running_totals_match_path_latency() {
        let g = sample();
        let walks = g
            .enumerate_paths("A", "C", 0, HopLimit::Unbounded, Some(30))
            .unwrap();
        assert!(!walks.is_empty());
        for walk in &walks {
            let total = g.path_latency(walk.as_slice()).value().unwrap();
            assert!(total <= 30, "{:?} has latency {}", walk, total);
        }
        // A-B-C-D-C totals 25, A-D-C-D-C totals 29.
        let texts: BTreeSet<String> = walks.iter().map(|w| w.join("-")).collect();
        assert!(texts.contains("A-B-C-D-C"));
        assert!(texts.contains("A-D-C-D-C"));
        assert!(!g
            .enumerate_paths("A", "C", 0, HopLimit::Unbounded, Some(8))
            .unwrap()
            .iter()
            .any(|w| w.join("-") == "A-B-C"));
    }

    #[test]
    fn hop_limit_from_option() {
        assert_eq!(HopLimit::from(Some(3)), HopLimit::Bounded(3));
        assert_eq!(HopLimit::from(None), HopLimit::Unbounded);
    }

    #[test]
    fn count_matches_enumeration() {
        let g = sample();
        assert_eq!(g.count_traces("C", "C", 0, HopLimit::Bounded(3), None).unwrap(), 2);
        assert_eq!(g.count_traces_below("C", "C", 0).unwrap(), 0);
    }
}
