// Dijkstra shortest path over the ladder graph.
//
// Every candidate of the first rung is a zero-cost source and edges only go
// from one rung to the next, so the relaxation front sweeps the ladder left
// to right. A priority queue is still used rather than a plain layer sweep
// to keep the interface uniform for non-monotonic extensions.
//
// Ties (equal distances, equal costs) resolve toward lower candidate
// indices, so repeated runs over the same graph are deterministic.

use crate::graph::LadderGraph;
use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Shortest-path state over a ladder graph: from any candidate of the first
/// rung to any candidate of the last.
pub struct DijkstraSearch<'a> {
    graph: &'a LadderGraph,

    /// Per-rung, per-candidate distance from the first rung
    distances: Vec<Vec<f64>>,

    /// Per-rung, per-candidate predecessor index in the previous rung
    predecessors: Vec<Vec<Option<u32>>>,
}

impl<'a> DijkstraSearch<'a> {
    pub fn new(graph: &'a LadderGraph) -> Self {
        let distances = (0..graph.size())
            .map(|i| vec![f64::INFINITY; graph.rung_size(i)])
            .collect();
        let predecessors = (0..graph.size())
            .map(|i| vec![None; graph.rung_size(i)])
            .collect();

        DijkstraSearch {
            graph,
            distances,
            predecessors,
        }
    }

    /// Relax every reachable edge and return the cost of the cheapest path
    /// to the last rung. `f64::INFINITY` means no path exists.
    pub fn run(&mut self) -> f64 {
        let size = self.graph.size();
        if size == 0 {
            return f64::INFINITY;
        }

        // Min-heap: (distance, rung, candidate). The index components break
        // distance ties toward lower indices.
        let mut heap: BinaryHeap<Reverse<(OrderedFloat<f64>, usize, usize)>> = BinaryHeap::new();

        for k in 0..self.graph.rung_size(0) {
            self.distances[0][k] = 0.0;
            heap.push(Reverse((OrderedFloat(0.0), 0, k)));
        }

        while let Some(Reverse((OrderedFloat(dist), r, k))) = heap.pop() {
            // Skip stale entries
            if dist > self.distances[r][k] {
                continue;
            }

            // The last rung has no outgoing edges
            if r + 1 == size {
                continue;
            }

            for edge in &self.graph.get_rung(r).edges[k] {
                let next = edge.idx as usize;
                let new_dist = dist + edge.cost;

                if new_dist < self.distances[r + 1][next] {
                    self.distances[r + 1][next] = new_dist;
                    self.predecessors[r + 1][next] = Some(k as u32);
                    heap.push(Reverse((OrderedFloat(new_dist), r + 1, next)));
                }
            }
        }

        self.min_cost()
    }

    /// Cheapest distance into the last rung found so far
    fn min_cost(&self) -> f64 {
        match self.distances.last() {
            Some(last) => last.iter().cloned().fold(f64::INFINITY, f64::min),
            None => f64::INFINITY,
        }
    }

    /// Candidate index per rung of the cheapest path, in forward order.
    /// Empty when `run` found no path.
    pub fn shortest_path(&self) -> Vec<usize> {
        let size = self.graph.size();
        if size == 0 {
            return Vec::new();
        }

        // Argmin over the last rung; strict comparison keeps the lowest
        // index on ties.
        let last = &self.distances[size - 1];
        let mut best: Option<usize> = None;
        for (k, &d) in last.iter().enumerate() {
            if d.is_finite() && best.map_or(true, |b| d < last[b]) {
                best = Some(k);
            }
        }

        let Some(mut k) = best else {
            return Vec::new();
        };

        let mut path = vec![0usize; size];
        for r in (0..size).rev() {
            path[r] = k;
            if r > 0 {
                // A finite distance off the first rung implies a predecessor
                k = self.predecessors[r][k].unwrap() as usize;
            }
        }

        path
    }
}
