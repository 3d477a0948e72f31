// Ladder graph: layered DAG of joint-space candidates.
//
// Vertices are grouped into "rungs", one rung per Cartesian waypoint. Each
// rung stores its candidates in a flat `V * dof` buffer and keeps one
// outgoing edge list per candidate, referencing candidates of the next rung
// by index. Edges never skip a rung, so the whole graph is a left-to-right
// layered DAG.
//
// This is a plain mutable container; the planner is responsible for keeping
// neighbor edges consistent across insert/remove edits.

use crate::trajectory::TimingConstraint;
use uuid::Uuid;

/// A weighted transition to a candidate of the next rung
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub cost: f64,
    /// Candidate index in the next rung
    pub idx: u32,
}

/// Outgoing edges of one candidate, in increasing `idx` order
pub type EdgeList = Vec<Edge>;

/// One layer of the ladder: all joint-space candidates for one waypoint
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Rung {
    pub id: Uuid,
    /// Time allotted to arrive at this rung from the previous one
    pub timing: TimingConstraint,
    /// Flat joint buffer; candidate k occupies `[k * dof, (k + 1) * dof)`
    pub joints: Vec<f64>,
    /// One edge list per candidate. Empty lists on the last rung.
    pub edges: Vec<EdgeList>,
}

/// Layered DAG over the joint-space candidates of an ordered waypoint
/// sequence, with a fixed joint count.
#[derive(Debug, Clone, PartialEq)]
pub struct LadderGraph {
    dof: usize,
    rungs: Vec<Rung>,
}

impl LadderGraph {
    /// Create an empty graph for a robot with `dof` joints
    pub fn new(dof: usize) -> Self {
        assert!(dof > 0, "Joint count must be positive");
        Self {
            dof,
            rungs: Vec::new(),
        }
    }

    pub fn dof(&self) -> usize {
        self.dof
    }

    /// Number of rungs
    pub fn size(&self) -> usize {
        self.rungs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rungs.is_empty()
    }

    /// Resize to `n` default-initialized rungs without assigning content
    pub fn allocate(&mut self, n: usize) {
        self.rungs = vec![Rung::default(); n];
    }

    /// Drop all rungs, keeping the joint count
    pub fn clear(&mut self) {
        self.rungs.clear();
    }

    /// Number of candidates held by rung `i`
    pub fn rung_size(&self, i: usize) -> usize {
        self.rungs[i].joints.len() / self.dof
    }

    /// Total candidate count across all rungs
    pub fn num_vertices(&self) -> usize {
        self.rungs.iter().map(|r| r.joints.len()).sum::<usize>() / self.dof
    }

    pub fn get_rung(&self, i: usize) -> &Rung {
        &self.rungs[i]
    }

    /// Joint values of candidate `k` of rung `i`
    pub fn vertex(&self, i: usize, k: usize) -> &[f64] {
        &self.rungs[i].joints[k * self.dof..(k + 1) * self.dof]
    }

    /// Write rung `i` from one joint vector per candidate. The vertex
    /// buffer is the concatenation in input order and the edge table is
    /// reset to one empty list per candidate.
    ///
    /// Panics if any solution's length differs from `dof`.
    pub fn assign_rung(
        &mut self,
        i: usize,
        id: Uuid,
        timing: TimingConstraint,
        solutions: &[Vec<f64>],
    ) {
        let dof = self.dof;
        let rung = &mut self.rungs[i];
        rung.id = id;
        rung.timing = timing;

        rung.joints.clear();
        rung.joints.reserve(solutions.len() * dof);
        for solution in solutions {
            assert_eq!(solution.len(), dof, "Joint solution has wrong length");
            rung.joints.extend_from_slice(solution);
        }

        rung.edges = vec![EdgeList::new(); solutions.len()];
    }

    /// Set the outgoing edge lists of rung `i`: one list per candidate,
    /// every destination index valid in rung `i + 1`.
    pub fn assign_edges(&mut self, i: usize, edges: Vec<EdgeList>) {
        assert_eq!(
            edges.len(),
            self.rung_size(i),
            "One edge list per candidate is required"
        );
        debug_assert!(
            edges.iter().flatten().all(|e| !self.is_last(i)
                && (e.idx as usize) < self.rung_size(i + 1)),
            "Edge destination out of range"
        );
        self.rungs[i].edges = edges;
    }

    /// Insert an empty rung at position `i`, shifting later rungs right.
    /// The edges of rung `i - 1` keep referencing the old neighbor and must
    /// be reassigned by the caller.
    pub fn insert_rung(&mut self, i: usize) {
        self.rungs.insert(i, Rung::default());
    }

    /// Erase rung `i`, shifting later rungs left. The edges of rung `i - 1`
    /// become stale and must be reassigned by the caller.
    pub fn remove_rung(&mut self, i: usize) {
        self.rungs.remove(i);
    }

    /// Drop the joint buffer of rung `i`
    pub fn clear_vertices(&mut self, i: usize) {
        self.rungs[i].joints.clear();
    }

    /// Drop the edge table of rung `i`
    pub fn clear_edges(&mut self, i: usize) {
        self.rungs[i].edges.clear();
    }

    /// Position of the rung carrying the given id
    pub fn index_of(&self, id: Uuid) -> Option<usize> {
        // Linear scan; edits are rare next to construction and search
        self.rungs.iter().position(|r| r.id == id)
    }

    pub fn is_first(&self, i: usize) -> bool {
        i == 0
    }

    pub fn is_last(&self, i: usize) -> bool {
        i + 1 == self.size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assigned_graph() -> (LadderGraph, Vec<Uuid>) {
        let mut graph = LadderGraph::new(2);
        let ids: Vec<Uuid> = (0..3).map(|_| Uuid::new_v4()).collect();

        graph.allocate(3);
        graph.assign_rung(
            0,
            ids[0],
            TimingConstraint::unspecified(),
            &[vec![0.0, 0.0], vec![1.0, 1.0]],
        );
        graph.assign_rung(
            1,
            ids[1],
            TimingConstraint::new(1.0),
            &[vec![2.0, 2.0]],
        );
        graph.assign_rung(
            2,
            ids[2],
            TimingConstraint::new(1.0),
            &[vec![3.0, 3.0], vec![4.0, 4.0], vec![5.0, 5.0]],
        );

        (graph, ids)
    }

    #[test]
    fn test_assign_rung_layout() {
        let (graph, ids) = assigned_graph();

        assert_eq!(graph.size(), 3);
        assert_eq!(graph.dof(), 2);
        assert_eq!(graph.rung_size(0), 2);
        assert_eq!(graph.rung_size(1), 1);
        assert_eq!(graph.rung_size(2), 3);
        assert_eq!(graph.num_vertices(), 6);

        // Candidate k is a dof-wide window into the flat buffer
        assert_eq!(graph.vertex(0, 1), &[1.0, 1.0]);
        assert_eq!(graph.vertex(2, 2), &[5.0, 5.0]);

        // Fresh rungs carry one empty edge list per candidate
        assert_eq!(graph.get_rung(0).edges.len(), 2);
        assert!(graph.get_rung(0).edges.iter().all(|l| l.is_empty()));

        assert_eq!(graph.get_rung(1).id, ids[1]);
        assert!(graph.get_rung(1).timing.is_specified());
    }

    #[test]
    fn test_index_of() {
        let (mut graph, ids) = assigned_graph();

        assert_eq!(graph.index_of(ids[1]), Some(1));
        assert_eq!(graph.index_of(Uuid::new_v4()), None);

        graph.remove_rung(1);
        assert_eq!(graph.index_of(ids[1]), None);
        assert_eq!(graph.index_of(ids[2]), Some(1));
    }

    #[test]
    fn test_insert_and_remove_shift() {
        let (mut graph, ids) = assigned_graph();

        graph.insert_rung(1);
        assert_eq!(graph.size(), 4);
        // New rung is empty; later rungs shifted right
        assert_eq!(graph.rung_size(1), 0);
        assert_eq!(graph.index_of(ids[1]), Some(2));
        assert_eq!(graph.index_of(ids[2]), Some(3));

        graph.remove_rung(1);
        assert_eq!(graph.size(), 3);
        assert_eq!(graph.index_of(ids[1]), Some(1));
    }

    #[test]
    fn test_assign_edges() {
        let (mut graph, _) = assigned_graph();

        // Both candidates of rung 0 reach the single candidate of rung 1
        graph.assign_edges(
            0,
            vec![
                vec![Edge { cost: 4.0, idx: 0 }],
                vec![Edge { cost: 2.0, idx: 0 }],
            ],
        );
        assert_eq!(graph.get_rung(0).edges[1][0].cost, 2.0);
    }

    #[test]
    #[should_panic(expected = "One edge list per candidate")]
    fn test_assign_edges_wrong_length_panics() {
        let (mut graph, _) = assigned_graph();
        graph.assign_edges(0, vec![EdgeList::new()]);
    }

    #[test]
    #[should_panic(expected = "wrong length")]
    fn test_assign_rung_wrong_dof_panics() {
        let (mut graph, _) = assigned_graph();
        graph.assign_rung(
            0,
            Uuid::new_v4(),
            TimingConstraint::unspecified(),
            &[vec![1.0, 2.0, 3.0]],
        );
    }

    #[test]
    fn test_clear_vertices_and_edges() {
        let (mut graph, ids) = assigned_graph();
        graph.assign_edges(1, vec![vec![Edge { cost: 1.0, idx: 1 }]]);

        graph.clear_vertices(1);
        assert_eq!(graph.rung_size(1), 0);

        graph.clear_edges(1);
        assert!(graph.get_rung(1).edges.is_empty());

        // Identity survives clearing; only the buffers are dropped
        assert_eq!(graph.index_of(ids[1]), Some(1));
    }

    #[test]
    fn test_boundary_queries() {
        let (graph, _) = assigned_graph();

        assert!(graph.is_first(0));
        assert!(!graph.is_first(1));
        assert!(graph.is_last(2));
        assert!(!graph.is_last(0));
    }

    #[test]
    fn test_clear_keeps_dof() {
        let (mut graph, _) = assigned_graph();
        graph.clear();

        assert!(graph.is_empty());
        assert_eq!(graph.size(), 0);
        assert_eq!(graph.dof(), 2);
    }
}
