// Trajectory planning over the ladder graph.
//
// Orchestrates IK sampling, graph construction, and incremental edits.
// Bulk construction samples every waypoint once and wires all adjacent
// rung pairs; the edit operations re-sample a single waypoint and rebuild
// only the edges on the touched boundaries, so interactive tuning never
// pays for the untouched rest of the trajectory.

use crate::edges::{CostFunction, EdgeBuilder};
use crate::graph::LadderGraph;
use crate::kinematics::RobotModel;
use crate::search::DijkstraSearch;
use crate::trajectory::{JointWaypoint, TrajectoryPoint};
use crate::{Error, Result};
use std::sync::Arc;
use uuid::Uuid;

/// Plans a minimum-cost joint trajectory through an ordered sequence of
/// Cartesian waypoints, one IK candidate per waypoint.
pub struct PlanningGraph {
    graph: LadderGraph,
    model: Arc<dyn RobotModel>,
    cost_function: Option<CostFunction>,
}

impl PlanningGraph {
    /// Create a planner for the given robot. Transitions are scored with
    /// the default L1 joint distance until a custom cost is registered.
    pub fn new(model: Arc<dyn RobotModel>) -> Self {
        let dof = model.dof();
        Self {
            graph: LadderGraph::new(dof),
            model,
            cost_function: None,
        }
    }

    /// Replace the default transition cost with a custom function
    pub fn with_cost_function(mut self, f: CostFunction) -> Self {
        self.cost_function = Some(f);
        self
    }

    /// Read access to the underlying graph
    pub fn graph(&self) -> &LadderGraph {
        &self.graph
    }

    /// Build the graph from an ordered waypoint sequence, replacing any
    /// previous contents. Fails without touching IK when fewer than 2
    /// points are given; fails with an empty graph when any point has no
    /// IK solution.
    pub fn insert_graph(&mut self, points: &[&dyn TrajectoryPoint]) -> Result<()> {
        if points.len() < 2 {
            log::error!(
                "insert_graph: at least 2 trajectory points are required, got {}",
                points.len()
            );
            return Err(Error::TooFewPoints(points.len()));
        }

        if !self.graph.is_empty() {
            self.graph.clear();
        }

        let solutions = self.joint_solutions(points)?;

        self.graph.allocate(points.len());
        for (i, point) in points.iter().enumerate() {
            self.graph
                .assign_rung(i, point.id(), point.timing(), &solutions[i]);
        }

        for i in 0..self.graph.size() - 1 {
            self.compute_and_assign_edges(i, i + 1);
        }

        log::info!(
            "Built ladder graph: {} rungs, {} vertices",
            self.graph.size(),
            self.graph.num_vertices()
        );
        Ok(())
    }

    /// Insert a waypoint into an existing graph between the rungs named by
    /// `prev_id` and `next_id`. A nil `prev_id` marks the new point as the
    /// trajectory start; a nil (or unknown) `next_id` appends it at the
    /// end. Edges are rebuilt on each boundary whose neighbor was named.
    pub fn add_trajectory(
        &mut self,
        point: &dyn TrajectoryPoint,
        prev_id: Uuid,
        next_id: Uuid,
    ) -> Result<()> {
        let poses = self.sample_point(point)?;

        let insert_idx = match self.graph.index_of(next_id) {
            Some(idx) => idx,
            None => self.graph.size(),
        };

        self.graph.insert_rung(insert_idx);
        self.graph
            .assign_rung(insert_idx, point.id(), point.timing(), &poses);

        if !prev_id.is_nil() && insert_idx > 0 {
            self.compute_and_assign_edges(insert_idx - 1, insert_idx);
        }
        if !next_id.is_nil() && insert_idx + 1 < self.graph.size() {
            self.compute_and_assign_edges(insert_idx, insert_idx + 1);
        }

        Ok(())
    }

    /// Re-sample IK for an existing waypoint and rebuild the edges on both
    /// of its boundaries. The rest of the graph is untouched.
    pub fn modify_trajectory(&mut self, point: &dyn TrajectoryPoint) -> Result<()> {
        let Some(idx) = self.graph.index_of(point.id()) else {
            return Err(Error::UnknownId(point.id()));
        };

        let poses = self.sample_point(point)?;

        self.graph.clear_vertices(idx);
        self.graph.clear_edges(idx);
        self.graph
            .assign_rung(idx, point.id(), point.timing(), &poses);

        if !self.graph.is_first(idx) {
            self.compute_and_assign_edges(idx - 1, idx);
        }
        if !self.graph.is_last(idx) {
            self.compute_and_assign_edges(idx, idx + 1);
        }

        Ok(())
    }

    /// Remove a waypoint. Interior removal reconnects the now-adjacent
    /// neighbors; removing the last rung clears the edges of the rung that
    /// becomes last.
    pub fn remove_trajectory(&mut self, point: &dyn TrajectoryPoint) -> Result<()> {
        let Some(idx) = self.graph.index_of(point.id()) else {
            return Err(Error::UnknownId(point.id()));
        };

        let was_first = self.graph.is_first(idx);
        let was_last = self.graph.is_last(idx);

        self.graph.remove_rung(idx);

        if !was_first && !was_last {
            // The erasure collapsed the indexes by one, so the old next
            // rung now sits at `idx`.
            self.compute_and_assign_edges(idx - 1, idx);
        } else if was_last && !self.graph.is_empty() {
            self.graph.clear_edges(self.graph.size() - 1);
        }

        Ok(())
    }

    /// Cheapest joint trajectory through the graph: the total transition
    /// cost and one waypoint per rung.
    pub fn shortest_path(&self) -> Result<(f64, Vec<JointWaypoint>)> {
        let mut search = DijkstraSearch::new(&self.graph);
        let cost = search.run();

        if !cost.is_finite() {
            log::warn!("No valid joint path through {} rungs", self.graph.size());
            return Err(Error::NoPath);
        }

        let path: Vec<JointWaypoint> = search
            .shortest_path()
            .iter()
            .enumerate()
            .map(|(i, &k)| JointWaypoint {
                joints: self.graph.vertex(i, k).to_vec(),
                timing: self.graph.get_rung(i).timing,
            })
            .collect();

        log::info!("Computed path of length {} with cost {:.4}", path.len(), cost);
        Ok((cost, path))
    }

    /// Sample IK for a single waypoint
    fn sample_point(&self, point: &dyn TrajectoryPoint) -> Result<Vec<Vec<f64>>> {
        let poses = point.joint_poses(self.model.as_ref());
        if poses.is_empty() {
            log::error!("IK failed for trajectory point {}", point.id());
            return Err(Error::IkFailed(point.id()));
        }
        Ok(poses)
    }

    /// Sample IK for every waypoint. Any point without a solution aborts.
    fn joint_solutions(&self, points: &[&dyn TrajectoryPoint]) -> Result<Vec<Vec<Vec<f64>>>> {
        points.iter().map(|p| self.sample_point(*p)).collect()
    }

    fn compute_and_assign_edges(&mut self, start_idx: usize, end_idx: usize) {
        let builder = EdgeBuilder {
            model: self.model.as_ref(),
            cost_function: self.cost_function.as_ref(),
        };

        let edges = builder.calculate_edges(
            &self.graph.get_rung(start_idx).joints,
            &self.graph.get_rung(end_idx).joints,
            self.graph.dof(),
            self.graph.get_rung(end_idx).timing,
        );

        self.graph.assign_edges(start_idx, edges);
    }
}
