// Edge construction between adjacent rungs.
//
// For every (source, destination) candidate pair the builder consults the
// robot's move-validity check when the destination rung carries a timing
// constraint, then scores the surviving transitions with either the
// registered cost function or the default L1 joint distance. Destinations
// are emitted in increasing index order, which keeps the search results
// deterministic.

use crate::graph::{Edge, EdgeList};
use crate::kinematics::RobotModel;
use crate::trajectory::TimingConstraint;

/// User-definable transition cost over two joint configurations. Must
/// return a non-negative value; negative costs break the shortest-path
/// search.
pub type CostFunction = Box<dyn Fn(&[f64], &[f64]) -> f64>;

/// Default transition cost: L1 distance in joint space
pub fn joint_distance(from: &[f64], to: &[f64]) -> f64 {
    from.iter().zip(to).map(|(a, b)| (a - b).abs()).sum()
}

/// Scores the transitions between two adjacent rungs
pub struct EdgeBuilder<'a> {
    pub model: &'a dyn RobotModel,
    pub cost_function: Option<&'a CostFunction>,
}

impl EdgeBuilder<'_> {
    /// Build one edge list per source candidate.
    ///
    /// `from` and `to` are the flat joint buffers of the source and
    /// destination rungs; `timing` is the destination rung's constraint.
    /// Sources whose every transition is rejected get an empty list. Empty
    /// buffers on either side produce a correspondingly empty table.
    pub fn calculate_edges(
        &self,
        from: &[f64],
        to: &[f64],
        dof: usize,
        timing: TimingConstraint,
    ) -> Vec<EdgeList> {
        let n_to = to.len() / dof;
        let mut edges = Vec::with_capacity(from.len() / dof);

        for i in (0..from.len()).step_by(dof) {
            let start = &from[i..i + dof];
            let mut list = EdgeList::with_capacity(n_to);

            for (idx, j) in (0..to.len()).step_by(dof).enumerate() {
                let end = &to[j..j + dof];

                if let Some(upper) = timing.upper() {
                    if !self.model.is_valid_move(start, end, upper) {
                        continue;
                    }
                }

                let cost = match self.cost_function {
                    Some(f) => f(start, end),
                    None => joint_distance(start, end),
                };

                list.push(Edge {
                    cost,
                    idx: idx as u32,
                });
            }

            edges.push(list);
        }

        edges
    }
}
