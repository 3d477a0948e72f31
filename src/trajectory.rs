use crate::kinematics::RobotModel;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Upper bound on the time allotted to arrive at a waypoint from its
/// predecessor. An unspecified constraint accepts any transition.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TimingConstraint {
    upper: Option<f64>,
}

impl TimingConstraint {
    /// Allot at most `upper` seconds for the move
    pub fn new(upper: f64) -> Self {
        Self { upper: Some(upper) }
    }

    /// No bound on the duration of the move
    pub fn unspecified() -> Self {
        Self { upper: None }
    }

    pub fn is_specified(&self) -> bool {
        self.upper.is_some()
    }

    /// The upper time bound, if one was given
    pub fn upper(&self) -> Option<f64> {
        self.upper
    }
}

/// A Cartesian waypoint the planner can sample joint solutions for.
///
/// The concrete geometric content is opaque to the planner; it only needs
/// the point's identity, its timing constraint, and its joint-space
/// candidates under a given robot model.
pub trait TrajectoryPoint {
    /// Unique identifier of this waypoint. `Uuid::nil()` is reserved as the
    /// begin/end sentinel of `PlanningGraph::add_trajectory` and must not
    /// be used as a point id.
    fn id(&self) -> Uuid;

    /// Time allotted to reach this waypoint from the previous one
    fn timing(&self) -> TimingConstraint;

    /// All candidate joint configurations realizing this waypoint, each of
    /// length `model.dof()`. An empty result means IK failure.
    fn joint_poses(&self, model: &dyn RobotModel) -> Vec<Vec<f64>>;
}

/// One waypoint of a planned joint-space trajectory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointWaypoint {
    pub joints: Vec<f64>,
    pub timing: TimingConstraint,
}
