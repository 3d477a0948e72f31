// Core modules for ladder-graph trajectory planning
pub mod edges;
pub mod graph;
pub mod kinematics;
pub mod planner;
pub mod search;
pub mod trajectory;

// Re-export commonly used types
pub use edges::{joint_distance, CostFunction, EdgeBuilder};
pub use graph::{Edge, EdgeList, LadderGraph, Rung};
pub use kinematics::RobotModel;
pub use planner::PlanningGraph;
pub use search::DijkstraSearch;
pub use trajectory::{JointWaypoint, TimingConstraint, TrajectoryPoint};

use uuid::Uuid;

/// Main result type for the planner
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the planner
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("At least 2 trajectory points are required, got {0}")]
    TooFewPoints(usize),

    #[error("IK failed for trajectory point {0}")]
    IkFailed(Uuid),

    #[error("No trajectory point with id {0} in the graph")]
    UnknownId(Uuid),

    #[error("No valid joint path through the graph")]
    NoPath,
}
