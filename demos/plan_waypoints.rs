// Example: Plan a joint trajectory across a short waypoint sweep

use ladder_planner::*;
use std::sync::Arc;
use uuid::Uuid;

/// Two-joint robot with a flat per-joint velocity limit
struct DemoRobot {
    max_joint_speed: f64,
}

impl RobotModel for DemoRobot {
    fn dof(&self) -> usize {
        2
    }

    fn is_valid_move(&self, from: &[f64], to: &[f64], dt: f64) -> bool {
        from.iter()
            .zip(to)
            .all(|(a, b)| (a - b).abs() <= self.max_joint_speed * dt)
    }
}

/// Waypoint along the sweep. Each one admits an "elbow up" and an
/// "elbow down" joint configuration.
struct SweepPoint {
    id: Uuid,
    angle: f64,
    timing: TimingConstraint,
}

impl SweepPoint {
    fn new(angle: f64, timing: TimingConstraint) -> Self {
        Self {
            id: Uuid::new_v4(),
            angle,
            timing,
        }
    }
}

impl TrajectoryPoint for SweepPoint {
    fn id(&self) -> Uuid {
        self.id
    }

    fn timing(&self) -> TimingConstraint {
        self.timing
    }

    fn joint_poses(&self, _model: &dyn RobotModel) -> Vec<Vec<f64>> {
        vec![
            vec![self.angle, -self.angle / 2.0],
            vec![self.angle + 0.8, self.angle / 2.0],
        ]
    }
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Ladder Planner - Waypoint Sweep Demo");
    log::info!("====================================\n");

    let robot = Arc::new(DemoRobot {
        max_joint_speed: 1.5,
    });

    // Step 1: Sample a short sweep, 0.5 s allotted per segment
    log::info!("Step 1: Building waypoint sweep");
    let points: Vec<SweepPoint> = (0..6)
        .map(|i| SweepPoint::new(i as f64 * 0.3, TimingConstraint::new(0.5)))
        .collect();
    log::info!("  Waypoints: {}", points.len());

    // Step 2: Bulk-build the ladder graph
    log::info!("Step 2: Building ladder graph");
    let mut planner = PlanningGraph::new(robot);
    let refs: Vec<&dyn TrajectoryPoint> =
        points.iter().map(|p| p as &dyn TrajectoryPoint).collect();
    planner.insert_graph(&refs)?;
    log::info!(
        "  Graph: {} rungs, {} vertices",
        planner.graph().size(),
        planner.graph().num_vertices()
    );

    // Step 3: Nudge one waypoint and let the planner rewire its boundaries
    log::info!("Step 3: Modifying waypoint 3 in place");
    let moved = SweepPoint {
        id: points[3].id,
        angle: points[3].angle + 0.1,
        timing: points[3].timing,
    };
    planner.modify_trajectory(&moved)?;

    // Step 4: Extract the cheapest joint trajectory
    log::info!("Step 4: Searching for the cheapest joint path");
    let (cost, path) = planner.shortest_path()?;
    log::info!("  Total joint motion cost: {:.4}\n", cost);

    println!("{}", serde_json::to_string_pretty(&path).unwrap());

    log::info!("✓ Planning complete!");
    log::info!("  Waypoints: {}", path.len());
    log::info!("  Cost: {:.4}", cost);

    Ok(())
}
