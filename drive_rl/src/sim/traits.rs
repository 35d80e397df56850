use crate::actions::VehicleControl;

use super::errors::SimError;
use super::types::{
    ActorId, Blueprint, CameraFrame, CollisionEvent, GnssReading, ImuReading, LaneInvasion,
    RadarDetection, Transform, Vector3D,
};

/// World handle exposed by the driving simulator.
///
/// Every call is a synchronous round-trip into the simulator process. Actors
/// are referred to by [`ActorId`]; their lifetime is owned by the simulator.
pub trait World {
    /// Advance the simulation by one step. Returns the new frame number.
    fn tick(&mut self) -> Result<u64, SimError>;

    /// Frame number of the last completed tick.
    fn frame(&self) -> u64;

    /// Recommended spawn points of the loaded map, in map order.
    fn spawn_points(&self) -> Result<Vec<Transform>, SimError>;

    fn find_blueprint(&self, id: &str) -> Result<Blueprint, SimError>;

    /// Spawn an actor. `Ok(None)` means the simulator refused the spawn
    /// (e.g. the location is occupied).
    fn try_spawn_actor(
        &mut self,
        blueprint: &Blueprint,
        transform: &Transform,
    ) -> Result<Option<ActorId>, SimError>;

    fn destroy_actor(&mut self, id: ActorId) -> Result<(), SimError>;

    fn actor_transform(&self, id: ActorId) -> Result<Transform, SimError>;
    fn actor_velocity(&self, id: ActorId) -> Result<Vector3D, SimError>;
    fn set_actor_transform(&mut self, id: ActorId, transform: &Transform) -> Result<(), SimError>;
    fn set_actor_velocity(&mut self, id: ActorId, velocity: Vector3D) -> Result<(), SimError>;

    fn set_autopilot(&mut self, id: ActorId, enabled: bool) -> Result<(), SimError>;
    fn apply_control(&mut self, id: ActorId, control: &VehicleControl) -> Result<(), SimError>;

    /// Speed limit (km/h) currently applying to the actor.
    fn speed_limit(&self, id: ActorId) -> Result<f32, SimError>;

    fn set_spectator_transform(&mut self, transform: &Transform) -> Result<(), SimError>;
}

/// The simulator "core": owns the world plus the sensor rig attached to the hero.
///
/// `update_*` refresh the cached reading of a sensor; the `*_data` accessors
/// return whatever was cached by the last refresh.
pub trait SimulatorCore {
    type World: World;

    fn world(&self) -> &Self::World;
    fn world_mut(&mut self) -> &mut Self::World;

    fn update_camera(&mut self, sensor: usize) -> Result<(), SimError>;
    fn update_collision(&mut self) -> Result<(), SimError>;
    fn update_lane_invasion(&mut self) -> Result<(), SimError>;

    fn camera_data(&self, sensor: usize) -> Result<CameraFrame, SimError>;
    fn collision_data(&self) -> Option<CollisionEvent>;
    fn lane_data(&self) -> Option<LaneInvasion>;
    fn gnss_data(&self) -> Option<GnssReading>;
    fn imu_data(&self) -> Option<ImuReading>;
    fn radar_data(&self) -> Vec<RadarDetection>;
}
