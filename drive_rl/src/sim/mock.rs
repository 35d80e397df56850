// In-process stand-in for the driving simulator, used by tests and demos.
use std::collections::BTreeMap;

use crate::actions::VehicleControl;

use super::errors::SimError;
use super::traits::{SimulatorCore, World};
use super::types::{
    ActorId, Blueprint, CameraFrame, CollisionEvent, GnssReading, ImuReading, LaneInvasion,
    RadarDetection, Transform, Vector3D,
};

#[derive(Debug, Clone)]
pub struct MockActor {
    pub blueprint: Blueprint,
    pub transform: Transform,
    pub velocity: Vector3D,
    pub autopilot: bool,
    pub control: VehicleControl,
    pub speed_limit: f32,
}

#[derive(Debug, Clone)]
pub struct MockWorld {
    pub frame: u64,
    pub spawn_points: Vec<Transform>,
    pub blueprints: Vec<String>,
    pub actors: BTreeMap<ActorId, MockActor>,
    pub spectator: Option<Transform>,
    /// When set, every spawn request is refused.
    pub reject_spawns: bool,
    /// Every `set_autopilot` call, in order.
    pub autopilot_log: Vec<(ActorId, bool)>,
    pub destroyed: Vec<ActorId>,
    next_id: u32,
}

impl MockWorld {
    pub fn new(spawn_points: Vec<Transform>) -> Self {
        Self {
            frame: 0,
            spawn_points,
            blueprints: vec!["vehicle.lincoln.mkz2017".to_string()],
            actors: BTreeMap::new(),
            spectator: None,
            reject_spawns: false,
            autopilot_log: Vec::new(),
            destroyed: Vec::new(),
            next_id: 1,
        }
    }

    /// A straight road of `n` spawn points spaced 10 m apart along x.
    pub fn with_grid(n: usize) -> Self {
        let points = (0..n)
            .map(|i| Transform::from_location(Vector3D::new(i as f32 * 10.0, 0.0, 0.5)))
            .collect();
        Self::new(points)
    }

    pub fn actor(&self, id: ActorId) -> Option<&MockActor> {
        self.actors.get(&id)
    }

    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut MockActor> {
        self.actors.get_mut(&id)
    }

    fn occupied(&self, transform: &Transform) -> bool {
        self.actors
            .values()
            .any(|a| a.transform.location == transform.location)
    }

    fn get(&self, id: ActorId) -> Result<&MockActor, SimError> {
        self.actors.get(&id).ok_or(SimError::UnknownActor(id))
    }

    fn get_mut(&mut self, id: ActorId) -> Result<&mut MockActor, SimError> {
        self.actors.get_mut(&id).ok_or(SimError::UnknownActor(id))
    }
}

impl World for MockWorld {
    fn tick(&mut self) -> Result<u64, SimError> {
        self.frame += 1;
        Ok(self.frame)
    }

    fn frame(&self) -> u64 {
        self.frame
    }

    fn spawn_points(&self) -> Result<Vec<Transform>, SimError> {
        Ok(self.spawn_points.clone())
    }

    fn find_blueprint(&self, id: &str) -> Result<Blueprint, SimError> {
        if self.blueprints.iter().any(|b| b == id) {
            Ok(Blueprint::new(id))
        } else {
            Err(SimError::BlueprintNotFound(id.to_string()))
        }
    }

    fn try_spawn_actor(
        &mut self,
        blueprint: &Blueprint,
        transform: &Transform,
    ) -> Result<Option<ActorId>, SimError> {
        if self.reject_spawns || self.occupied(transform) {
            return Ok(None);
        }
        let id = ActorId(self.next_id);
        self.next_id += 1;
        self.actors.insert(
            id,
            MockActor {
                blueprint: blueprint.clone(),
                transform: *transform,
                velocity: Vector3D::ZERO,
                autopilot: false,
                control: VehicleControl::NEUTRAL,
                speed_limit: 30.0,
            },
        );
        Ok(Some(id))
    }

    fn destroy_actor(&mut self, id: ActorId) -> Result<(), SimError> {
        self.actors.remove(&id).ok_or(SimError::UnknownActor(id))?;
        self.destroyed.push(id);
        Ok(())
    }

    fn actor_transform(&self, id: ActorId) -> Result<Transform, SimError> {
        Ok(self.get(id)?.transform)
    }

    fn actor_velocity(&self, id: ActorId) -> Result<Vector3D, SimError> {
        Ok(self.get(id)?.velocity)
    }

    fn set_actor_transform(&mut self, id: ActorId, transform: &Transform) -> Result<(), SimError> {
        self.get_mut(id)?.transform = *transform;
        Ok(())
    }

    fn set_actor_velocity(&mut self, id: ActorId, velocity: Vector3D) -> Result<(), SimError> {
        self.get_mut(id)?.velocity = velocity;
        Ok(())
    }

    fn set_autopilot(&mut self, id: ActorId, enabled: bool) -> Result<(), SimError> {
        self.get_mut(id)?.autopilot = enabled;
        self.autopilot_log.push((id, enabled));
        Ok(())
    }

    fn apply_control(&mut self, id: ActorId, control: &VehicleControl) -> Result<(), SimError> {
        self.get_mut(id)?.control = *control;
        Ok(())
    }

    fn speed_limit(&self, id: ActorId) -> Result<f32, SimError> {
        Ok(self.get(id)?.speed_limit)
    }

    fn set_spectator_transform(&mut self, transform: &Transform) -> Result<(), SimError> {
        self.spectator = Some(*transform);
        Ok(())
    }
}

/// Mock sensor rig. Tests poke the public fields to stage readings.
#[derive(Debug, Clone)]
pub struct MockCore {
    pub world: MockWorld,
    pub camera_frames: Vec<CameraFrame>,
    pub collision: Option<CollisionEvent>,
    pub lane: Option<LaneInvasion>,
    pub gnss: Option<GnssReading>,
    pub imu: Option<ImuReading>,
    pub radar: Vec<RadarDetection>,
    pub camera_updates: Vec<usize>,
    pub collision_updates: usize,
    pub lane_updates: usize,
}

impl MockCore {
    pub fn new(world: MockWorld) -> Self {
        Self {
            world,
            camera_frames: Vec::new(),
            collision: None,
            lane: None,
            gnss: None,
            imu: None,
            radar: Vec::new(),
            camera_updates: Vec::new(),
            collision_updates: 0,
            lane_updates: 0,
        }
    }
}

impl SimulatorCore for MockCore {
    type World = MockWorld;

    fn world(&self) -> &MockWorld {
        &self.world
    }

    fn world_mut(&mut self) -> &mut MockWorld {
        &mut self.world
    }

    fn update_camera(&mut self, sensor: usize) -> Result<(), SimError> {
        self.camera_updates.push(sensor);
        Ok(())
    }

    fn update_collision(&mut self) -> Result<(), SimError> {
        self.collision_updates += 1;
        Ok(())
    }

    fn update_lane_invasion(&mut self) -> Result<(), SimError> {
        self.lane_updates += 1;
        Ok(())
    }

    fn camera_data(&self, sensor: usize) -> Result<CameraFrame, SimError> {
        self.camera_frames
            .get(sensor)
            .cloned()
            .ok_or(SimError::SensorUnavailable(sensor))
    }

    fn collision_data(&self) -> Option<CollisionEvent> {
        self.collision.clone()
    }

    fn lane_data(&self) -> Option<LaneInvasion> {
        self.lane.clone()
    }

    fn gnss_data(&self) -> Option<GnssReading> {
        self.gnss
    }

    fn imu_data(&self) -> Option<ImuReading> {
        self.imu
    }

    fn radar_data(&self) -> Vec<RadarDetection> {
        self.radar.clone()
    }
}
