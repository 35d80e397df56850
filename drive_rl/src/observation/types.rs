use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::actions::VehicleControl;
use crate::sim::{
    CameraFrame, CollisionEvent, GnssReading, ImuReading, LaneInvasion, RadarDetection, Transform,
};

/// Latest readings of every enabled observation category.
///
/// Rebuilt from scratch every tick; nothing is carried over between ticks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// One frame per sensor whose camera observation is enabled, in sensor order.
    pub camera: Vec<CameraFrame>,
    pub collision: Option<CollisionEvent>,
    pub location: Option<Transform>,
    pub lane: Option<LaneInvasion>,
    pub gnss: Option<GnssReading>,
    pub imu: Option<ImuReading>,
    pub radar: Option<Vec<RadarDetection>>,
}

/// The control values last applied to the hero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlInfo {
    pub steer: f32,
    pub throttle: f32,
    pub brake: f32,
    pub reverse: bool,
    pub hand_brake: bool,
}

impl From<&VehicleControl> for ControlInfo {
    fn from(control: &VehicleControl) -> Self {
        Self {
            steer: control.steer,
            throttle: control.throttle,
            brake: control.brake,
            reverse: control.reverse,
            hand_brake: control.hand_brake,
        }
    }
}

/// Auxiliary record returned alongside each observation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepInfo {
    pub episode_id: Option<Uuid>,
    pub control: ControlInfo,
}
