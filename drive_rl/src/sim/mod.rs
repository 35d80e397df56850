mod errors;
pub mod mock;
mod traits;
mod types;

pub use errors::SimError;
pub use mock::{MockActor, MockCore, MockWorld};
pub use traits::{SimulatorCore, World};
pub use types::{
    ActorId, Blueprint, CameraFrame, CollisionEvent, GnssReading, ImuReading, LaneInvasion,
    Location, RadarDetection, Rotation, Transform, Vector3D,
};
