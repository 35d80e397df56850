use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A vector in simulator world space (meters, or m/s for velocities).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3D {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3D {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

pub type Location = Vector3D;

/// Euler rotation in degrees, using the simulator's (pitch, yaw, roll) convention.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rotation {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl Rotation {
    pub const fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Unit vector pointing where an actor with this rotation is facing.
    pub fn forward_vector(&self) -> Vector3D {
        let pitch = self.pitch.to_radians();
        let yaw = self.yaw.to_radians();
        Vector3D::new(pitch.cos() * yaw.cos(), pitch.cos() * yaw.sin(), pitch.sin())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Transform {
    pub location: Location,
    pub rotation: Rotation,
}

impl Transform {
    pub const fn new(location: Location, rotation: Rotation) -> Self {
        Self { location, rotation }
    }

    pub const fn from_location(location: Location) -> Self {
        Self {
            location,
            rotation: Rotation::new(0.0, 0.0, 0.0),
        }
    }

    pub fn forward_vector(&self) -> Vector3D {
        self.rotation.forward_vector()
    }
}

/// Opaque handle to an actor living inside the simulator process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActorId(pub u32);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "actor#{}", self.0)
    }
}

/// Actor template looked up from the simulator's blueprint library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blueprint {
    pub id: String,
    attributes: BTreeMap<String, String>,
}

impl Blueprint {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

/// Camera image. Pixels are row-major, interleaved RGB(A) channels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraFrame {
    pub width: u32,
    pub height: u32,
    pub channels: u32,
    pub pixels: Vec<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollisionEvent {
    pub other_actor: Option<ActorId>,
    pub intensity: f32,
}

/// Lane markings crossed since the last lane-invasion refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneInvasion {
    pub crossed_markings: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GnssReading {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImuReading {
    pub accelerometer: Vector3D,
    pub gyroscope: Vector3D,
    pub compass: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadarDetection {
    pub altitude: f32,
    pub azimuth: f32,
    pub depth: f32,
    pub velocity: f32,
}
