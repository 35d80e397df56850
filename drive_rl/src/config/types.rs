use serde::{Deserialize, Serialize};

use crate::actions::ActionTableKind;
use crate::sim::{Location, Rotation, Transform};

/// Sensors that can be mounted on the hero, with stable integer ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SensorKind {
    CameraRgb = 0,
    CameraDepthRaw = 1,
    CameraDepthGray = 2,
    CameraDepthLog = 3,
    CameraSemanticRaw = 4,
    CameraSemanticCityscape = 5,
    Lidar = 6,
    CameraDynamicVision = 7,
    CameraDistorted = 8,
}

impl SensorKind {
    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn is_camera(self) -> bool {
        !matches!(self, SensorKind::Lidar)
    }
}

/// How a sensor is attached to its parent actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Attachment {
    Rigid,
    SpringArm,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorMount {
    pub transform: Transform,
    pub attachment: Attachment,
}

/// Named sensor placements relative to the hero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SensorTransform {
    TransformA = 0,
    TransformB = 1,
    TransformC = 2,
    TransformD = 3,
    TransformE = 4,
}

impl SensorTransform {
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Resolve the placement. `bound_y` is the half-width of the hero's
    /// bounding box and only matters for the side-mounted `TransformE`.
    pub fn mount(self, bound_y: f32) -> SensorMount {
        let (location, rotation, attachment) = match self {
            SensorTransform::TransformA => (
                Location::new(-5.5, 0.0, 2.5),
                Rotation::new(8.0, 0.0, 0.0),
                Attachment::SpringArm,
            ),
            SensorTransform::TransformB => (
                Location::new(1.6, 0.0, 1.7),
                Rotation::default(),
                Attachment::Rigid,
            ),
            SensorTransform::TransformC => (
                Location::new(5.5, 1.5, 1.5),
                Rotation::default(),
                Attachment::SpringArm,
            ),
            SensorTransform::TransformD => (
                Location::new(-8.0, 0.0, 6.0),
                Rotation::new(6.0, 0.0, 0.0),
                Attachment::SpringArm,
            ),
            SensorTransform::TransformE => (
                Location::new(-1.0, -bound_y, 0.5),
                Rotation::default(),
                Attachment::Rigid,
            ),
        };
        SensorMount {
            transform: Transform::new(location, rotation),
            attachment,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QualityLevel {
    #[default]
    Low,
    Epic,
}

/// The simulator's built-in weather presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WeatherPreset {
    #[default]
    ClearNoon,
    CloudyNoon,
    WetNoon,
    WetCloudyNoon,
    MidRainyNoon,
    HardRainNoon,
    SoftRainNoon,
    ClearSunset,
    CloudySunset,
    WetSunset,
    WetCloudySunset,
    MidRainSunset,
    HardRainSunset,
    SoftRainSunset,
}

/// Overhead spectator placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerViewConfig {
    pub x_offset: f32,
    pub y_offset: f32,
    pub height: f32,
    pub pitch: f32,
}

impl Default for ServerViewConfig {
    fn default() -> Self {
        Self {
            x_offset: 0.0,
            y_offset: 0.0,
            height: 200.0,
            pitch: -90.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    pub sensors: Vec<SensorKind>,
    pub sensor_transforms: Vec<SensorTransform>,
    pub camera_x: u32,
    pub camera_y: u32,
    pub camera_fov: f32,
    pub camera_normalized: Vec<bool>,
    pub camera_grayscale: Vec<bool>,
    pub framestack: usize,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            sensors: vec![SensorKind::CameraDepthRaw],
            sensor_transforms: vec![SensorTransform::TransformA],
            camera_x: 84,
            camera_y: 84,
            camera_fov: 60.0,
            camera_normalized: vec![true],
            camera_grayscale: vec![true],
            framestack: 1,
        }
    }
}

impl SensorConfig {
    /// Post-processing flags for camera `index`, falling back to the first entry.
    pub fn camera_processing(&self, index: usize) -> (bool, bool) {
        let pick = |flags: &[bool]| flags.get(index).or(flags.first()).copied().unwrap_or(false);
        (
            pick(self.camera_normalized.as_slice()),
            pick(self.camera_grayscale.as_slice()),
        )
    }
}

/// Which observation categories are collected every tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservationConfig {
    /// One toggle per configured sensor.
    pub camera_observation: Vec<bool>,
    pub collision_observation: bool,
    pub location_observation: bool,
    pub radar_observation: bool,
    pub imu_observation: bool,
    pub lane_observation: bool,
    pub gnss_observation: bool,
}

impl Default for ObservationConfig {
    fn default() -> Self {
        Self {
            camera_observation: vec![false],
            collision_observation: true,
            location_observation: true,
            radar_observation: false,
            imu_observation: false,
            lane_observation: true,
            gnss_observation: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub observation: ObservationConfig,
    pub server_view: ServerViewConfig,
    pub sensor: SensorConfig,
    pub server_map: String,
    pub quality_level: QualityLevel,
    /// Without rendering no camera images are produced.
    pub disable_rendering_mode: bool,
    pub n_vehicles: usize,
    pub n_walkers: usize,
    pub start_pos_spawn_id: usize,
    pub end_pos_spawn_id: usize,
    pub hero_vehicle_model: String,
    pub weather: WeatherPreset,
    /// Respawn traffic at shuffled map spawn points instead of their original ones.
    pub random_respawn: bool,
    pub discrete_action: bool,
    pub debug: bool,
    pub action_table: ActionTableKind,
    /// Seed for the respawn shuffle; `None` seeds from OS entropy.
    pub respawn_seed: Option<u64>,
    /// Terminate when the hero exceeds its speed limit by this many km/h.
    /// Disabled unless set.
    pub speed_limit_margin_kmh: Option<f32>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            observation: ObservationConfig::default(),
            server_view: ServerViewConfig::default(),
            sensor: SensorConfig::default(),
            server_map: "Town02".to_string(),
            quality_level: QualityLevel::Low,
            disable_rendering_mode: false,
            n_vehicles: 0,
            n_walkers: 0,
            start_pos_spawn_id: 100,
            end_pos_spawn_id: 45,
            hero_vehicle_model: "vehicle.lincoln.mkz2017".to_string(),
            weather: WeatherPreset::ClearNoon,
            random_respawn: false,
            discrete_action: true,
            debug: false,
            action_table: ActionTableKind::Smaller,
            respawn_seed: None,
            speed_limit_margin_kmh: None,
        }
    }
}
