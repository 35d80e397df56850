mod errors;
mod types;

use std::fs;
use std::path::Path;

pub use errors::ConfigError;
pub use types::{
    Attachment, ExperimentConfig, ObservationConfig, QualityLevel, SensorConfig, SensorKind,
    SensorMount, SensorTransform, ServerViewConfig, WeatherPreset,
};

impl ExperimentConfig {
    /// Parse a JSON document. Missing keys take their default values.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Every sensor needs a matching camera-observation toggle. A config
    /// without sensors has nothing to match and always passes.
    pub fn check_camera_observation(&self) -> Result<(), ConfigError> {
        let sensors = self.sensor.sensors.len();
        let toggles = self.observation.camera_observation.len();
        if sensors > 0 && sensors != toggles {
            return Err(ConfigError::CameraObservationMismatch { sensors, toggles });
        }
        Ok(())
    }

    /// Eagerly check every list-length invariant of the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.check_camera_observation()?;
        let sensors = self.sensor.sensors.len();
        if sensors == 0 {
            return Ok(());
        }
        let transforms = self.sensor.sensor_transforms.len();
        if sensors != transforms {
            return Err(ConfigError::SensorTransformMismatch {
                sensors,
                transforms,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::ActionTableKind;

    #[test]
    fn defaults_match_base_experiment() {
        let config = ExperimentConfig::default();
        assert_eq!(config.server_map, "Town02");
        assert_eq!(config.start_pos_spawn_id, 100);
        assert_eq!(config.end_pos_spawn_id, 45);
        assert_eq!(config.sensor.sensors, vec![SensorKind::CameraDepthRaw]);
        assert_eq!(config.observation.camera_observation, vec![false]);
        assert!(config.observation.collision_observation);
        assert!(config.observation.lane_observation);
        assert!(!config.observation.gnss_observation);
        assert!(config.discrete_action);
        assert!(!config.random_respawn);
        assert_eq!(config.action_table, ActionTableKind::Smaller);
        assert_eq!(config.speed_limit_margin_kmh, None);
        config.validate().unwrap();
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config = ExperimentConfig::from_json_str(
            r#"{
                "server_map": "Town05",
                "random_respawn": true,
                "weather": "HardRainSunset",
                "action_table": "SMALL",
                "sensor": { "sensors": ["CAMERA_RGB", "LIDAR"], "camera_x": 128 },
                "observation": { "camera_observation": [true, false] }
            }"#,
        )
        .unwrap();

        assert_eq!(config.server_map, "Town05");
        assert!(config.random_respawn);
        assert_eq!(config.weather, WeatherPreset::HardRainSunset);
        assert_eq!(config.action_table, ActionTableKind::Small);
        assert_eq!(config.sensor.camera_x, 128);
        assert_eq!(config.sensor.camera_y, 84);
        assert_eq!(
            config.sensor.sensors,
            vec![SensorKind::CameraRgb, SensorKind::Lidar]
        );
        assert_eq!(config.hero_vehicle_model, "vehicle.lincoln.mkz2017");
    }

    #[test]
    fn json_round_trip_preserves_config() {
        let mut config = ExperimentConfig::default();
        config.respawn_seed = Some(7);
        let json = config.to_json_string().unwrap();
        assert_eq!(ExperimentConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            ExperimentConfig::from_json_str("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            ExperimentConfig::from_path("/nonexistent/experiment.json"),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn validate_reports_mismatched_lists() {
        let mut config = ExperimentConfig::default();
        config.sensor.sensors.push(SensorKind::CameraRgb);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::CameraObservationMismatch {
                sensors: 2,
                toggles: 1
            })
        ));

        config.observation.camera_observation.push(true);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SensorTransformMismatch {
                sensors: 2,
                transforms: 1
            })
        ));
    }

    #[test]
    fn sensorless_config_keeps_default_toggles() {
        let mut config = ExperimentConfig::default();
        config.sensor.sensors.clear();
        assert_eq!(config.observation.camera_observation, vec![false]);
        assert_eq!(config.sensor.sensor_transforms.len(), 1);
        config.check_camera_observation().unwrap();
        config.validate().unwrap();
    }

    #[test]
    fn side_mount_uses_vehicle_half_width() {
        let mount = SensorTransform::TransformE.mount(1.2);
        assert_eq!(mount.attachment, Attachment::Rigid);
        assert_eq!(mount.transform.location.y, -1.2);
        assert_eq!(SensorTransform::TransformA.mount(1.2).attachment, Attachment::SpringArm);
        assert_eq!(SensorKind::CameraDistorted.id(), 8);
        assert!(!SensorKind::Lidar.is_camera());
    }
}
