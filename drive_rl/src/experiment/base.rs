use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::actions::{ActionDecoder, DiscreteActionTable, VehicleControl};
use crate::config::ExperimentConfig;
use crate::observation::{ControlInfo, Observation, StepInfo, episode_terminated, post_process_image};
use crate::sim::{ActorId, Location, SimulatorCore, Transform, Vector3D, World};
use crate::spaces::Space;

use super::errors::ExperimentError;

/// Spectator offset behind and above the hero when following it.
const FOLLOW_DISTANCE: f32 = 5.0;
const FOLLOW_HEIGHT: f32 = 3.0;

/// m/s to km/h.
const MS_TO_KMH: f32 = 3.6;

/// A non-hero vehicle and the transform it was first spawned at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackedVehicle {
    pub id: ActorId,
    pub spawn_point: Transform,
}

/// Shared state and behaviour of every driving experiment.
///
/// Holds handles to simulator-owned actors (hero, tracked traffic) but never
/// owns the actors themselves. Concrete experiments embed one of these and
/// implement [`Experiment`](super::Experiment) on top.
#[derive(Debug)]
pub struct BaseExperiment {
    config: ExperimentConfig,
    decoder: ActionDecoder,
    observation: Observation,
    hero: Option<ActorId>,
    spectator: Option<Transform>,
    traffic: Vec<TrackedVehicle>,
    episode_id: Option<Uuid>,
    rng: ChaCha8Rng,
}

impl BaseExperiment {
    pub fn new(config: ExperimentConfig) -> Self {
        let table = DiscreteActionTable::from_kind(config.action_table);
        Self::with_action_table(config, table)
    }

    /// Like [`BaseExperiment::new`] but driving with a custom action table.
    pub fn with_action_table(config: ExperimentConfig, table: DiscreteActionTable) -> Self {
        let rng = match config.respawn_seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            config,
            decoder: ActionDecoder::new(table),
            observation: Observation::default(),
            hero: None,
            spectator: None,
            traffic: Vec::new(),
            episode_id: None,
            rng,
        }
    }

    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    /// Discrete space with one action per row of the active table.
    pub fn action_space(&self) -> Space {
        Space::Discrete(self.decoder.table().len())
    }

    pub fn action_table(&self) -> &DiscreteActionTable {
        self.decoder.table()
    }

    pub fn hero(&self) -> Option<ActorId> {
        self.hero
    }

    pub fn episode_id(&self) -> Option<Uuid> {
        self.episode_id
    }

    pub fn current_control(&self) -> &VehicleControl {
        self.decoder.current()
    }

    pub fn past_control(&self) -> &VehicleControl {
        self.decoder.past()
    }

    pub fn spectator(&self) -> Option<Transform> {
        self.spectator
    }

    pub fn last_observation(&self) -> &Observation {
        &self.observation
    }

    pub fn tracked_vehicles(&self) -> &[TrackedVehicle] {
        &self.traffic
    }

    /// Register a traffic vehicle so it is reset by [`BaseExperiment::respawn_actors`].
    pub fn track_vehicle(&mut self, id: ActorId, spawn_point: Transform) {
        self.traffic.push(TrackedVehicle { id, spawn_point });
    }

    pub fn resolve_spawn_point<W: World>(
        &self,
        world: &W,
        id: usize,
    ) -> Result<Transform, ExperimentError> {
        let points = world.spawn_points()?;
        points
            .get(id)
            .copied()
            .ok_or(ExperimentError::MissingSpawnPoint {
                id,
                available: points.len(),
            })
    }

    /// Start and destination transforms of the configured route.
    pub fn route<W: World>(&self, world: &W) -> Result<(Transform, Transform), ExperimentError> {
        let start = self.resolve_spawn_point(world, self.config.start_pos_spawn_id)?;
        let end = self.resolve_spawn_point(world, self.config.end_pos_spawn_id)?;
        Ok((start, end))
    }

    // ---------------------------------------------------------------------
    // Hero
    // ---------------------------------------------------------------------

    /// Destroy any existing hero and spawn a fresh one at `transform`.
    ///
    /// Returns `Ok(false)` when the simulator refuses the spawn; retry policy
    /// is left to the caller.
    pub fn spawn_hero<W: World>(
        &mut self,
        world: &mut W,
        transform: &Transform,
        autopilot: bool,
    ) -> Result<bool, ExperimentError> {
        self.destroy_hero(world)?;

        let mut blueprint = world.find_blueprint(&self.config.hero_vehicle_model)?;
        blueprint.set_attribute("role_name", "hero");

        self.hero = world.try_spawn_actor(&blueprint, transform)?;
        self.decoder.reset();

        let Some(hero) = self.hero else {
            warn!(
                model = %self.config.hero_vehicle_model,
                x = transform.location.x,
                y = transform.location.y,
                "simulator refused hero spawn"
            );
            self.episode_id = None;
            return Ok(false);
        };

        if autopilot {
            world.set_autopilot(hero, true)?;
        }
        let episode = Uuid::new_v4();
        self.episode_id = Some(episode);
        info!(%hero, %episode, model = %self.config.hero_vehicle_model, "hero spawned");
        Ok(true)
    }

    pub fn destroy_hero<W: World>(&mut self, world: &mut W) -> Result<(), ExperimentError> {
        if let Some(hero) = self.hero.take() {
            world.destroy_actor(hero)?;
            info!(%hero, "hero destroyed");
        }
        Ok(())
    }

    /// Current hero speed in km/h.
    pub fn speed_kmh<W: World>(&self, world: &W) -> Result<f32, ExperimentError> {
        let hero = self.hero.ok_or(ExperimentError::NoHero)?;
        Ok(MS_TO_KMH * world.actor_velocity(hero)?.length())
    }

    /// Put the spectator behind and above the hero, looking where it looks.
    pub fn set_server_view<W: World>(&mut self, world: &mut W) -> Result<Transform, ExperimentError> {
        let hero = self.hero.ok_or(ExperimentError::NoHero)?;
        let transform = world.actor_transform(hero)?;
        let forward = transform.forward_vector();
        let location = transform.location;

        let view = Transform::new(
            Location::new(
                location.x - FOLLOW_DISTANCE * forward.x,
                location.y - FOLLOW_DISTANCE * forward.y,
                location.z + FOLLOW_HEIGHT,
            ),
            transform.rotation,
        );
        world.set_spectator_transform(&view)?;
        self.spectator = Some(view);
        Ok(view)
    }

    /// Overhead spectator above the hero, placed by [`ServerViewConfig`](crate::config::ServerViewConfig).
    pub fn set_top_down_view<W: World>(
        &mut self,
        world: &mut W,
    ) -> Result<Transform, ExperimentError> {
        let hero = self.hero.ok_or(ExperimentError::NoHero)?;
        let location = world.actor_transform(hero)?.location;
        let view_config = &self.config.server_view;

        let mut view = Transform::from_location(Location::new(
            location.x + view_config.x_offset,
            location.y + view_config.y_offset,
            view_config.height,
        ));
        view.rotation.pitch = view_config.pitch;

        world.set_spectator_transform(&view)?;
        self.spectator = Some(view);
        Ok(view)
    }

    // ---------------------------------------------------------------------
    // Traffic
    // ---------------------------------------------------------------------

    /// Spawn up to `n_vehicles` autopiloted vehicles on free map spawn points,
    /// skipping the hero's start point, and track them. Returns how many spawned.
    pub fn spawn_traffic<W: World>(
        &mut self,
        world: &mut W,
        model: &str,
    ) -> Result<usize, ExperimentError> {
        let wanted = self.config.n_vehicles;
        let blueprint = world.find_blueprint(model)?;
        let points = world.spawn_points()?;

        let mut spawned = 0;
        for (index, point) in points.iter().enumerate() {
            if spawned == wanted {
                break;
            }
            if index == self.config.start_pos_spawn_id {
                continue;
            }
            if let Some(id) = world.try_spawn_actor(&blueprint, point)? {
                world.set_autopilot(id, true)?;
                self.track_vehicle(id, *point);
                spawned += 1;
            }
        }

        if spawned < wanted {
            warn!(wanted, spawned, "not enough free spawn points for traffic");
        }
        Ok(spawned)
    }

    /// Stop every tracked vehicle, move it back to its original spawn point
    /// (or to a shuffled map spawn point when `random_respawn` is set) and
    /// hand it back to the autopilot.
    pub fn respawn_actors<W: World>(&mut self, world: &mut W) -> Result<(), ExperimentError> {
        let hero = self.hero;
        if self.traffic.iter().all(|v| Some(v.id) == hero) {
            debug!("no traffic to respawn");
            return Ok(());
        }

        let random = self.config.random_respawn;
        let shuffled = if random {
            let mut points = world.spawn_points()?;
            if points.is_empty() {
                return Err(ExperimentError::NoSpawnPoints);
            }
            points.shuffle(&mut self.rng);
            points
        } else {
            Vec::new()
        };

        let vehicles = self.traffic.iter().filter(|v| Some(v.id) != hero);
        let mut respawned = 0;
        for (i, vehicle) in vehicles.enumerate() {
            world.set_autopilot(vehicle.id, false)?;
            world.set_actor_velocity(vehicle.id, Vector3D::ZERO)?;

            let target = if random {
                shuffled[i % shuffled.len()]
            } else {
                vehicle.spawn_point
            };
            world.set_actor_transform(vehicle.id, &target)?;

            world.set_autopilot(vehicle.id, false)?;
            world.set_autopilot(vehicle.id, true)?;
            respawned += 1;
        }

        info!(respawned, random, "traffic respawned");
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Observations and actions
    // ---------------------------------------------------------------------

    /// Refresh every enabled sensor that needs an explicit update.
    pub fn update_measurements<C: SimulatorCore>(
        &self,
        core: &mut C,
    ) -> Result<(), ExperimentError> {
        self.config.check_camera_observation()?;
        let toggles = &self.config.observation;

        let sensors = self.config.sensor.sensors.len();
        for (sensor, enabled) in toggles.camera_observation.iter().take(sensors).enumerate() {
            if *enabled {
                core.update_camera(sensor)?;
            }
        }
        if toggles.collision_observation {
            core.update_collision()?;
        }
        if toggles.lane_observation {
            core.update_lane_invasion()?;
        }
        Ok(())
    }

    /// Collect every enabled observation category for the current tick.
    pub fn observation<C: SimulatorCore>(
        &mut self,
        core: &C,
    ) -> Result<(Observation, StepInfo), ExperimentError> {
        self.config.check_camera_observation()?;
        let toggles = &self.config.observation;
        let mut observation = Observation::default();

        let sensors = self.config.sensor.sensors.len();
        for (sensor, enabled) in toggles.camera_observation.iter().take(sensors).enumerate() {
            if *enabled {
                observation.camera.push(core.camera_data(sensor)?);
            }
        }
        if toggles.collision_observation {
            observation.collision = core.collision_data();
        }
        if toggles.location_observation {
            let hero = self.hero.ok_or(ExperimentError::NoHero)?;
            observation.location = Some(core.world().actor_transform(hero)?);
        }
        if toggles.lane_observation {
            observation.lane = core.lane_data();
        }
        if toggles.gnss_observation {
            observation.gnss = core.gnss_data();
        }
        if toggles.imu_observation {
            observation.imu = core.imu_data();
        }
        if toggles.radar_observation {
            observation.radar = Some(core.radar_data());
        }

        if self.config.debug {
            debug!(?observation, "observation collected");
        }

        self.observation = observation.clone();
        let info = StepInfo {
            episode_id: self.episode_id,
            control: ControlInfo::from(self.decoder.current()),
        };
        Ok((observation, info))
    }

    /// Apply per-camera grayscale/normalisation settings to the camera frames.
    pub fn process_observation(
        &self,
        mut observation: Observation,
    ) -> Result<Observation, ExperimentError> {
        let sensor_config = &self.config.sensor;
        let enabled_sensors = self
            .config
            .observation
            .camera_observation
            .iter()
            .take(sensor_config.sensors.len())
            .enumerate()
            .filter(|(_, enabled)| **enabled)
            .map(|(sensor, _)| sensor);

        observation.camera = observation
            .camera
            .into_iter()
            .zip(enabled_sensors)
            .map(|(frame, sensor)| {
                let (normalized, grayscale) = sensor_config.camera_processing(sensor);
                post_process_image(frame, normalized, grayscale)
            })
            .collect::<Result<_, _>>()?;
        Ok(observation)
    }

    /// Decode `action` and send it to the hero. `None` releases all inputs.
    pub fn update_actions<W: World>(
        &mut self,
        world: &mut W,
        action: Option<usize>,
    ) -> Result<VehicleControl, ExperimentError> {
        let hero = self.hero.ok_or(ExperimentError::NoHero)?;
        let control = match action {
            Some(index) => self.decoder.decode(index)?,
            None => self.decoder.neutralize(),
        };
        world.apply_control(hero, &control)?;
        Ok(control)
    }

    /// One environment step: advance the world, refresh sensors, drive the hero.
    pub fn experiment_tick<C: SimulatorCore>(
        &mut self,
        core: &mut C,
        action: Option<usize>,
    ) -> Result<u64, ExperimentError> {
        let frame = core.world_mut().tick()?;
        self.update_measurements(core)?;
        let control = self.update_actions(core.world_mut(), action)?;
        debug!(
            frame,
            ?action,
            throttle = control.throttle,
            steer = control.steer,
            brake = control.brake,
            "experiment tick"
        );
        Ok(frame)
    }

    /// Terminal when the last observation saw a collision or lane invasion.
    ///
    /// If `speed_limit_margin_kmh` is configured, exceeding the hero's speed
    /// limit by that margin also terminates.
    pub fn done_status<W: World>(&self, world: &W) -> Result<bool, ExperimentError> {
        if episode_terminated(&self.observation) {
            return Ok(true);
        }
        match self.config.speed_limit_margin_kmh {
            Some(margin) => {
                let hero = self.hero.ok_or(ExperimentError::NoHero)?;
                Ok(self.speed_kmh(world)? > world.speed_limit(hero)? + margin)
            }
            None => Ok(false),
        }
    }
}
