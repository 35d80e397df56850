use serde::{Deserialize, Serialize};

/// Control signal applied to a vehicle actor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleControl {
    pub throttle: f32,
    pub steer: f32,
    pub brake: f32,
    pub hand_brake: bool,
    pub reverse: bool,
    pub manual_gear_shift: bool,
    pub gear: i32,
}

impl Default for VehicleControl {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl VehicleControl {
    /// No input: zero pedals, wheel centred, no brakes.
    pub const NEUTRAL: Self = Self {
        throttle: 0.0,
        steer: 0.0,
        brake: 0.0,
        hand_brake: false,
        reverse: false,
        manual_gear_shift: false,
        gear: 0,
    };
}

/// One row of a discrete action table.
///
/// `throttle` and `steer` are increments applied on top of the previously
/// applied control; `brake`, `reverse` and `hand_brake` are absolute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActionDelta {
    pub throttle: f32,
    pub steer: f32,
    pub brake: f32,
    pub reverse: bool,
    pub hand_brake: bool,
}

impl ActionDelta {
    pub const fn new(throttle: f32, steer: f32, brake: f32) -> Self {
        Self {
            throttle,
            steer,
            brake,
            reverse: false,
            hand_brake: false,
        }
    }
}

/// Which built-in action table an experiment drives with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionTableKind {
    Small,
    #[default]
    Smaller,
}

/// Brake, straight, then seven accelerate-and-steer rows and four coast-and-steer rows.
pub const DISCRETE_ACTIONS_SMALL: [ActionDelta; 14] = [
    ActionDelta::new(0.0, 0.00, 1.0),   // brake
    ActionDelta::new(1.0, 0.00, 0.0),   // straight
    ActionDelta::new(1.0, -0.70, 0.0),  // right + accelerate
    ActionDelta::new(1.0, -0.50, 0.0),  // right + accelerate
    ActionDelta::new(1.0, -0.30, 0.0),  // right + accelerate
    ActionDelta::new(1.0, -0.10, 0.0),  // right + accelerate
    ActionDelta::new(1.0, 0.10, 0.0),   // left + accelerate
    ActionDelta::new(1.0, 0.30, 0.0),   // left + accelerate
    ActionDelta::new(1.0, 0.50, 0.0),   // left + accelerate
    ActionDelta::new(1.0, 0.70, 0.0),   // left + accelerate
    ActionDelta::new(0.0, -0.70, 0.0),  // left + stop
    ActionDelta::new(0.0, -0.23, 0.0),  // left + stop
    ActionDelta::new(0.0, 0.23, 0.0),   // right + stop
    ActionDelta::new(0.0, 0.70, 0.0),   // right + stop
];

/// Small incremental steps; the default table.
pub const DISCRETE_ACTIONS_SMALLER: [ActionDelta; 10] = [
    ActionDelta::new(0.0, 0.00, 0.0),   // coast
    ActionDelta::new(0.0, -0.10, 0.0),  // turn left
    ActionDelta::new(0.0, 0.10, 0.0),   // turn right
    ActionDelta::new(0.1, 0.00, 0.0),   // accelerate
    ActionDelta::new(-0.2, 0.00, 0.0),  // decelerate
    ActionDelta::new(0.0, 0.00, 1.0),   // brake
    ActionDelta::new(0.1, 0.10, 0.0),   // turn right + accelerate
    ActionDelta::new(0.1, -0.10, 0.0),  // turn left + accelerate
    ActionDelta::new(-0.2, 0.10, 0.0),  // turn right + decelerate
    ActionDelta::new(-0.2, -0.10, 0.0), // turn left + decelerate
];
