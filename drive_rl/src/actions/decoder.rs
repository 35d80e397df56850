use tracing::debug;

use super::errors::ActionError;
use super::types::{
    ActionDelta, ActionTableKind, DISCRETE_ACTIONS_SMALL, DISCRETE_ACTIONS_SMALLER, VehicleControl,
};

/// Steering is never commanded past this magnitude.
pub const STEER_LIMIT: f32 = 0.7;

/// Contiguous `0..n` mapping from action index to [`ActionDelta`].
#[derive(Debug, Clone, PartialEq)]
pub struct DiscreteActionTable {
    rows: Vec<ActionDelta>,
}

impl DiscreteActionTable {
    pub fn new(rows: Vec<ActionDelta>) -> Result<Self, ActionError> {
        if rows.is_empty() {
            return Err(ActionError::EmptyTable);
        }
        Ok(Self { rows })
    }

    pub fn from_kind(kind: ActionTableKind) -> Self {
        let rows = match kind {
            ActionTableKind::Small => DISCRETE_ACTIONS_SMALL.to_vec(),
            ActionTableKind::Smaller => DISCRETE_ACTIONS_SMALLER.to_vec(),
        };
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&ActionDelta, ActionError> {
        self.rows.get(index).ok_or(ActionError::UnknownAction {
            index,
            size: self.rows.len(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActionDelta> {
        self.rows.iter()
    }
}

impl Default for DiscreteActionTable {
    fn default() -> Self {
        Self::from_kind(ActionTableKind::default())
    }
}

/// Apply one table row on top of the previously applied control.
pub fn apply_delta(past: &VehicleControl, delta: &ActionDelta) -> VehicleControl {
    let brake = delta.brake.clamp(0.0, 1.0);
    let throttle = if delta.brake != 0.0 {
        0.0
    } else {
        (past.throttle + delta.throttle).clamp(0.0, 1.0)
    };
    let steer = (past.steer + delta.steer).clamp(-STEER_LIMIT, STEER_LIMIT);

    VehicleControl {
        throttle,
        steer,
        brake,
        hand_brake: delta.hand_brake,
        reverse: delta.reverse,
        ..VehicleControl::NEUTRAL
    }
}

/// Turns discrete action indices into incremental vehicle controls.
///
/// Keeps the currently applied control and the control the next delta is
/// applied to ("past action").
#[derive(Debug, Clone)]
pub struct ActionDecoder {
    table: DiscreteActionTable,
    current: VehicleControl,
    past: VehicleControl,
}

impl ActionDecoder {
    pub fn new(table: DiscreteActionTable) -> Self {
        Self {
            table,
            current: VehicleControl::NEUTRAL,
            past: VehicleControl::NEUTRAL,
        }
    }

    pub fn table(&self) -> &DiscreteActionTable {
        &self.table
    }

    pub fn current(&self) -> &VehicleControl {
        &self.current
    }

    pub fn past(&self) -> &VehicleControl {
        &self.past
    }

    pub fn decode(&mut self, index: usize) -> Result<VehicleControl, ActionError> {
        let delta = self.table.get(index)?;
        let control = apply_delta(&self.past, delta);
        debug!(
            index,
            throttle = control.throttle,
            steer = control.steer,
            brake = control.brake,
            "decoded action"
        );
        self.current = control;
        self.past = control;
        Ok(control)
    }

    /// Release all inputs. The past action is kept, so the next decoded
    /// delta still builds on the last decoded control.
    pub fn neutralize(&mut self) -> VehicleControl {
        self.current = VehicleControl::NEUTRAL;
        self.current
    }

    pub fn reset(&mut self) {
        self.current = VehicleControl::NEUTRAL;
        self.past = VehicleControl::NEUTRAL;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    fn assert_close(a: f32, b: f32, what: &str) {
        assert!((a - b).abs() < EPSILON, "{what}: expected {b}, got {a}");
    }

    #[test]
    fn default_table_has_ten_rows() {
        assert_eq!(DiscreteActionTable::default().len(), 10);
        assert_eq!(DiscreteActionTable::from_kind(ActionTableKind::Small).len(), 14);
    }

    #[test]
    fn empty_table_is_rejected() {
        assert_eq!(DiscreteActionTable::new(vec![]), Err(ActionError::EmptyTable));
    }

    #[test]
    fn unknown_index_is_rejected() {
        let mut decoder = ActionDecoder::new(DiscreteActionTable::default());
        assert_eq!(
            decoder.decode(10),
            Err(ActionError::UnknownAction { index: 10, size: 10 })
        );
    }

    #[test]
    fn repeated_decoding_accumulates_and_clamps() {
        let table = DiscreteActionTable::default();
        for (index, delta) in table.iter().enumerate() {
            let mut decoder = ActionDecoder::new(table.clone());
            let first = decoder.decode(index).unwrap();
            let second = decoder.decode(index).unwrap();

            let expected_steer_1 = delta.steer.clamp(-STEER_LIMIT, STEER_LIMIT);
            let expected_steer_2 = (expected_steer_1 + delta.steer).clamp(-STEER_LIMIT, STEER_LIMIT);
            assert_close(first.steer, expected_steer_1, "first steer");
            assert_close(second.steer, expected_steer_2, "second steer");

            if delta.brake == 0.0 {
                let expected_throttle_1 = delta.throttle.clamp(0.0, 1.0);
                let expected_throttle_2 = (expected_throttle_1 + delta.throttle).clamp(0.0, 1.0);
                assert_close(first.throttle, expected_throttle_1, "first throttle");
                assert_close(second.throttle, expected_throttle_2, "second throttle");
            }

            for control in [first, second] {
                assert!((0.0..=1.0).contains(&control.throttle));
                assert!((-STEER_LIMIT..=STEER_LIMIT).contains(&control.steer));
            }
        }
    }

    #[test]
    fn brake_forces_zero_throttle() {
        let mut decoder = ActionDecoder::new(DiscreteActionTable::default());
        for _ in 0..5 {
            decoder.decode(3).unwrap();
        }
        assert!(decoder.past().throttle > 0.4);

        let braked = decoder.decode(5).unwrap();
        assert_eq!(braked.throttle, 0.0);
        assert_eq!(braked.brake, 1.0);
    }

    #[test]
    fn steering_saturates_at_limit() {
        let mut decoder = ActionDecoder::new(DiscreteActionTable::from_kind(ActionTableKind::Small));
        decoder.decode(9).unwrap();
        let control = decoder.decode(9).unwrap();
        assert_close(control.steer, STEER_LIMIT, "steer");
        assert_close(control.throttle, 1.0, "throttle");
    }

    #[test]
    fn neutralize_keeps_past_action() {
        let mut decoder = ActionDecoder::new(DiscreteActionTable::default());
        decoder.decode(3).unwrap();
        let neutral = decoder.neutralize();
        assert_eq!(neutral, VehicleControl::NEUTRAL);
        assert_close(decoder.past().throttle, 0.1, "past throttle");

        let next = decoder.decode(3).unwrap();
        assert_close(next.throttle, 0.2, "throttle after neutral");
    }

    #[test]
    fn reset_clears_past_action() {
        let mut decoder = ActionDecoder::new(DiscreteActionTable::default());
        decoder.decode(6).unwrap();
        decoder.reset();
        assert_eq!(*decoder.past(), VehicleControl::NEUTRAL);
        assert_eq!(*decoder.current(), VehicleControl::NEUTRAL);
    }
}
