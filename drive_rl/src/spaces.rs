// RL space declarations handed to an external trainer.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Space {
    /// Integers `0..n`.
    Discrete(usize),
    /// Dense f32 tensor of `shape` with element-wise bounds.
    Box {
        low: f32,
        high: f32,
        shape: Vec<usize>,
    },
}

impl Space {
    pub fn discrete(n: usize) -> Self {
        Space::Discrete(n)
    }

    pub fn boxed(low: f32, high: f32, shape: Vec<usize>) -> Self {
        Space::Box { low, high, shape }
    }

    /// Number of scalar elements in one sample (1 for discrete spaces).
    pub fn flat_dim(&self) -> usize {
        match self {
            Space::Discrete(_) => 1,
            Space::Box { shape, .. } => shape.iter().product(),
        }
    }

    pub fn contains_discrete(&self, action: usize) -> bool {
        matches!(self, Space::Discrete(n) if action < *n)
    }

    pub fn contains_box(&self, sample: &[f32]) -> bool {
        match self {
            Space::Box { low, high, .. } => {
                sample.len() == self.flat_dim()
                    && sample.iter().all(|v| (*low..=*high).contains(v))
            }
            Space::Discrete(_) => false,
        }
    }
}
