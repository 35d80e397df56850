use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::actions::{ActionDecoder, ActionTableKind, DiscreteActionTable};
use crate::config::ExperimentConfig;

fn table_kind(name: &str) -> PyResult<ActionTableKind> {
    match name.to_ascii_lowercase().as_str() {
        "small" => Ok(ActionTableKind::Small),
        "smaller" => Ok(ActionTableKind::Smaller),
        other => Err(PyValueError::new_err(format!(
            "unknown action table '{other}', expected 'small' or 'smaller'"
        ))),
    }
}

/// Incremental discrete-action decoder, usable from a Python training loop.
#[pyclass(name = "ActionDecoder")]
struct PyActionDecoder {
    inner: ActionDecoder,
}

#[pymethods]
impl PyActionDecoder {
    #[new]
    #[pyo3(signature = (table = "smaller"))]
    fn new(table: &str) -> PyResult<Self> {
        let table = DiscreteActionTable::from_kind(table_kind(table)?);
        Ok(Self {
            inner: ActionDecoder::new(table),
        })
    }

    /// Returns (throttle, steer, brake, reverse, hand_brake).
    #[pyo3(signature = (index = None))]
    fn decode(&mut self, index: Option<usize>) -> PyResult<(f32, f32, f32, bool, bool)> {
        let control = match index {
            Some(index) => self
                .inner
                .decode(index)
                .map_err(|e| PyValueError::new_err(e.to_string()))?,
            None => self.inner.neutralize(),
        };
        Ok((
            control.throttle,
            control.steer,
            control.brake,
            control.reverse,
            control.hand_brake,
        ))
    }

    fn reset(&mut self) {
        self.inner.reset();
    }

    #[getter]
    fn n(&self) -> usize {
        self.inner.table().len()
    }
}

/// The default experiment configuration as pretty-printed JSON.
#[pyfunction]
fn default_config_json() -> PyResult<String> {
    ExperimentConfig::default()
        .to_json_string()
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

#[pyfunction]
#[pyo3(signature = (table = "smaller"))]
fn action_space_size(table: &str) -> PyResult<usize> {
    Ok(DiscreteActionTable::from_kind(table_kind(table)?).len())
}

/// The name of this function must match the lib.name in Cargo.toml
#[pymodule]
fn drive_rl(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyActionDecoder>()?;
    m.add_function(wrap_pyfunction!(default_config_json, m)?)?;
    m.add_function(wrap_pyfunction!(action_space_size, m)?)?;
    Ok(())
}
