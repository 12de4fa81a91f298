//! Python bindings for textscreen.
//!
//! Exposes the heuristic screener so the Python side of the publishing
//! workflow can pre-filter documents before calling the model stages.

pub mod screen;

use pyo3::prelude::*;

/// Register all Python bindings with the module.
pub fn register_python_bindings(py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    screen::register_screen_bindings(py, m)?;
    m.add_function(wrap_pyfunction!(crate::logging::init_logging, m)?)?;
    Ok(())
}
