//! Multilingual garbage-text screening.
//!
//! [`screen`] decides from lexical statistics whether a document is coherent
//! language or noise; [`verify`] defines the contract with the model-backed
//! coherency and plausibility stages that run after it.

pub mod error;
pub mod logging;
pub mod screen;
pub mod verify;

#[cfg(feature = "python-ext")]
pub mod python_bindings;

pub use error::{Result, ScreenError};
pub use screen::{sanity_check, Screener, Verdict, VerdictReason};

#[cfg(feature = "python-ext")]
use pyo3::prelude::*;

/// A Python module implemented in Rust.
#[cfg(feature = "python-ext")]
#[pymodule]
fn textscreen(m: &Bound<'_, PyModule>) -> PyResult<()> {
    python_bindings::register_python_bindings(m.py(), m)
}
