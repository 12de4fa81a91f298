//! Python bindings for garbage-text screening.

use crate::screen::{Verdict, VerdictReason};
use pyo3::prelude::*;

/// Python-visible screening verdict.
#[pyclass(name = "Verdict")]
#[derive(Clone)]
pub struct PyVerdict {
    #[pyo3(get)]
    pub garbage: bool,
    #[pyo3(get)]
    pub language: Option<String>,
    #[pyo3(get)]
    pub words: Option<usize>,
    #[pyo3(get)]
    pub stopword_ratio: Option<f64>,
    #[pyo3(get)]
    pub avg_word_len: Option<f64>,
    #[pyo3(get)]
    pub alpha_ratio: Option<f64>,
    #[pyo3(get)]
    pub reason: String,
}

impl From<Verdict> for PyVerdict {
    fn from(v: Verdict) -> Self {
        let reason = match v.reason {
            VerdictReason::LanguageUndetected => "language_undetected".to_string(),
            VerdictReason::Rule(rule) => rule.to_string(),
        };
        Self {
            garbage: v.garbage,
            language: v.language.map(|l| l.to_string()),
            words: v.stats.as_ref().map(|s| s.words),
            stopword_ratio: v.stats.as_ref().and_then(|s| s.stopword_ratio),
            avg_word_len: v.stats.as_ref().map(|s| s.avg_word_len),
            alpha_ratio: v.stats.as_ref().map(|s| s.alpha_ratio),
            reason,
        }
    }
}

#[pymethods]
impl PyVerdict {
    fn __repr__(&self) -> String {
        format!(
            "Verdict(garbage={}, language={:?}, reason={})",
            self.garbage, self.language, self.reason
        )
    }
}

/// Register screening bindings.
pub fn register_screen_bindings(py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    let screen_mod = pyo3::types::PyModule::new(py, "screen")?;
    screen_mod.add_class::<PyVerdict>()?;
    screen_mod.add_function(wrap_pyfunction!(sanity_check_py, &screen_mod)?)?;
    screen_mod.add_function(wrap_pyfunction!(sanity_check_json_py, &screen_mod)?)?;
    m.add_submodule(&screen_mod)?;
    Ok(())
}

/// Screen one document with the default screener.
#[pyfunction]
#[pyo3(name = "sanity_check")]
fn sanity_check_py(text: &str) -> PyVerdict {
    crate::screen::sanity_check(text).into()
}

/// Screen one document and return the verdict as a JSON string.
#[pyfunction]
#[pyo3(name = "sanity_check_json")]
fn sanity_check_json_py(text: &str) -> PyResult<String> {
    serde_json::to_string(&crate::screen::sanity_check(text))
        .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))
}
