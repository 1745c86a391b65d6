// rust/py/src/lib.rs
#![forbid(unsafe_code)]
#![allow(unsafe_op_in_unsafe_fn)] // pyo3 macro-generated glue triggers this on newer toolchains

mod expert_policy;

use pyo3::prelude::*;

pub use expert_policy::MarioExpert;

#[pymodule]
fn mario_expert_rs(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<MarioExpert>()?;
    m.add("ACTION_DIM", mario_engine::ACTION_DIM)?;
    Ok(())
}
