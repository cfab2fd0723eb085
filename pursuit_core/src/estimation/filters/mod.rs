// pursuit_core/src/estimation/filters/mod.rs

pub mod multi_model;
pub mod scalar_kalman;
