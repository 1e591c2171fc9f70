pub mod estimator;
pub mod panel;
pub mod sun;
