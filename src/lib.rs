//! Symptom-to-medicine text classification: offline training and a JSON inference API.

pub mod api;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod logging;
pub mod model;
pub mod recommend;
pub mod train;
