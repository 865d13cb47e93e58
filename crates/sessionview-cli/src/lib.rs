//! Command-line front end for the sessionview engine.

pub mod config;
pub mod logging;
