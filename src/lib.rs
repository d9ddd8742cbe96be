pub mod api;
pub mod config;
pub mod error;
pub mod generator;
pub mod history;
pub mod log;
pub mod profiles;
pub mod sequence;
// cmd and reports are binary modules of the `pinforge` executable (see main.rs).
