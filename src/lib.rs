pub mod app;
pub mod cli;
pub mod gitref;
pub mod install;
pub mod render;
pub mod snapshot;
pub mod transcript;
pub mod util;
