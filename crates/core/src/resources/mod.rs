//! Resource adapters
//!
//! `server` manages a real remote entity. Every other adapter wraps a
//! one-shot action through [`action::ActionResource`].

pub mod action;
pub mod command;
pub mod docker_image;
pub mod power;
pub mod reinstall;
pub mod rename;
pub mod server;
pub mod startup_variable;

pub use action::{ActionResource, ServerAction};
pub use command::{CommandResource, COMMAND_SCHEMA, COMMAND_TYPE};
pub use docker_image::{DockerImageResource, DOCKER_IMAGE_SCHEMA, DOCKER_IMAGE_TYPE};
pub use power::{PowerResource, POWER_SCHEMA, POWER_TYPE};
pub use reinstall::{ReinstallResource, REINSTALL_SCHEMA, REINSTALL_TYPE};
pub use rename::{RenameResource, RENAME_SCHEMA, RENAME_TYPE};
pub use server::{ServerResource, SERVER_SCHEMA, SERVER_TYPE};
pub use startup_variable::{
    StartupVariableResource, STARTUP_VARIABLE_SCHEMA, STARTUP_VARIABLE_TYPE,
};
