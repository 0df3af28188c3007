//! Grid raycaster: parses a `.cub` scene, checks that the map is closed,
//! and renders a first-person view one screen column at a time.

pub mod camera;
pub mod cli;
pub mod color;
pub mod config;
pub mod error;
pub mod framebuffer;
pub mod map;
pub mod minimap;
pub mod movement;
pub mod raycast;
pub mod renderer;
pub mod scaler;
pub mod scene;
pub mod session;
pub mod texture;
pub mod validate;

pub use error::{Error, ParseError, Result};
