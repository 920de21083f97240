pub mod config;
pub mod controller;
pub mod controller_message;
pub mod driver;
pub mod error;
pub mod force;
pub mod mass;
pub mod mesh;
pub mod physical_model;
pub mod spring;
pub mod vmath;

pub use error::Error;

pub type V2 = nalgebra::Vector2<f32>;
