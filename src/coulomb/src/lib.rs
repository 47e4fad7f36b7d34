pub mod control;
pub mod engine;
pub mod forces;
pub mod params;
pub mod particle;
pub mod registry;

pub type V2 = nalgebra::Vector2<f32>;
