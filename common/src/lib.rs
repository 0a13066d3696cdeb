pub mod shapes;
pub mod vector;

pub use vector::{Vec2, Vec3};
