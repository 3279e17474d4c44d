pub mod camera;
pub mod raycast;
pub mod sdf_instance;

pub use camera::{OrbitCamera, Projection, Projector};
pub use raycast::{Hit, Ray};
