pub mod animation;
pub mod builder;
pub mod lighting;
pub mod sdf_render;
pub mod starfield;
#[cfg(feature = "vectors")]
pub mod vector;
