pub mod rng;
pub mod scene;
pub mod state;
pub mod time;
