pub mod api;
pub mod app;
pub mod bodies;
pub mod bridge;
pub mod components;
pub mod core;
pub mod input;
pub mod overlay;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::config::OrreryConfig;
pub use api::error::OrreryError;
pub use api::types::{ui_event, EntityId, UiEvent};
pub use app::Orrery;
pub use bodies::{BodyId, CelestialBody, PLANETS, PLANET_COUNT, SUN};
pub use bridge::protocol::ProtocolLayout;
pub use components::entity::Entity;
pub use components::mesh::{Color, MeshComponent, Shape};
pub use core::scene::Scene;
pub use core::state::{OrbitState, RenderSurface, SharedState, ViewState};
pub use core::time::{FrameClock, FrameLoop, LoopState};
pub use input::controls::{parse_speed, ControlEvent, ControlId, ControlRegistry};
pub use input::queue::{InputEvent, InputQueue};
pub use overlay::HoverState;
pub use renderer::camera::OrbitCamera;
pub use renderer::sdf_instance::{SDFBuffer, SDFInstance};
pub use systems::lighting::{LightInstance, LightState, PointLight};
pub use systems::starfield::{StarPoint, Starfield};

#[cfg(feature = "vectors")]
pub use systems::vector::{VectorColor, VectorState, VectorVertex};
