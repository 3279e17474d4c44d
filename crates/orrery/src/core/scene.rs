use crate::api::types::EntityId;
use crate::bodies::BodyId;
use crate::components::entity::Entity;
use crate::components::mesh::Color;
use crate::systems::lighting::LightState;
use crate::systems::starfield::Starfield;

/// Background clear colors for the two themes.
pub const DARK_BACKGROUND: u32 = 0x000011;
pub const LIGHT_BACKGROUND: u32 = 0x87CEEB;

pub fn background_for(dark_mode: bool) -> Color {
    Color::from_hex(if dark_mode { DARK_BACKGROUND } else { LIGHT_BACKGROUND })
}

/// Simple entity storage using a flat Vec, plus the scene-wide decor.
/// Designed for small entity counts; the orrery holds a couple dozen.
pub struct Scene {
    entities: Vec<Entity>,
    /// Entities considered by hover ray casts, in insertion order.
    pickables: Vec<EntityId>,
    next_id: u32,
    pub background: Color,
    pub lights: LightState,
    pub starfield: Starfield,
}

impl Scene {
    pub fn new() -> Self {
        Self::with_capacity(32)
    }

    /// Create a scene with a specific entity capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entities: Vec::with_capacity(capacity),
            pickables: Vec::new(),
            next_id: 1,
            background: background_for(true),
            lights: LightState::new(),
            starfield: Starfield::default(),
        }
    }

    /// Allocate an id not yet used in this scene.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add an entity to the scene.
    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        let id = entity.id;
        self.next_id = self.next_id.max(id.0 + 1);
        self.entities.push(entity);
        id
    }

    /// Add an entity and register it for hit testing.
    pub fn spawn_pickable(&mut self, entity: Entity) -> EntityId {
        let id = self.spawn(entity);
        self.pickables.push(id);
        id
    }

    /// Get a reference to an entity by ID.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Get a mutable reference to an entity by ID.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Iterate over all entities.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Find the first entity with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.tag == tag)
    }

    /// Find all entities rendering the given body.
    pub fn find_by_body(&self, body: BodyId) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(move |e| e.body == Some(body))
    }

    /// Iterate over the hit-test list.
    pub fn pickables(&self) -> impl Iterator<Item = &Entity> {
        self.pickables.iter().filter_map(|id| self.get(*id))
    }

    /// Number of entities in the scene.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn spawn_and_get() {
        let mut scene = Scene::new();
        let id = scene.next_id();
        scene.spawn(Entity::new(id).with_pos(Vec3::new(10.0, 20.0, 30.0)));
        let e = scene.get(id).unwrap();
        assert_eq!(e.pos, Vec3::new(10.0, 20.0, 30.0));
    }

    #[test]
    fn ids_are_unique_after_explicit_spawn() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(5)));
        assert_eq!(scene.next_id(), EntityId(6));
    }

    #[test]
    fn find_by_tag_and_body() {
        let mut scene = Scene::new();
        let a = scene.next_id();
        scene.spawn(Entity::new(a).with_tag("Sun").with_body(BodyId::Sun));
        let b = scene.next_id();
        scene.spawn(Entity::new(b).with_tag("Sun glow").with_body(BodyId::Sun));
        assert_eq!(scene.find_by_tag("Sun").unwrap().id, a);
        assert_eq!(scene.find_by_body(BodyId::Sun).count(), 2);
        assert_eq!(scene.find_by_body(BodyId::Mars).count(), 0);
    }

    #[test]
    fn only_pickables_are_listed() {
        let mut scene = Scene::new();
        let id = scene.next_id();
        scene.spawn_pickable(Entity::new(id).with_tag("Earth"));
        let decor = scene.next_id();
        scene.spawn(Entity::new(decor).with_tag("ring"));
        let tags: Vec<_> = scene.pickables().map(|e| e.tag.as_str()).collect();
        assert_eq!(tags, vec!["Earth"]);
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn background_follows_theme() {
        assert_eq!(background_for(true), Color::from_hex(0x000011));
        assert_eq!(background_for(false), Color::from_hex(0x87CEEB));
    }
}
