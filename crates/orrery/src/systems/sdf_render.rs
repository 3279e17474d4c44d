use crate::components::entity::Entity;
use crate::renderer::camera::Projector;
use crate::renderer::sdf_instance::{SDFBuffer, SDFInstance};

/// Render item with depth for sorting.
struct RenderItem {
    depth: f32,
    instance: SDFInstance,
}

/// Build the SDF instance buffer from sphere meshes, projected and sorted
/// back-to-front (painter's algorithm). Equal depths keep spawn order.
pub fn build_sdf_buffer<'a>(
    entities: impl Iterator<Item = &'a Entity>,
    projector: &Projector,
    buffer: &mut SDFBuffer,
) {
    buffer.clear();
    let mut items: Vec<RenderItem> = Vec::new();
    for entity in entities {
        if !entity.active {
            continue;
        }
        let Some(mesh) = &entity.mesh else {
            continue;
        };
        let Some(radius) = mesh.sphere_radius() else {
            continue;
        };
        let Some(proj) = projector.project(entity.pos) else {
            continue;
        };
        items.push(RenderItem {
            depth: proj.depth,
            instance: SDFInstance {
                x: proj.pos.x,
                y: proj.pos.y,
                radius: radius * proj.scale,
                rotation: entity.rotation,
                r: mesh.color.r,
                g: mesh.color.g,
                b: mesh.color.b,
                shininess: mesh.shininess,
                emissive: mesh.emissive,
                alpha: mesh.opacity,
                depth: proj.depth,
                _pad: 0.0,
            },
        });
    }

    // Descending depth: farther objects render first.
    items.sort_by(|a, b| b.depth.total_cmp(&a.depth));

    for item in items {
        if !buffer.push(item.instance) {
            break;
        }
    }
}
