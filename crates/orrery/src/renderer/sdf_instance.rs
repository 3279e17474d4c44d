use bytemuck::{Pod, Zeroable};

/// Per-instance SDF sphere data, already projected to surface pixels.
/// Read by the host SDF renderer in draw order.
/// 12 floats = 48 bytes per instance.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SDFInstance {
    pub x: f32,
    pub y: f32,
    /// Projected radius in pixels.
    pub radius: f32,
    /// Spin about the world Y axis, for surface shading.
    pub rotation: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub shininess: f32,
    pub emissive: f32,
    pub alpha: f32,
    /// View depth, kept for host-side depth testing against vectors.
    pub depth: f32,
    pub _pad: f32,
}

impl SDFInstance {
    pub const FLOATS: usize = 12;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Bounded buffer of SDF instances, rebuilt each frame.
pub struct SDFBuffer {
    instances: Vec<SDFInstance>,
    capacity: usize,
}

impl SDFBuffer {
    pub fn with_capacity(max: usize) -> Self {
        Self {
            instances: Vec::with_capacity(max),
            capacity: max,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    /// Append an instance. Returns `false` once the buffer is full.
    pub fn push(&mut self, instance: SDFInstance) -> bool {
        if self.instances.len() >= self.capacity {
            return false;
        }
        self.instances.push(instance);
        true
    }

    pub fn instances(&self) -> &[SDFInstance] {
        &self.instances
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sdf_instance_is_48_bytes() {
        assert_eq!(std::mem::size_of::<SDFInstance>(), 48);
        assert_eq!(SDFInstance::FLOATS, 12);
    }

    #[test]
    fn push_stops_at_capacity() {
        let mut buf = SDFBuffer::with_capacity(2);
        assert!(buf.push(SDFInstance::default()));
        assert!(buf.push(SDFInstance::default()));
        assert!(!buf.push(SDFInstance::default()));
        assert_eq!(buf.instance_count(), 2);
        buf.clear();
        assert_eq!(buf.instance_count(), 0);
    }

    #[test]
    fn floats_cast_in_field_order() {
        let mut buf = SDFBuffer::with_capacity(1);
        buf.push(SDFInstance {
            x: 1.0,
            alpha: 0.3,
            depth: 9.0,
            ..Default::default()
        });
        let floats: &[f32] = bytemuck::cast_slice(buf.instances());
        assert_eq!(floats[0], 1.0);
        assert_eq!(floats[9], 0.3);
        assert_eq!(floats[10], 9.0);
    }
}
