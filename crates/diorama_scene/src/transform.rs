//! Spatial transform for scene objects

use glam::{Mat4, Quat, Vec3};

/// Position, orientation, and scale of a scene object
///
/// The world matrix is composed on demand as translation * rotation *
/// scale and never cached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Position in world space
    pub position: Vec3,
    /// Rotation in world space
    pub rotation: Quat,
    /// Scale per axis
    pub scale: Vec3,
}

impl Transform {
    /// Identity transform
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Create a new transform
    #[inline]
    pub const fn new(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Create from a position with identity rotation and unit scale
    #[inline]
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Set the position (builder pattern)
    #[inline]
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Set the rotation (builder pattern)
    #[inline]
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set the scale (builder pattern)
    #[inline]
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Compose the world matrix (translation * rotation * scale)
    #[inline]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Forward direction (-Z rotated into world space)
    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// Right direction (+X rotated into world space)
    #[inline]
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Up direction (+Y rotated into world space)
    #[inline]
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Orient the forward axis at a target point
    ///
    /// Keeps +Y as up; near-vertical directions fall back to +Z so the
    /// basis never degenerates. A target at the own position leaves the
    /// rotation unchanged.
    pub fn look_at(&mut self, target: Vec3) {
        let direction = target - self.position;
        if direction.length_squared() < f32::EPSILON {
            return;
        }
        let direction = direction.normalize();
        let up = if direction.dot(Vec3::Y).abs() > 0.999 {
            Vec3::Z
        } else {
            Vec3::Y
        };
        let view = Mat4::look_to_rh(Vec3::ZERO, direction, up);
        self.rotation = Quat::from_mat4(&view).inverse();
    }

    /// Encode as document arrays (position, rotation xyzw, scale)
    pub fn to_arrays(&self) -> ([f32; 3], [f32; 4], [f32; 3]) {
        (
            self.position.to_array(),
            self.rotation.to_array(),
            self.scale.to_array(),
        )
    }

    /// Decode from document arrays
    pub fn from_arrays(position: [f32; 3], rotation: [f32; 4], scale: [f32; 3]) -> Self {
        Self {
            position: Vec3::from_array(position),
            rotation: Quat::from_array(rotation),
            scale: Vec3::from_array(scale),
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
