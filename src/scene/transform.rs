use glam::{Mat4, Quat, Vec3};

/// Decomposed local transform value.
///
/// This is the authoring-side representation of a node's local transform:
/// editing tools and animation channels produce translation/rotation/scaling
/// components, and the engine composes them into a matrix in `T · R · S`
/// order (scale first, then rotation, then translation).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trs {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scaling: Vec3,
}

impl Trs {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scaling: Vec3::ONE,
    };

    #[must_use]
    pub const fn new(translation: Vec3, rotation: Quat, scaling: Vec3) -> Self {
        Self {
            translation,
            rotation,
            scaling,
        }
    }

    #[must_use]
    pub const fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            rotation: Quat::IDENTITY,
            scaling: Vec3::ONE,
        }
    }

    /// Composes the components into a single matrix, `T · R · S`.
    #[must_use]
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scaling, self.rotation, self.translation)
    }
}

impl Default for Trs {
    fn default() -> Self {
        Self::IDENTITY
    }
}
