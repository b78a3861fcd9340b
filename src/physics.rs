//! The contract this engine needs from the external physics engine.
//!
//! Rigid-body dynamics live outside this crate. A die body is anything that
//! can take a throw (velocity + impulse) and answer with its live state at
//! poll time. The settle detector only ever reads the current sample; it
//! never buffers intermediate frames.

use glam::{Mat4, Vec3};

/// Snapshot of a die body taken at poll time.
#[derive(Debug, Clone, Copy)]
pub struct BodySample {
    /// Current linear velocity.
    pub linvel: Vec3,
    /// Current world transform, applied to the die's scaled local mesh.
    pub transform: Mat4,
}

impl BodySample {
    pub fn speed(&self) -> f32 {
        self.linvel.length()
    }
}

/// One simulated die body.
pub trait DieBody {
    /// Set instantaneous linear and angular velocity.
    fn set_velocity(&mut self, linear: Vec3, angular: Vec3);

    /// Apply an instantaneous impulse at a world-space offset from the
    /// center of mass.
    fn apply_impulse(&mut self, impulse: Vec3, at_offset: Vec3);

    /// Read the live state. Called zero or more times between physics
    /// steps; must reflect the current transform, not a buffered one.
    fn sample(&self) -> BodySample;
}
