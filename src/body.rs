use ultraviolet::Vec2;

/// A point mass in the simulation.
///
/// Bodies have no identity beyond their index in the simulation's storage.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    /// Position vector.
    pub pos: Vec2,
    /// Velocity vector.
    pub vel: Vec2,
    /// Acceleration accumulator, valid only within a single step.
    pub acc: Vec2,
}

impl Default for Body {
    fn default() -> Self {
        Self::new(Vec2::zero(), Vec2::zero())
    }
}

impl Body {
    /// Creates a new Body at rest apart from the given velocity.
    /// Initial acceleration is zero.
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            acc: Vec2::zero(),
        }
    }

    /// Advances the body by `dt` using semi-implicit Euler integration
    /// (velocity update first, then position), then clears the acceleration
    /// accumulator so the next step starts from zero.
    pub fn update(&mut self, dt: f32) {
        self.vel += self.acc * dt;
        self.pos += self.vel * dt;
        self.acc = Vec2::zero();
    }
}
