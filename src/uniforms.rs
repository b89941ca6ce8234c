//! Shader parameter state and the synchronization seam.
//!
//! All user-adjustable uniforms live in one owned [`UniformSet`]; input
//! handlers and the rotation timer mutate it only through a
//! [`Synchronizer`], which re-broadcasts the full set to its sink after
//! every change. The sink is a trait so the GL side effect can be swapped
//! for a recorder in tests.

/// Degrees added to the auto-rotated axis per timer tick.
pub const ROTATION_STEP: i32 = 2;

/// How far one button press / arrow key moves the offset.
pub const OFFSET_STEP: f32 = 0.5;

/// Loop bounds may never drop below this.
const BOUNDS_FLOOR: i32 = 1;

const DEFAULT_BOUNDS: [i32; 3] = [3, 3, 3];
const DEFAULT_SPACE: i32 = 2;
const DEFAULT_ROTATION: [i32; 3] = [45, 45, 44];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Relative change or a return to the field's reset value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjust {
    By(i32),
    Reset,
}

/// Every user-adjustable shader parameter, in one place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformSet {
    /// World-space offset of the sphere grid.
    pub offset: [f32; 3],
    /// Repetition counts along each axis; >= 1 always.
    pub bounds: [i32; 3],
    /// Spacing between spheres.
    pub space: i32,
    /// Euler angles in degrees, each in [0, 360).
    pub rotation: [i32; 3],
}

impl Default for UniformSet {
    fn default() -> Self {
        Self {
            offset: [0.0; 3],
            bounds: DEFAULT_BOUNDS,
            space: DEFAULT_SPACE,
            rotation: DEFAULT_ROTATION,
        }
    }
}

/// Receives the full parameter set whenever anything changed.
///
/// Implementations must be idempotent: applying the same set twice leaves
/// the same observable state as applying it once.
pub trait UniformSink {
    fn apply(&mut self, set: &UniformSet);
}

/// Owns the [`UniformSet`] and pushes it through the sink after every
/// mutation, so shader state can never drift from the struct.
pub struct Synchronizer<S: UniformSink> {
    set: UniformSet,
    sink: S,
}

impl<S: UniformSink> Synchronizer<S> {
    /// Wraps the sink and performs the initial push so the shader starts
    /// from the defaults.
    pub fn new(mut sink: S) -> Self {
        let set = UniformSet::default();
        sink.apply(&set);
        Self { set, sink }
    }

    pub fn set(&self) -> &UniformSet {
        &self.set
    }

    /// Consumes the synchronizer and hands back the sink, so tests can
    /// inspect what was broadcast.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Re-broadcasts the current values unchanged.
    pub fn push(&mut self) {
        self.sink.apply(&self.set);
    }

    pub fn nudge_offset(&mut self, dx: f32, dy: f32, dz: f32) {
        self.set.offset[0] += dx;
        self.set.offset[1] += dy;
        self.set.offset[2] += dz;
        self.push();
    }

    pub fn reset_offset(&mut self) {
        self.set.offset = [0.0; 3];
        self.push();
    }

    /// Grows or resets one loop bound. The floor is 1 in both directions:
    /// decrements clamp there and reset lands there, never on the default.
    pub fn adjust_bounds(&mut self, axis: Axis, op: Adjust) {
        let field = &mut self.set.bounds[axis.index()];
        *field = match op {
            Adjust::By(delta) => (*field + delta).max(BOUNDS_FLOOR),
            Adjust::Reset => BOUNDS_FLOOR,
        };
        self.push();
    }

    /// Turns or resets one rotation angle, wrapped into [0, 360).
    pub fn adjust_rotation(&mut self, axis: Axis, op: Adjust) {
        let i = axis.index();
        self.set.rotation[i] = match op {
            Adjust::By(delta) => (self.set.rotation[i] + delta).rem_euclid(360),
            Adjust::Reset => DEFAULT_ROTATION[i],
        };
        self.push();
    }

    pub fn set_space(&mut self, value: i32) {
        self.set.space = value;
        self.push();
    }

    /// One auto-rotation timer tick: advance Z by [`ROTATION_STEP`].
    pub fn rotation_tick(&mut self) {
        self.adjust_rotation(Axis::Z, Adjust::By(ROTATION_STEP));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every pushed set so tests can inspect the broadcast stream.
    #[derive(Default)]
    struct Recorder {
        pushes: Vec<UniformSet>,
    }

    impl UniformSink for Recorder {
        fn apply(&mut self, set: &UniformSet) {
            self.pushes.push(*set);
        }
    }

    fn sync() -> Synchronizer<Recorder> {
        Synchronizer::new(Recorder::default())
    }

    #[test]
    fn defaults_are_pushed_on_construction() {
        let s = sync();
        assert_eq!(s.sink.pushes.len(), 1);
        assert_eq!(s.sink.pushes[0], UniformSet::default());
        assert_eq!(s.set().bounds, [3, 3, 3]);
        assert_eq!(s.set().space, 2);
        assert_eq!(s.set().rotation, [45, 45, 44]);
    }

    #[test]
    fn left_then_up_moves_offset() {
        let mut s = sync();
        s.nudge_offset(-OFFSET_STEP, 0.0, 0.0);
        s.nudge_offset(0.0, OFFSET_STEP, 0.0);
        assert_eq!(s.set().offset, [-0.5, 0.5, 0.0]);
        s.reset_offset();
        assert_eq!(s.set().offset, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn every_mutation_pushes_once() {
        let mut s = sync();
        s.nudge_offset(OFFSET_STEP, 0.0, 0.0);
        s.adjust_bounds(Axis::Y, Adjust::By(1));
        s.set_space(5);
        s.rotation_tick();
        // Construction push plus one per mutation.
        assert_eq!(s.sink.pushes.len(), 5);
    }

    #[test]
    fn bounds_increment_and_reset() {
        let mut s = sync();
        s.adjust_bounds(Axis::X, Adjust::By(1));
        assert_eq!(s.set().bounds[0], 4);
        s.adjust_bounds(Axis::X, Adjust::Reset);
        assert_eq!(s.set().bounds[0], 1);
    }

    #[test]
    fn bounds_never_drop_below_one() {
        let mut s = sync();
        for _ in 0..10 {
            s.adjust_bounds(Axis::Z, Adjust::By(-1));
            assert!(s.set().bounds[2] >= 1);
        }
        assert_eq!(s.set().bounds[2], 1);
    }

    #[test]
    fn bounds_grow_without_ceiling() {
        let mut s = sync();
        for _ in 0..1_000 {
            s.adjust_bounds(Axis::Y, Adjust::By(1));
        }
        assert_eq!(s.set().bounds[1], 1_003);
    }

    #[test]
    fn rotation_tick_wraps_at_360() {
        let mut s = sync();
        // Z starts at 44; 158 ticks of +2 land exactly on the wrap.
        for _ in 0..158 {
            s.rotation_tick();
        }
        assert_eq!(s.set().rotation[2], 0);
        s.rotation_tick();
        assert_eq!(s.set().rotation[2], 2);
    }

    #[test]
    fn rotation_after_k_ticks_is_v0_plus_2k_mod_360() {
        let mut s = sync();
        let v0 = s.set().rotation[2];
        for k in 1..=500 {
            s.rotation_tick();
            assert_eq!(s.set().rotation[2], (v0 + 2 * k).rem_euclid(360));
        }
    }

    #[test]
    fn rotation_reset_restores_axis_default() {
        let mut s = sync();
        s.adjust_rotation(Axis::X, Adjust::By(90));
        assert_eq!(s.set().rotation[0], 135);
        s.adjust_rotation(Axis::X, Adjust::Reset);
        assert_eq!(s.set().rotation[0], 45);
    }

    #[test]
    fn negative_rotation_wraps_into_range() {
        let mut s = sync();
        s.adjust_rotation(Axis::Y, Adjust::By(-50));
        assert_eq!(s.set().rotation[1], 355);
    }

    #[test]
    fn push_is_idempotent() {
        let mut s = sync();
        s.adjust_bounds(Axis::X, Adjust::By(2));
        s.push();
        s.push();
        let n = s.sink.pushes.len();
        assert_eq!(s.sink.pushes[n - 1], s.sink.pushes[n - 2]);
        assert_eq!(s.sink.pushes[n - 2], s.sink.pushes[n - 3]);
    }
}
