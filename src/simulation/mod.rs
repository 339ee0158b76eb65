mod force;
mod geometry;
mod integrator;
mod interaction;
mod overlap;
mod registry;
mod simulator;
mod tick_loop;

#[cfg(test)]
pub(crate) mod test_support;

pub use force::accumulate_accel;
pub use geometry::{Boundary, CardRect, GeometrySource, RenderedLayout, Viewport};
pub use integrator::TickReport;
pub use overlap::has_rect_conflict;
pub use registry::{Card, CardId, CardRegistry};
pub use simulator::RepulsionSimulator;
pub use tick_loop::{StopFlag, TickLoop, TickTask};

pub mod presets {
    use bevy::math::Vec2;

    /// Values the card pile has always used. Changing any of them changes
    /// how the pile settles.
    pub const DEFAULT: RepulsionTuning = RepulsionTuning {
        throttle: 0.04,
        weight_scale: 0.000001,
        damping: 0.98,
        drag_impulse_scale: 60.0,
        min_slope: 0.2,
        max_slope: 2.0,
        hang_fraction: 0.2,
        spawn_spread: Vec2::new(424.0, 356.0),
    };

    #[derive(Debug, Clone, Copy)]
    pub struct RepulsionTuning {
        /// Overlap weight at or below which no push is applied
        pub throttle: f32,
        /// Overlap area -> weight
        pub weight_scale: f32,
        /// Acceleration multiplier, applied once per partner compared
        pub damping: f32,
        /// Multiplier for the shove given to cards in the way of a drag
        pub drag_impulse_scale: f32,
        pub min_slope: f32,
        pub max_slope: f32,
        /// How much of a card may hang off a viewport edge
        pub hang_fraction: f32,
        /// Cards spawn up to this far up/left of the viewport center
        pub spawn_spread: Vec2,
    }
}

// Current active preset
const TUNING: presets::RepulsionTuning = presets::DEFAULT;
