/// Post-processing state for lumen.
///
/// Tracks which effects are active, their parameters, the built-in presets,
/// and the CPU model of eye adaptation. Produces the per-frame pass plan that
/// the GPU backend executes; the backend itself lives outside this crate.
pub mod effects;
pub mod exposure;
pub mod params;
pub mod pipeline;
pub mod presets;

pub use effects::{Effect, EffectSet};
pub use exposure::ExposureAdapter;
pub use pipeline::{FramePlan, Pass, PostProcess};
pub use presets::Preset;
