// Frame-time metrics for lumen: PCG32, adaptive sampling, FPS smoothing, CPU timers.

pub mod fps;
pub mod rng;
pub mod sampler;
pub mod timer;

pub use fps::FpsCounter;
pub use rng::Pcg32;
pub use sampler::{AdaptiveSampler, Sample};
pub use timer::PerfTimer;
