pub mod error;
pub mod normalize;
pub mod platforms;
mod retry;
mod session;
pub mod settings;
pub mod tracker;

pub use error::TrackerError;
pub use platforms::seven_eleven::{CaptchaSolver, TesseractSolver};
pub use settings::TrackerSettings;
pub use tracker::{create_tracker, track, track_with, AnyTracker, Tracker};
