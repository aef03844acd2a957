pub mod analysis;
pub mod duration;
pub mod models;
pub mod reconstruct;

pub use analysis::{TimelineSummary, summarize};
pub use duration::{FormatOptions, MinimumUnit, UNKNOWN_DURATION, format_duration};
pub use models::{Inconsistency, Reconstruction, Span, StatusInterval};
pub use reconstruct::{Reconstructor, TimelineOptions, reconstruct_timeline};
