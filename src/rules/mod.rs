pub mod checks;
pub mod stats;

pub use checks::{resolve_check, CheckContext, CheckKind};
pub use stats::{derived_stats, DerivedStats, StatKind};
