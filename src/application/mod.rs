pub mod consolidate;
pub mod digest;
pub mod format;
pub mod rank;
pub mod resolve;
pub mod stats;
