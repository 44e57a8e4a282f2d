pub mod strategy;
pub mod title;
pub mod collector;
pub mod catalog;

pub use strategy::Origin;
pub use collector::{NewsCollector, RetryPolicy, Section, SourceSpec};
pub use catalog::SourceCatalog;
