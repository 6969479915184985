// Document Builder: sanitization, flowable block model, layout, PDF output.
// Layout and serialisation are CPU-bound; async callers must go through
// tokio::task::spawn_blocking.

pub mod builder;
pub mod font_metrics;
pub mod layout;
pub mod sanitize;
pub mod winansi;

// Re-export the public API consumed by the controller.
pub use builder::{build, BuildReport};
