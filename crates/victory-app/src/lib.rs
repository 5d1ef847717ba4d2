// Application layer around the scoring core: configuration, provider input,
// JSON persistence, and the week/standings pipeline.

pub mod config;
pub mod export;
pub mod input;
pub mod pipeline;
pub mod site_config;
pub mod store;
