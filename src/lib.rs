// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only setup in main.rs.
pub mod app;
pub mod config;
pub mod content;
pub mod metrics;
pub mod runtime;
pub mod session;
pub mod ui;
