//! Job configuration, the per-frame state machine and the top-level animation entry point.

/// Animation options and the JSON job document.
pub mod config;
/// Validated job and the render-to-sink / render-to-file operations.
pub mod creator;
/// Frame-by-frame figure updates.
pub mod sequencer;
