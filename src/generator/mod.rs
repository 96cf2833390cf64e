/// Parallel multi-request generation.
pub mod batch;
/// Per-request view orchestration.
pub mod orchestrator;
