//! Controller layer: UI events and command orchestration around the request orchestrator.

pub mod events;
pub mod orchestration;
