//! Session orchestration for the maze experiment.
//!
//! This module ties the simulation components together into one
//! [`ExperimentSession`] that a host (a renderer, a browser bridge, or the
//! headless driver) advances once per display frame.
//!
//! # Module Structure
//!
//! - [`app_state`]: the [`ExperimentSession`] struct and its accessors
//! - [`event_handler`]: input events and experiment observers
//! - [`update`]: the per-tick update sequence and level reload protocol
//! - [`fog`]: fog density stand-in for hosts without a renderer
//! - [`input`]: scripted and random input sources for headless runs
//!
//! # Tick Flow
//!
//! 1. **Movement**: held intents are applied through the collision probe
//! 2. **Fire**: the fire grows and is checked against the player
//! 3. **Warm-up clock**: the warm-up counter advances and may time out
//! 4. **Telemetry**: a viewport sample is taken if one is due
//!
//! # Threading Model
//!
//! Everything runs synchronously on the caller's thread. The running flag is
//! the only guard: when it is clear, ticks do nothing until a pending level
//! has been installed.

pub mod app_state;
pub mod event_handler;
pub mod fog;
pub mod input;
pub mod update;

pub use app_state::ExperimentSession;
pub use event_handler::{ExperimentObserver, InputEvent, TracingObserver};
pub use fog::Fog;
pub use input::{IntentSource, RandomWalk, ScriptedInput};
pub use update::{FrameInput, TickReport};
