// -- Lint policy ---------------------------------------------------------
// Crate-wide clippy policy; rustc/rustdoc lints are configured in
// Cargo.toml.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]

//! Skeletal pose animation and sequencing for sign-language avatars.
//!
//! Signpose drives a rigged hand or arm skeleton through fingerspelled
//! letters and canned signs. Rotations are interpolated along the shortest
//! arc, poses fan out into concurrent per-bone tasks that join before the
//! next pose starts, and a sequencer turns whole sentences into one
//! non-overlapping performance.
//!
//! # Key entry points
//!
//! - [`engine::AvatarEngine`] - attach a rig, tick per frame, play requests
//! - [`sequencer::Sequencer`] - the Idle/Busy state machine underneath
//! - [`pose::PoseTable`] - letters, signs and named poses
//! - [`skeleton::BoneRegistry`] - live bone rotations and the rest pose
//! - [`options::Options`] - timing, rig naming and service endpoints
//!
//! # Architecture
//!
//! Nothing runs on its own clock. The renderer calls
//! [`engine::AvatarEngine::tick`] with the frame delta; the sequencer
//! advances its active cue, which advances its
//! [`animation::AnimationTask`]s, which write rotations into the
//! registry that the renderer then reads.

pub mod animation;
pub mod engine;
pub mod error;
pub mod options;
pub mod pose;
pub mod recognition;
pub mod sequencer;
pub mod skeleton;
pub mod util;
