//! Poses: what to perform (specs and the pose table) and how a pose turns
//! into bone animation (curl expansion, letter staging and the composer).

pub mod composer;
pub mod curl;
pub mod spec;
pub mod staging;
pub mod table;

pub use composer::{PoseApplication, PoseComposer};
pub use curl::{CurlProfile, CurlProfiles};
pub use spec::{BoneTarget, FingerCurl, PoseSpec, PoseStep};
pub use staging::LetterStaging;
pub use table::{PoseTable, PoseTableConfig, SignDef};
