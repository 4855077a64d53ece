use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Recognition", inline)]
#[serde(default)]
/// Endpoints of the external recognition services.
pub struct RecognitionOptions {
    /// Speech-to-text endpoint (accepts base64 audio).
    #[schemars(title = "Speech URL")]
    pub speech_url: String,
    /// Gesture classifier endpoint (accepts a JPEG frame).
    #[schemars(title = "Gesture URL")]
    pub gesture_url: String,
}

impl Default for RecognitionOptions {
    fn default() -> Self {
        Self {
            speech_url: "http://localhost:5000/recognize".to_owned(),
            gesture_url: "http://localhost:8000/recognize".to_owned(),
        }
    }
}
