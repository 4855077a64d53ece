//! Client side of the speech and gesture recognition services.
//!
//! Both services take a JSON body carrying a base64 data URL (`audio` for
//! speech, `image` for a camera frame) and answer with `{ "text": .. }` or
//! `{ "error": .. }`. Recognized text only reaches the animation core through
//! [`AvatarEngine::play_recognized`](crate::engine::AvatarEngine::play_recognized).
//!
//! The response types are always available; the blocking HTTP client needs
//! the `recognition` feature.

use serde::{Deserialize, Serialize};

use crate::error::SignposeError;

/// Body returned by either recognition service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognitionResponse {
    /// Recognized text or gesture label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Service-side failure description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RecognitionResponse {
    /// Successful response.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            error: None,
        }
    }

    /// The recognized text, or the service's error.
    ///
    /// # Errors
    ///
    /// Returns [`SignposeError::Recognition`] if the service reported an
    /// error or sent neither field.
    pub fn into_result(self) -> Result<String, SignposeError> {
        if let Some(error) = self.error {
            return Err(SignposeError::Recognition(error));
        }
        self.text
            .map(|text| text.trim().to_owned())
            .ok_or_else(|| {
                SignposeError::Recognition(
                    "response carried neither text nor error".to_owned(),
                )
            })
    }
}

#[cfg(feature = "recognition")]
pub use client::{data_url, RecognitionClient};

#[cfg(feature = "recognition")]
mod client {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use serde::Serialize;

    use super::RecognitionResponse;
    use crate::error::SignposeError;
    use crate::options::RecognitionOptions;

    /// `data:<mime>;base64,<payload>`.
    #[must_use]
    pub fn data_url(mime: &str, bytes: &[u8]) -> String {
        format!("data:{mime};base64,{}", STANDARD.encode(bytes))
    }

    #[derive(Serialize)]
    struct AudioRequest<'a> {
        audio: &'a str,
    }

    #[derive(Serialize)]
    struct ImageRequest<'a> {
        image: &'a str,
    }

    /// Blocking client for both services.
    pub struct RecognitionClient {
        agent: ureq::Agent,
        speech_url: String,
        gesture_url: String,
    }

    impl RecognitionClient {
        /// Client for the configured endpoints.
        #[must_use]
        pub fn new(options: &RecognitionOptions) -> Self {
            Self {
                agent: ureq::Agent::new_with_defaults(),
                speech_url: options.speech_url.clone(),
                gesture_url: options.gesture_url.clone(),
            }
        }

        /// Send a recorded WebM audio clip for transcription.
        ///
        /// # Errors
        ///
        /// Returns [`SignposeError::Recognition`] on transport failure or an
        /// unparsable reply.
        pub fn transcribe_audio(
            &self,
            webm: &[u8],
        ) -> Result<RecognitionResponse, SignposeError> {
            let audio = data_url("audio/webm", webm);
            log::debug!("sending {} bytes of audio", webm.len());
            self.post(&self.speech_url, &AudioRequest { audio: &audio })
        }

        /// Send one JPEG camera frame for gesture classification.
        ///
        /// # Errors
        ///
        /// Returns [`SignposeError::Recognition`] on transport failure or an
        /// unparsable reply.
        pub fn classify_frame(
            &self,
            jpeg: &[u8],
        ) -> Result<RecognitionResponse, SignposeError> {
            let image = data_url("image/jpeg", jpeg);
            log::debug!("sending {} byte frame", jpeg.len());
            self.post(&self.gesture_url, &ImageRequest { image: &image })
        }

        fn post(
            &self,
            url: &str,
            body: &impl Serialize,
        ) -> Result<RecognitionResponse, SignposeError> {
            let mut response = self
                .agent
                .post(url)
                .send_json(body)
                .map_err(|e| SignposeError::Recognition(e.to_string()))?;
            response
                .body_mut()
                .read_json::<RecognitionResponse>()
                .map_err(|e| SignposeError::Recognition(e.to_string()))
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_data_url() {
            assert_eq!(data_url("audio/webm", b"hi"), "data:audio/webm;base64,aGk=");
        }

        #[test]
        fn test_request_shapes() {
            let body =
                serde_json::to_value(ImageRequest { image: "data:x" }).unwrap();
            assert_eq!(body, serde_json::json!({ "image": "data:x" }));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_response() {
        let response: RecognitionResponse =
            serde_json::from_str(r#"{ "text": " thank you \n" }"#).unwrap();
        assert_eq!(response.into_result().unwrap(), "thank you");
    }

    #[test]
    fn test_error_response_wins() {
        let response: RecognitionResponse =
            serde_json::from_str(r#"{ "text": "", "error": "no speech" }"#)
                .unwrap();
        assert!(matches!(
            response.into_result(),
            Err(SignposeError::Recognition(msg)) if msg == "no speech"
        ));
    }

    #[test]
    fn test_empty_response() {
        let response: RecognitionResponse = serde_json::from_str("{}").unwrap();
        assert!(response.into_result().is_err());
    }
}
