//! Comment content validation
//!
//! A comment needs text, an audio reference, or both. Text is trimmed before
//! checking; an all-whitespace text counts as absent.

use crate::shared::error::SharedError;
use url::Url;

/// Maximum comment text length, in characters
pub const MAX_TEXT_CHARS: usize = 2000;

/// Maximum audio reference length, in bytes
pub const MAX_AUDIO_REF_LEN: usize = 2048;

/// Validated comment body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentContent {
    pub text: Option<String>,
    pub audio_ref: Option<String>,
}

impl CommentContent {
    /// Validate raw request fields into a comment body
    pub fn new(text: Option<String>, audio_ref: Option<String>) -> Result<Self, SharedError> {
        let text = text
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        let audio_ref = audio_ref
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty());

        if text.is_none() && audio_ref.is_none() {
            return Err(SharedError::validation(
                "text",
                "Comment must contain text or an audio reference",
            ));
        }

        if let Some(text) = &text {
            let chars = text.chars().count();
            if chars > MAX_TEXT_CHARS {
                return Err(SharedError::validation(
                    "text",
                    format!("Comment text is {} characters, limit is {}", chars, MAX_TEXT_CHARS),
                ));
            }
        }

        if let Some(audio_ref) = &audio_ref {
            validate_audio_ref(audio_ref)?;
        }

        Ok(Self { text, audio_ref })
    }
}

fn validate_audio_ref(raw: &str) -> Result<(), SharedError> {
    if raw.len() > MAX_AUDIO_REF_LEN {
        return Err(SharedError::validation(
            "audioRef",
            format!("Audio reference exceeds {} bytes", MAX_AUDIO_REF_LEN),
        ));
    }
    let url = Url::parse(raw)
        .map_err(|e| SharedError::validation("audioRef", format!("Invalid URL: {}", e)))?;
    match url.scheme() {
        "http" | "https" if url.host().is_some() => Ok(()),
        _ => Err(SharedError::validation(
            "audioRef",
            "Audio reference must be an http(s) URL",
        )),
    }
}
