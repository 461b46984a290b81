//! Capability port for the voice assistant.
//!
//! Speech recognition and reply generation are provided by an external
//! integration. The crate only fixes the shape of the exchange.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by voice assistant adapters.
    pub enum VoiceAssistantError {
        /// No assistant integration is configured.
        Unavailable => "voice assistant is not configured",
        /// The integration rejected or failed to process the audio.
        Upstream { message: String } => "voice assistant failed: {message}",
    }
}

/// Transcript of the caller's audio and the assistant's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceReply {
    /// Recognised speech.
    pub transcript: String,
    /// Assistant answer as text.
    pub reply: String,
}

/// Accepts recorded audio and returns a transcript with a reply.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VoiceAssistant: Send + Sync {
    /// Process one utterance.
    async fn converse(&self, audio: &[u8]) -> Result<VoiceReply, VoiceAssistantError>;
}

/// Default adapter reporting the capability as unavailable.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableVoiceAssistant;

#[async_trait]
impl VoiceAssistant for UnavailableVoiceAssistant {
    async fn converse(&self, _audio: &[u8]) -> Result<VoiceReply, VoiceAssistantError> {
        Err(VoiceAssistantError::unavailable())
    }
}
