//! Voice settings and the reference phrase list

use serde::{Deserialize, Serialize};

/// Voice, speaking rate and pitch used for every phrase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceSettings {
    /// Service voice identifier (default: "en-US-AvaNeural")
    #[serde(default = "default_voice_id")]
    pub voice_id: String,

    /// Rate change in percent (default: +10)
    #[serde(default = "default_rate_percent")]
    pub rate_percent: i32,

    /// Pitch change in Hz (default: +3)
    #[serde(default = "default_pitch_hz")]
    pub pitch_hz: i32,
}

fn default_voice_id() -> String {
    "en-US-AvaNeural".to_string()
}

fn default_rate_percent() -> i32 {
    10
}

fn default_pitch_hz() -> i32 {
    3
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            voice_id: default_voice_id(),
            rate_percent: default_rate_percent(),
            pitch_hz: default_pitch_hz(),
        }
    }
}

impl VoiceSettings {
    /// Signed rate, e.g. `+10%`
    pub fn rate_string(&self) -> String {
        format!("{:+}%", self.rate_percent)
    }

    /// Signed pitch, e.g. `+3Hz`
    pub fn pitch_string(&self) -> String {
        format!("{:+}Hz", self.pitch_hz)
    }
}

/// One phrase and the file it is written to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferencePhrase {
    pub text: String,
    pub file_name: String,
}

impl ReferencePhrase {
    pub fn new(text: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            file_name: file_name.into(),
        }
    }
}

/// The four encouragement phrases
pub fn default_phrases() -> Vec<ReferencePhrase> {
    vec![
        ReferencePhrase::new("You did a great job!", "phrase1.mp3"),
        ReferencePhrase::new("You are so amazing!", "phrase2.mp3"),
        ReferencePhrase::new("So proud of you!", "phrase3.mp3"),
        ReferencePhrase::new("Wow, you are a genius!", "phrase4.mp3"),
    ]
}
