use serde::{Deserialize, Serialize};

pub const DEFAULT_VOICE_ID: &str = "male-qn-qingse";
pub const DEFAULT_SPEED: f64 = 0.8;

/// Model sent with every upstream call
pub const MODEL: &str = "speech-01-turbo";
pub const VOLUME: f64 = 1.0;
pub const SAMPLE_RATE: u32 = 32_000;
pub const BITRATE: u32 = 128_000;
pub const AUDIO_FORMAT: &str = "mp3";

/// Inbound synthesis request.
///
/// Missing and `null` fields fall back to their defaults. Nothing is
/// validated here: empty text and any speed are forwarded as-is and left for
/// upstream to judge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSynthesisRequest")]
pub struct SynthesisRequest {
    pub text: String,
    pub voice_id: String,
    pub speed: f64,
}

/// Inbound body as sent, before defaults are applied
#[derive(Debug, Default, Deserialize)]
pub struct RawSynthesisRequest {
    pub text: Option<String>,
    pub voice_id: Option<String>,
    pub speed: Option<f64>,
}

impl From<RawSynthesisRequest> for SynthesisRequest {
    fn from(raw: RawSynthesisRequest) -> Self {
        Self {
            text: raw.text.unwrap_or_default(),
            voice_id: raw.voice_id.unwrap_or_else(|| DEFAULT_VOICE_ID.to_string()),
            speed: raw.speed.unwrap_or(DEFAULT_SPEED),
        }
    }
}

impl Default for SynthesisRequest {
    fn default() -> Self {
        Self {
            text: String::new(),
            voice_id: DEFAULT_VOICE_ID.to_string(),
            speed: DEFAULT_SPEED,
        }
    }
}

impl SynthesisRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Short preview of the text for log lines
    pub fn preview(&self, max_chars: usize) -> String {
        let mut preview: String = self.text.chars().take(max_chars).collect();
        if self.text.chars().count() > max_chars {
            preview.push_str("...");
        }
        preview
    }
}

/// Body of `POST /v1/t2a_v2`
#[derive(Debug, Serialize)]
pub struct T2aRequest<'a> {
    pub model: &'a str,
    pub text: &'a str,
    pub voice_setting: VoiceSetting<'a>,
    pub audio_setting: AudioSetting,
}

#[derive(Debug, Serialize)]
pub struct VoiceSetting<'a> {
    pub voice_id: &'a str,
    pub speed: f64,
    pub vol: f64,
}

#[derive(Debug, Serialize)]
pub struct AudioSetting {
    pub sample_rate: u32,
    pub bitrate: u32,
    pub format: &'static str,
}

impl Default for AudioSetting {
    fn default() -> Self {
        Self {
            sample_rate: SAMPLE_RATE,
            bitrate: BITRATE,
            format: AUDIO_FORMAT,
        }
    }
}

impl<'a> T2aRequest<'a> {
    pub fn from_request(req: &'a SynthesisRequest) -> Self {
        Self {
            model: MODEL,
            text: &req.text,
            voice_setting: VoiceSetting {
                voice_id: &req.voice_id,
                speed: req.speed,
                vol: VOLUME,
            },
            audio_setting: AudioSetting::default(),
        }
    }
}
