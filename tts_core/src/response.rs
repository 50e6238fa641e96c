use serde::Deserialize;
use serde_json::Value;

use crate::codec;
use crate::error::SynthesisError;
use crate::request::AUDIO_FORMAT;

/// Response of `POST /v1/t2a_v2`.
///
/// Fields are kept loosely typed: a missing or oddly typed status or audio
/// is a rejection, not a parse failure.
#[derive(Debug, Default, Deserialize)]
pub struct T2aResponse {
    pub base_resp: Option<BaseResp>,
    pub data: Option<Value>,
    /// Absent means `{}`; anything present, `null` included, is kept as sent
    #[serde(default = "empty_extra_info")]
    pub extra_info: Value,
}

#[derive(Debug, Default, Deserialize)]
pub struct BaseResp {
    pub status_code: Option<Value>,
    pub status_msg: Option<Value>,
}

fn empty_extra_info() -> Value {
    Value::Object(Default::default())
}

/// Decoded audio ready to hand to a client
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesizedAudio {
    pub audio: Vec<u8>,
    pub format: &'static str,
    pub extra_info: Value,
}

impl SynthesizedAudio {
    pub fn audio_base64(&self) -> String {
        codec::encode_base64(&self.audio)
    }

    /// Upstream usage figure from `extra_info`, if reported
    pub fn usage(&self, key: &str) -> Option<&Value> {
        self.extra_info.get(key)
    }
}

fn is_numeric_zero(v: &Value) -> bool {
    v.as_f64() == Some(0.0)
}

/// Turn a parsed upstream body into audio or a rejection.
///
/// Succeeds only when `base_resp.status_code` is numeric zero and
/// `data.audio` is a non-empty string. The status is checked first, so a
/// non-zero status is a rejection whatever `data` holds.
pub fn interpret_response(resp: T2aResponse) -> Result<SynthesizedAudio, SynthesisError> {
    let (status, status_msg) = match resp.base_resp {
        Some(base) => (base.status_code, base.status_msg),
        None => (None, None),
    };

    let rejected = || SynthesisError::Rejected {
        status_code: status
            .as_ref()
            .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64))),
        status_msg: status_msg.as_ref().map(|m| match m.as_str() {
            Some(s) => s.to_string(),
            None => m.to_string(),
        }),
    };

    if !status.as_ref().is_some_and(is_numeric_zero) {
        return Err(rejected());
    }

    let hex_audio = match resp
        .data
        .as_ref()
        .and_then(|d| d.get("audio"))
        .and_then(Value::as_str)
        .filter(|audio| !audio.is_empty())
    {
        Some(audio) => audio,
        None => return Err(rejected()),
    };

    let audio = codec::decode_hex(hex_audio)?;

    Ok(SynthesizedAudio {
        audio,
        format: AUDIO_FORMAT,
        extra_info: resp.extra_info,
    })
}
