//! T2A v2 request and response types.

use crate::{Error, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Speech models accepted by the T2A v2 endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum Model {
    #[default]
    #[serde(rename = "speech-2.8-hd")]
    #[value(name = "speech-2.8-hd")]
    Speech28Hd,
    #[serde(rename = "speech-2.8-turbo")]
    #[value(name = "speech-2.8-turbo")]
    Speech28Turbo,
    #[serde(rename = "speech-2.6-hd")]
    #[value(name = "speech-2.6-hd")]
    Speech26Hd,
    #[serde(rename = "speech-2.6-turbo")]
    #[value(name = "speech-2.6-turbo")]
    Speech26Turbo,
    #[serde(rename = "speech-02-hd")]
    #[value(name = "speech-02-hd")]
    Speech02Hd,
    #[serde(rename = "speech-02-turbo")]
    #[value(name = "speech-02-turbo")]
    Speech02Turbo,
    #[serde(rename = "speech-01-hd")]
    #[value(name = "speech-01-hd")]
    Speech01Hd,
    #[serde(rename = "speech-01-turbo")]
    #[value(name = "speech-01-turbo")]
    Speech01Turbo,
}

impl Model {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Speech28Hd => "speech-2.8-hd",
            Self::Speech28Turbo => "speech-2.8-turbo",
            Self::Speech26Hd => "speech-2.6-hd",
            Self::Speech26Turbo => "speech-2.6-turbo",
            Self::Speech02Hd => "speech-02-hd",
            Self::Speech02Turbo => "speech-02-turbo",
            Self::Speech01Hd => "speech-01-hd",
            Self::Speech01Turbo => "speech-01-turbo",
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output container formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    #[default]
    Mp3,
    Wav,
    Flac,
    Pcm,
}

impl AudioFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
            Self::Flac => "flac",
            Self::Pcm => "pcm",
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the provider delivers audio: inline encoded bytes or a download URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Hex,
    Url,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoiceSetting {
    pub voice_id: String,
    pub speed: f64,
    pub vol: f64,
    pub pitch: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotion: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AudioSetting {
    pub sample_rate: u32,
    pub bitrate: u32,
    pub format: AudioFormat,
    pub channel: u8,
}

impl Default for AudioSetting {
    fn default() -> Self {
        Self {
            sample_rate: 32000,
            bitrate: 128000,
            format: AudioFormat::Mp3,
            channel: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PronunciationDict {
    pub tone: Vec<String>,
}

/// Post-processing applied to the voice. Only supplied keys are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VoiceModify {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pitch: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intensity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timbre: Option<f64>,
}

impl VoiceModify {
    pub fn is_empty(&self) -> bool {
        self.pitch.is_none() && self.intensity.is_none() && self.timbre.is_none()
    }
}

fn is_false(v: &bool) -> bool {
    !*v
}

/// Body of a synthesis call.
///
/// Optional sub-objects are only serialized when a value was supplied, so an
/// unset emotion or an empty tone list never reaches the wire as a
/// placeholder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SynthesisRequest {
    pub model: Model,
    pub text: String,
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_boost: Option<String>,
    pub voice_setting: VoiceSetting,
    pub audio_setting: AudioSetting,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pronunciation_dict: Option<PronunciationDict>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_modify: Option<VoiceModify>,
    pub output_format: OutputFormat,
    #[serde(skip_serializing_if = "is_false")]
    pub subtitle_enable: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub aigc_watermark: bool,
}

impl SynthesisRequest {
    /// `text` is trimmed; surrounding whitespace never reaches the provider.
    pub fn new(text: impl Into<String>, voice_id: impl Into<String>) -> Self {
        let text: String = text.into();
        Self {
            model: Model::default(),
            text: text.trim().to_string(),
            stream: false,
            language_boost: None,
            voice_setting: VoiceSetting {
                voice_id: voice_id.into(),
                speed: 1.0,
                vol: 1.0,
                pitch: 0,
                emotion: None,
            },
            audio_setting: AudioSetting::default(),
            pronunciation_dict: None,
            voice_modify: None,
            output_format: OutputFormat::default(),
            subtitle_enable: false,
            aigc_watermark: false,
        }
    }

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn with_format(mut self, format: AudioFormat) -> Self {
        self.audio_setting.format = format;
        self
    }

    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.audio_setting.sample_rate = sample_rate;
        self
    }

    pub fn with_bitrate(mut self, bitrate: u32) -> Self {
        self.audio_setting.bitrate = bitrate;
        self
    }

    pub fn with_channel(mut self, channel: u8) -> Self {
        self.audio_setting.channel = channel;
        self
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.voice_setting.speed = speed;
        self
    }

    pub fn with_volume(mut self, volume: f64) -> Self {
        self.voice_setting.vol = volume;
        self
    }

    pub fn with_pitch(mut self, pitch: i32) -> Self {
        self.voice_setting.pitch = pitch;
        self
    }

    pub fn with_emotion(mut self, emotion: Option<String>) -> Self {
        self.voice_setting.emotion = emotion.filter(|e| !e.is_empty());
        self
    }

    pub fn with_language_boost(mut self, language_boost: Option<String>) -> Self {
        self.language_boost = language_boost.filter(|l| !l.is_empty());
        self
    }

    pub fn with_pronunciation_tones(mut self, tones: Vec<String>) -> Self {
        let tone: Vec<String> = tones.into_iter().filter(|t| !t.is_empty()).collect();
        self.pronunciation_dict = if tone.is_empty() {
            None
        } else {
            Some(PronunciationDict { tone })
        };
        self
    }

    pub fn with_voice_modify(mut self, voice_modify: VoiceModify) -> Self {
        self.voice_modify = if voice_modify.is_empty() {
            None
        } else {
            Some(voice_modify)
        };
        self
    }

    pub fn with_output_format(mut self, output_format: OutputFormat) -> Self {
        self.output_format = output_format;
        self
    }

    pub fn with_subtitles(mut self, enabled: bool) -> Self {
        self.subtitle_enable = enabled;
        self
    }

    pub fn with_watermark(mut self, enabled: bool) -> Self {
        self.aigc_watermark = enabled;
        self
    }

    /// Serialize to the UTF-8 JSON body. Non-ASCII text is kept unescaped and
    /// `text` is sent trimmed even if the field was assigned directly.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>> {
        let text = self.text.trim();
        if text.len() == self.text.len() {
            return Ok(serde_json::to_vec(self)?);
        }
        let trimmed = SynthesisRequest {
            text: text.to_string(),
            ..self.clone()
        };
        Ok(serde_json::to_vec(&trimmed)?)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BaseResp {
    #[serde(default)]
    pub status_code: i64,
    #[serde(default)]
    pub status_msg: Option<String>,
    #[serde(default)]
    pub trace_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AudioData {
    #[serde(default)]
    pub audio: Option<String>,
    #[serde(default)]
    pub status: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtraInfo {
    #[serde(default)]
    pub usage_characters: Option<u64>,
    #[serde(default)]
    pub audio_length: Option<u64>,
    #[serde(default)]
    pub audio_size: Option<u64>,
    #[serde(default)]
    pub audio_sample_rate: Option<u64>,
}

/// Parsed synthesis response. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SynthesisResponse {
    #[serde(default)]
    pub base_resp: Option<BaseResp>,
    #[serde(default)]
    pub data: Option<AudioData>,
    #[serde(default)]
    pub extra_info: Option<ExtraInfo>,
    #[serde(default)]
    pub trace_id: Option<String>,
}

impl SynthesisResponse {
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(body)?)
    }

    /// A response without `base_resp` is treated as successful.
    pub fn status_code(&self) -> i64 {
        self.base_resp.as_ref().map(|b| b.status_code).unwrap_or(0)
    }

    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id
            .as_deref()
            .or_else(|| self.base_resp.as_ref().and_then(|b| b.trace_id.as_deref()))
            .filter(|t| !t.is_empty())
    }

    pub fn usage_characters(&self) -> Option<u64> {
        self.extra_info.as_ref().and_then(|e| e.usage_characters)
    }

    pub fn check_status(&self) -> Result<()> {
        let code = self.status_code();
        if code == 0 {
            return Ok(());
        }
        let message = self
            .base_resp
            .as_ref()
            .and_then(|b| b.status_msg.clone())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| "unknown error".to_string());
        Err(Error::Remote {
            code,
            message,
            trace_id: self.trace_id().map(String::from),
        })
    }

    /// The `data.audio` field; absent, null and empty are all errors.
    pub fn audio(&self) -> Result<&str> {
        self.data
            .as_ref()
            .and_then(|d| d.audio.as_deref())
            .filter(|a| !a.is_empty())
            .ok_or(Error::MissingAudio)
    }
}
