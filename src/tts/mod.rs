//! TTS（文字转语音）模块：调用 MiniMax T2A v2 接口将文本合成为音频并保存到本地文件。
//!
//! Pipeline: validate text → build [`SynthesisRequest`] → POST with endpoint
//! failover → check `base_resp` → decode or download `data.audio` → write.

mod client;
mod decode;
mod input;
mod output;
mod types;

pub use client::{SynthesisOutcome, SynthesizedAudio, TtsClient, TtsClientBuilder};
pub use decode::decode_audio;
pub use input::TextSource;
pub use output::{resolve_output_path, write_audio};
pub use types::{
    AudioData, AudioFormat, AudioSetting, BaseResp, ExtraInfo, Model, OutputFormat,
    PronunciationDict, SynthesisRequest, SynthesisResponse, VoiceModify, VoiceSetting,
};
