//! minimax-tts — 调用 MiniMax T2A v2 接口合成语音并保存为音频文件
//!
//! Usage:
//!   minimax-tts --text "Hello" --voice-id male-qn-qingse --output out.mp3
//!   minimax-tts --text-file speech.txt --voice-id <id> --output out.wav --format wav
//!
//! Prints one JSON object on stdout on success, or `{"ok":false,"error":..}`
//! on stderr with exit code 1.

use clap::error::ErrorKind;
use clap::Parser;
use minimax_tts::report::{to_json_line, FailureReport, SuccessReport};
use minimax_tts::tts::{
    AudioFormat, Model, OutputFormat, SynthesisOutcome, SynthesisRequest, TextSource, TtsClient,
    VoiceModify,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Call MiniMax TTS and save the audio file.
#[derive(Parser, Debug)]
#[command(name = "minimax-tts")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Text content to synthesize
    #[arg(long)]
    text: Option<String>,

    /// Read text from file (UTF-8)
    #[arg(long)]
    text_file: Option<PathBuf>,

    /// MiniMax voice ID
    #[arg(long)]
    voice_id: String,

    /// Output audio file path
    #[arg(long)]
    output: PathBuf,

    /// Audio container format
    #[arg(long, value_enum, default_value_t = AudioFormat::Mp3)]
    format: AudioFormat,

    /// Speech model
    #[arg(long, value_enum, default_value_t = Model::Speech28Hd)]
    model: Model,

    #[arg(long, default_value_t = 32000)]
    sample_rate: u32,

    #[arg(long, default_value_t = 128000)]
    bitrate: u32,

    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=2))]
    channel: u8,

    #[arg(long, default_value_t = 1.0)]
    speed: f64,

    #[arg(long, default_value_t = 1.0)]
    volume: f64,

    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pitch: i32,

    /// Emotion hint (e.g. happy, sad, angry)
    #[arg(long)]
    emotion: Option<String>,

    /// Language boost hint (e.g. auto, Chinese, English)
    #[arg(long)]
    language_boost: Option<String>,

    /// Pronunciation override such as "处理/(chu3)(li3)"; repeatable
    #[arg(long = "pronunciation-tone")]
    pronunciation_tones: Vec<String>,

    /// Audio delivery: inline hex or a download URL
    #[arg(long, value_enum, default_value_t = OutputFormat::Hex)]
    output_format: OutputFormat,

    /// Ask the provider to generate subtitles
    #[arg(long)]
    subtitle_enable: bool,

    /// Ask the provider to embed an AIGC watermark
    #[arg(long)]
    aigc_watermark: bool,

    #[arg(long, allow_negative_numbers = true)]
    voice_modify_pitch: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    voice_modify_intensity: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    voice_modify_timbre: Option<f64>,

    /// Primary endpoint (env: MINIMAX_TTS_ENDPOINT)
    #[arg(long)]
    endpoint: Option<String>,

    /// Backup endpoint tried after a transport failure (env: MINIMAX_TTS_BACKUP_ENDPOINT)
    #[arg(long)]
    backup_endpoint: Option<String>,

    /// API key (env: MINIMAX_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 60)]
    timeout: u64,

    /// Log verbosity on stderr (-v, -vv, -vvv); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => return fail(e.to_string().trim()),
    };

    init_logging(cli.verbose);

    match run(cli) {
        Ok(outcome) => {
            println!("{}", to_json_line(&SuccessReport::from(&outcome)));
            ExitCode::SUCCESS
        }
        Err(e) => fail(&e.to_string()),
    }
}

fn fail(message: &str) -> ExitCode {
    eprintln!("{}", to_json_line(&FailureReport::new(message)));
    ExitCode::FAILURE
}

/// Logging is off by default so stderr carries only the JSON error line.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "off",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run(cli: Cli) -> anyhow::Result<SynthesisOutcome> {
    let text = TextSource::from_args(cli.text, cli.text_file)?.resolve()?;

    let request = SynthesisRequest::new(text, cli.voice_id)
        .with_model(cli.model)
        .with_format(cli.format)
        .with_sample_rate(cli.sample_rate)
        .with_bitrate(cli.bitrate)
        .with_channel(cli.channel)
        .with_speed(cli.speed)
        .with_volume(cli.volume)
        .with_pitch(cli.pitch)
        .with_emotion(cli.emotion)
        .with_language_boost(cli.language_boost)
        .with_pronunciation_tones(cli.pronunciation_tones)
        .with_voice_modify(VoiceModify {
            pitch: cli.voice_modify_pitch,
            intensity: cli.voice_modify_intensity,
            timbre: cli.voice_modify_timbre,
        })
        .with_output_format(cli.output_format)
        .with_subtitles(cli.subtitle_enable)
        .with_watermark(cli.aigc_watermark);

    let client = TtsClient::builder()
        .maybe_api_key(cli.api_key)
        .maybe_endpoint(cli.endpoint)
        .maybe_backup_endpoint(cli.backup_endpoint)
        .timeout_secs(cli.timeout)
        .build()?;

    Ok(client.synthesize_to_file(&request, &cli.output)?)
}
