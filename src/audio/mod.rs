//! 音频读取模块
//!
//! 输入识别 → （压缩格式转码）→ PCM容器读取 → 样本解码，
//! 由 [`AudioSession`] 串联成一次分析会话。

pub mod container;
pub mod decoder;
pub mod format;
pub mod input;
pub mod sample_buffer;
pub mod session;
pub mod transcode;

pub use container::{PcmContainer, read_container};
pub use decoder::decode_samples;
pub use format::{AudioFormat, SUPPORTED_SAMPLE_WIDTH};
pub use input::InputKind;
pub use sample_buffer::SampleBuffer;
pub use session::{AudioSession, LoadedAudio};
pub use transcode::{FfmpegTranscoder, PcmSource, Transcoder};
