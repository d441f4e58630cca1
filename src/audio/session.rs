//! 分析会话
//!
//! 会话显式区分 `Unloaded` 与 `Loaded` 两种状态。统计与渲染只能在
//! [`LoadedAudio`] 上调用；持有 `LoadedAudio` 即意味着解码已经完成。

use super::container::read_container;
use super::decoder::decode_samples;
use super::format::AudioFormat;
use super::input::InputKind;
use super::sample_buffer::SampleBuffer;
use super::transcode::{PcmSource, Transcoder};
use crate::core::{AnalysisResult, WaveformImage, WaveformRenderer, analyze};
use crate::error::{AudioError, AudioResult};
use log::info;
use std::path::{Path, PathBuf};

/// 已解码的音频：格式 + 不可变样本缓冲区
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedAudio {
    source: PathBuf,
    kind: InputKind,
    format: AudioFormat,
    buffer: SampleBuffer,
}

impl LoadedAudio {
    /// 从原始字节构造（容器读取之后的解码步骤）
    pub fn decode(
        source: impl Into<PathBuf>,
        kind: InputKind,
        format: AudioFormat,
        raw: &[u8],
    ) -> AudioResult<Self> {
        let buffer = decode_samples(&format, raw)?;
        Ok(Self {
            source: source.into(),
            kind,
            format,
            buffer,
        })
    }

    /// 原始输入路径（转码前）
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// 原始输入的类别（决定是否经过转码）
    pub fn kind(&self) -> InputKind {
        self.kind
    }

    pub fn format(&self) -> &AudioFormat {
        &self.format
    }

    pub fn buffer(&self) -> &SampleBuffer {
        &self.buffer
    }

    /// 计算统计结果
    pub fn analyze(&self) -> AudioResult<AnalysisResult> {
        analyze(&self.format, &self.buffer)
    }

    /// 渲染波形
    pub fn render(&self, renderer: &WaveformRenderer) -> AudioResult<WaveformImage> {
        renderer.render(&self.format, &self.buffer)
    }
}

/// 分析会话
#[derive(Debug)]
pub enum AudioSession {
    /// 已通过扩展名校验、尚未解码
    Unloaded { input: PathBuf, kind: InputKind },
    Loaded(LoadedAudio),
}

impl AudioSession {
    /// 创建会话；扩展名不受支持时在任何I/O之前失败
    pub fn open(input: impl Into<PathBuf>) -> AudioResult<Self> {
        let input = input.into();
        let kind = InputKind::from_path(&input)?;
        Ok(Self::Unloaded { input, kind })
    }

    pub fn input(&self) -> &Path {
        match self {
            Self::Unloaded { input, .. } => input.as_path(),
            Self::Loaded(audio) => audio.source(),
        }
    }

    /// 输入类别，`open` 时已确定
    pub fn kind(&self) -> InputKind {
        match self {
            Self::Unloaded { kind, .. } => *kind,
            Self::Loaded(audio) => audio.kind(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    /// 执行加载：必要时转码，读取容器，释放临时文件，解码
    ///
    /// 已加载的会话直接返回现有数据，不会重复解码。
    pub fn load(&mut self, transcoder: &dyn Transcoder) -> AudioResult<&LoadedAudio> {
        if let Self::Unloaded { input, kind } = self {
            let audio = load_audio(input, *kind, transcoder)?;
            *self = Self::Loaded(audio);
        }
        self.loaded()
    }

    /// 获取已加载的音频，未加载时返回 `NotLoaded`
    pub fn loaded(&self) -> AudioResult<&LoadedAudio> {
        match self {
            Self::Loaded(audio) => Ok(audio),
            Self::Unloaded { .. } => Err(AudioError::NotLoaded),
        }
    }

    /// 计算统计结果（要求已加载）
    pub fn analyze(&self) -> AudioResult<AnalysisResult> {
        self.loaded()?.analyze()
    }

    /// 渲染波形（要求已加载）
    pub fn render(&self, renderer: &WaveformRenderer) -> AudioResult<WaveformImage> {
        self.loaded()?.render(renderer)
    }
}

fn load_audio(input: &Path, kind: InputKind, transcoder: &dyn Transcoder) -> AudioResult<LoadedAudio> {
    let pcm = match kind {
        InputKind::Pcm => PcmSource::Existing(input.to_path_buf()),
        InputKind::Compressed => transcoder.normalize(input)?,
    };

    // 错误路径上 pcm 被drop，临时文件同样会被删除
    let container = read_container(pcm.path())?;
    pcm.release();

    info!(
        "loaded {}: {} ch, {} Hz, {} frames",
        input.display(),
        container.format.channels,
        container.format.frame_rate,
        container.format.frame_count
    );

    LoadedAudio::decode(input, kind, container.format, &container.data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// 记录调用次数的转码器，返回预先准备好的容器
    struct FixtureTranscoder {
        fixture: PathBuf,
        calls: Cell<usize>,
    }

    impl Transcoder for FixtureTranscoder {
        fn normalize(&self, _source: &Path) -> AudioResult<PcmSource> {
            self.calls.set(self.calls.get() + 1);
            Ok(PcmSource::Existing(self.fixture.clone()))
        }
    }

    fn write_fixture(path: &Path, channels: u16, samples: &[i16]) {
        let spec = hound::WavSpec {
            channels,
            sample_rate: 44100,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_unloaded_session_reports_not_loaded() {
        let session = AudioSession::open("never/read.wav").unwrap();
        assert!(!session.is_loaded());
        assert!(matches!(session.analyze(), Err(AudioError::NotLoaded)));
        assert!(matches!(
            session.render(&WaveformRenderer::default()),
            Err(AudioError::NotLoaded)
        ));
    }

    #[test]
    fn test_unsupported_extension_fails_before_io() {
        let result = AudioSession::open("/nonexistent/path/track.flac");
        assert!(matches!(result, Err(AudioError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_pcm_input_skips_transcoder() {
        let dir = tempfile::tempdir().unwrap();
        let wav = dir.path().join("tone.wav");
        write_fixture(&wav, 1, &[1, -2, 3, -4]);

        let transcoder = FixtureTranscoder {
            fixture: PathBuf::from("unused.wav"),
            calls: Cell::new(0),
        };
        let mut session = AudioSession::open(&wav).unwrap();
        let audio = session.load(&transcoder).unwrap();
        assert_eq!(audio.buffer().samples(), &[1, -2, 3, -4]);
        assert_eq!(transcoder.calls.get(), 0);
        assert_eq!(audio.kind(), InputKind::Pcm);

        let result = session.analyze().unwrap();
        assert_eq!(result.peak_amplitude, 4);
        assert!(wav.exists());
    }

    #[test]
    fn test_compressed_input_uses_transcoder_once() {
        let dir = tempfile::tempdir().unwrap();
        let fixture = dir.path().join("normalized.wav");
        write_fixture(&fixture, 2, &[10, -10, 20, -20]);

        let transcoder = FixtureTranscoder {
            fixture: fixture.clone(),
            calls: Cell::new(0),
        };
        let mut session = AudioSession::open("album/track.mp3").unwrap();
        assert_eq!(session.kind(), InputKind::Compressed);
        session.load(&transcoder).unwrap();
        session.load(&transcoder).unwrap();

        assert_eq!(transcoder.calls.get(), 1);
        assert_eq!(session.kind(), InputKind::Compressed);
        let audio = session.loaded().unwrap();
        assert_eq!(audio.source(), Path::new("album/track.mp3"));
        assert_eq!(audio.format().channels, 2);
        assert_eq!(audio.buffer().frame(1), Some(&[20, -20][..]));
        assert!(fixture.exists(), "caller-owned container must survive");
    }
}
