//! 音频测试固件生成器
//!
//! 每个测试拥有独立的临时目录，固件在目录内按需生成，测试结束自动清理。

#![allow(dead_code)]

use audio_checker::AudioResult;
use audio_checker::audio::{PcmSource, Transcoder};
use hound::{SampleFormat, WavSpec, WavWriter};
use std::cell::Cell;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub fn log(msg_zh: impl AsRef<str>, msg_en: impl AsRef<str>) {
    println!("{} / {}", msg_zh.as_ref(), msg_en.as_ref());
}

/// 测试固件生成器
pub struct AudioTestFixtures {
    dir: TempDir,
}

impl AudioTestFixtures {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("无法创建测试固件目录");
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn get_path(&self, filename: &str) -> PathBuf {
        self.dir.path().join(filename)
    }

    /// 写入任意16位整数PCM样本（已交错）
    pub fn write_pcm16(&self, filename: &str, channels: u16, rate: u32, samples: &[i16]) -> PathBuf {
        let path = self.get_path(filename);
        write_pcm16_at(&path, channels, rate, samples);
        path
    }

    /// 1秒 44.1kHz 单声道静音
    pub fn create_silence(&self) -> PathBuf {
        let path = self.write_pcm16("silence.wav", 1, 44100, &vec![0i16; 44100]);
        log("  生成 silence.wav (1秒静音)", "  Generated silence.wav (1s silence)");
        path
    }

    /// 立体声满幅方波：左声道 ±32767，右声道 ±16384
    pub fn create_stereo_square(&self) -> PathBuf {
        let mut samples = Vec::with_capacity(8000 * 2);
        for i in 0..8000 {
            let sign = if (i / 40) % 2 == 0 { 1 } else { -1 };
            samples.push(sign * 32767);
            samples.push(sign * 16384);
        }
        let path = self.write_pcm16("stereo_square.wav", 2, 8000, &samples);
        log(
            "  生成 stereo_square.wav (8000 帧)",
            "  Generated stereo_square.wav (8000 frames)",
        );
        path
    }

    /// 24位PCM（不受支持的样本宽度）
    pub fn create_24bit(&self) -> PathBuf {
        let path = self.get_path("pcm24.wav");
        let spec = WavSpec {
            channels: 1,
            sample_rate: 48000,
            bits_per_sample: 24,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(&path, spec).expect("无法创建24位文件");
        for i in 0..480 {
            writer.write_sample(i * 1000).expect("无法写入样本");
        }
        writer.finalize().expect("无法完成写入");
        path
    }

    /// 只有头、没有样本的容器
    pub fn create_zero_length(&self) -> PathBuf {
        self.write_pcm16("zero_length.wav", 2, 44100, &[])
    }

    /// 数据块被截断在半帧处的立体声文件
    pub fn create_truncated(&self) -> PathBuf {
        let source = self.write_pcm16("full.wav", 2, 44100, &vec![1000i16; 2000]);
        let bytes = std::fs::read(&source).expect("无法读取源文件");
        let path = self.get_path("truncated.wav");
        std::fs::write(&path, &bytes[..bytes.len() - 3]).expect("无法写入截断文件");
        path
    }

    /// 扩展名为 .wav 的纯文本
    pub fn create_fake_audio(&self) -> PathBuf {
        let path = self.get_path("fake.wav");
        std::fs::write(&path, b"This is not an audio file").expect("无法写入伪造文件");
        path
    }
}

pub fn write_pcm16_at(path: &Path, channels: u16, rate: u32, samples: &[i16]) {
    let spec = WavSpec {
        channels,
        sample_rate: rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec).expect("无法创建WAV文件");
    for &s in samples {
        writer.write_sample(s).expect("无法写入样本");
    }
    writer.finalize().expect("无法完成写入");
}

/// 伪转码器：把预先给定的样本写入一个会话级临时容器
pub struct FixtureTranscoder {
    pub channels: u16,
    pub rate: u32,
    pub samples: Vec<i16>,
    pub calls: Cell<usize>,
    pub last_temp: Cell<Option<PathBuf>>,
}

impl FixtureTranscoder {
    pub fn new(channels: u16, rate: u32, samples: Vec<i16>) -> Self {
        Self {
            channels,
            rate,
            samples,
            calls: Cell::new(0),
            last_temp: Cell::new(None),
        }
    }

    pub fn last_temp(&self) -> Option<PathBuf> {
        let path = self.last_temp.take();
        self.last_temp.set(path.clone());
        path
    }
}

impl Transcoder for FixtureTranscoder {
    fn normalize(&self, _source: &Path) -> AudioResult<PcmSource> {
        self.calls.set(self.calls.get() + 1);
        let temp = tempfile::Builder::new()
            .prefix("fixture-")
            .suffix(".wav")
            .tempfile()?
            .into_temp_path();
        write_pcm16_at(&temp, self.channels, self.rate, &self.samples);
        self.last_temp.set(Some(temp.to_path_buf()));
        Ok(PcmSource::Temporary(temp))
    }
}

/// 总是失败的转码器（模拟外部解码器非零退出）
pub struct FailingTranscoder;

impl Transcoder for FailingTranscoder {
    fn normalize(&self, source: &Path) -> AudioResult<PcmSource> {
        Err(audio_checker::error::transcode_error(
            &source.display().to_string(),
            "decoder exited with status 1",
        ))
    }
}

/// 把给定字节原样写入临时容器的转码器（模拟输出损坏的外部解码器）
pub struct RawTranscoder {
    pub payload: Vec<u8>,
    pub last_temp: Cell<Option<PathBuf>>,
}

impl RawTranscoder {
    pub fn new(payload: Vec<u8>) -> Self {
        Self {
            payload,
            last_temp: Cell::new(None),
        }
    }

    pub fn last_temp(&self) -> Option<PathBuf> {
        let path = self.last_temp.take();
        self.last_temp.set(path.clone());
        path
    }
}

impl Transcoder for RawTranscoder {
    fn normalize(&self, _source: &Path) -> AudioResult<PcmSource> {
        let temp = tempfile::Builder::new()
            .prefix("fixture-raw-")
            .suffix(".wav")
            .tempfile()?
            .into_temp_path();
        std::fs::write(&temp, &self.payload)?;
        self.last_temp.set(Some(temp.to_path_buf()));
        Ok(PcmSource::Temporary(temp))
    }
}
