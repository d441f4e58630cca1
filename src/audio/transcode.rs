//! 压缩音频转码
//!
//! 压缩输入先交给外部解码器（FFmpeg）规范化为 44.1kHz / 双声道 / 16位小端PCM 的WAV容器，
//! 再走常规的容器读取流程。转码能力以 [`Transcoder`] trait 注入，测试时可替换为固件实现。

use crate::error::{self, AudioResult};
use crate::tools::constants::transcode;
use log::{debug, info, warn};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tempfile::TempPath;

/// FFmpeg安装指南（跨平台）
const FFMPEG_INSTALL_GUIDE: &str = r#"
FFmpeg is required for MP3 support / 需要安装FFmpeg以支持MP3格式

Installation / 安装方法:
  macOS:   brew install ffmpeg
  Windows: https://www.gyan.dev/ffmpeg/builds/ (推荐Full版本)
           或使用: winget install Gyan.FFmpeg
  Linux:
    - Ubuntu/Debian: sudo apt install ffmpeg
    - Fedora/RHEL:   sudo dnf install ffmpeg
    - Arch:          sudo pacman -S ffmpeg

Official site / 官方网站: https://ffmpeg.org/download.html
"#;

/// 规范化后的PCM容器位置
///
/// `Temporary` 由会话独占，[`release`](Self::release) 或 drop 时删除；
/// `Existing` 指向调用方拥有的文件，永不删除。
#[derive(Debug)]
pub enum PcmSource {
    Existing(PathBuf),
    Temporary(TempPath),
}

impl PcmSource {
    pub fn path(&self) -> &Path {
        match self {
            PcmSource::Existing(path) => path.as_path(),
            PcmSource::Temporary(temp) => &**temp,
        }
    }

    pub fn is_temporary(&self) -> bool {
        matches!(self, PcmSource::Temporary(_))
    }

    /// 释放临时文件；删除失败只记录警告，不影响会话结果
    pub fn release(self) {
        if let PcmSource::Temporary(temp) = self {
            let display = temp.display().to_string();
            match temp.close() {
                Ok(()) => debug!("removed temporary container {display}"),
                Err(e) => warn!("failed to remove temporary container {display}: {e}"),
            }
        }
    }
}

/// 转码能力：把压缩音频规范化为PCM容器
pub trait Transcoder {
    fn normalize(&self, source: &Path) -> AudioResult<PcmSource>;
}

/// 基于FFmpeg子进程的转码器
#[derive(Debug, Clone)]
pub struct FfmpegTranscoder {
    program: PathBuf,
    sample_rate: u32,
    channels: u16,
}

impl Default for FfmpegTranscoder {
    fn default() -> Self {
        Self::new()
    }
}

impl FfmpegTranscoder {
    /// 使用PATH中的ffmpeg
    pub fn new() -> Self {
        Self::with_program(Self::default_program())
    }

    /// 指定ffmpeg可执行文件
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            sample_rate: transcode::TARGET_SAMPLE_RATE,
            channels: transcode::TARGET_CHANNELS,
        }
    }

    fn default_program() -> PathBuf {
        if cfg!(target_os = "windows") {
            PathBuf::from("ffmpeg.exe")
        } else {
            PathBuf::from("ffmpeg")
        }
    }

    /// 检测FFmpeg是否可用
    pub fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    /// 构建FFmpeg命令参数
    fn build_args(&self, source: &Path, target: &Path) -> Vec<OsString> {
        let rate = self.sample_rate.to_string();
        let channels = self.channels.to_string();

        let mut args: Vec<OsString> = Vec::with_capacity(12);
        args.extend(["-y", "-v", "error", "-i"].map(OsString::from));
        args.push(source.as_os_str().to_owned());
        args.extend(
            [
                "-ar",
                rate.as_str(),
                "-ac",
                channels.as_str(),
                "-acodec",
                "pcm_s16le",
            ]
            .map(OsString::from),
        );
        args.push(target.as_os_str().to_owned());
        args
    }
}

impl Transcoder for FfmpegTranscoder {
    fn normalize(&self, source: &Path) -> AudioResult<PcmSource> {
        let target = tempfile::Builder::new()
            .prefix("audio-checker-")
            .suffix(".wav")
            .tempfile()?
            .into_temp_path();

        info!(
            "transcoding {} -> {} ({} Hz, {} ch, s16le)",
            source.display(),
            target.display(),
            self.sample_rate,
            self.channels
        );

        let output = Command::new(&self.program)
            .args(self.build_args(source, &target))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| {
                error::transcode_error(
                    &format!("failed to spawn {} / 无法启动FFmpeg", self.program.display()),
                    format!("{e}\n{FFMPEG_INSTALL_GUIDE}"),
                )
            })?;

        if !output.status.success() {
            // target 在此处drop，临时文件随之删除
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(error::transcode_error(
                &source.display().to_string(),
                format!(
                    "ffmpeg exited with {} / FFmpeg退出状态非零: {}",
                    output.status,
                    stderr.trim()
                ),
            ));
        }

        Ok(PcmSource::Temporary(target))
    }
}
