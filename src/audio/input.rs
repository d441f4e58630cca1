//! 输入类型识别
//!
//! 仅根据扩展名判断输入属于PCM容器还是压缩音频，不触碰文件系统。

use crate::error::{AudioError, AudioResult};
use std::path::Path;

/// PCM容器扩展名
pub const PCM_EXTENSION: &str = "wav";

/// 需要外部转码的压缩音频扩展名
pub const COMPRESSED_EXTENSION: &str = "mp3";

/// 输入文件类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// 可直接读取的PCM容器（.wav）
    Pcm,
    /// 需先转码为PCM容器的压缩音频（.mp3）
    Compressed,
}

impl InputKind {
    /// 根据扩展名识别输入类别（大小写不敏感）
    pub fn from_path(path: &Path) -> AudioResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some(PCM_EXTENSION) => Ok(Self::Pcm),
            Some(COMPRESSED_EXTENSION) => Ok(Self::Compressed),
            Some(other) => Err(AudioError::UnsupportedFormat(format!(
                "{}: .{other} (only .wav and .mp3 are accepted / 仅支持 .wav 和 .mp3)",
                path.display()
            ))),
            None => Err(AudioError::UnsupportedFormat(format!(
                "{}: missing extension / 缺少扩展名",
                path.display()
            ))),
        }
    }

    /// 支持的扩展名列表
    pub fn supported_extensions() -> &'static [&'static str] {
        &[PCM_EXTENSION, COMPRESSED_EXTENSION]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_wav_and_mp3_case_insensitive() {
        assert_eq!(
            InputKind::from_path(Path::new("a/b/song.wav")).unwrap(),
            InputKind::Pcm
        );
        assert_eq!(
            InputKind::from_path(Path::new("SONG.WAV")).unwrap(),
            InputKind::Pcm
        );
        assert_eq!(
            InputKind::from_path(Path::new("track.Mp3")).unwrap(),
            InputKind::Compressed
        );
    }

    #[test]
    fn test_rejects_other_extensions() {
        for name in ["x.flac", "x.ogg", "x.wave", "x"] {
            assert!(matches!(
                InputKind::from_path(Path::new(name)),
                Err(AudioError::UnsupportedFormat(_))
            ));
        }
    }
}
