//! 统一错误处理框架
//!
//! 一次分析会话中所有阶段共用的错误类型。任何错误都会终止当前会话，
//! 内部不做重试；调用方可以整体重跑会话。

use std::fmt;
use std::io;

/// 音频检查相关的统一错误类型
#[derive(Debug)]
pub enum AudioError {
    /// 不支持的输入扩展名（在任何I/O之前检查）
    UnsupportedFormat(String),

    /// 文件I/O错误
    IoError(io::Error),

    /// 容器格式错误：无效WAV、空文件、不支持的位深
    FormatError(String),

    /// 解码错误：原始字节长度与帧对齐不符
    DecodeError(String),

    /// 格式参数无效（采样率为0）
    InvalidFormat(String),

    /// 会话尚未完成解码
    NotLoaded,

    /// 外部转码进程失败
    TranscodeError(String),

    /// 波形光栅编码/解码失败
    RenderError(String),
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioError::UnsupportedFormat(msg) => {
                write!(f, "Unsupported format / 不支持的格式: {msg}")
            }
            AudioError::IoError(err) => write!(f, "I/O error / 文件I/O错误: {err}"),
            AudioError::FormatError(msg) => write!(f, "Format error / 音频格式错误: {msg}"),
            AudioError::DecodeError(msg) => write!(f, "Decode error / 音频解码失败: {msg}"),
            AudioError::InvalidFormat(msg) => {
                write!(f, "Invalid format / 格式参数无效: {msg}")
            }
            AudioError::NotLoaded => write!(
                f,
                "Audio not loaded, decode it first / 音频尚未加载，请先完成解码"
            ),
            AudioError::TranscodeError(msg) => write!(f, "Transcode failed / 转码失败: {msg}"),
            AudioError::RenderError(msg) => write!(f, "Render failed / 渲染失败: {msg}"),
        }
    }
}

impl std::error::Error for AudioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AudioError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for AudioError {
    fn from(err: io::Error) -> Self {
        AudioError::IoError(err)
    }
}

impl From<hound::Error> for AudioError {
    fn from(err: hound::Error) -> Self {
        match err {
            hound::Error::IoError(e) if e.kind() != io::ErrorKind::UnexpectedEof => {
                AudioError::IoError(e)
            }
            other => AudioError::FormatError(format!("WAV container / WAV容器: {other}")),
        }
    }
}

impl From<image::ImageError> for AudioError {
    fn from(err: image::ImageError) -> Self {
        AudioError::RenderError(format!("raster codec / 光栅编解码: {err}"))
    }
}

/// 音频处理操作的标准Result类型
pub type AudioResult<T> = Result<T, AudioError>;

// ==================== 错误转换Helper函数 ====================

/// 创建格式错误的helper函数
#[inline]
pub fn format_error<E: fmt::Display>(context: &str, err: E) -> AudioError {
    AudioError::FormatError(format!("{context}: {err}"))
}

/// 创建解码错误的helper函数
#[inline]
pub fn decode_error<E: fmt::Display>(context: &str, err: E) -> AudioError {
    AudioError::DecodeError(format!("{context}: {err}"))
}

/// 创建转码错误的helper函数
#[inline]
pub fn transcode_error<E: fmt::Display>(context: &str, err: E) -> AudioError {
    AudioError::TranscodeError(format!("{context}: {err}"))
}

// ==================== 错误分类系统 ====================

/// 错误类别枚举（用于退出码和用户建议）
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum ErrorCategory {
    /// 输入相关（扩展名、容器格式、参数）
    Format,
    /// 解码相关（数据损坏、截断）
    Decoding,
    /// I/O相关（文件不存在、权限不足等）
    Io,
    /// 外部转码器相关
    Transcode,
    /// 其他（渲染、会话状态）
    Other,
}

impl ErrorCategory {
    /// 从AudioError提取错误类别
    pub fn from_audio_error(e: &AudioError) -> Self {
        match e {
            AudioError::UnsupportedFormat(_)
            | AudioError::FormatError(_)
            | AudioError::InvalidFormat(_) => Self::Format,
            AudioError::DecodeError(_) => Self::Decoding,
            AudioError::IoError(_) => Self::Io,
            AudioError::TranscodeError(_) => Self::Transcode,
            AudioError::NotLoaded | AudioError::RenderError(_) => Self::Other,
        }
    }

    /// 获取错误类别的显示名称
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Format => "格式错误 / Format",
            Self::Decoding => "解码错误 / Decoding",
            Self::Io => "I/O错误 / I/O",
            Self::Transcode => "转码错误 / Transcode",
            Self::Other => "其他错误 / Other",
        }
    }
}
