//! PCM容器读取器
//!
//! 基于hound解析RIFF/WAVE头部，随后直接读取data块的原始字节。
//! 样本解包交给 [`decoder`](super::decoder) 完成。

use super::format::{AudioFormat, SUPPORTED_SAMPLE_WIDTH};
use crate::error::{self, AudioResult};
use log::{debug, warn};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// 已读入内存的PCM容器：格式 + 原始帧字节
#[derive(Debug, Clone)]
pub struct PcmContainer {
    pub format: AudioFormat,
    pub data: Vec<u8>,
}

/// 读取PCM容器
///
/// 文件句柄只在本函数作用域内存活，任何返回路径都会释放。
///
/// # 错误
///
/// * `AudioError::IoError` - 文件无法打开
/// * `AudioError::FormatError` - 非WAV容器、空文件、零帧、非整数PCM或样本宽度不是2字节
pub fn read_container(path: &Path) -> AudioResult<PcmContainer> {
    let file = File::open(path)?;
    let reader = hound::WavReader::new(BufReader::new(file)).map_err(|e| {
        error::format_error(&format!("{} / 无法解析容器", path.display()), e)
    })?;

    let spec = reader.spec();
    if spec.sample_format != hound::SampleFormat::Int {
        return Err(error::format_error(
            &path.display().to_string(),
            "floating-point samples are not supported / 不支持浮点样本",
        ));
    }

    let sample_width = spec.bits_per_sample.div_ceil(8);
    if sample_width != SUPPORTED_SAMPLE_WIDTH {
        return Err(error::format_error(
            &path.display().to_string(),
            format!(
                "unsupported sample width {sample_width} bytes ({} bits), only 16-bit PCM / 仅支持16位PCM",
                spec.bits_per_sample
            ),
        ));
    }

    let format = AudioFormat::new(
        spec.channels,
        sample_width,
        spec.sample_rate,
        u64::from(reader.duration()),
    );

    if format.frame_count == 0 {
        return Err(error::format_error(
            &path.display().to_string(),
            "container holds no audio frames / 容器不含音频帧",
        ));
    }

    debug!(
        "container {}: {} ch, {} Hz, {} frames",
        path.display(),
        format.channels,
        format.frame_rate,
        format.frame_count
    );

    // hound 在构造时已定位到data块起点
    let expected = format.expected_data_len();
    let mut data = Vec::with_capacity(usize::try_from(expected).unwrap_or(0));
    reader.into_inner().take(expected).read_to_end(&mut data)?;

    if (data.len() as u64) < expected {
        warn!(
            "{}: data chunk truncated, {} of {} bytes present",
            path.display(),
            data.len(),
            expected
        );
    }

    Ok(PcmContainer { format, data })
}
