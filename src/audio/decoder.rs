//! 样本解码器
//!
//! 将原始字节解包为 [`SampleBuffer`]：每两个字节为一个小端序 i16。
//! 不做重采样、位深转换或削波。

use super::format::{AudioFormat, SUPPORTED_SAMPLE_WIDTH};
use super::sample_buffer::SampleBuffer;
use crate::error::{self, AudioResult};

/// 解码原始PCM字节
///
/// # 错误
///
/// * `AudioError::FormatError` - 声道数为0或样本宽度不是2字节
/// * `AudioError::DecodeError` - 字节长度不是 `样本宽度 × 声道数` 的整数倍，
///   或解出的帧数与 `format.frame_count` 不一致
pub fn decode_samples(format: &AudioFormat, raw: &[u8]) -> AudioResult<SampleBuffer> {
    if format.channels == 0 {
        return Err(error::format_error("channel count / 声道数", 0));
    }
    if format.sample_width_bytes != SUPPORTED_SAMPLE_WIDTH {
        return Err(error::format_error(
            "unsupported sample width / 不支持的样本宽度",
            format!("{} bytes", format.sample_width_bytes),
        ));
    }

    let block_align = format.block_align();
    if raw.len() % block_align != 0 {
        return Err(error::decode_error(
            "frame misalignment / 帧未对齐",
            format!(
                "{} bytes is not a multiple of {block_align} ({} ch × {} bytes)",
                raw.len(),
                format.channels,
                format.sample_width_bytes
            ),
        ));
    }

    let frames = (raw.len() / block_align) as u64;
    if frames != format.frame_count {
        return Err(error::decode_error(
            "frame count mismatch / 帧数不一致",
            format!("header declares {}, data holds {frames}", format.frame_count),
        ));
    }

    let samples = raw
        .chunks_exact(2)
        .map(|chunk| i16::from_le_bytes([chunk[0], chunk[1]]))
        .collect();

    Ok(SampleBuffer::from_interleaved(
        samples,
        format.channels_usize(),
    ))
}
