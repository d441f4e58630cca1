//! 音频格式信息模块
//!
//! 定义PCM容器的格式描述。

use crate::error::{AudioError, AudioResult};

/// 解码器唯一支持的样本宽度（字节），即16位有符号PCM
pub const SUPPORTED_SAMPLE_WIDTH: u16 = 2;

/// 音频格式信息
///
/// 不变式：原始帧数据的字节长度 == `frame_count × channels × sample_width_bytes`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioFormat {
    /// 声道数
    pub channels: u16,
    /// 每个单声道样本的字节数
    pub sample_width_bytes: u16,
    /// 帧率（Hz）
    pub frame_rate: u32,
    /// 总帧数（每帧包含所有声道的一个样本）
    pub frame_count: u64,
}

impl AudioFormat {
    /// 创建新的音频格式
    pub fn new(channels: u16, sample_width_bytes: u16, frame_rate: u32, frame_count: u64) -> Self {
        Self {
            channels,
            sample_width_bytes,
            frame_rate,
            frame_count,
        }
    }

    /// 16位PCM的便捷构造
    pub fn pcm16(channels: u16, frame_rate: u32, frame_count: u64) -> Self {
        Self::new(channels, SUPPORTED_SAMPLE_WIDTH, frame_rate, frame_count)
    }

    /// 每帧字节数（样本宽度 × 声道数）
    pub fn block_align(&self) -> usize {
        self.sample_width_bytes as usize * self.channels as usize
    }

    /// 按不变式计算的原始数据长度（字节），使用饱和乘法防止溢出
    pub fn expected_data_len(&self) -> u64 {
        self.frame_count.saturating_mul(self.block_align() as u64)
    }

    /// 获取持续时长（秒）
    ///
    /// 帧率为0时返回 `InvalidFormat`。
    pub fn duration_seconds(&self) -> AudioResult<f64> {
        if self.frame_rate == 0 {
            return Err(AudioError::InvalidFormat(
                "frame rate must be positive / 帧率必须为正数".to_string(),
            ));
        }
        Ok(self.frame_count as f64 / self.frame_rate as f64)
    }

    /// 获取声道数（usize类型）
    pub fn channels_usize(&self) -> usize {
        self.channels as usize
    }
}
