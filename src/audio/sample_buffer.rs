//! 解码后的样本缓冲区
//!
//! 交错存储（`[L0, R0, L1, R1, ...]`），逻辑上是 `frame_count × channels` 的矩阵。
//! 构造后不可变，可以同时借给统计引擎和波形渲染器。

/// 16位有符号样本缓冲区
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleBuffer {
    samples: Vec<i16>,
    channels: usize,
}

impl SampleBuffer {
    /// 从交错样本构造
    ///
    /// 调用方（解码器）保证 `samples.len()` 是 `channels` 的整数倍。
    pub(crate) fn from_interleaved(samples: Vec<i16>, channels: usize) -> Self {
        debug_assert!(channels > 0);
        debug_assert_eq!(samples.len() % channels, 0);
        Self { samples, channels }
    }

    /// 声道数
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// 帧数
    pub fn frame_count(&self) -> usize {
        self.samples.len() / self.channels
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// 交错排列的全部样本
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// 获取第 `index` 帧（每个声道一个样本）
    pub fn frame(&self, index: usize) -> Option<&[i16]> {
        let start = index.checked_mul(self.channels)?;
        self.samples.get(start..start + self.channels)
    }

    /// 按帧迭代
    pub fn frames(&self) -> std::slice::ChunksExact<'_, i16> {
        self.samples.chunks_exact(self.channels)
    }

    /// 去交错：迭代指定声道的样本，声道越界时为空迭代
    pub fn channel(&self, channel: usize) -> impl Iterator<Item = i16> + '_ {
        let skip = if channel < self.channels {
            channel
        } else {
            self.samples.len()
        };
        self.samples
            .iter()
            .skip(skip)
            .step_by(self.channels)
            .copied()
    }
}
