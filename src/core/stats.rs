//! 幅度统计引擎
//!
//! 从 [`SampleBuffer`] 推导时长、峰值与平均幅度。纯函数，无隐藏状态。

use crate::audio::{AudioFormat, SampleBuffer};
use crate::error::AudioResult;
use serde::{Deserialize, Serialize};

/// 一次分析的统计结果
///
/// 字段顺序即报告中的显示顺序。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub channels: u16,
    pub sample_width: u16,
    pub framerate: u32,
    pub frames: u64,
    pub duration_s: f64,
    /// 所有声道所有帧的最大绝对值（`-32768` 计为 `32768`）
    pub peak_amplitude: u16,
    /// 所有声道所有帧绝对值的算术平均
    pub mean_amplitude: f64,
}

impl AnalysisResult {
    /// 按显示顺序输出 `(字段名, 显示值)`
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("channels", self.channels.to_string()),
            ("sample_width", self.sample_width.to_string()),
            ("framerate", self.framerate.to_string()),
            ("frames", self.frames.to_string()),
            ("duration_s", format_float(self.duration_s)),
            ("peak_amplitude", self.peak_amplitude.to_string()),
            ("mean_amplitude", format_float(self.mean_amplitude)),
        ]
    }
}

/// 浮点数显示：整数值保留一位小数（`1.0`），其余使用最短往返表示
fn format_float(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// 字段名人性化：下划线转空格，每个单词首字母大写（`duration_s` → `Duration S`）
pub fn humanize_key(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// 计算统计结果
///
/// # 错误
///
/// * `AudioError::InvalidFormat` - 帧率为0
pub fn analyze(format: &AudioFormat, buffer: &SampleBuffer) -> AudioResult<AnalysisResult> {
    let duration_s = format.duration_seconds()?;

    let (peak, sum) = buffer
        .samples()
        .iter()
        .fold((0u16, 0u64), |(peak, sum), &sample| {
            let magnitude = sample.unsigned_abs();
            (peak.max(magnitude), sum + u64::from(magnitude))
        });

    let mean_amplitude = if buffer.is_empty() {
        0.0
    } else {
        sum as f64 / buffer.samples().len() as f64
    };

    Ok(AnalysisResult {
        channels: format.channels,
        sample_width: format.sample_width_bytes,
        framerate: format.frame_rate,
        frames: format.frame_count,
        duration_s,
        peak_amplitude: peak,
        mean_amplitude,
    })
}
