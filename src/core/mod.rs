//! 核心算法模块
//!
//! 幅度统计与波形渲染。两者都只读取已解码的样本缓冲区。

pub mod stats;
pub mod waveform;

// 重新导出公共接口
pub use stats::{AnalysisResult, analyze, humanize_key};
pub use waveform::{PlotMode, TraceLegend, WaveformConfig, WaveformImage, WaveformRenderer};
