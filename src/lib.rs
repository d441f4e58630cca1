//! Audio Checker
//!
//! 读取16位PCM音频（WAV，或经FFmpeg转码的MP3），计算幅度统计，
//! 绘制波形并生成单页PDF报告。
//!
//! ## 处理流程
//! - 扩展名校验（无I/O）→ 必要时转码 → 容器读取 → 样本解码
//! - 统计：时长、峰值幅度、平均幅度
//! - 波形：单声道一条曲线，立体声 Left/Right 两条曲线
//! - 报告：标题 + 统计行 + 波形图

pub mod audio;
pub mod core;
pub mod error;
pub mod report;
pub mod tools;

// 重新导出核心类型
pub use audio::{AudioFormat, AudioSession, LoadedAudio, SampleBuffer};
pub use core::{AnalysisResult, WaveformImage, WaveformRenderer};
pub use error::{AudioError, AudioResult};
pub use report::{PdfReport, ReportAssembler};
