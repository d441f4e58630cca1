//! 报告组装
//!
//! 报告只消费统计结果与一张波形图，不会触发重新解码。

pub mod pdf;

use crate::core::{AnalysisResult, WaveformImage};
use crate::error::AudioResult;
use std::path::Path;

pub use pdf::PdfReport;

/// 把统计结果与波形图写成单页文档
pub trait ReportAssembler {
    fn assemble(
        &self,
        analysis: &AnalysisResult,
        waveform: &WaveformImage,
        output: &Path,
    ) -> AudioResult<()>;
}
