//! 输出格式化模块
//!
//! 统计结果的控制台表格与JSON输出。

use super::utils;
use crate::AudioResult;
use crate::core::{AnalysisResult, humanize_key};
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table, presets::UTF8_FULL};
use std::path::Path;

/// 统计结果表格（控制台显示）
pub fn format_summary_table(input: &Path, analysis: &AnalysisResult) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new(utils::extract_filename(input)),
            Cell::new("Value / 数值"),
        ]);

    for (key, value) in analysis.fields() {
        table.add_row(vec![
            Cell::new(humanize_key(key)),
            Cell::new(value).set_alignment(CellAlignment::Right),
        ]);
    }

    table.to_string()
}

/// 统计结果JSON（键名与 `AnalysisResult` 字段一致）
pub fn format_json(analysis: &AnalysisResult) -> AudioResult<String> {
    serde_json::to_string_pretty(analysis).map_err(|e| {
        crate::AudioError::RenderError(format!("JSON serialization / JSON序列化: {e}"))
    })
}
