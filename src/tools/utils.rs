//! 工具函数模块
//!
//! 文件路径处理等通用工具函数。

use std::path::Path;

/// 提取文件名（统一处理路径提取逻辑）
#[inline]
pub fn extract_filename(path: &Path) -> &str {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("Unknown")
}

/// 提取文件扩展名（大写，用于显示）
#[inline]
pub fn extract_extension_uppercase(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_uppercase())
        .unwrap_or_else(|| "Unknown".to_string())
}
