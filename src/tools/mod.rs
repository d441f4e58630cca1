//! 工具模块集合
//!
//! 包含CLI、处理流程、格式化等工具模块，支持main.rs的流程控制。

pub mod cli;
pub mod constants;
pub mod formatter;
pub mod processor;
pub mod utils;

// 重新导出主要的公共接口
pub use cli::{AppConfig, parse_args, show_completion_info, show_startup_info};
pub use formatter::{format_json, format_summary_table};
pub use processor::{SessionOutput, analyze_file, process_single_audio_file};
