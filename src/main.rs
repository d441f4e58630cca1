//! Audio Checker - 主程序入口
//!
//! 纯流程控制器，负责协调各个工具模块完成单文件分析与报告生成。

use audio_checker::{
    PdfReport,
    audio::{FfmpegTranscoder, InputKind},
    error::{AudioError, ErrorCategory},
    tools::{self, AppConfig},
};
use std::process;

/// 错误退出码定义
mod exit_codes {
    /// 通用错误
    pub const GENERAL_ERROR: i32 = 1;
    /// 格式/输入错误
    pub const FORMAT_ERROR: i32 = 2;
    /// 解码失败
    pub const DECODING_ERROR: i32 = 3;
    /// 外部转码失败
    pub const TRANSCODE_ERROR: i32 = 4;
}

/// 获取错误建议文本
fn get_error_suggestion(error: &AudioError) -> &'static str {
    match error {
        AudioError::UnsupportedFormat(_) => {
            "仅接受 .wav 与 .mp3 文件 / Only .wav and .mp3 files are accepted"
        }
        AudioError::InvalidFormat(_) => {
            "容器声明的采样率无效，文件头可能已损坏 / The container declares an invalid frame rate, the header may be corrupted"
        }
        AudioError::NotLoaded => {
            "内部流程错误：分析前必须先完成解码 / Internal flow error: decoding must finish before analysis"
        }
        _ => match ErrorCategory::from_audio_error(error) {
            ErrorCategory::Io => {
                "检查文件路径是否正确，文件是否存在且可读写 / Check if file path is correct, file exists and is readable/writable"
            }
            ErrorCategory::Format => {
                "确保输入为16位整数PCM的WAV文件 / Ensure the input is a 16-bit integer PCM WAV file"
            }
            ErrorCategory::Decoding => {
                "文件可能被截断或损坏 / File may be truncated or corrupted"
            }
            ErrorCategory::Transcode => {
                "确认ffmpeg已安装且输入MP3可以正常播放 / Make sure ffmpeg is installed and the MP3 plays correctly"
            }
            ErrorCategory::Other => {
                "请检查输入文件和参数设置 / Please check input file and parameter settings"
            }
        },
    }
}

/// 错误处理和建议
fn handle_error(error: AudioError, config: &AppConfig) -> ! {
    eprintln!("[ERROR] 错误 / Error: {error}");
    eprintln!("   文件 / File: {}", config.input_path.display());

    let category = ErrorCategory::from_audio_error(&error);
    eprintln!("   类别 / Category: {}", category.display_name());
    eprintln!("[INFO] 建议 / Suggestion: {}", get_error_suggestion(&error));

    if matches!(error, AudioError::UnsupportedFormat(_)) {
        let uppercase: Vec<String> = InputKind::supported_extensions()
            .iter()
            .map(|s| s.to_uppercase())
            .collect();
        eprintln!(
            "   Supported formats / 支持的格式: {}",
            uppercase.join(", ")
        );
    }

    let exit_code = match category {
        ErrorCategory::Format => exit_codes::FORMAT_ERROR,
        ErrorCategory::Decoding => exit_codes::DECODING_ERROR,
        ErrorCategory::Transcode => exit_codes::TRANSCODE_ERROR,
        ErrorCategory::Io | ErrorCategory::Other => exit_codes::GENERAL_ERROR,
    };

    process::exit(exit_code);
}

/// 应用程序主逻辑
fn run(config: &AppConfig) -> Result<(), AudioError> {
    tools::show_startup_info(config);

    let transcoder = FfmpegTranscoder::new();
    let assembler = PdfReport::default();
    let output = tools::process_single_audio_file(config, &transcoder, &assembler)?;

    if config.json {
        println!("{}", tools::format_json(&output.analysis)?);
    } else {
        println!(
            "{}",
            tools::format_summary_table(&config.input_path, &output.analysis)
        );
    }

    tools::show_completion_info(config);
    Ok(())
}

fn init_logging(config: &AppConfig) {
    let default_level = if config.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn main() {
    let config = tools::parse_args();
    init_logging(&config);

    if let Err(error) = run(&config) {
        handle_error(error, &config);
    }
}
