//! 命令行接口模块
//!
//! 负责命令行参数解析、配置管理和程序信息展示。

use super::constants::{defaults, waveform};
use crate::core::{PlotMode, WaveformConfig};
use clap::{Arg, ArgMatches, Command, value_parser};
use std::path::PathBuf;

/// 应用程序版本信息
const VERSION: &str = env!("CARGO_PKG_VERSION");
const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// 应用程序配置
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// 输入文件路径（.wav 或 .mp3）
    pub input_path: PathBuf,

    /// PDF报告输出路径
    pub output_path: PathBuf,

    /// 是否显示详细信息
    pub verbose: bool,

    /// 是否在标准输出打印JSON统计结果
    pub json: bool,

    /// 波形渲染配置
    pub waveform: WaveformConfig,
}

impl AppConfig {
    /// 以默认选项分析指定文件
    pub fn new(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            verbose: false,
            json: false,
            waveform: WaveformConfig::default(),
        }
    }
}

fn build_command() -> Command {
    Command::new("audio-checker")
        .version(VERSION)
        .about(DESCRIPTION)
        .arg(
            Arg::new("INPUT")
                .help("输入音频文件 (.wav 或 .mp3；MP3需要PATH中有ffmpeg) / Input file (.wav or .mp3)")
                .required(true)
                .index(1)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("PDF报告输出路径 / Output PDF path")
                .value_name("FILE")
                .default_value(defaults::REPORT_FILENAME)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("显示详细处理信息 / Verbose output")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("以JSON格式输出统计结果 / Print statistics as JSON")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("decimate")
                .long("decimate")
                .help("按像素列做最小/最大抽取绘制波形（长音频更快）/ Min/max decimation per pixel column")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("width")
                .long("width")
                .help("波形图宽度（像素）/ Waveform width in pixels")
                .value_name("PX")
                .value_parser(value_parser!(u32).range(i64::from(waveform::MIN_WIDTH)..)),
        )
        .arg(
            Arg::new("height")
                .long("height")
                .help("波形图高度（像素）/ Waveform height in pixels")
                .value_name("PX")
                .value_parser(value_parser!(u32).range(i64::from(waveform::MIN_HEIGHT)..)),
        )
}

fn config_from_matches(matches: &ArgMatches) -> AppConfig {
    let mode = if matches.get_flag("decimate") {
        PlotMode::MinMax
    } else {
        PlotMode::Full
    };

    AppConfig {
        input_path: matches
            .get_one::<PathBuf>("INPUT")
            .cloned()
            .unwrap_or_default(),
        output_path: matches
            .get_one::<PathBuf>("output")
            .cloned()
            .unwrap_or_else(|| PathBuf::from(defaults::REPORT_FILENAME)),
        verbose: matches.get_flag("verbose"),
        json: matches.get_flag("json"),
        waveform: WaveformConfig {
            width: matches
                .get_one::<u32>("width")
                .copied()
                .unwrap_or(waveform::DEFAULT_WIDTH),
            height: matches
                .get_one::<u32>("height")
                .copied()
                .unwrap_or(waveform::DEFAULT_HEIGHT),
            mode,
        },
    }
}

/// 解析命令行参数并创建配置
pub fn parse_args() -> AppConfig {
    config_from_matches(&build_command().get_matches())
}

/// 显示程序启动信息
pub fn show_startup_info(config: &AppConfig) {
    if config.json {
        return;
    }
    println!("Audio Checker v{VERSION}");
    if config.verbose {
        println!("📝 {DESCRIPTION}");
    }
    println!();
}

/// 显示程序完成信息
pub fn show_completion_info(config: &AppConfig) {
    if !config.json {
        println!(
            "[OK] PDF报告已保存 / PDF report saved: {}",
            config.output_path.display()
        );
    }
}
