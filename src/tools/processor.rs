//! 音频处理模块
//!
//! 串联一次完整的分析会话：加载 → 统计 → 渲染 → 报告。
//! 任一阶段失败都会立即返回，不会写出不完整的报告。

use super::cli::AppConfig;
use super::utils;
use crate::{
    AudioResult,
    audio::{AudioSession, InputKind, Transcoder},
    core::{AnalysisResult, WaveformImage, WaveformRenderer},
    report::ReportAssembler,
};
use std::path::Path;

/// 一次会话的产物
#[derive(Debug, Clone)]
pub struct SessionOutput {
    pub analysis: AnalysisResult,
    pub waveform: WaveformImage,
}

/// 加载并分析单个文件，返回统计结果与波形图（不写报告）
pub fn analyze_file(
    path: &Path,
    config: &AppConfig,
    transcoder: &dyn Transcoder,
) -> AudioResult<SessionOutput> {
    let mut session = AudioSession::open(path)?;

    if config.verbose {
        println!("加载音频文件 / Loading audio file: {}", path.display());
        if session.kind() == InputKind::Compressed {
            println!(
                "[INFO] {} 输入将先转码为PCM / {} input is transcoded to PCM first",
                utils::extract_extension_uppercase(path),
                utils::extract_extension_uppercase(path)
            );
        }
    }

    let audio = session.load(transcoder)?;

    if config.verbose {
        let format = audio.format();
        println!("音频格式信息 / Audio format information:");
        println!("   采样率 / Frame rate:    {} Hz", format.frame_rate);
        println!("   声道数 / Channels:      {}", format.channels);
        println!("   样本宽度 / Sample width: {} bytes", format.sample_width_bytes);
        println!("   帧数 / Frames:          {}", format.frame_count);
    }

    let analysis = audio.analyze()?;
    let waveform = audio.render(&WaveformRenderer::new(config.waveform))?;

    Ok(SessionOutput { analysis, waveform })
}

/// 处理单个音频文件并写出报告
pub fn process_single_audio_file(
    config: &AppConfig,
    transcoder: &dyn Transcoder,
    assembler: &dyn ReportAssembler,
) -> AudioResult<SessionOutput> {
    let output = analyze_file(&config.input_path, config, transcoder)?;
    assembler.assemble(&output.analysis, &output.waveform, &config.output_path)?;
    Ok(output)
}
