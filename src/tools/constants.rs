//! 常量和默认配置集中管理
//!
//! 将所有重要常量集中定义，避免"默认值漂移"和重复定义

/// 默认配置值
pub mod defaults {
    /// 未指定 `--output` 时的报告文件名
    pub const REPORT_FILENAME: &str = "report.pdf";
}

/// 压缩音频转码目标格式
pub mod transcode {
    /// 目标采样率（Hz）
    pub const TARGET_SAMPLE_RATE: u32 = 44_100;

    /// 目标声道数
    pub const TARGET_CHANNELS: u16 = 2;
}

/// 波形光栅尺寸
pub mod waveform {
    /// 默认宽度（像素），对应 6.4in × 100dpi
    pub const DEFAULT_WIDTH: u32 = 640;

    /// 默认高度（像素），对应 4.8in × 100dpi
    pub const DEFAULT_HEIGHT: u32 = 480;

    /// 最小宽度
    pub const MIN_WIDTH: u32 = 64;

    /// 最小高度
    pub const MIN_HEIGHT: u32 = 48;

    /// 绘制标题、坐标轴说明、刻度与图例所需的最小宽度
    pub const LABELLED_MIN_WIDTH: u32 = 320;

    /// 绘制文字所需的最小高度
    pub const LABELLED_MIN_HEIGHT: u32 = 240;

    pub const TITLE: &str = "Waveform";
    pub const X_LABEL: &str = "Samples";
    pub const Y_LABEL: &str = "Amplitude";
}

/// 报告页面几何（PDF点，1/72英寸）
pub mod report {
    /// 报告标题
    pub const TITLE: &str = "Audio Checker Report";

    /// A4宽度
    pub const PAGE_WIDTH: f64 = 595.28;

    /// A4高度
    pub const PAGE_HEIGHT: f64 = 841.89;

    pub const MARGIN_LEFT: f64 = 30.0;

    pub const MARGIN_BOTTOM: f64 = 30.0;

    /// 统计行间距
    pub const LINE_SPACING: f64 = 20.0;

    /// 波形图固定显示宽度
    pub const IMAGE_WIDTH: f64 = 500.0;
}
