//! 波形渲染器
//!
//! 把 [`SampleBuffer`] 绘制为PNG光栅：x轴为样本索引，y轴为有符号幅度。
//!
//! - 单声道：一条曲线
//! - 多声道：前两个声道分别作为 "Left" / "Right" 曲线共享同一坐标系，其余声道忽略
//!
//! 画布足够大时，标题、坐标轴说明、刻度值与多曲线图例直接绘入光栅（8x8点阵字体），
//! 图片脱离报告单独查看时仍可辨认。
//!
//! 每次调用都创建独立画布并在返回前编码完毕，渲染之间不共享任何状态。

use crate::audio::{AudioFormat, SampleBuffer};
use crate::error::{AudioError, AudioResult};
use crate::tools::constants::waveform;
use font8x8::{BASIC_FONTS, UnicodeFonts};
use image::{ImageFormat, Rgb, RgbImage};
use log::debug;
use std::io::Cursor;

/// 绘制策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlotMode {
    /// 绘制每一个样本，相邻样本以线段相连
    #[default]
    Full,
    /// 每个像素列只绘制该列样本的最小/最大包络，峰值瞬态仍然可见
    MinMax,
}

/// 渲染配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveformConfig {
    pub width: u32,
    pub height: u32,
    pub mode: PlotMode,
}

impl Default for WaveformConfig {
    fn default() -> Self {
        Self {
            width: waveform::DEFAULT_WIDTH,
            height: waveform::DEFAULT_HEIGHT,
            mode: PlotMode::Full,
        }
    }
}

/// 曲线图例
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceLegend {
    pub label: String,
    pub color: [u8; 3],
}

/// 编码后的波形图
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaveformImage {
    /// PNG字节
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// 按绘制顺序排列的曲线
    pub traces: Vec<TraceLegend>,
}

impl WaveformImage {
    pub fn is_empty(&self) -> bool {
        self.png.is_empty()
    }
}

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const AXIS: Rgb<u8> = Rgb([0, 0, 0]);
const GRID: Rgb<u8> = Rgb([220, 220, 220]);
const LEGEND_BORDER: Rgb<u8> = Rgb([160, 160, 160]);
const TRACE_COLORS: [[u8; 3]; 2] = [[31, 119, 180], [255, 127, 14]];

/// 点阵字形边长（像素）
const GLYPH: i64 = 8;

/// 波形渲染器
#[derive(Debug, Clone, Default)]
pub struct WaveformRenderer {
    config: WaveformConfig,
}

impl WaveformRenderer {
    pub fn new(config: WaveformConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WaveformConfig {
        &self.config
    }

    /// 渲染波形并编码为PNG
    ///
    /// # 错误
    ///
    /// * `AudioError::RenderError` - 画布尺寸过小或PNG编码失败
    pub fn render(&self, format: &AudioFormat, buffer: &SampleBuffer) -> AudioResult<WaveformImage> {
        let WaveformConfig {
            width,
            height,
            mode,
        } = self.config;
        if width < waveform::MIN_WIDTH || height < waveform::MIN_HEIGHT {
            return Err(AudioError::RenderError(format!(
                "canvas {width}x{height} is below the {}x{} minimum / 画布尺寸过小",
                waveform::MIN_WIDTH,
                waveform::MIN_HEIGHT
            )));
        }

        let traces = Self::collect_traces(format, buffer);
        let legends: Vec<TraceLegend> = traces.iter().map(|(_, legend)| legend.clone()).collect();

        let mut canvas = Canvas::new(width, height, Self::y_limit(&traces));
        canvas.draw_frame();
        canvas.draw_captions(buffer.frame_count());

        for (samples, legend) in &traces {
            let color = Rgb(legend.color);
            match mode {
                PlotMode::MinMax if samples.len() > canvas.plot_width() as usize => {
                    canvas.plot_min_max(samples, color)
                }
                _ => canvas.plot_full(samples, color),
            }
        }
        canvas.draw_legend(&legends);

        let mut png = Vec::new();
        canvas
            .into_image()
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

        debug!(
            "rendered {} trace(s), {} frames, {width}x{height}, {} PNG bytes",
            legends.len(),
            buffer.frame_count(),
            png.len()
        );

        Ok(WaveformImage {
            png,
            width,
            height,
            traces: legends,
        })
    }

    /// 选取要绘制的声道
    fn collect_traces(format: &AudioFormat, buffer: &SampleBuffer) -> Vec<(Vec<i16>, TraceLegend)> {
        if buffer.channels() == 1 {
            return vec![(
                buffer.samples().to_vec(),
                TraceLegend {
                    label: "Mono".to_string(),
                    color: TRACE_COLORS[0],
                },
            )];
        }

        if format.channels > 2 {
            debug!(
                "{} channels present, only Left/Right are plotted",
                format.channels
            );
        }

        ["Left", "Right"]
            .iter()
            .enumerate()
            .map(|(ch, label)| {
                (
                    buffer.channel(ch).collect::<Vec<i16>>(),
                    TraceLegend {
                        label: (*label).to_string(),
                        color: TRACE_COLORS[ch],
                    },
                )
            })
            .collect()
    }

    /// 对称自动缩放：取绘制曲线的最大幅度并留出5%余量；静音时使用单位范围
    fn y_limit(traces: &[(Vec<i16>, TraceLegend)]) -> f64 {
        let peak = traces
            .iter()
            .flat_map(|(samples, _)| samples.iter())
            .map(|s| s.unsigned_abs())
            .max()
            .unwrap_or(0);
        if peak == 0 {
            1.0
        } else {
            f64::from(peak) * 1.05
        }
    }
}

/// 绘图区边界；`labelled` 为假时只保留窄边距，不绘制任何文字
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    left: u32,
    top: u32,
    right: u32,
    bottom: u32,
    labelled: bool,
}

impl Layout {
    fn new(width: u32, height: u32) -> Self {
        if width >= waveform::LABELLED_MIN_WIDTH && height >= waveform::LABELLED_MIN_HEIGHT {
            // 左侧：纵向说明 + 6位刻度值；上方：2倍标题；下方：刻度值 + 横向说明
            Self {
                left: 72,
                top: 36,
                right: width - 36,
                bottom: height - 37,
                labelled: true,
            }
        } else {
            let margin_x = (width / 12).max(4);
            let margin_y = (height / 12).max(4);
            Self {
                left: margin_x,
                top: margin_y,
                right: width - margin_x / 2 - 1,
                bottom: height - margin_y - 1,
                labelled: false,
            }
        }
    }
}

/// 单次渲染专用画布
struct Canvas {
    image: RgbImage,
    layout: Layout,
    y_limit: f64,
}

impl Canvas {
    fn new(width: u32, height: u32, y_limit: f64) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, BACKGROUND),
            layout: Layout::new(width, height),
            y_limit,
        }
    }

    fn plot_width(&self) -> u32 {
        self.layout.right - self.layout.left + 1
    }

    fn into_image(self) -> RgbImage {
        self.image
    }

    fn x_of(&self, index: usize, len: usize) -> i64 {
        let Layout { left, right, .. } = self.layout;
        if len <= 1 {
            return i64::from(left + right) / 2;
        }
        let span = f64::from(right - left);
        i64::from(left) + (index as f64 * span / (len - 1) as f64).round() as i64
    }

    fn y_of(&self, value: f64) -> i64 {
        let Layout { top, bottom, .. } = self.layout;
        let span = f64::from(bottom - top);
        let normalized = (value / self.y_limit).clamp(-1.0, 1.0);
        let from_top = (1.0 - normalized) / 2.0 * span;
        i64::from(top) + from_top.round() as i64
    }

    /// 刻度值：零线与 ±半量程
    fn y_ticks(&self) -> [f64; 3] {
        let half = self.y_limit / 2.0;
        [half, 0.0, -half]
    }

    fn draw_frame(&mut self) {
        let (l, t, r, b) = self.bounds();
        for value in self.y_ticks() {
            let y = self.y_of(value);
            self.line(l, y, r, y, GRID);
        }
        self.line(l, t, r, t, AXIS);
        self.line(l, b, r, b, AXIS);
        self.line(l, t, l, b, AXIS);
        self.line(r, t, r, b, AXIS);
    }

    /// 标题、坐标轴说明与刻度值
    fn draw_captions(&mut self, len: usize) {
        if !self.layout.labelled {
            return;
        }
        let (l, t, r, b) = self.bounds();

        self.text_centered((l + r) / 2, 10, waveform::TITLE, 2);
        self.text_centered(
            (l + r) / 2,
            i64::from(self.image.height()) - 10,
            waveform::X_LABEL,
            1,
        );
        let caption_len = text_width(waveform::Y_LABEL, 1);
        self.text_vertical(4, (t + b) / 2 + caption_len / 2, waveform::Y_LABEL);

        for value in self.y_ticks() {
            let y = self.y_of(value);
            self.line(l - 4, y, l, y, AXIS);
            let label = tick_label(value);
            let x = l - 6 - text_width(&label, 1);
            self.text(x, y - GLYPH / 2, &label, 1, AXIS);
        }

        let indices = if len <= 1 {
            vec![0]
        } else {
            vec![0, (len - 1) / 2, len - 1]
        };
        for index in indices {
            let x = self.x_of(index, len);
            self.line(x, b, x, b + 4, AXIS);
            self.text_centered(x, b + 7, &index.to_string(), 1);
        }
    }

    /// 图例框（右上角，仅多曲线时绘制，覆盖在曲线之上）
    fn draw_legend(&mut self, legends: &[TraceLegend]) {
        let Some((x0, y0, x1, y1)) = self.legend_rect(legends) else {
            return;
        };
        self.fill_rect(x0, y0, x1 - x0 + 1, y1 - y0 + 1, BACKGROUND);
        self.line(x0, y0, x1, y0, LEGEND_BORDER);
        self.line(x0, y1, x1, y1, LEGEND_BORDER);
        self.line(x0, y0, x0, y1, LEGEND_BORDER);
        self.line(x1, y0, x1, y1, LEGEND_BORDER);

        for (i, legend) in legends.iter().enumerate() {
            let row = y0 + 6 + i as i64 * 12;
            self.fill_rect(x0 + 6, row + 3, 18, 3, Rgb(legend.color));
            self.text(x0 + 30, row, &legend.label, 1, AXIS);
        }
    }

    /// 图例框的包含边界 `(x0, y0, x1, y1)`
    fn legend_rect(&self, legends: &[TraceLegend]) -> Option<(i64, i64, i64, i64)> {
        if !self.layout.labelled || legends.len() < 2 {
            return None;
        }
        let (_, t, r, _) = self.bounds();
        let longest = legends
            .iter()
            .map(|legend| text_width(&legend.label, 1))
            .max()
            .unwrap_or(0);
        let width = 30 + longest + 6;
        let height = legends.len() as i64 * 12 + 8;
        let (x1, y0) = (r - 6, t + 6);
        Some((x1 - width, y0, x1, y0 + height))
    }

    fn plot_full(&mut self, samples: &[i16], color: Rgb<u8>) {
        let len = samples.len();
        let mut prev: Option<(i64, i64)> = None;
        for (i, &sample) in samples.iter().enumerate() {
            let point = (self.x_of(i, len), self.y_of(f64::from(sample)));
            match prev {
                Some((px, py)) => self.line(px, py, point.0, point.1, color),
                None => self.put(point.0, point.1, color),
            }
            prev = Some(point);
        }
    }

    fn plot_min_max(&mut self, samples: &[i16], color: Rgb<u8>) {
        let columns = self.plot_width() as usize;
        let len = samples.len();
        let mut prev: Option<(i64, i64)> = None;
        for col in 0..columns {
            let start = col * len / columns;
            let end = ((col + 1) * len / columns).max(start + 1).min(len);
            let chunk = &samples[start..end];
            let (lo, hi) = chunk
                .iter()
                .fold((i16::MAX, i16::MIN), |(lo, hi), &s| (lo.min(s), hi.max(s)));

            let x = i64::from(self.layout.left) + col as i64;
            let (y_hi, y_lo) = (self.y_of(f64::from(hi)), self.y_of(f64::from(lo)));
            self.line(x, y_hi, x, y_lo, color);
            // 与上一列的包络衔接
            match prev {
                Some((_, prev_bottom)) if prev_bottom < y_hi => {
                    self.line(x, prev_bottom, x, y_hi, color)
                }
                Some((prev_top, _)) if prev_top > y_lo => self.line(x, y_lo, x, prev_top, color),
                _ => {}
            }
            prev = Some((y_hi, y_lo));
        }
    }

    fn bounds(&self) -> (i64, i64, i64, i64) {
        let Layout {
            left,
            top,
            right,
            bottom,
            ..
        } = self.layout;
        (
            i64::from(left),
            i64::from(top),
            i64::from(right),
            i64::from(bottom),
        )
    }

    /// 水平文字，`(x, y)` 为首字形左上角
    fn text(&mut self, x: i64, y: i64, text: &str, scale: i64, color: Rgb<u8>) {
        for (k, ch) in text.chars().enumerate() {
            let Some(glyph) = BASIC_FONTS.get(ch) else {
                continue;
            };
            let cell_x = x + k as i64 * GLYPH * scale;
            for (row, bits) in (0i64..).zip(glyph) {
                for col in 0..GLYPH {
                    if (bits >> col) & 1 == 1 {
                        self.fill_rect(cell_x + col * scale, y + row * scale, scale, scale, color);
                    }
                }
            }
        }
    }

    fn text_centered(&mut self, center_x: i64, y: i64, text: &str, scale: i64) {
        let x = center_x - text_width(text, scale) / 2;
        self.text(x, y, text, scale, AXIS);
    }

    /// 逆时针旋转90°的文字，自下而上书写；`y_bottom` 为首字形底边
    fn text_vertical(&mut self, x: i64, y_bottom: i64, text: &str) {
        for (k, ch) in text.chars().enumerate() {
            let Some(glyph) = BASIC_FONTS.get(ch) else {
                continue;
            };
            let cell_top = y_bottom - (k as i64 + 1) * GLYPH;
            for (row, bits) in (0i64..).zip(glyph) {
                for col in 0..GLYPH {
                    if (bits >> col) & 1 == 1 {
                        self.put(x + row, cell_top + (GLYPH - 1 - col), AXIS);
                    }
                }
            }
        }
    }

    fn fill_rect(&mut self, x: i64, y: i64, w: i64, h: i64, color: Rgb<u8>) {
        for dy in 0..h {
            for dx in 0..w {
                self.put(x + dx, y + dy, color);
            }
        }
    }

    /// Bresenham直线
    fn line(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgb<u8>) {
        let (dx, dy) = ((x1 - x0).abs(), -(y1 - y0).abs());
        let (sx, sy) = (if x0 < x1 { 1 } else { -1 }, if y0 < y1 { 1 } else { -1 });
        let (mut x, mut y, mut err) = (x0, y0, dx + dy);
        loop {
            self.put(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn put(&mut self, x: i64, y: i64, color: Rgb<u8>) {
        if x >= 0 && y >= 0 && x < i64::from(self.image.width()) && y < i64::from(self.image.height())
        {
            self.image.put_pixel(x as u32, y as u32, color);
        }
    }
}

fn text_width(text: &str, scale: i64) -> i64 {
    text.chars().count() as i64 * GLYPH * scale
}

fn tick_label(value: f64) -> String {
    if value == 0.0 || value.abs() >= 10.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}
