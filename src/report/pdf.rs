//! 单页PDF报告
//!
//! 直接写出最小化的PDF 1.4文档：标准Type1字体（Helvetica）、一张未压缩RGB图像、
//! 一个内容流。整个文档先在内存中构建，最后一次性写入磁盘。

use super::ReportAssembler;
use crate::core::{AnalysisResult, WaveformImage, humanize_key};
use crate::error::{AudioError, AudioResult};
use crate::tools::constants::report;
use flate2::Compression;
use flate2::write::ZlibEncoder;
use log::debug;
use std::fmt::Write as _;
use std::io::{self, Write as _};
use std::path::Path;

/// PDF报告生成器
#[derive(Debug, Clone)]
pub struct PdfReport {
    title: String,
    /// 是否在标题下方附加生成时间
    timestamp: bool,
}

impl Default for PdfReport {
    fn default() -> Self {
        Self {
            title: report::TITLE.to_string(),
            timestamp: true,
        }
    }
}

impl PdfReport {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// 关闭生成时间行（输出字节可复现）
    pub fn without_timestamp(mut self) -> Self {
        self.timestamp = false;
        self
    }

    /// 在内存中构建完整的PDF文档
    pub fn build(&self, analysis: &AnalysisResult, waveform: &WaveformImage) -> AudioResult<Vec<u8>> {
        let raster = image::load_from_memory(&waveform.png)?.to_rgb8();
        let (img_w, img_h) = raster.dimensions();
        let content = self.content_stream(analysis, waveform, img_w, img_h);

        let mut doc = PdfWriter::new();
        doc.object(b"<< /Type /Catalog /Pages 2 0 R >>");
        doc.object(b"<< /Type /Pages /Kids [3 0 R] /Count 1 >>");
        doc.object(
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] \
                 /Resources << /Font << /F1 4 0 R /F2 5 0 R >> /XObject << /Im1 6 0 R >> >> \
                 /Contents 7 0 R >>",
                report::PAGE_WIDTH,
                report::PAGE_HEIGHT
            )
            .as_bytes(),
        );
        doc.object(b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>");
        doc.object(
            b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>",
        );
        doc.stream(
            &format!(
                "<< /Type /XObject /Subtype /Image /Width {img_w} /Height {img_h} \
                 /ColorSpace /DeviceRGB /BitsPerComponent 8 /Filter /FlateDecode"
            ),
            &zlib_compress(raster.as_raw())?,
        );
        doc.stream("<<", content.as_bytes());

        Ok(doc.finish())
    }

    /// 页面内容：标题、统计行、图例、波形图
    fn content_stream(
        &self,
        analysis: &AnalysisResult,
        waveform: &WaveformImage,
        img_w: u32,
        img_h: u32,
    ) -> String {
        let mut out = String::new();
        let x = report::MARGIN_LEFT;
        let mut y = report::PAGE_HEIGHT - 50.0;

        text_line(&mut out, "F2", 14.0, x, y, &self.title);
        y -= 30.0;

        if self.timestamp {
            let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
            text_line(&mut out, "F1", 9.0, x, y + 12.0, &format!("Generated: {now}"));
        }

        for (key, value) in analysis.fields() {
            text_line(
                &mut out,
                "F1",
                12.0,
                x,
                y,
                &format!("{}: {value}", humanize_key(key)),
            );
            y -= report::LINE_SPACING;
        }

        if waveform.traces.len() > 1 {
            let mut legend_x = x;
            for trace in &waveform.traces {
                let [r, g, b] = trace.color.map(|c| f64::from(c) / 255.0);
                let _ = writeln!(out, "{r:.3} {g:.3} {b:.3} rg");
                text_line(&mut out, "F2", 11.0, legend_x, y, &trace.label);
                legend_x += 60.0;
            }
            out.push_str("0 g\n");
            y -= report::LINE_SPACING;
        }

        // 固定宽度放置，保持宽高比；空间不足时整体缩小
        let mut draw_w = report::IMAGE_WIDTH;
        let mut draw_h = draw_w * f64::from(img_h) / f64::from(img_w);
        let available = y - 10.0 - report::MARGIN_BOTTOM;
        if draw_h > available && available > 0.0 {
            let scale = available / draw_h;
            draw_w *= scale;
            draw_h *= scale;
        }
        let bottom = y - 10.0 - draw_h;
        let _ = writeln!(
            out,
            "q {draw_w:.2} 0 0 {draw_h:.2} {x:.2} {bottom:.2} cm /Im1 Do Q"
        );

        out
    }
}

impl ReportAssembler for PdfReport {
    fn assemble(
        &self,
        analysis: &AnalysisResult,
        waveform: &WaveformImage,
        output: &Path,
    ) -> AudioResult<()> {
        let bytes = self.build(analysis, waveform)?;
        std::fs::write(output, &bytes).map_err(|e| {
            AudioError::IoError(io::Error::new(
                e.kind(),
                format!("{}: {e}", output.display()),
            ))
        })?;
        debug!("wrote {} bytes to {}", bytes.len(), output.display());
        Ok(())
    }
}

fn text_line(out: &mut String, font: &str, size: f64, x: f64, y: f64, text: &str) {
    let _ = writeln!(
        out,
        "BT /{font} {size} Tf {x:.2} {y:.2} Td ({}) Tj ET",
        escape_text(text)
    );
}

/// 图像数据以zlib压缩后嵌入（/FlateDecode）
fn zlib_compress(data: &[u8]) -> AudioResult<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .map_err(|e| AudioError::RenderError(format!("image compress / 图像压缩: {e}")))?;
    encoder
        .finish()
        .map_err(|e| AudioError::RenderError(format!("image compress / 图像压缩: {e}")))
}

/// 转义PDF字符串字面量；非ASCII字符替换为 `?`
fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' | '(' | ')' => {
                escaped.push('\\');
                escaped.push(ch);
            }
            ' '..='~' => escaped.push(ch),
            _ => escaped.push('?'),
        }
    }
    escaped
}

/// 按顺序编号对象并记录xref偏移
struct PdfWriter {
    buf: Vec<u8>,
    offsets: Vec<usize>,
}

impl PdfWriter {
    fn new() -> Self {
        let mut buf = Vec::new();
        buf.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");
        Self {
            buf,
            offsets: Vec::new(),
        }
    }

    fn begin(&mut self) {
        self.offsets.push(self.buf.len());
        let id = self.offsets.len();
        self.buf
            .extend_from_slice(format!("{id} 0 obj\n").as_bytes());
    }

    fn object(&mut self, body: &[u8]) {
        self.begin();
        self.buf.extend_from_slice(body);
        self.buf.extend_from_slice(b"\nendobj\n");
    }

    /// `dict_open` 为未闭合的字典开头，/Length 由此处补齐
    fn stream(&mut self, dict_open: &str, data: &[u8]) {
        self.begin();
        self.buf.extend_from_slice(
            format!("{dict_open} /Length {} >>\nstream\n", data.len()).as_bytes(),
        );
        self.buf.extend_from_slice(data);
        self.buf.extend_from_slice(b"\nendstream\nendobj\n");
    }

    fn finish(mut self) -> Vec<u8> {
        let xref_offset = self.buf.len();
        let count = self.offsets.len() + 1;
        let mut xref = format!("xref\n0 {count}\n0000000000 65535 f \n");
        for offset in &self.offsets {
            let _ = write!(xref, "{offset:010} 00000 n \n");
        }
        let _ = write!(
            xref,
            "trailer\n<< /Size {count} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n"
        );
        self.buf.extend_from_slice(xref.as_bytes());
        self.buf
    }
}
