//! 错误路径和异常场景测试
//!
//! 验证每一种失败都以明确的错误类型返回，且不会产生报告文件。

mod audio_test_fixtures;

use audio_checker::audio::{AudioSession, decode_samples, read_container};
use audio_checker::core::WaveformRenderer;
use audio_checker::error::{AudioError, ErrorCategory};
use audio_checker::tools::{self, AppConfig};
use audio_checker::{AudioFormat, PdfReport};
use audio_test_fixtures::{AudioTestFixtures, FailingTranscoder, log};
use std::path::Path;

#[test]
fn test_unsupported_extension_fails_before_io() {
    log("测试不支持的扩展名", "Testing unsupported extensions");
    // 文件不存在：若发生了I/O将得到IoError而非UnsupportedFormat
    for name in ["/nonexistent/track.flac", "/nonexistent/noext", "/nonexistent/x.WAVE"] {
        let err = AudioSession::open(name).unwrap_err();
        assert!(matches!(err, AudioError::UnsupportedFormat(_)), "{name}: {err:?}");
        assert_eq!(ErrorCategory::from_audio_error(&err), ErrorCategory::Format);
    }
}

#[test]
fn test_extension_check_is_case_insensitive() {
    assert!(AudioSession::open("/nonexistent/LOUD.WAV").is_ok());
    assert!(AudioSession::open("/nonexistent/Song.Mp3").is_ok());
}

#[test]
fn test_nonexistent_file_is_io_error() {
    let mut session = AudioSession::open("/nonexistent/file.wav").unwrap();
    let err = session.load(&FailingTranscoder).unwrap_err();
    assert!(matches!(err, AudioError::IoError(_)), "got {err:?}");
}

#[test]
fn test_unloaded_session_rejects_analysis() {
    let session = AudioSession::open("/nonexistent/file.wav").unwrap();
    assert!(matches!(session.analyze(), Err(AudioError::NotLoaded)));
    assert!(matches!(
        session.render(&WaveformRenderer::default()),
        Err(AudioError::NotLoaded)
    ));
}

#[test]
fn test_container_format_errors() {
    let fixtures = AudioTestFixtures::new();
    for path in [
        fixtures.create_fake_audio(),
        fixtures.create_24bit(),
        fixtures.create_zero_length(),
    ] {
        let err = read_container(&path).unwrap_err();
        assert!(
            matches!(err, AudioError::FormatError(_)),
            "{}: {err:?}",
            path.display()
        );
    }

    let empty = fixtures.get_path("empty.wav");
    std::fs::write(&empty, b"").unwrap();
    assert!(matches!(
        read_container(&empty),
        Err(AudioError::FormatError(_))
    ));
}

#[test]
fn test_truncated_data_is_decode_error() {
    log("测试截断文件", "Testing a truncated data chunk");
    let fixtures = AudioTestFixtures::new();
    let input = fixtures.create_truncated();
    let output = fixtures.get_path("report.pdf");

    let config = AppConfig::new(&input, &output);
    let result = tools::process_single_audio_file(&config, &FailingTranscoder, &PdfReport::default());

    let err = result.unwrap_err();
    assert!(matches!(err, AudioError::DecodeError(_)), "got {err:?}");
    assert_eq!(ErrorCategory::from_audio_error(&err), ErrorCategory::Decoding);
    assert!(!output.exists());
}

#[test]
fn test_decoder_rejects_partial_frames() {
    let format = AudioFormat::pcm16(2, 44100, 2);
    // 7字节无法整除4字节的帧
    let err = decode_samples(&format, &[0u8; 7]).unwrap_err();
    assert!(matches!(err, AudioError::DecodeError(_)));

    // 帧数与头部声明不符
    let err = decode_samples(&format, &[0u8; 12]).unwrap_err();
    assert!(matches!(err, AudioError::DecodeError(_)));

    let buffer = decode_samples(&format, &[0u8; 8]).unwrap();
    assert_eq!(buffer.frame_count(), 2);
}

#[test]
fn test_unwritable_report_path_is_io_error() {
    let fixtures = AudioTestFixtures::new();
    let input = fixtures.create_silence();
    let output = fixtures.dir().join("missing-dir").join("report.pdf");

    let config = AppConfig::new(&input, &output);
    let err = tools::process_single_audio_file(&config, &FailingTranscoder, &PdfReport::default())
        .unwrap_err();
    assert!(matches!(err, AudioError::IoError(_)), "got {err:?}");
    assert!(!Path::new(&output).exists());
}
