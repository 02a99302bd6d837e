//! 변환 파이프라인 모듈
//!
//! 입력 파일 읽기, 줄 분리 정책, JS 모듈 렌더링과 출력 쓰기를 담당합니다.

use memmap2::Mmap;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use crate::codegen::{encode_line, render_module};
use crate::error::{JscatError, Result};

/// 입력 파일 확장자
pub const INPUT_EXT: &str = "jscat";

/// 출력 파일 확장자
pub const OUTPUT_EXT: &str = "js";

/// STEM에서 입력 파일 경로를 유도 (STEM.jscat)
pub fn input_path(stem: &str) -> PathBuf {
    PathBuf::from(format!("{}.{}", stem, INPUT_EXT))
}

/// STEM에서 출력 파일 경로를 유도 (STEM.js)
pub fn output_path(stem: &str) -> PathBuf {
    PathBuf::from(format!("{}.{}", stem, OUTPUT_EXT))
}

/// 변환 옵션
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// 줄 끝 문자를 제거하지 않고 그대로 인코딩
    pub keep_eol: bool,
    /// 생성된 join 표현식의 구분자
    pub join_separator: String,
    /// 출력 파일이 이미 존재하면 에러
    pub no_clobber: bool,
    /// 읽기/인코딩만 검사하고 출력은 쓰지 않음
    pub check_only: bool,
    /// 대용량 파일 임계값 (이상이면 메모리 매핑 사용)
    pub mmap_threshold: u64,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            keep_eol: false,
            join_separator: "\n".to_string(),
            no_clobber: false,
            check_only: false,
            mmap_threshold: 10 * 1024 * 1024, // 10MB
        }
    }
}

impl ConvertOptions {
    /// 기본 옵션 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 줄 끝 유지 정책 설정
    pub fn with_keep_eol(mut self, keep_eol: bool) -> Self {
        self.keep_eol = keep_eol;
        self
    }

    /// join 구분자 설정
    pub fn with_join_separator(mut self, separator: impl Into<String>) -> Self {
        self.join_separator = separator.into();
        self
    }

    /// no-clobber 모드 설정
    pub fn with_no_clobber(mut self, no_clobber: bool) -> Self {
        self.no_clobber = no_clobber;
        self
    }

    /// 검사 모드 설정
    pub fn with_check_only(mut self, check_only: bool) -> Self {
        self.check_only = check_only;
        self
    }

    /// 메모리 매핑 임계값 설정
    pub fn with_mmap_threshold(mut self, threshold: u64) -> Self {
        self.mmap_threshold = threshold;
        self
    }
}

/// 변환 결과 리포트
///
/// `--log` 옵션으로 JSON 직렬화되어 기록됩니다.
#[derive(Debug, Serialize)]
pub struct ConvertReport {
    /// 입력 파일 경로
    pub input: PathBuf,
    /// 출력 파일 경로 (검사 모드에서는 None)
    pub output: Option<PathBuf>,
    /// 입력 줄 수
    pub line_count: usize,
    /// 생성된 문자열 리터럴 수 (줄 수 + 합성 빈 문자열 1개)
    pub literal_count: usize,
    /// 읽은 바이트
    pub bytes_read: u64,
    /// 쓴 바이트 (검사 모드에서는 0)
    pub bytes_written: u64,
}

/// 한 개의 jscat 파일을 JS 라인 배열 모듈로 변환
///
/// 입력을 전부 읽고 인코딩과 렌더링을 마친 뒤에야 출력 경로를 엽니다.
/// 따라서 입력이 없거나 읽을 수 없으면 출력 파일은 생성되지 않습니다.
///
/// # Arguments
/// * `stem` - 생성 식별자와 헤더에 들어갈 STEM (비어 있으면 에러)
/// * `input` - 읽을 .jscat 파일 경로
/// * `output` - 생성할 .js 파일 경로
/// * `options` - 변환 옵션
///
/// # Returns
/// 변환 통계를 담은 `ConvertReport`
pub fn convert(
    stem: &str,
    input: &Path,
    output: &Path,
    options: &ConvertOptions,
) -> Result<ConvertReport> {
    if stem.is_empty() {
        return Err(JscatError::EmptyStem);
    }

    let content = read_input(input, options.mmap_threshold)?;
    let lines = split_lines(&content, options.keep_eol);

    let mut encoded = Vec::with_capacity(lines.len());
    for line in &lines {
        encoded.push(encode_line(line)?);
    }

    let rendered = render_module(stem, &encoded, &options.join_separator)?;

    let report = ConvertReport {
        input: input.to_path_buf(),
        output: (!options.check_only).then(|| output.to_path_buf()),
        line_count: lines.len(),
        literal_count: encoded.len() + 1,
        bytes_read: content.len() as u64,
        bytes_written: if options.check_only {
            0
        } else {
            rendered.len() as u64
        },
    };

    if options.check_only {
        return Ok(report);
    }

    if options.no_clobber && output.exists() {
        return Err(JscatError::OutputExists {
            path: output.to_path_buf(),
        });
    }

    write_output(output, &rendered)?;

    Ok(report)
}

/// 입력 파일을 UTF-8 문자열로 읽기
///
/// 임계값 미만은 버퍼 리더, 이상은 메모리 매핑을 사용합니다.
fn read_input(path: &Path, mmap_threshold: u64) -> Result<String> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => JscatError::InputNotFound {
            path: path.to_path_buf(),
        },
        _ => JscatError::FileOpenError {
            file: path.to_path_buf(),
            reason: e.to_string(),
        },
    })?;

    let metadata = file.metadata().map_err(|e| JscatError::FileOpenError {
        file: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    if !metadata.is_file() {
        return Err(JscatError::NotAFile {
            path: path.to_path_buf(),
        });
    }

    if metadata.len() >= mmap_threshold {
        read_with_mmap(path, &file)
    } else {
        read_with_reader(path, file)
    }
}

/// 버퍼 리더를 사용한 읽기
fn read_with_reader(path: &Path, file: File) -> Result<String> {
    let mut reader = BufReader::new(file);
    let mut content = String::new();

    reader
        .read_to_string(&mut content)
        .map_err(|e| match e.kind() {
            ErrorKind::InvalidData => JscatError::DecodeError {
                file: path.to_path_buf(),
                reason: e.to_string(),
            },
            _ => JscatError::ReadError {
                file: path.to_path_buf(),
                reason: e.to_string(),
            },
        })?;

    Ok(content)
}

/// 메모리 매핑을 사용한 읽기 (대용량 파일용)
fn read_with_mmap(path: &Path, file: &File) -> Result<String> {
    let mmap = unsafe {
        Mmap::map(file).map_err(|e| JscatError::ReadError {
            file: path.to_path_buf(),
            reason: format!("메모리 매핑 실패: {}", e),
        })?
    };

    let content = std::str::from_utf8(&mmap).map_err(|e| JscatError::DecodeError {
        file: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    Ok(content.to_string())
}

/// 렌더링 결과를 출력 파일에 쓰기
fn write_output(path: &Path, rendered: &str) -> Result<()> {
    let file = File::create(path).map_err(|e| JscatError::WriteError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut writer = BufWriter::new(file);
    writer
        .write_all(rendered.as_bytes())
        .and_then(|_| writer.flush())
        .map_err(|e| JscatError::WriteError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    Ok(())
}

/// 입력 내용을 줄 단위로 분리
///
/// `keep_eol`이 꺼져 있으면 각 줄의 `\n` 및 그 앞의 `\r`를 제거하고,
/// 켜져 있으면 줄 끝 문자를 그대로 유지합니다. 마지막 줄에 줄 끝 문자가
/// 없으면 그대로 둡니다 (잘라내지 않음).
pub fn split_lines(content: &str, keep_eol: bool) -> Vec<String> {
    content
        .split_inclusive('\n')
        .map(|raw| {
            if keep_eol {
                raw.to_string()
            } else {
                strip_eol(raw).to_string()
            }
        })
        .collect()
}

/// 줄 끝의 `\n` 또는 `\r\n` 제거
fn strip_eol(line: &str) -> &str {
    match line.strip_suffix('\n') {
        Some(rest) => rest.strip_suffix('\r').unwrap_or(rest),
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_paths() {
        assert_eq!(input_path("gallery"), PathBuf::from("gallery.jscat"));
        assert_eq!(output_path("gallery"), PathBuf::from("gallery.js"));
    }

    #[test]
    fn test_split_lines_strips_terminators() {
        let lines = split_lines("a\nb\nc\n", false);
        assert_eq!(lines, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_lines_strips_crlf() {
        let lines = split_lines("a\r\nb\r\n", false);
        assert_eq!(lines, vec!["a", "b"]);
    }

    #[test]
    fn test_split_lines_last_line_without_terminator() {
        let lines = split_lines("a\nb", false);
        assert_eq!(lines, vec!["a", "b"]);
    }

    #[test]
    fn test_split_lines_keep_eol() {
        let lines = split_lines("a\nb\n", true);
        assert_eq!(lines, vec!["a\n", "b\n"]);
    }

    #[test]
    fn test_split_lines_empty_content() {
        assert!(split_lines("", false).is_empty());
        assert!(split_lines("", true).is_empty());
    }

    #[test]
    fn test_split_lines_blank_lines_preserved() {
        let lines = split_lines("a\n\nb\n", false);
        assert_eq!(lines, vec!["a", "", "b"]);
    }

    #[test]
    fn test_convert_options_builder() {
        let options = ConvertOptions::new()
            .with_keep_eol(true)
            .with_join_separator("")
            .with_no_clobber(true)
            .with_check_only(false)
            .with_mmap_threshold(1);

        assert!(options.keep_eol);
        assert_eq!(options.join_separator, "");
        assert!(options.no_clobber);
        assert!(!options.check_only);
        assert_eq!(options.mmap_threshold, 1);
    }

    #[test]
    fn test_report_serializes_for_log() {
        let report = ConvertReport {
            input: PathBuf::from("demo.jscat"),
            output: Some(PathBuf::from("demo.js")),
            line_count: 2,
            literal_count: 3,
            bytes_read: 12,
            bytes_written: 90,
        };

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["input"], "demo.jscat");
        assert_eq!(value["output"], "demo.js");
        assert_eq!(value["line_count"], 2);
        assert_eq!(value["literal_count"], 3);
        assert_eq!(value["bytes_written"], 90);
    }

    #[test]
    fn test_convert_rejects_empty_stem() {
        let options = ConvertOptions::new();
        let result = convert(
            "",
            Path::new("missing.jscat"),
            Path::new("missing.js"),
            &options,
        );
        assert!(matches!(result, Err(JscatError::EmptyStem)));
    }
}
