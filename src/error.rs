//! 에러 타입 정의 모듈
//!
//! jscat2js에서 발생할 수 있는 모든 에러 타입을 정의합니다.

use std::path::PathBuf;
use thiserror::Error;

/// jscat2js에서 발생할 수 있는 에러 타입
#[derive(Error, Debug)]
pub enum JscatError {
    /// 입력 파일이 존재하지 않음
    #[error("입력 파일을 찾을 수 없습니다: {}", path.display())]
    InputNotFound { path: PathBuf },

    /// 입력이 일반 파일이 아님
    #[error("입력 경로가 파일이 아닙니다: {}", path.display())]
    NotAFile { path: PathBuf },

    /// 출력 파일이 이미 존재 (no-clobber 모드에서)
    #[error("출력 파일이 이미 존재합니다: {}", path.display())]
    OutputExists { path: PathBuf },

    /// STEM이 빈 문자열
    #[error("STEM이 비어 있습니다")]
    EmptyStem,

    /// 입력 파일 열기 실패
    #[error("파일을 열 수 없습니다 ({}): {reason}", file.display())]
    FileOpenError { file: PathBuf, reason: String },

    /// 입력 파일 읽기 실패
    #[error("파일 읽기 실패 ({}): {reason}", file.display())]
    ReadError { file: PathBuf, reason: String },

    /// UTF-8 디코딩 실패
    #[error("UTF-8 디코딩 실패 ({}): {reason}", file.display())]
    DecodeError { file: PathBuf, reason: String },

    /// JSON 문자열 인코딩 실패
    #[error("JSON 문자열 인코딩 실패: {reason}")]
    EncodeError { reason: String },

    /// 출력 파일 쓰기 실패
    #[error("파일 쓰기 실패 ({}): {reason}", path.display())]
    WriteError { path: PathBuf, reason: String },
}

/// jscat2js 결과 타입 별칭
pub type Result<T> = std::result::Result<T, JscatError>;
