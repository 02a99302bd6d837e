//! CLI 인자 파싱 모듈
//!
//! clap을 사용한 명령줄 인자 정의 및 파싱을 담당합니다.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// STEM 인자가 생략되었을 때 사용하는 기본 STEM
pub const DEFAULT_STEM: &str = "gallery";

/// 고정 usage 한 줄 출력 (help 의사 플래그 및 usage 에러 시)
pub const USAGE_LINE: &str = "usage: jscat2js EXAMPLE.jscat EXAMPLE.js";

/// 첫 번째 인자가 help 의사 플래그인지 확인
///
/// `help`, `-h`, `--help` 세 가지를 인식합니다. clap의 자동 help 플래그는
/// 비활성화되어 있으므로 이 함수가 유일한 help 경로입니다.
pub fn is_help_token(arg: &str) -> bool {
    matches!(arg, "help" | "-h" | "--help")
}

/// join 구분자 모드
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq)]
pub enum JoinMode {
    /// 줄바꿈 문자("\n")로 join
    #[default]
    Newline,
    /// 빈 문자열("")로 join
    Empty,
}

impl JoinMode {
    /// 생성된 join 표현식에 들어갈 실제 구분자 문자열
    pub fn separator(self) -> &'static str {
        match self {
            JoinMode::Newline => "\n",
            JoinMode::Empty => "",
        }
    }
}

impl std::fmt::Display for JoinMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JoinMode::Newline => write!(f, "Newline"),
            JoinMode::Empty => write!(f, "Empty"),
        }
    }
}

/// jscat2js CLI 인자 구조체
#[derive(Parser, Debug)]
#[command(
    name = "jscat2js",
    author = "YourName <your@email.com>",
    version,
    disable_help_flag = true,
    about = "JSCAT TO JS CONVERTER - .jscat 텍스트 파일을 JS 라인 배열 소스로 변환하는 CLI 도구",
    long_about = r#"
JSCAT TO JS CONVERTER
=====================

STEM.jscat 텍스트 파일을 읽어 각 줄을 JSON 문자열 리터럴로 인코딩하고,
런타임에 join으로 원문을 복원하는 라인 배열 선언을 담은 STEM.js 파일을
생성합니다.

특징:
  • 모든 리터럴을 엄격한 JSON 인코딩으로 생성 (따옴표/제어문자 이스케이프 보장)
  • 줄 끝 처리 정책 선택 (기본: 줄바꿈 제거 후 "\n" join)
  • 대용량 입력 파일 메모리 매핑 지원
  • 드라이런 / 검사 모드 / JSON 리포트 로그
  • 가독성 높은 컬러 터미널 출력

예제:
  jscat2js                       # gallery.jscat -> gallery.js
  jscat2js demo                  # demo.jscat -> demo.js
  jscat2js demo -o build/demo.js
  jscat2js demo --keep-eol --join empty
  jscat2js demo --check --verbose
"#
)]
pub struct Args {
    /// 입력/출력 파일 이름의 STEM (생략 시 "gallery")
    pub stem: Option<String>,

    /// 생성될 JS 파일 경로 (기본값: STEM.js)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// STEM 인자 생략을 허용하지 않음 (기본 STEM 비활성화)
    #[arg(long)]
    pub strict: bool,

    /// 각 줄의 줄 끝 문자를 제거하지 않고 그대로 인코딩
    #[arg(long)]
    pub keep_eol: bool,

    /// join 구분자 (생략 시 정책에 따라 결정: 기본 newline, --keep-eol 시 empty)
    #[arg(short, long, value_enum)]
    pub join: Option<JoinMode>,

    /// 출력 파일이 이미 존재하면 에러
    #[arg(long)]
    pub no_clobber: bool,

    /// 입력 읽기/인코딩만 검사 (출력 파일 생성 없음)
    #[arg(long)]
    pub check: bool,

    /// 실제 변환 없이 입출력 경로와 식별자만 표시
    #[arg(long)]
    pub dry_run: bool,

    /// 변환 리포트를 JSON으로 기록할 파일 경로
    #[arg(long)]
    pub log: Option<PathBuf>,

    /// 상세 출력 모드
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// 정책에 따라 실제 사용할 join 모드를 결정
    ///
    /// `--join`이 명시되면 그대로 사용하고, 생략되면 줄 끝 정책과 짝이 맞는
    /// 기본값을 고릅니다 (제거 정책이면 Newline, 유지 정책이면 Empty).
    /// 두 경우 모두 라운드트립이 성립합니다.
    pub fn join_mode(&self) -> JoinMode {
        self.join.unwrap_or(if self.keep_eol {
            JoinMode::Empty
        } else {
            JoinMode::Newline
        })
    }
}
