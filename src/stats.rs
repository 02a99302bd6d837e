//! 통계 및 유틸리티 모듈
//!
//! 변환 결과 요약 출력과 포맷팅을 담당합니다.

use colored::Colorize;
use std::time::{Duration, Instant};

use crate::converter::ConvertReport;

/// 변환 요약 구조체
#[derive(Debug, Default)]
pub struct Summary {
    /// 입력 줄 수
    pub line_count: usize,
    /// 생성된 리터럴 수
    pub literal_count: usize,
    /// 읽은 총 바이트
    pub bytes_read: u64,
    /// 쓴 총 바이트
    pub bytes_written: u64,
    /// 처리 시작 시간
    start_time: Option<Instant>,
}

impl Summary {
    /// 새 요약 인스턴스 생성 (시작 시간 기록)
    pub fn new() -> Self {
        Self {
            start_time: Some(Instant::now()),
            ..Default::default()
        }
    }

    /// 변환 리포트를 요약에 반영
    pub fn record(&mut self, report: &ConvertReport) {
        self.line_count = report.line_count;
        self.literal_count = report.literal_count;
        self.bytes_read = report.bytes_read;
        self.bytes_written = report.bytes_written;
    }

    /// 경과 시간 반환
    pub fn elapsed(&self) -> Duration {
        self.start_time
            .map(|t| t.elapsed())
            .unwrap_or(Duration::ZERO)
    }

    /// 변환 통계 요약 출력
    pub fn print_summary(&self) {
        println!("\n{}", "═".repeat(50).bright_blue());
        println!("{}", " 📊 변환 통계".bright_white().bold());
        println!("{}", "═".repeat(50).bright_blue());

        println!(
            "  {} 입력 줄 수:   {}",
            "📄".bright_cyan(),
            self.line_count.to_string().green()
        );
        println!(
            "  {} 리터럴 수:    {}",
            "🔤".bright_white(),
            self.literal_count
        );
        println!(
            "  {} 입력 용량:    {}",
            "📥".bright_yellow(),
            format_bytes(self.bytes_read)
        );
        println!(
            "  {} 출력 용량:    {}",
            "📤".bright_magenta(),
            format_bytes(self.bytes_written)
        );
        println!(
            "  {} 처리 시간:    {}",
            "⏱️".bright_cyan(),
            format_duration(self.elapsed())
        );

        println!("{}", "═".repeat(50).bright_blue());
    }

    /// 검사 모드 요약 출력
    pub fn print_check_summary(&self) {
        println!("\n{}", "═".repeat(50).bright_blue());
        println!("{}", " 🔍 검사 결과".bright_white().bold());
        println!("{}", "═".repeat(50).bright_blue());

        println!(
            "  {} 입력 줄 수:   {}",
            "📄".bright_cyan(),
            self.line_count.to_string().green()
        );
        println!(
            "  {} 입력 용량:    {}",
            "📥".bright_yellow(),
            format_bytes(self.bytes_read)
        );
        println!(
            "  {} 검사 시간:    {}",
            "⏱️".bright_cyan(),
            format_duration(self.elapsed())
        );

        println!("{}", "═".repeat(50).bright_blue());
    }
}

/// 바이트를 읽기 쉬운 형식으로 변환
///
/// # Arguments
/// * `bytes` - 바이트 수
///
/// # Returns
/// 형식화된 문자열 (예: "1.25 MB")
///
/// # Examples
/// ```
/// use jscat2js::stats::format_bytes;
///
/// assert_eq!(format_bytes(500), "500 B");
/// assert_eq!(format_bytes(1024), "1.00 KB");
/// assert_eq!(format_bytes(1048576), "1.00 MB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// 경과 시간을 읽기 쉬운 형식으로 변환
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let millis = duration.subsec_millis();

    if secs >= 3600 {
        let hours = secs / 3600;
        let mins = (secs % 3600) / 60;
        format!("{}시간 {}분", hours, mins)
    } else if secs >= 60 {
        let mins = secs / 60;
        let remaining_secs = secs % 60;
        format!("{}분 {}초", mins, remaining_secs)
    } else if secs > 0 {
        format!("{}.{:03}초", secs, millis)
    } else {
        format!("{}ms", millis)
    }
}
