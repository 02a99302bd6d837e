//! jscat2js - JSCAT TO JS CONVERTER
//!
//! 메인 엔트리포인트

use anyhow::{Context, Result};
use clap::error::ErrorKind as ClapErrorKind;
use clap::Parser;
use colored::Colorize;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use jscat2js::{
    cli::{is_help_token, Args, DEFAULT_STEM, USAGE_LINE},
    codegen::jscat_ident,
    converter::{convert, input_path, output_path, ConvertOptions, ConvertReport},
    stats::Summary,
};

fn main() -> Result<()> {
    // help 의사 플래그 (help / -h / --help) - 첫 인자만 인식, usage 후 종료 코드 1
    if let Some(first) = std::env::args().nth(1) {
        if is_help_token(&first) {
            eprintln!("{}", USAGE_LINE);
            std::process::exit(1);
        }
    }

    let args = parse_args();

    // STEM 결정 (생략 시 기본값, --strict면 usage 에러)
    let stem = resolve_stem(&args);

    // 입출력 경로 및 식별자 유도
    let input = input_path(&stem);
    let output = args.output.clone().unwrap_or_else(|| output_path(&stem));

    // 헤더 출력
    print_header(&args, &stem, &input, &output);

    // 드라이런 모드
    if args.dry_run {
        print_dry_run(&stem, &input, &output);
        return Ok(());
    }

    // 변환 옵션 생성
    let options = ConvertOptions::new()
        .with_keep_eol(args.keep_eol)
        .with_join_separator(args.join_mode().separator())
        .with_no_clobber(args.no_clobber)
        .with_check_only(args.check);

    // 변환 실행
    let summary_mode = if args.check { "검사" } else { "변환" };
    println!("\n{}", format!("⚡ {} 중...", summary_mode).bright_cyan());

    let mut summary = Summary::new();
    let report = convert(&stem, &input, &output, &options)
        .with_context(|| format!("{} 변환 실패", stem))?;
    summary.record(&report);

    if args.verbose {
        println!(
            "  {} {} 줄 인코딩 완료 ({} 리터럴)",
            "✓".green(),
            report.line_count,
            report.literal_count
        );
    }

    // 통계 출력
    if args.check {
        summary.print_check_summary();
        println!("\n{} 입력이 유효합니다: {:?}\n", "✅".bright_green(), input);
    } else {
        summary.print_summary();
        println!("\n{} 저장 완료: {:?}\n", "✅".bright_green(), output);
    }

    // 리포트 로그 작성
    if let Some(ref log_path) = args.log {
        write_report_log(log_path, &report)?;
    }

    Ok(())
}

/// CLI 인자 파싱
///
/// clap 파싱 에러는 모두 usage 에러로 취급해 종료 코드 1로 끝냅니다.
/// --version 표시는 정상 종료입니다.
fn parse_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(err) if err.kind() == ClapErrorKind::DisplayVersion => {
            let _ = err.print();
            std::process::exit(0);
        }
        Err(err) => {
            let _ = err.print();
            eprintln!("{}", USAGE_LINE);
            std::process::exit(1);
        }
    }
}

/// STEM 결정
fn resolve_stem(args: &Args) -> String {
    match args.stem.clone() {
        Some(stem) => stem,
        None if args.strict => {
            eprintln!("{}", USAGE_LINE);
            std::process::exit(1);
        }
        None => DEFAULT_STEM.to_string(),
    }
}

/// 헤더 출력
fn print_header(args: &Args, stem: &str, input: &PathBuf, output: &PathBuf) {
    println!("\n{}", "═".repeat(50).bright_blue());
    println!("{}", " 🚀 JSCAT TO JS CONVERTER".bright_white().bold());
    println!("{}", "═".repeat(50).bright_blue());
    println!("  {} 입력 파일: {:?}", "📂".bright_cyan(), input);

    if !args.check {
        println!("  {} 출력 파일: {:?}", "📄".bright_green(), output);
    }

    println!(
        "  {} 식별자: {}",
        "🏷️".bright_white(),
        jscat_ident(stem).bright_green()
    );
    println!(
        "  {} 줄 끝 정책: {}",
        "✂️".bright_yellow(),
        if args.keep_eol { "유지" } else { "제거" }
    );
    println!("  {} join 구분자: {}", "🔗".bright_magenta(), args.join_mode());

    if args.no_clobber {
        println!(
            "  {} {}",
            "🔒".bright_yellow(),
            "no-clobber 모드 (기존 출력 파일 보호)".yellow()
        );
    }

    if args.dry_run {
        println!(
            "  {} {}",
            "⚠️".bright_yellow(),
            "드라이런 모드 (실제 변환 없음)".yellow()
        );
    }

    if args.check {
        println!("  {} {}", "🔍".bright_cyan(), "검사 모드".cyan());
    }

    println!("{}", "═".repeat(50).bright_blue());
}

/// 드라이런 출력
fn print_dry_run(stem: &str, input: &PathBuf, output: &PathBuf) {
    println!("\n{}", "📋 변환 예정 내역:".bright_cyan());
    println!("  1. 읽기:   {:?}", input);
    println!("  2. 쓰기:   {:?}", output);
    println!("  3. 선언:   var {} = [...]", jscat_ident(stem));
    println!(
        "\n{} 실제 파일은 생성되지 않았습니다.",
        "ℹ️".bright_blue()
    );
}

/// 변환 리포트를 JSON 로그 파일로 작성
fn write_report_log(log_path: &PathBuf, report: &ConvertReport) -> Result<()> {
    let mut log_file = File::create(log_path)
        .with_context(|| format!("로그 파일 생성 실패: {:?}", log_path))?;

    let mut body = serde_json::to_value(report)?;
    if let Some(map) = body.as_object_mut() {
        map.insert("unix_timestamp".to_string(), unix_now().into());
    }

    writeln!(log_file, "{}", serde_json::to_string_pretty(&body)?)?;

    println!("\n{} 리포트 로그 저장: {:?}", "📝".bright_cyan(), log_path);

    Ok(())
}

/// 현재 유닉스 타임스탬프 반환
fn unix_now() -> u64 {
    use std::time::SystemTime;
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
