//! JS 소스 생성 모듈
//!
//! 입력 줄의 JSON 문자열 인코딩과 라인 배열 모듈 템플릿 렌더링을 담당합니다.
//! 인코딩 단계(이스케이프 보장, 주입 방지)와 템플릿 단계(순수 구조)를
//! 분리해서 유지합니다.

use crate::error::{JscatError, Result};

/// 생성 식별자에 붙는 고정 접미사
pub const IDENT_SUFFIX: &str = "_jscat";

/// STEM에서 생성될 JS 식별자 이름을 유도
///
/// STEM에 대한 정제는 수행하지 않습니다. 파일 시스템이나 JS 식별자에
/// 유효하지 않은 STEM을 넘기는 것은 호출자 책임입니다.
///
/// # Examples
/// ```
/// use jscat2js::codegen::jscat_ident;
///
/// assert_eq!(jscat_ident("gallery"), "gallery_jscat");
/// ```
pub fn jscat_ident(stem: &str) -> String {
    format!("{}{}", stem, IDENT_SUFFIX)
}

/// 한 줄을 JSON 문자열 리터럴로 인코딩
///
/// 따옴표, 역슬래시, 제어 문자가 이스케이프되지 않은 채 생성 소스로
/// 새어 나가지 않는 것은 serde_json 인코더가 보장합니다.
pub fn encode_line(line: &str) -> Result<String> {
    serde_json::to_string(line).map_err(|e| JscatError::EncodeError {
        reason: e.to_string(),
    })
}

/// 라인 배열 모듈 전체를 렌더링
///
/// 출력 형식:
///
/// ```text
/// // this file produced by:
/// // jscat2js STEM
///
/// var STEM_jscat = [
/// "line1",
/// "line2",
/// ""].join("\n");
/// ```
///
/// 입력 줄 리터럴 뒤에는 항상 합성된 `""` 리터럴이 붙으므로 리터럴 수는
/// 입력 줄 수 + 1입니다. join 구분자 자체도 JSON 인코딩을 거칩니다.
pub fn render_module(
    stem: &str,
    encoded_lines: &[String],
    join_separator: &str,
) -> Result<String> {
    let separator_literal = encode_line(join_separator)?;

    let body_len: usize = encoded_lines.iter().map(|l| l.len() + 2).sum();
    let mut out = String::with_capacity(body_len + 128);

    out.push_str("// this file produced by:\n");
    out.push_str(&format!("// jscat2js {}\n", stem));
    out.push('\n');

    out.push_str(&format!("var {} = [\n", jscat_ident(stem)));

    for literal in encoded_lines {
        out.push_str(literal);
        out.push_str(",\n");
    }

    out.push_str(&format!("\"\"].join({});\n", separator_literal));

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jscat_ident() {
        assert_eq!(jscat_ident("gallery"), "gallery_jscat");
        assert_eq!(jscat_ident("demo"), "demo_jscat");
    }

    #[test]
    fn test_encode_plain_line() {
        assert_eq!(encode_line("hello").unwrap(), r#""hello""#);
    }

    #[test]
    fn test_encode_escapes_quotes_and_backslashes() {
        assert_eq!(encode_line(r#"wor"ld"#).unwrap(), r#""wor\"ld""#);
        assert_eq!(encode_line(r"a\b").unwrap(), r#""a\\b""#);
    }

    #[test]
    fn test_encode_escapes_control_characters() {
        assert_eq!(encode_line("a\tb").unwrap(), r#""a\tb""#);
        assert_eq!(encode_line("a\nb").unwrap(), r#""a\nb""#);
        assert_eq!(encode_line("a\u{0001}b").unwrap(), r#""a\u0001b""#);
    }

    #[test]
    fn test_encode_preserves_unicode() {
        let encoded = encode_line("한글 línea").unwrap();
        let decoded: String = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, "한글 línea");
    }

    #[test]
    fn test_render_module_layout() {
        let lines = vec![r#""hello""#.to_string(), r#""wor\"ld""#.to_string()];
        let rendered = render_module("demo", &lines, "\n").unwrap();

        let expected = concat!(
            "// this file produced by:\n",
            "// jscat2js demo\n",
            "\n",
            "var demo_jscat = [\n",
            "\"hello\",\n",
            "\"wor\\\"ld\",\n",
            "\"\"].join(\"\\n\");\n",
        );
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_render_module_empty_input() {
        let rendered = render_module("empty", &[], "\n").unwrap();
        assert!(rendered.contains("var empty_jscat = [\n\"\"].join(\"\\n\");\n"));
    }

    #[test]
    fn test_render_module_empty_separator() {
        let rendered = render_module("raw", &[], "").unwrap();
        assert!(rendered.ends_with("\"\"].join(\"\");\n"));
    }
}
