//! # 텍스트 규칙 서비스
//!
//! 글 저장과 검색에 쓰이는 순수 함수들을 모아둔 모듈입니다.
//! DB에 접근하지 않으므로 모두 동기 함수입니다.
//!
//! 이 모듈의 함수들:
//! - `slugify()`: 제목 → URL 슬러그 (태그 이름 정규화에도 같은 규칙 사용)
//! - `summarize()`: 마크다운 본문 → 100자 이내 미리보기
//! - `search_terms()`: 검색어 → 공백 기준 토큰 목록
//! - `fts_match_expression()`: 토큰 목록 → FTS5 MATCH 식
//!
//! 슬러그와 요약 규칙은 이미 발행된 URL/미리보기와 같은 결과를 내야 하므로
//! "더 나은" 규칙으로 바꾸지 말고 정규식 그대로 유지해야 합니다.

use once_cell::sync::Lazy;
use regex::Regex;

/// 단어 문자(문자, 숫자, 밑줄)가 아닌 문자의 연속 구간
///
/// Rust regex의 `\w`는 기본적으로 유니코드 기준이라 한글 등도 단어 문자로 취급합니다.
static NON_WORD_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w]+").expect("valid non-word regex"));

/// 요약에 남길 조각: "영문자/공백/쉼표/마침표 1개 이상 + 단어 문자 1개"
///
/// `[^\W<>]`는 "단어 문자이면서 `<`, `>`가 아닌 문자"입니다.
/// 마크다운 기호(`*`, `#`, `[` 등)와 HTML 태그를 건너뛰는 용도입니다.
static SUMMARY_FRAGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z\s,.]+[^\W<>]").expect("valid summary regex"));

/// 요약을 뽑을 때 살펴보는 본문 앞부분 길이 (문자 수)
pub const SUMMARY_SCAN_CHARS: usize = 200;

/// 요약 최대 길이 (문자 수)
pub const SUMMARY_MAX_CHARS: usize = 100;

/// 제목으로부터 URL 슬러그를 만듭니다.
///
/// 1. 소문자로 바꾸고
/// 2. 단어 문자가 아닌 문자의 연속 구간을 하이픈(`-`) 하나로 바꾼 뒤
/// 3. 양 끝의 하이픈을 떼어냅니다.
///
/// 제목이 기호로만 이루어져 3단계 결과가 비면 2단계 결과(`"-"`)를 그대로 씁니다.
/// 저장되는 슬러그는 절대 빈 문자열이 되지 않습니다(빈 제목은 검증에서 막힘).
///
/// # 예시
/// ```
/// use geulbang::services::slugify;
/// assert_eq!(slugify("Hello World!"), "hello-world");
/// assert_eq!(slugify("Rust & SQLite: FTS5"), "rust-sqlite-fts5");
/// ```
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let collapsed = NON_WORD_RUN.replace_all(&lowered, "-");
    let trimmed = collapsed.trim_matches('-');

    if trimmed.is_empty() {
        collapsed.into_owned()
    } else {
        trimmed.to_string()
    }
}

/// 마크다운 본문에서 미리보기 요약을 뽑습니다.
///
/// 1. 본문의 앞 200자만 살펴봅니다
/// 2. `SUMMARY_FRAGMENT`에 맞는 조각들을 모두 찾아
/// 3. 공백 하나로 이어 붙이고
/// 4. 100자로 자릅니다
///
/// 문법적으로 깔끔한 문장을 보장하지 않는 휴리스틱입니다.
pub fn summarize(content: &str) -> String {
    // .chars().take(): 바이트가 아닌 문자 단위로 자릅니다 (한글에서 패닉 방지)
    let head: String = content.chars().take(SUMMARY_SCAN_CHARS).collect();

    let joined = SUMMARY_FRAGMENT
        .find_iter(&head)
        .map(|m| m.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    joined.chars().take(SUMMARY_MAX_CHARS).collect()
}

/// 검색어를 공백 기준으로 나눠 빈 토큰을 버린 목록을 반환합니다.
///
/// `split_whitespace()`는 연속 공백, 탭, 줄바꿈을 모두 구분자로 취급하고
/// 빈 조각을 만들지 않습니다.
pub fn search_terms(query: &str) -> Vec<String> {
    query.split_whitespace().map(str::to_string).collect()
}

/// 검색 토큰들을 FTS5 MATCH 식으로 만듭니다.
///
/// 각 토큰을 큰따옴표로 감싸 FTS5 문자열로 취급하게 합니다.
/// 사용자가 입력한 `:` `*` `(` 같은 기호가 FTS5 문법 에러를 일으키지 않고,
/// 토큰 사이의 공백은 그대로 암묵적 AND로 동작합니다.
/// 토큰 안의 큰따옴표는 `""`로 이스케이프합니다.
pub fn fts_match_expression(terms: &[String]) -> String {
    terms
        .iter()
        .map(|term| format!("\"{}\"", term.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(" ")
}
