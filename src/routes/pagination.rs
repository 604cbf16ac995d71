//! # 페이지 나누기
//!
//! 저장소는 전체 결과를 돌려주고, 화면용 페이지 나누기는 여기서 합니다.
//! 한 페이지에 20개씩, 페이지 번호는 1부터 시작합니다.

use serde::{Deserialize, Serialize};

/// 한 페이지에 보여줄 글 수
pub const PER_PAGE: usize = 20;

/// `?page=2` 형태의 쿼리 파라미터
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<usize>,
}

/// 페이지 응답: `{ "entries": [...], "page": 1, "has_next": false }`
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub entries: Vec<T>,
    pub page: usize,
    pub has_next: bool,
}

/// 전체 목록에서 요청한 페이지만 잘라냅니다.
///
/// 페이지 번호가 없거나 0이면 1페이지로 취급합니다.
/// 범위를 넘는 페이지는 빈 목록입니다.
pub fn paginate<T>(items: Vec<T>, page: Option<usize>) -> Page<T> {
    let page = page.unwrap_or(1).max(1);
    let start = (page - 1).saturating_mul(PER_PAGE);
    let has_next = items.len() > start.saturating_add(PER_PAGE);

    Page {
        entries: items.into_iter().skip(start).take(PER_PAGE).collect(),
        page,
        has_next,
    }
}
