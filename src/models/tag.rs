//! # 태그 모델 정의
//!
//! 태그(Tag)와 글-태그 연결(EntryTag), 그리고 "없으면 만들기"(get-or-create)
//! 결과를 표현하는 구조체들을 정의합니다.
//!
//! ## 구조체 역할
//! - `Tag`: DB의 `tags` 테이블 한 행
//! - `EntryTag`: DB의 `entry_tags` 테이블 한 행 (글과 태그의 다대다 연결)
//! - `GetOrCreate<T>`: 조회 결과 + 이번 호출에서 새로 만들었는지 여부
//! - `AttachOutcome`: 태그 붙이기 결과 (새 태그 수, 새 연결 수)
//! - `AttachTagsRequest`: 글에 태그를 붙일 때 클라이언트가 보내는 JSON 본문

use serde::{Deserialize, Serialize};

/// 태그 엔티티 — DB의 `tags` 테이블 한 행(row)에 대응합니다.
///
/// 여러 글이 같은 태그 행을 공유합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tag {
    pub id: i64,
    /// 태그 이름 (유일)
    pub title: String,
}

/// 글-태그 연결 — DB의 `entry_tags` 테이블 한 행
///
/// 같은 (entry_id, tag_id) 쌍은 한 번만 존재합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct EntryTag {
    pub id: i64,
    pub entry_id: i64,
    pub tag_id: i64,
}

/// get-or-create 조회 결과
///
/// 예외로 존재 여부를 확인하는 대신, 이번 호출에서 행을 새로 만들었는지를
/// `created` 필드로 명시적으로 돌려줍니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetOrCreate<T> {
    pub created: bool,
    pub value: T,
}

/// 태그 붙이기 결과 — 호출한 쪽에 "몇 개를 새로 만들었는지" 알려주기 위한 값
///
/// 같은 태그로 두 번 호출하면 두 번째는 `{ new_tags: 0, new_links: 0 }`입니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AttachOutcome {
    pub new_tags: u64,
    pub new_links: u64,
}

/// 글에 태그 붙이기 요청 — `POST /api/v1/entries/:slug/tags`
#[derive(Debug, Deserialize)]
pub struct AttachTagsRequest {
    pub tags: Vec<String>,
}
