//! # 글(Entry) 모델 정의
//!
//! 블로그 글과 글 생성/수정/업로드 요청 본문을 정의합니다.
//!
//! ## 구조체 역할
//! - `Entry`: DB의 `entries` 테이블 한 행
//! - `EntryDetail`: 글 + 연결된 태그 목록 (상세 조회 응답)
//! - `CreateEntryRequest` / `UpdateEntryRequest`: 관리자 화면에서 보내는 JSON 본문
//! - `UploadEntryRequest`: 업로드 스크립트가 보내는 JSON 본문

use serde::{Deserialize, Serialize};

/// 블로그 글 엔티티 — DB의 `entries` 테이블 한 행(row)에 대응합니다.
///
/// `slug`와 `summary`는 저장할 때 저장소(db::entries)가 채웁니다.
/// `slug`는 한 번 정해지면 제목이 바뀌어도 유지되고(고정 URL),
/// `summary`는 저장할 때마다 본문에서 다시 뽑습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Entry {
    /// 생성 시 DB가 부여하는 정수 ID (전문검색 인덱스의 rowid와 같은 값)
    pub id: i64,
    pub title: String,
    /// URL에 쓰이는 식별자 (예: "hello-world"), 전체 글에서 유일
    pub slug: String,
    /// 본문에서 뽑은 100자 이내의 미리보기
    pub summary: String,
    /// 마크다운 원문
    pub content: String,
    pub published: bool,
    /// 작성 시각 (ISO 8601, 생성 시 DB 기본값)
    pub timestamp: String,
}

/// 글 상세 응답: 글 필드 + 태그 목록
///
/// `#[serde(flatten)]`: entry의 필드들을 같은 JSON 객체 안에 펼쳐서 직렬화합니다.
#[derive(Debug, Serialize)]
pub struct EntryDetail {
    #[serde(flatten)]
    pub entry: Entry,
    pub tags: Vec<String>,
}

/// 글 생성 요청 — `POST /api/v1/entries`
///
/// 제목과 본문은 필수지만 Option으로 받습니다.
/// 누락된 필드를 JSON 파싱 에러(422)가 아니라 검증 에러(400)로 돌려주기 위해서입니다.
#[derive(Debug, Default, Deserialize)]
pub struct CreateEntryRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    /// 없으면 false (임시 글)
    #[serde(default)]
    pub published: bool,
    /// 함께 붙일 태그 이름들
    #[serde(default)]
    pub tags: Vec<String>,
}

/// 글 수정 요청 — `PUT /api/v1/entries/:slug`
///
/// 수정은 제목/본문/공개 여부를 모두 다시 설정합니다(부분 수정 아님).
/// 슬러그는 바뀌지 않습니다.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateEntryRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// 업로드 요청 — `POST /api/v1/upload`
///
/// 모든 필드가 필수입니다. 하나라도 빠지면 아무것도 저장하지 않고 400을 돌려줍니다.
#[derive(Debug, Default, Deserialize)]
pub struct UploadEntryRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub published: Option<bool>,
}
