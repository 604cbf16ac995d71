//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 데이터베이스와 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//! 라우트 핸들러(routes/)에서 이 모듈의 함수를 호출하여 DB 작업을 수행합니다.
//!
//! 각 하위 모듈:
//! - `entries`: 글 저장소. 글 행 + 전문검색 인덱스 + 태그 연결을 함께 관리
//! - `tags`: 태그 저장소. 태그 get-or-create, 글-태그 연결, 태그 검색
//! - `queries`: 조회 서비스. 공개 글/임시 글 목록, 전문검색
//!
//! 전역 DB 핸들은 없습니다. 호출하는 쪽이 `connect()`로 만든 풀을 넘겨줍니다.
//! 테스트는 각자 독립된 인메모리 풀을 만들어 씁니다.

pub mod entries;
pub mod queries;
pub mod tags;

pub use entries::*;
pub use queries::*;
pub use tags::*;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// SQLite 연결 풀을 만듭니다.
///
/// - `create_if_missing(true)`: DB 파일이 없으면 새로 만듭니다
/// - `foreign_keys(true)`: `entry_tags`의 ON DELETE CASCADE가 동작하도록 외래키 검사를 켭니다
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
}

/// `migrations/` 폴더의 SQL 파일들을 순서대로 적용합니다.
///
/// `sqlx::migrate!`는 컴파일 타임에 SQL 파일을 바이너리에 포함시키므로
/// 실행 환경에 migrations 폴더가 없어도 됩니다.
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
