//! # 글방 웹 서버 진입점
//!
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. SQLite 연결 풀 생성 + 마이그레이션
//! 4. 라우터 조립 후 HTTP 서버 시작
//!
//! `geulbang hash-password <비밀번호>`로 실행하면 서버 대신
//! `ADMIN_PASSWORD_HASH`에 넣을 Argon2 해시를 출력하고 끝납니다.

use anyhow::Result;
use geulbang::{
    config::Config,
    db,
    middleware::auth::hash_password,
    routes::AppState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // .env 파일이 없어도 에러 없이 넘어갑니다
    dotenvy::dotenv().ok();

    // 비밀번호 해시 생성 모드
    let args: Vec<String> = std::env::args().collect();
    if args.get(1).map(String::as_str) == Some("hash-password") {
        let password = args
            .get(2)
            .ok_or_else(|| anyhow::anyhow!("usage: geulbang hash-password <password>"))?;
        println!("{}", hash_password(password)?);
        return Ok(());
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "geulbang=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!("Starting geulbang server on {}:{}", config.host, config.port);

    let pool = db::connect(&config.database_url).await?;

    tracing::info!("Running database migrations...");
    db::migrate(&pool).await?;

    let state = AppState {
        pool,
        jwt_secret: config.jwt_secret.clone(),
        admin_password_hash: config.admin_password_hash.clone(),
        upload_client_id: config.upload_client_id.clone(),
    };

    let app = geulbang::app(state, config.static_dir.as_deref());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
