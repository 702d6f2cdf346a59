//! # 언어 감지 서비스 라이브러리
//!
//! 서버 바이너리(`language-detector`), CLI(`langdetect`), 통합 테스트가
//! 같은 모듈을 공유하도록 라이브러리로 묶습니다.

pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
