//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! - `detection`: 감지 요청/응답과 저장 레코드
//! - `aggregate`: 언어별 집계 결과
//!
//! `pub use X::*;`로 재공개하여 `crate::models::DetectionRecord`처럼
//! 짧게 접근할 수 있게 합니다.

pub mod aggregate;
pub mod detection;

pub use aggregate::*;
pub use detection::*;
