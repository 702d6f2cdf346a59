//! # 비즈니스 로직 모듈
//!
//! - `detector`: 외부 언어 감지 기능에 대한 좁은 인터페이스 (원격 API / 로컬)
//! - `aggregation`: 언어 코드 집계와 순위 계산

pub mod aggregation;
pub mod detector;

pub use aggregation::{rank_language_counts, TOP_LANGUAGES};
pub use detector::{DetectionError, LanguageDetector};
