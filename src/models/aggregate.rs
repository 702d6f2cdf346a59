use serde::{Deserialize, Serialize};

/// 언어 코드별 감지 횟수: 저장되지 않고 요청마다 새로 계산됩니다.
///
/// `code`가 None인 항목은 언어 코드 없이 저장된 레코드들의 합계이며,
/// JSON에서는 `code` 필드가 빠진 채로 직렬화됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateCount {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub count: u64,
}
