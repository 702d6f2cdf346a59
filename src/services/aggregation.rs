//! # 언어별 집계 서비스
//!
//! 스캔한 언어 코드들을 세어 가장 많이 감지된 언어 순위를 만듭니다.
//!
//! ## 처리 흐름
//! 1. 코드 → 횟수 맵을 한 번의 순회로 채웁니다
//! 2. 횟수 내림차순으로 정렬합니다 (같은 횟수는 코드 오름차순, 코드 없음이 먼저)
//! 3. 정렬한 **뒤에** 상위 `limit`개만 남깁니다
//!
//! 집계는 저장하지 않고 요청마다 새로 계산합니다.

use crate::models::AggregateCount;
use std::collections::HashMap;

/// 결과 엔드포인트가 돌려주는 최대 언어 수
pub const TOP_LANGUAGES: usize = 5;

/// 언어 코드 목록을 집계하여 상위 `limit`개를 돌려줍니다.
///
/// 입력 순서와 무관하게 항상 같은 결과가 나오도록 동률은 코드로 정렬합니다.
pub fn rank_language_counts<I>(codes: I, limit: usize) -> Vec<AggregateCount>
where
    I: IntoIterator<Item = Option<String>>,
{
    let mut counts: HashMap<Option<String>, u64> = HashMap::new();
    for code in codes {
        *counts.entry(code).or_insert(0) += 1;
    }

    let mut ranked: Vec<AggregateCount> = counts
        .into_iter()
        .map(|(code, count)| AggregateCount { code, count })
        .collect();

    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.code.cmp(&b.code)));
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(list: &[&str]) -> Vec<Option<String>> {
        list.iter().map(|c| Some(c.to_string())).collect()
    }

    fn entry(code: &str, count: u64) -> AggregateCount {
        AggregateCount {
            code: Some(code.to_string()),
            count,
        }
    }

    #[test]
    fn test_empty_input_gives_empty_ranking() {
        let ranked = rank_language_counts(Vec::new(), TOP_LANGUAGES);
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_counts_and_sorts_descending() {
        let input = codes(&["de", "en", "fr", "en", "fr", "en", "fr"]);
        let ranked = rank_language_counts(input, TOP_LANGUAGES);

        assert_eq!(ranked, vec![entry("en", 3), entry("fr", 3), entry("de", 1)]);
    }

    #[test]
    fn test_ties_are_ordered_by_code() {
        let forward = rank_language_counts(codes(&["fr", "en", "fr", "en"]), TOP_LANGUAGES);
        let backward = rank_language_counts(codes(&["en", "fr", "en", "fr"]), TOP_LANGUAGES);

        assert_eq!(forward, backward);
        assert_eq!(forward[0].code.as_deref(), Some("en"));
    }

    #[test]
    fn test_truncates_after_sorting() {
        // 10개 언어, 뒤쪽 코드일수록 더 많이 감지됨
        let all = ["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"];
        let mut input = Vec::new();
        for (i, code) in all.iter().enumerate() {
            for _ in 0..=i {
                input.push(Some(code.to_string()));
            }
        }

        let ranked = rank_language_counts(input, TOP_LANGUAGES);

        assert_eq!(ranked.len(), 5);
        assert_eq!(
            ranked,
            vec![
                entry("j", 10),
                entry("i", 9),
                entry("h", 8),
                entry("g", 7),
                entry("f", 6)
            ]
        );
    }

    #[test]
    fn test_missing_code_counted_separately() {
        let input = vec![None, Some("en".to_string()), None];
        let ranked = rank_language_counts(input, TOP_LANGUAGES);

        assert_eq!(
            ranked,
            vec![AggregateCount { code: None, count: 2 }, entry("en", 1)]
        );
    }

    #[test]
    fn test_ranking_is_idempotent() {
        let input = codes(&["es", "pt", "es", "it", "pt", "es"]);
        let first = rank_language_counts(input.clone(), TOP_LANGUAGES);
        let second = rank_language_counts(input, TOP_LANGUAGES);
        assert_eq!(first, second);
    }

    #[test]
    fn test_many_records() {
        // 10,000건: 7개 언어를 돌아가며 배정
        let pool = ["en", "fr", "de", "es", "it", "ja", "ko"];
        let input: Vec<Option<String>> = (0..10_000)
            .map(|i| Some(pool[i % pool.len()].to_string()))
            .collect();

        let ranked = rank_language_counts(input, TOP_LANGUAGES);

        assert_eq!(ranked.len(), TOP_LANGUAGES);
        // 10,000 = 7 * 1428 + 4 → 앞의 4개 언어가 1429건
        assert_eq!(ranked[0], entry("de", 1429));
        assert_eq!(ranked[3], entry("fr", 1429));
        assert_eq!(ranked[4].count, 1428);
        assert!(ranked.windows(2).all(|w| w[0].count >= w[1].count));
    }
}
