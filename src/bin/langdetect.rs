//! langdetect — 언어 감지 서비스 명령줄 클라이언트
//!
//! 사용법:
//!   langdetect detect <텍스트...>   # 텍스트의 언어를 감지하고 결과 차트를 다시 출력
//!   langdetect results              # 가장 많이 감지된 언어 상위 5개를 막대 차트로 출력
//!
//! 환경변수:
//! - LANGDETECT_URL (기본값: http://localhost:3000/prod)

use anyhow::{bail, Result};
use language_detector::{
    client::{ApiClient, DetectForm, SubmissionState},
    models::AggregateCount,
};

const BAR_WIDTH: usize = 40;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "langdetect=warn".into()),
        )
        .init();

    let base_url = std::env::var("LANGDETECT_URL")
        .unwrap_or_else(|_| "http://localhost:3000/prod".to_string());
    let client = ApiClient::new(&base_url);

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.split_first() {
        Some((command, rest)) if command == "detect" => detect(&client, &rest.join(" ")).await,
        Some((command, _)) if command == "results" => {
            let ranked = client.results().await?;
            print_chart(&ranked);
            Ok(())
        }
        _ => bail!("Usage: langdetect detect <text...> | langdetect results"),
    }
}

async fn detect(client: &ApiClient, text: &str) -> Result<()> {
    let mut form = DetectForm::new();
    form.set_text(text);

    if !form.can_submit() {
        bail!("Nothing to detect: text is empty");
    }

    match form.submit(client).await {
        SubmissionState::Succeeded(response) => match &response.language_code {
            Some(code) => println!("Detected language code: {}", code),
            None => println!("No language could be detected"),
        },
        SubmissionState::Failed(message) => bail!("SERVER ERROR! {}", message),
        SubmissionState::Idle | SubmissionState::Submitting => bail!("Submission did not complete"),
    }

    // 제출 성공으로 캐시가 비었으므로 새 순위를 가져옵니다
    println!();
    let ranked = client.results().await?;
    print_chart(&ranked);
    Ok(())
}

fn print_chart(ranked: &[AggregateCount]) {
    if ranked.is_empty() {
        println!("No detections yet");
        return;
    }

    println!("Most detected languages");
    for line in chart_lines(ranked) {
        println!("{}", line);
    }
}

/// 가장 큰 값을 `BAR_WIDTH` 칸으로 삼아 막대 길이를 비례 배분합니다.
fn chart_lines(ranked: &[AggregateCount]) -> Vec<String> {
    let max = ranked.iter().map(|entry| entry.count).max().unwrap_or(0).max(1);
    let label_width = ranked
        .iter()
        .map(|entry| entry.code.as_deref().unwrap_or("?").len())
        .max()
        .unwrap_or(1);

    ranked
        .iter()
        .map(|entry| {
            let width = ((entry.count as f64 / max as f64) * BAR_WIDTH as f64).round() as usize;
            format!(
                "{:<label_width$}  {} {}",
                entry.code.as_deref().unwrap_or("?"),
                "█".repeat(width.max(1)),
                entry.count,
                label_width = label_width
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(code: &str, count: u64) -> AggregateCount {
        AggregateCount {
            code: Some(code.to_string()),
            count,
        }
    }

    #[test]
    fn test_chart_scales_to_largest_count() {
        let lines = chart_lines(&[entry("en", 10), entry("zh-TW", 5)]);

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("en     "));
        assert_eq!(lines[0].matches('█').count(), BAR_WIDTH);
        assert_eq!(lines[1].matches('█').count(), BAR_WIDTH / 2);
        assert!(lines[1].ends_with(" 5"));
    }

    #[test]
    fn test_chart_small_counts_still_visible() {
        let lines = chart_lines(&[entry("en", 1000), entry("fr", 1)]);
        assert_eq!(lines[1].matches('█').count(), 1);
    }

    #[test]
    fn test_chart_missing_code_label() {
        let lines = chart_lines(&[AggregateCount { code: None, count: 3 }]);
        assert!(lines[0].starts_with("?  "));
    }
}
