//! # 감정 맞춤 문구 서비스
//!
//! 사용자 메시지의 감정 점수에 따라 도우미 응답 앞뒤에 격려/축하 문구를 붙입니다.
//!
//! ## 점수 구간
//! | 점수 s | 결과 |
//! |--------|------|
//! | s < -0.3 | `{격려 문구 중 무작위}{응답} 💪` |
//! | -0.3 ≤ s < 0 | `Keep going! {응답} You're getting better ...` |
//! | 0.1 < s ≤ 0.3 | `Well done! {응답} 👍` |
//! | s > 0.3 | `{축하 문구 중 무작위}{응답} 🎉` |
//! | 그 외 (0 ≤ s ≤ 0.1) | 응답 그대로 |
//!
//! 문구는 코드에 박힌 리터럴이 아니라 `PhrasePools` 데이터입니다.
//! `PHRASES_PATH` JSON 파일로 바꿀 수 있습니다 (현지화 등).

use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use std::path::Path;

const STRONG_NEGATIVE_BELOW: f64 = -0.3;
const STRONG_POSITIVE_ABOVE: f64 = 0.3;
const MILD_POSITIVE_ABOVE: f64 = 0.1;

/// 응답을 감싸는 앞/뒤 문구
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wrapper {
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub suffix: String,
}

impl Wrapper {
    fn new(prefix: &str, suffix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
        }
    }

    fn wrap(&self, response: &str) -> String {
        format!("{}{}{}", self.prefix, response, self.suffix)
    }
}

/// 점수 구간별 문구 묶음
///
/// JSON 예시:
/// ```json
/// {
///   "encouragements": ["Don't worry! ", "..."],
///   "encouragement_suffix": " 💪",
///   "mild_negative": { "prefix": "Keep going! ", "suffix": " ..." },
///   "mild_positive": { "prefix": "Well done! ", "suffix": " 👍" },
///   "celebrations": ["Fantastic! ", "..."],
///   "celebration_suffix": " 🎉"
/// }
/// ```
/// 빠진 필드는 기본값으로 채워집니다 (`#[serde(default)]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhrasePools {
    pub encouragements: Vec<String>,
    pub encouragement_suffix: String,
    pub mild_negative: Wrapper,
    pub mild_positive: Wrapper,
    pub celebrations: Vec<String>,
    pub celebration_suffix: String,
}

impl Default for PhrasePools {
    fn default() -> Self {
        Self {
            encouragements: vec![
                "Don't worry! Everyone makes mistakes while learning. ".to_string(),
                "That's a tricky one, but you're doing great! ".to_string(),
                "Learning a language takes time, and you're making progress! ".to_string(),
                "Keep going! Making mistakes is how we learn. ".to_string(),
            ],
            encouragement_suffix: " 💪".to_string(),
            mild_negative: Wrapper::new(
                "Keep going! ",
                " You're getting better with every conversation! 🌟",
            ),
            mild_positive: Wrapper::new("Well done! ", " 👍"),
            celebrations: vec![
                "Fantastic! ".to_string(),
                "That's perfect! ".to_string(),
                "Excellent work! ".to_string(),
                "You're really getting the hang of this! ".to_string(),
            ],
            celebration_suffix: " 🎉".to_string(),
        }
    }
}

impl PhrasePools {
    /// JSON 파일에서 문구 풀을 읽습니다.
    pub async fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let raw = tokio::fs::read_to_string(path.as_ref()).await?;
        let pools = serde_json::from_str(&raw)?;
        Ok(pools)
    }

    /// 감정 점수에 맞춰 응답을 다시 씁니다.
    ///
    /// 풀이 비어 있으면 앞 문구 없이 뒤 문구만 붙습니다.
    pub fn apply(&self, sentiment: f64, response: &str) -> String {
        if sentiment < STRONG_NEGATIVE_BELOW {
            let prefix = pick(&self.encouragements);
            format!("{prefix}{response}{}", self.encouragement_suffix)
        } else if sentiment < 0.0 {
            self.mild_negative.wrap(response)
        } else if sentiment > STRONG_POSITIVE_ABOVE {
            let prefix = pick(&self.celebrations);
            format!("{prefix}{response}{}", self.celebration_suffix)
        } else if sentiment > MILD_POSITIVE_ABOVE {
            self.mild_positive.wrap(response)
        } else {
            response.to_string()
        }
    }
}

/// 풀에서 하나를 무작위로 고릅니다. 빈 풀이면 빈 문자열
fn pick(pool: &[String]) -> &str {
    pool.choose(&mut rand::rng()).map(String::as_str).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPLY: &str = "¡Hola! ¿Cómo estás?";

    #[test]
    fn strong_negative_uses_an_encouragement() {
        let pools = PhrasePools::default();
        for score in [-1.0, -0.75, -0.31] {
            let out = pools.apply(score, REPLY);
            assert!(pools.encouragements.iter().any(|p| out.starts_with(p.as_str())));
            assert!(out.ends_with(&format!("{REPLY} 💪")));
        }
    }

    #[test]
    fn mild_negative_includes_the_boundary() {
        let pools = PhrasePools::default();
        for score in [-0.3, -0.1, -0.0001] {
            assert_eq!(
                pools.apply(score, REPLY),
                format!("Keep going! {REPLY} You're getting better with every conversation! 🌟")
            );
        }
    }

    #[test]
    fn neutral_band_is_unmodified() {
        let pools = PhrasePools::default();
        for score in [0.0, 0.05, 0.1] {
            assert_eq!(pools.apply(score, REPLY), REPLY);
        }
    }

    #[test]
    fn mild_positive_includes_upper_boundary() {
        let pools = PhrasePools::default();
        for score in [0.1001, 0.2, 0.3] {
            assert_eq!(pools.apply(score, REPLY), format!("Well done! {REPLY} 👍"));
        }
    }

    #[test]
    fn strong_positive_uses_a_celebration() {
        let pools = PhrasePools::default();
        for score in [0.31, 0.8, 1.0] {
            let out = pools.apply(score, REPLY);
            assert!(pools.celebrations.iter().any(|p| out.starts_with(p.as_str())));
            assert!(out.ends_with(&format!("{REPLY} 🎉")));
        }
    }

    #[test]
    fn empty_pool_keeps_only_the_suffix() {
        let pools = PhrasePools {
            celebrations: Vec::new(),
            ..PhrasePools::default()
        };
        assert_eq!(pools.apply(0.9, REPLY), format!("{REPLY} 🎉"));
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let pools: PhrasePools =
            serde_json::from_str(r#"{ "celebrations": ["¡Genial! "] }"#).unwrap();
        assert_eq!(pools.celebrations, vec!["¡Genial! ".to_string()]);
        assert_eq!(pools.encouragements, PhrasePools::default().encouragements);
        assert_eq!(pools.apply(0.9, REPLY), format!("¡Genial! {REPLY} 🎉"));
    }

    #[tokio::test]
    async fn load_reads_pools_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("phrases.json");
        tokio::fs::write(&path, r#"{ "encouragement_suffix": " ✊" }"#)
            .await
            .unwrap();

        let pools = PhrasePools::load(&path).await.unwrap();
        assert_eq!(pools.encouragement_suffix, " ✊");
        assert_eq!(pools.celebration_suffix, " 🎉");

        assert!(PhrasePools::load(dir.path().join("missing.json")).await.is_err());
    }
}
