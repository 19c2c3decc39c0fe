//! # 감정 점수 서비스
//!
//! 사용자 메시지의 감정 극성(polarity)을 [-1.0, 1.0] 범위의 점수로 계산합니다.
//!
//! ## 계산 방식 (어휘 사전 기반)
//! 1. 소문자로 바꾸고 단어 단위로 자릅니다 (아포스트로피는 단어에 포함)
//! 2. 사전에 있는 단어마다 극성 값을 하나씩 모읍니다
//!    - 바로 앞의 강조어(very, really, ...)는 값에 배수를 곱합니다
//!    - 바로 앞의 부정어(not, never, don't, ...)는 값에 -0.5를 곱합니다
//! 3. 모은 값의 평균을 [-1.0, 1.0]으로 자릅니다
//!
//! 사전 단어가 하나도 없으면(빈 문자열 포함) 중립 `0.0`입니다. 이 함수는 실패하지 않습니다.

/// 부정어 뒤에 오는 극성에 곱하는 값
const NEGATION_FACTOR: f64 = -0.5;

/// 텍스트의 감정 점수를 계산합니다.
///
/// 같은 입력에는 항상 같은 점수를 돌려줍니다.
pub fn score(text: &str) -> f64 {
    let mut contributions: Vec<f64> = Vec::new();
    let mut intensity = 1.0;
    let mut negated = false;

    for token in tokenize(text) {
        if is_negation(&token) {
            negated = !negated;
            continue;
        }
        if let Some(factor) = intensifier(&token) {
            intensity *= factor;
            continue;
        }
        if let Some(polarity) = polarity(&token) {
            let mut value = polarity * intensity;
            if negated {
                value *= NEGATION_FACTOR;
            }
            contributions.push(value);
        } else if is_filler(&token) {
            // "not feeling good", "not a good idea": 수식어를 다음 단어까지 유지
            continue;
        }
        intensity = 1.0;
        negated = false;
    }

    if contributions.is_empty() {
        return 0.0;
    }

    let mean = contributions.iter().sum::<f64>() / contributions.len() as f64;
    mean.clamp(-1.0, 1.0)
}

/// 알파벳과 아포스트로피만 남기고 단어로 자릅니다.
/// 둥근 아포스트로피(’)는 일반 아포스트로피로 바꿉니다.
fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !(c.is_alphabetic() || c == '\'' || c == '’'))
        .filter(|word| !word.is_empty())
        .map(|word| word.replace('’', "'").to_lowercase())
}

fn is_negation(word: &str) -> bool {
    matches!(word, "not" | "no" | "never" | "nothing" | "hardly") || word.ends_with("n't")
}

fn is_filler(word: &str) -> bool {
    matches!(
        word,
        "a" | "an" | "the" | "that" | "this" | "it" | "be" | "been" | "am" | "is" | "are" | "was"
            | "were" | "feel" | "feeling" | "at" | "all"
    )
}

fn intensifier(word: &str) -> Option<f64> {
    let factor = match word {
        "very" | "really" | "so" | "super" | "totally" => 1.3,
        "extremely" | "incredibly" | "absolutely" => 1.5,
        "too" => 1.2,
        "quite" | "pretty" => 1.1,
        "slightly" | "somewhat" => 0.7,
        _ => return None,
    };
    Some(factor)
}

/// 어휘 사전: 단어 → 극성 값
///
/// 학습자가 대화 중에 자주 쓰는 형용사와 감정 표현 위주입니다.
/// "like"처럼 비교/전치사로 더 자주 쓰이는 단어는 넣지 않습니다.
fn polarity(word: &str) -> Option<f64> {
    let value = match word {
        // 긍정
        "excellent" | "perfect" | "wonderful" | "awesome" | "delicious" | "best"
        | "brilliant" | "superb" | "magnificent" | "marvelous" | "terrific" | "impressive"
        | "delightful" | "flawless" | "miraculous" => 1.0,
        "incredible" | "outstanding" => 0.9,
        "beautiful" | "gorgeous" => 0.85,
        "great" | "happy" | "proud" | "welcome" | "yay" | "wonderfully" => 0.8,
        "cheerful" | "thrilled" | "joyful" | "stunning" => 0.75,
        "successful" | "pleasant" | "lucky" => 0.73,
        "good" | "fabulous" | "fascinating" | "fluently" => 0.7,
        "amazing" | "nice" | "lovely" | "kind" | "grateful" | "warm" | "yummy" | "genius" => 0.6,
        "better" | "interesting" | "glad" | "love" | "loved" | "loving" | "fine" | "helpful"
        | "pleased" | "satisfied" | "thankful" | "favorite" | "favourite" | "cute" | "tasty"
        | "clever" | "safe" | "sure" | "fluent" | "polite" | "impressed" | "relieved" => 0.5,
        "easy" | "clear" | "easier" | "understandable" => 0.43,
        "fantastic" | "enjoy" | "enjoyed" | "enjoying" | "enjoyable" | "confident" | "comfortable"
        | "motivated" | "improving" | "improved" | "cheap" | "free" => 0.4,
        "excited" | "exciting" | "friendly" | "rich" | "curious" => 0.375,
        "cool" | "thanks" | "thank" | "sweet" | "appreciate" => 0.35,
        "fun" | "funny" | "hope" | "hopeful" | "calm" | "relaxed" | "useful" | "progress"
        | "fresh" | "success" | "ready" | "smile" | "laugh" => 0.3,
        "ok" | "okay" | "alright" | "positive" | "haha" | "smart" => 0.25,
        "right" | "correct" | "learned" | "learning" | "understand" => 0.2,
        // 부정
        "terrible" | "awful" | "horrible" | "worst" | "boring" | "miserable" | "disgusting"
        | "nasty" | "furious" | "pathetic" | "dreadful" => -1.0,
        "hate" | "hated" | "stupid" | "annoying" | "annoyed" | "hopeless" => -0.8,
        "disappointed" | "disappointing" => -0.75,
        "bad" | "ugly" | "frustrated" | "sick" | "painful" | "embarrassing" => -0.7,
        "impossible" => -0.67,
        "mad" | "unhappy" | "dirty" => -0.62,
        "afraid" | "scared" | "terrified" => -0.6,
        "difficult" | "sad" | "wrong" | "angry" | "sorry" | "useless" | "silly" | "weird"
        | "embarrassed" | "ashamed" | "upset" | "depressed" | "overwhelmed" | "hurt"
        | "expensive" | "bored" | "unfair" | "complicated" | "fail" | "failed" | "fear"
        | "ill" | "worthless" => -0.5,
        "confused" | "poor" | "worse" | "tired" | "frustrating" | "mistake" | "mistakes"
        | "lonely" | "stressed" | "stressful" | "exhausted" | "dull" | "struggling"
        | "struggle" | "tough" | "weak" | "dumb" => -0.4,
        "confusing" | "lost" | "slow" | "rude" | "noisy" | "late" | "problem" | "trouble"
        | "worry" | "unclear" | "cold" | "failure" | "forgot" => -0.3,
        "hard" => -0.29,
        "anxious" | "nervous" | "worried" | "unsure" | "awkward" => -0.2,
        _ => return None,
    };
    Some(value)
}
