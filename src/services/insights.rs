//! # 학습 통계 서비스
//!
//! 저장된 기록을 읽어 통계 데이터를 만들고(`build_*`),
//! 그 데이터를 사람이 읽을 형태로 그립니다(`render_*`).
//! 데이터 모양과 표현을 분리해 두었으므로 렌더러만 바꿔 다른 화면에 쓸 수 있습니다.
//!
//! 캐시는 없습니다. 호출할 때마다 다시 집계합니다.

use crate::db;
use crate::error::AppError;
use crate::models::{InsightsReport, ProgressView};
use sqlx::SqlitePool;
use std::fmt::Write;

pub const TOP_SCENES_LIMIT: i64 = 3;
pub const RECENT_MISTAKES_LIMIT: i64 = 5;

/// 분류별 실수 집계와 가장 많이 연습한 장면을 모읍니다.
pub async fn build_report(pool: &SqlitePool) -> Result<InsightsReport, AppError> {
    Ok(InsightsReport {
        mistakes: db::mistake_counts(pool).await?,
        top_scenes: db::top_scenes(pool, TOP_SCENES_LIMIT).await?,
    })
}

/// 분류별 실수 집계와 최근 실수 목록을 모읍니다.
pub async fn build_progress(pool: &SqlitePool) -> Result<ProgressView, AppError> {
    Ok(ProgressView {
        mistakes: db::mistake_counts(pool).await?,
        recent_mistakes: db::recent_mistakes(pool, RECENT_MISTAKES_LIMIT).await?,
    })
}

/// 리포트를 텍스트로 그립니다.
///
/// ```text
/// 📊 Learning Progress Report
///
/// 🎯 Areas to Focus On:
/// - Grammar: 2 occurrences (50.0% mastered)
///
/// 🗣️ Most Practiced Scenarios:
/// - greeting someone: 3 conversations
/// ```
pub fn render_text(report: &InsightsReport) -> String {
    let mut out = String::from("📊 Learning Progress Report\n\n");

    // String에 대한 write!는 실패하지 않으므로 결과를 버립니다
    if !report.mistakes.is_empty() {
        out.push_str("🎯 Areas to Focus On:\n");
        for stats in &report.mistakes {
            let _ = writeln!(
                out,
                "- {}: {} occurrences ({:.1}% mastered)",
                title_case(&stats.mistake_type),
                stats.total,
                stats.mastered_percent()
            );
        }
    }

    if !report.top_scenes.is_empty() {
        out.push_str("\n🗣️ Most Practiced Scenarios:\n");
        for scene in &report.top_scenes {
            let _ = writeln!(out, "- {}: {} conversations", scene.scene, scene.count);
        }
    }

    out
}

/// 진행 상황을 HTML 조각으로 그립니다.
///
/// 스타일은 넣지 않습니다. 사용자 입력과 응답은 모두 이스케이프합니다.
pub fn render_html(view: &ProgressView) -> String {
    let mut out = String::from("<section class=\"progress\">\n<h3>🎯 Your Learning Progress</h3>\n<ul class=\"mistake-types\">\n");

    for stats in &view.mistakes {
        let unit = if stats.total == 1 { "time" } else { "times" };
        let _ = writeln!(
            out,
            "<li class=\"{}\"><strong>{}</strong> {} {}</li>",
            escape_html(&stats.mistake_type),
            escape_html(&title_case(&stats.mistake_type)),
            stats.total,
            unit
        );
    }

    out.push_str("</ul>\n<h3>💡 Recent Learning Opportunities</h3>\n<table>\n");
    out.push_str("<thead><tr><th>You Said</th><th>Correction</th><th>Mistake Type</th><th>Timestamp</th></tr></thead>\n<tbody>\n");

    if view.recent_mistakes.is_empty() {
        out.push_str("<tr><td colspan=\"4\">No recent mistakes recorded.</td></tr>\n");
    } else {
        for mistake in &view.recent_mistakes {
            let _ = writeln!(
                out,
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape_html(&mistake.user_input),
                escape_html(&mistake.correction),
                escape_html(&title_case(&mistake.mistake_type)),
                escape_html(&mistake.timestamp)
            );
        }
    }

    out.push_str("</tbody>\n</table>\n</section>\n");
    out
}

/// 각 단어의 첫 글자만 대문자로 바꿉니다 ("grammar" → "Grammar").
pub fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
