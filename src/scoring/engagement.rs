use chrono::Utc;

use crate::{clamp01, Engagement, EngagementLevel, Post, Thread};

/// Heuristic engagement score: base 0.5 plus weighted bonuses, clamped to
/// [0,1]. Each contributing bonus is recorded as a factor string in the order
/// it is evaluated.
pub fn engagement_score(thread: &Thread, _posts: &[Post]) -> Engagement {
    let mut score = 0.5;
    let mut factors = Vec::new();

    if thread.reply_count > 10 {
        score += 0.3;
        factors.push("high reply volume".to_string());
    } else if thread.reply_count > 3 {
        score += 0.1;
        factors.push("steady replies".to_string());
    }

    // Divisor floored at 1 so a reply-less thread cannot earn the ratio bonus.
    let ratio = thread.view_count as f64 / thread.reply_count.max(1) as f64;
    if thread.reply_count > 0 && ratio > 20.0 {
        score += 0.2;
        factors.push("strong view-to-reply ratio".to_string());
    }

    let age_hours = (Utc::now() - thread.created_at).num_hours();
    if age_hours < 24 {
        score += 0.1;
        factors.push("created in the last day".to_string());
    }

    if thread.pinned {
        score += 0.2;
        factors.push("pinned thread".to_string());
    }

    if thread.title.contains('?') {
        score += 0.1;
        factors.push("question title".to_string());
    }

    let score = clamp01(score);
    Engagement {
        score,
        level: level_for(score),
        factors,
    }
}

fn level_for(score: f64) -> EngagementLevel {
    if score > 0.7 {
        EngagementLevel::High
    } else if score > 0.4 {
        EngagementLevel::Medium
    } else {
        EngagementLevel::Low
    }
}
