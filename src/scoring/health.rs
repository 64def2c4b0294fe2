use crate::{clamp01, HealthStatus};

/// Community health score: unweighted mean of normalized engagement,
/// normalized sentiment, and normalized activity.
pub fn health_score(thread_count: usize, total_replies: u64, sentiment_score: f64) -> f64 {
    if thread_count == 0 {
        return 0.5;
    }
    let avg_replies = total_replies as f64 / thread_count as f64;
    let engagement = (avg_replies / 5.0).min(1.0);
    let sentiment = clamp01((sentiment_score + 1.0) / 2.0);
    let activity = (thread_count as f64 / 20.0).min(1.0);
    clamp01((engagement + sentiment + activity) / 3.0)
}

pub fn health_status(score: f64) -> HealthStatus {
    if score > 0.8 {
        HealthStatus::Excellent
    } else if score > 0.6 {
        HealthStatus::Healthy
    } else if score > 0.4 {
        HealthStatus::Concerning
    } else {
        HealthStatus::Critical
    }
}
