pub mod engagement;
pub mod health;

pub use engagement::engagement_score;
pub use health::{health_score, health_status};
