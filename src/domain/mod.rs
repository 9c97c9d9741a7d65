// Domain layer - Activity metrics, movement trail and its rendering rules
pub mod metrics;
pub mod movement;
pub mod progress;
pub mod trail;
