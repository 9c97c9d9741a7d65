// Application layer - Use cases and business logic
pub mod activity_repository;
pub mod dashboard_state;
pub mod poller;
