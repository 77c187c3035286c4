pub mod analytics;
pub mod demo;
pub mod events;
pub mod library;
pub mod patch;
pub mod policies;
pub mod rbac;
pub mod sites;
pub mod use_cases;
