pub mod analytics;
pub mod demo;
pub mod library;
pub mod policy;
pub mod rbac;
pub mod site;
pub mod use_case;
