pub mod backend;
pub mod locking_policy;
pub mod platform;
