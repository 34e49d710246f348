pub mod dispatch;
pub mod sessions;
pub mod study;
