pub mod lock;
pub mod misc;
pub mod unlock;
