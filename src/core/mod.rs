pub mod dispatch;
pub mod mode;

pub use dispatch::dispatch;
pub use mode::{UploadRequest, is_writable, validate_mode};
