//! Platform classification and release asset selection.

mod picker;
mod platform;

pub use picker::{matches_platform, pick};
pub use platform::{PlatformTag, host_os_family, is_mobile_device};
