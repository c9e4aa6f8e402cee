pub mod error;
mod global_consts;
mod helpers;
pub mod host_fs;
pub mod temp_dir;

pub use error::*;
pub use global_consts::NUM_RETRY;
pub use host_fs::{HostFs, OsFs};
pub use temp_dir::{CloseGuard, ScopedTempDir};
