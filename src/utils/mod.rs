pub mod environment;
pub mod logging;
pub mod paths;

pub use environment::get_cache_file;
pub use logging::init_logging;
pub use paths::{ensure_private_dir, format_path_with_tilde, validate_file_size};
