pub mod helpers;
pub mod text;

pub use helpers::{
    PathKind, assert, assert_file_exists, ensure_dir, exists, new_temp_dir,
    new_temp_dir_with_prefix, new_temp_file, read_file, read_file_sync, remove_path,
    touch_file_sync, write_file, write_file_sync,
};
pub use text::{find_matches, join_path, join_paths, replace_in_file_sync};
