pub mod json_loader;

pub use json_loader::{list_json_files, list_subdirectories, load_json_file, read_json_file};
