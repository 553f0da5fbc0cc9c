//! 基础设施层：目录布局与文件指纹

pub mod data_layout;
pub mod fingerprint;

pub use data_layout::{group_prefix, is_safe_name, normalize_file_name, DataLayout, RESERVED_SECTION_FILES};
pub use fingerprint::{DependencySet, FileFingerprint};
