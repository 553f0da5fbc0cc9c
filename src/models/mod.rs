pub mod candidate;
pub mod catalog;
pub mod loaders;
pub mod question;
pub mod section;

pub use candidate::{Candidate, ScriptSection};
pub use catalog::{Catalog, CatalogItem};
pub use loaders::{list_json_files, list_subdirectories, load_json_file, read_json_file};
pub use question::{GroupEntry, GroupItem, QuestionDefinition};
pub use section::{SectionDocument, SectionFile, SectionFileEntry};
