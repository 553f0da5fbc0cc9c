pub mod candidate_registry;
pub mod catalog_service;
pub mod question_master;
pub mod section_loader;
pub mod state_store;

pub use candidate_registry::CandidateRegistry;
pub use catalog_service::CatalogService;
pub use question_master::{LookupStep, QuestionMaster};
pub use section_loader::SectionLoader;
pub use state_store::{MemoryStateStore, StateStore};
