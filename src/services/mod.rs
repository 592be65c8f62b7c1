pub mod broadcaster;
pub mod coordinator;
pub mod document_store;
pub mod session_registry;
