//! Core functionality: line model, block editor, document sessions, storage and configuration

pub mod block_editor;
pub mod config;
pub mod credentials;
pub mod debounce;
pub mod document;
pub mod document_list;
pub mod error;
pub mod export;
pub mod line;
pub mod markdown;
pub mod notifications;
pub mod session;
