//! Flashpad - Notion-like block editor for remotely stored markdown documents
//!
//! Every line of a document is edited on its own and shown as rendered
//! markdown once the cursor leaves it. Documents live on a remote HTTP API and
//! are saved automatically after a short pause in typing.

pub mod app;
pub mod core;
pub mod remote;
pub mod state;
pub mod ui;
