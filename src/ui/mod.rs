//! UI components for Flashpad

pub mod block_editor;
pub mod dialogs;
pub mod editor;
pub mod sidebar;
pub mod toasts;
