//! Service layer for billcover
//!
//! Business logic on top of the record store: validated editing and the
//! transfer recommendation.

pub mod editor;
pub mod transfer;

pub use editor::EditorService;
pub use transfer::{calculate_transfer, TransferConfig, TransferReport};
