// ============================================
// Systems Module - ECS-подобные системы
// ============================================

mod input_system;
mod block_interaction_system;
mod update_system;

pub use input_system::{InputController, Intent, IntentOutcome};
pub use block_interaction_system::BlockInteractionSystem;
pub use update_system::UpdateSystem;
