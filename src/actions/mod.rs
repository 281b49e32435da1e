//! 场景动作与能力注册表

pub mod action;
pub mod registry;
pub mod schema;

pub use action::{Action, COMMAND_HIGHLIGHT, COMMAND_PLAY_SOUND};
pub use registry::{
    Capability, CapabilityError, HighlightArgs, HighlightPattern, PlaySoundArgs, CAPABILITY_NAMES,
    HIGHLIGHT_OBJECT, PLAY_SOUND,
};
pub use schema::catalog_json;
