//! 能力注册表：推理层可调用的封闭能力集
//!
//! 每个能力 = 名称 + 参数 schema + 纯构造（参数 -> Action）。按名派发分两步：
//! 先查名（未注册 -> UnknownCapability），再做 serde 校验（失败 -> InvalidArgs）。
//! 两类错误都写回给推理层自行纠正，不向用户透出。

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

use crate::actions::action::{Action, COMMAND_HIGHLIGHT, COMMAND_PLAY_SOUND};

/// highlight 能力名
pub const HIGHLIGHT_OBJECT: &str = "highlight_object";
/// play_sound 能力名
pub const PLAY_SOUND: &str = "play_sound";

/// 已注册的能力名，提示词与错误信息共用
pub const CAPABILITY_NAMES: &[&str] = &[HIGHLIGHT_OBJECT, PLAY_SOUND];

/// 能力派发错误；由调度循环消化（观察写回），不是致命错误
#[derive(Debug, Error)]
pub enum CapabilityError {
    #[error("unknown capability '{name}', available: {available}")]
    UnknownCapability { name: String, available: String },

    #[error("invalid arguments for '{name}': {detail}")]
    InvalidArgs { name: String, detail: String },
}

/// 高亮闪烁模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum HighlightPattern {
    Pulse,
    Steady,
}

impl Default for HighlightPattern {
    fn default() -> Self {
        HighlightPattern::Pulse
    }
}

/// highlight_object 参数；target_id 必填，其余带默认值
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct HighlightArgs {
    /// 要高亮的对象或插槽 id，如 socket_heart
    pub target_id: String,
    /// 十六进制高亮颜色
    #[serde(default = "default_color")]
    pub color: String,
    /// 持续秒数
    #[serde(default = "default_duration")]
    pub duration: u32,
    /// pulse 或 steady
    #[serde(default)]
    pub pattern: HighlightPattern,
}

fn default_color() -> String {
    "#00FF00".to_string()
}

fn default_duration() -> u32 {
    5
}

/// play_sound 参数
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct PlaySoundArgs {
    /// 音效 id，如 positive_feedback_chime
    pub sound_id: String,
}

/// 校验通过的能力调用
#[derive(Debug, Clone)]
pub enum Capability {
    Highlight(HighlightArgs),
    PlaySound(PlaySoundArgs),
}

impl Capability {
    /// 按名构造并校验参数
    pub fn build(name: &str, args: Value) -> Result<Capability, CapabilityError> {
        match name {
            HIGHLIGHT_OBJECT => serde_json::from_value::<HighlightArgs>(args)
                .map(Capability::Highlight)
                .map_err(|e| CapabilityError::InvalidArgs {
                    name: name.to_string(),
                    detail: e.to_string(),
                }),
            PLAY_SOUND => serde_json::from_value::<PlaySoundArgs>(args)
                .map(Capability::PlaySound)
                .map_err(|e| CapabilityError::InvalidArgs {
                    name: name.to_string(),
                    detail: e.to_string(),
                }),
            _ => Err(CapabilityError::UnknownCapability {
                name: name.to_string(),
                available: CAPABILITY_NAMES.join(", "),
            }),
        }
    }

    /// 能力名
    pub fn name(&self) -> &'static str {
        match self {
            Capability::Highlight(_) => HIGHLIGHT_OBJECT,
            Capability::PlaySound(_) => PLAY_SOUND,
        }
    }

    /// 纯构造：把校验过的参数映射为场景动作
    pub fn into_action(self) -> Action {
        match self {
            Capability::Highlight(args) => Action {
                command: COMMAND_HIGHLIGHT.to_string(),
                target_id: args.target_id,
                options: Some(json!({
                    "color": args.color,
                    "duration": args.duration,
                    "pattern": args.pattern,
                })),
            },
            Capability::PlaySound(args) => Action {
                command: COMMAND_PLAY_SOUND.to_string(),
                target_id: args.sound_id,
                options: None,
            },
        }
    }
}
