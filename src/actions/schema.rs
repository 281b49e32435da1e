//! 能力目录：schemars 生成的参数 schema，注入系统提示词
//!
//! LLM 看到每个能力的 name / description / parameters，减少调用格式错误。

use schemars::schema_for;
use serde_json::json;

use crate::actions::registry::{HighlightArgs, PlaySoundArgs, HIGHLIGHT_OBJECT, PLAY_SOUND};

/// 每个能力一条 {name, description, parameters}，与注册表保持一致
pub fn catalog_json() -> String {
    let highlight = schema_for!(HighlightArgs);
    let play_sound = schema_for!(PlaySoundArgs);
    let catalog = json!([
        {
            "name": HIGHLIGHT_OBJECT,
            "description": "Highlight an object or socket in the VR scene to direct the user's attention, e.g. the socket where the held organ belongs.",
            "parameters": highlight,
        },
        {
            "name": PLAY_SOUND,
            "description": "Play a sound effect in the VR scene for auditory feedback, e.g. sound id 'positive_feedback_chime'.",
            "parameters": play_sound,
        },
    ]);
    serde_json::to_string_pretty(&catalog).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_lists_both_capabilities() {
        let catalog = catalog_json();
        assert!(catalog.contains("highlight_object"));
        assert!(catalog.contains("play_sound"));
    }

    #[test]
    fn test_catalog_exposes_parameter_names() {
        let catalog = catalog_json();
        assert!(catalog.contains("target_id"));
        assert!(catalog.contains("sound_id"));
        assert!(catalog.contains("pattern"));
    }

    #[test]
    fn test_catalog_is_valid_json() {
        let parsed: serde_json::Value = serde_json::from_str(&catalog_json()).unwrap();
        assert_eq!(parsed.as_array().map(|a| a.len()), Some(2));
    }
}
