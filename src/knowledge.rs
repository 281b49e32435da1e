//! 解剖知识库：器官 id -> 事实
//!
//! 进程启动时从 config/anatomy.toml 加载，文件缺失或解析失败时退回内置数据；
//! 运行期间只读。lookup 对未知/空 id 只返回 None，不算错误。

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

/// 单条器官记录：展示名、正确的安放 socket、描述与功能
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganRecord {
    pub id: String,
    pub display_name: String,
    pub socket_id: String,
    pub description: String,
    pub function: String,
}

/// anatomy.toml 顶层：[[organs]] 数组
#[derive(Debug, Deserialize)]
struct AnatomyFile {
    #[serde(default)]
    organs: Vec<OrganRecord>,
}

/// 知识库：按器官 id 索引，整个进程共享
#[derive(Debug, Default)]
pub struct KnowledgeBase {
    organs: HashMap<String, OrganRecord>,
}

impl KnowledgeBase {
    /// 内置数据：与 config/anatomy.toml 相同的五个器官，文件缺失时兜底
    pub fn builtin() -> Self {
        fn rec(id: &str, display_name: &str, socket_id: &str, description: &str, function: &str) -> OrganRecord {
            OrganRecord {
                id: id.to_string(),
                display_name: display_name.to_string(),
                socket_id: socket_id.to_string(),
                description: description.to_string(),
                function: function.to_string(),
            }
        }

        Self::from_records(vec![
            rec(
                "heart",
                "Heart",
                "socket_heart",
                "The heart is a muscular organ that pumps blood through the circulatory system by contraction and relaxation.",
                "Its primary function is to pump oxygenated blood to the body and deoxygenated blood to the lungs.",
            ),
            rec(
                "liver",
                "Liver",
                "socket_liver",
                "The liver is a large, meaty organ that sits on the right side of the belly, weighing about 3 pounds.",
                "It filters the blood from the digestive tract, detoxifies chemicals, metabolizes drugs, and makes proteins important for blood clotting.",
            ),
            rec(
                "stomach",
                "Stomach",
                "socket_stomach",
                "The stomach is a J-shaped organ that digests food. It produces enzymes and acids.",
                "It secretes acid and enzymes that digest food, breaking it down before it moves to the small intestine.",
            ),
            rec(
                "left_lung",
                "Left Lung",
                "socket_left_lung",
                "The left lung is one of the two lungs, located in the chest. It is slightly smaller than the right lung to make room for the heart.",
                "Its main function is the process of gas exchange called respiration (or breathing).",
            ),
            rec(
                "right_lung",
                "Right Lung",
                "socket_right_lung",
                "The right lung is one of the two lungs, located in the chest. It is divided into three lobes.",
                "Its main function is the process of gas exchange called respiration (or breathing).",
            ),
        ])
    }

    pub fn from_records(records: Vec<OrganRecord>) -> Self {
        let organs = records.into_iter().map(|r| (r.id.clone(), r)).collect();
        Self { organs }
    }

    /// 从 TOML 文本解析
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        let file: AnatomyFile = toml::from_str(text)?;
        Ok(Self::from_records(file.organs))
    }

    /// 读 `config_base`/anatomy.toml；缺失、解析失败或为空时退回内置数据
    pub fn load(config_base: &Path) -> Self {
        let path = config_base.join("anatomy.toml");
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Cannot read {}: {}, using builtin set", path.display(), e);
                return Self::builtin();
            }
        };
        match Self::from_toml_str(&text) {
            Ok(kb) if !kb.is_empty() => {
                tracing::info!("Loaded {} organs from {}", kb.len(), path.display());
                kb
            }
            Ok(_) => {
                tracing::warn!("{} contains no organs, using builtin set", path.display());
                Self::builtin()
            }
            Err(e) => {
                tracing::warn!("Failed to parse {}: {}, using builtin set", path.display(), e);
                Self::builtin()
            }
        }
    }

    /// 查器官；未知或空 id 返回 None
    pub fn lookup(&self, organ_id: &str) -> Option<&OrganRecord> {
        self.organs.get(organ_id)
    }

    /// 全部器官（无序）
    pub fn all(&self) -> impl Iterator<Item = &OrganRecord> {
        self.organs.values()
    }

    /// 全部合法的 socket id，供高亮目标校验
    pub fn socket_ids(&self) -> HashSet<String> {
        self.organs.values().map(|r| r.socket_id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.organs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.organs.is_empty()
    }
}
