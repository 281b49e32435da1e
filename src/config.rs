//! 应用配置加载
//!
//! 先读 TOML 文件（config/default.toml，兼容从子目录启动的相对路径），
//! 再用环境变量 `MEXR__*` 覆盖，双下划线表示嵌套（如 `MEXR__SERVER__PORT=9000`）。
//! 所有字段都有默认值，配置文件缺失时服务仍可启动。

use std::path::PathBuf;

use serde::Deserialize;

/// 应用配置根，对应 config/default.toml 的顶层
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub app: AppSection,
    pub llm: LlmSection,
    pub server: ServerSection,
}

/// [app] 段：服务名与会话历史上限
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppSection {
    pub name: Option<String>,
    /// 每个会话保留的历史消息条数，user 和 assistant 各算一条
    pub max_history_messages: usize,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            name: None,
            max_history_messages: 10,
        }
    }
}

/// [llm] 段：后端选择、模型与超时
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmSection {
    /// 后端：openai / mock；没有 OPENAI_API_KEY 时自动落到 mock
    pub provider: String,
    pub model: String,
    /// OpenAI 兼容端点，未设置时走官方 API
    pub base_url: Option<String>,
    /// 采样温度；问答要求稳定输出，默认 0
    pub temperature: f32,
    pub timeouts: LlmTimeoutsSection,
}

impl Default for LlmSection {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "gpt-4o".to_string(),
            base_url: None,
            temperature: 0.0,
            timeouts: LlmTimeoutsSection::default(),
        }
    }
}

/// [llm.timeouts] 段
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmTimeoutsSection {
    /// 单次推理请求超时（秒）
    pub request: u64,
}

impl Default for LlmTimeoutsSection {
    fn default() -> Self {
        Self { request: 60 }
    }
}

/// [server] 段：监听地址与端口
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

/// 加载配置；`config_path` 指定具体文件，缺省时探测常见位置
pub fn load_config(config_path: Option<PathBuf>) -> Result<AppConfig, config::ConfigError> {
    let mut builder = config::Config::builder();

    if let Some(path) = config_path {
        builder = builder.add_source(config::File::from(path).required(false));
    } else {
        for name in ["config/default", "../config/default", "default"] {
            builder = builder.add_source(config::File::with_name(name).required(false));
        }
    }

    builder = builder.add_source(
        config::Environment::with_prefix("MEXR")
            .separator("__")
            .try_parsing(true),
    );

    builder.build()?.try_deserialize()
}
