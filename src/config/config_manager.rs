// ==========================================
// 出荷明细台账 - 配置管理器
// ==========================================
// 职责: 配置加载 (默认值 → 配置文件 → 命令行覆写) 与校验
// 存储: JSON 配置文件 (可选)
// ==========================================

use crate::config::analysis_config::{parse_date_arg, parse_tolerance_arg, AnalysisConfig};
use crate::config::error::{ConfigError, ConfigResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 配置目录下的应用子目录名
const APP_CONFIG_DIR: &str = "sales-insight";

/// 配置文件名
const CONFIG_FILE_NAME: &str = "config.json";

// ==========================================
// ConfigOverrides - 命令行覆写项
// ==========================================
// 字符串原样传入,由管理器负责解析与校验
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub start: Option<String>,
    pub end: Option<String>,
    pub tolerance: Option<String>,
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// 使用显式配置文件
    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            config_path: Some(path.as_ref().to_path_buf()),
        }
    }

    /// 使用用户配置目录下的默认配置文件 (不存在时仅用默认值)
    pub fn from_default_location() -> Self {
        let path = default_config_path().filter(|p| p.exists());
        Self { config_path: path }
    }

    /// 不读取任何配置文件
    pub fn defaults_only() -> Self {
        Self { config_path: None }
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// 加载配置并应用覆写,返回已校验的配置
    pub fn load(&self, overrides: &ConfigOverrides) -> ConfigResult<AnalysisConfig> {
        let mut config = match &self.config_path {
            Some(path) => read_config_file(path)?,
            None => {
                debug!("未指定配置文件，使用默认配置");
                AnalysisConfig::default()
            }
        };

        if let Some(start) = &overrides.start {
            config.date_window.start = Some(parse_date_arg("start", start)?);
        }
        if let Some(end) = &overrides.end {
            config.date_window.end = Some(parse_date_arg("end", end)?);
        }
        if let Some(tol) = &overrides.tolerance {
            config.tolerance = parse_tolerance_arg(tol)?;
        }

        config.validate()?;

        info!(
            tolerance = config.tolerance,
            start = ?config.date_window.start,
            end = ?config.date_window.end,
            bins = config.quantity_bins.len(),
            "配置加载完成"
        );

        Ok(config)
    }
}

/// 用户配置目录下的默认配置文件路径
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_CONFIG_DIR).join(CONFIG_FILE_NAME))
}

fn read_config_file(path: &Path) -> ConfigResult<AnalysisConfig> {
    let raw = fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let config: AnalysisConfig = serde_json::from_str(&raw).map_err(|e| ConfigError::FileFormat {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    info!(path = %path.display(), "读取配置文件");
    Ok(config)
}
