//! 按需加载注册
//!
//! 宿主进程启动时按注册信息自动装载应用。注册信息保存为
//! 层级化的JSON文档，布局模仿原生注册表：产品版本键下的
//! `Applications` 键内每个应用一个条目，条目携带描述、装载
//! 原因标志、装载器路径与托管标志。

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 产品版本键（注册文档的根键）
const PRODUCT_KEY: &str = "R1.0";
const APPLICATIONS_KEY: &str = "Applications";

/// 命令执行时装载
pub const LOADCTRLS_ON_COMMAND: u32 = 4;
/// 宿主启动时装载
pub const LOADCTRLS_ON_STARTUP: u32 = 2;

#[derive(Error, Debug)]
pub enum RegisterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type RegisterResult<T> = Result<T, RegisterError>;

/// 单个应用的注册条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppEntry {
    #[serde(rename = "DESCRIPTION")]
    pub description: String,
    /// 装载原因标志
    #[serde(rename = "LOADCTRLS")]
    pub loadctrls: u32,
    /// 装载器（应用库文件）路径
    #[serde(rename = "LOADER")]
    pub loader: PathBuf,
    #[serde(rename = "MANAGED")]
    pub managed: u32,
}

/// 注册文档（产品版本键 → Applications → 应用条目）
#[derive(Debug, Default, Serialize, Deserialize)]
struct RegistryDoc {
    #[serde(flatten)]
    versions: std::collections::BTreeMap<
        String,
        std::collections::BTreeMap<String, std::collections::BTreeMap<String, AppEntry>>,
    >,
}

/// 文件后端的注册信息存储
#[derive(Debug)]
pub struct RegistrationStore {
    path: PathBuf,
}

impl RegistrationStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 创建应用的按需加载条目
    ///
    /// 版本键与 `Applications` 键不存在时一并创建。已存在同名
    /// 应用且 `overwrite` 为 false 时不做任何变更并返回 false。
    pub fn create_demand_loading_entries(
        &self,
        app_name: &str,
        description: &str,
        loader: &Path,
        overwrite: bool,
        loadctrls: u32,
    ) -> RegisterResult<bool> {
        let mut doc = self.load()?;
        let apps = doc
            .versions
            .entry(PRODUCT_KEY.to_string())
            .or_default()
            .entry(APPLICATIONS_KEY.to_string())
            .or_default();

        if !overwrite && apps.contains_key(app_name) {
            return Ok(false);
        }
        apps.insert(
            app_name.to_string(),
            AppEntry {
                description: description.to_string(),
                loadctrls,
                loader: loader.to_path_buf(),
                managed: 1,
            },
        );
        self.save(&doc)?;
        tracing::debug!(app_name, "demand loading entries created");
        Ok(true)
    }

    /// 删除应用的按需加载条目
    ///
    /// 应用不存在时返回 false。
    pub fn remove_demand_loading_entries(&self, app_name: &str) -> RegisterResult<bool> {
        let mut doc = self.load()?;
        let Some(apps) = doc
            .versions
            .get_mut(PRODUCT_KEY)
            .and_then(|v| v.get_mut(APPLICATIONS_KEY))
        else {
            return Ok(false);
        };
        if apps.remove(app_name).is_none() {
            return Ok(false);
        }
        self.save(&doc)?;
        tracing::debug!(app_name, "demand loading entries removed");
        Ok(true)
    }

    /// 读取应用的注册条目
    pub fn entry(&self, app_name: &str) -> RegisterResult<Option<AppEntry>> {
        let doc = self.load()?;
        Ok(doc
            .versions
            .get(PRODUCT_KEY)
            .and_then(|v| v.get(APPLICATIONS_KEY))
            .and_then(|apps| apps.get(app_name))
            .cloned())
    }

    /// 已注册应用名的列表（按名称排序）
    pub fn registered_apps(&self) -> RegisterResult<Vec<String>> {
        let doc = self.load()?;
        Ok(doc
            .versions
            .get(PRODUCT_KEY)
            .and_then(|v| v.get(APPLICATIONS_KEY))
            .map(|apps| apps.keys().cloned().collect())
            .unwrap_or_default())
    }

    fn load(&self) -> RegisterResult<RegistryDoc> {
        if !self.path.exists() {
            return Ok(RegistryDoc::default());
        }
        let data = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&data)?)
    }

    fn save(&self, doc: &RegistryDoc) -> RegisterResult<()> {
        let data = serde_json::to_string_pretty(doc)?;
        std::fs::write(&self.path, data)?;
        Ok(())
    }
}
