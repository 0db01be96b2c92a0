use crate::error::{ReportError, Result};
use autoed_report_common::{Database, PipelineManifest, SortKey};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// autoed が書き出すデータベースのファイル名
pub const DEFAULT_DATABASE_FILE: &str = "autoed_database.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// ディレクトリを渡されたときに探すファイル名
    pub database_file: String,
    /// 表示するパイプライン（未指定ならデータベースから収集）
    pub pipelines: Option<Vec<String>>,
    /// html 出力時のソート
    pub default_sort: Option<SortKey>,
    pub report_title: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_file: DEFAULT_DATABASE_FILE.into(),
            pipelines: None,
            default_sort: None,
            report_title: "autoed processing report".into(),
        }
    }
}

impl Config {
    /// ホームディレクトリの設定を読む（ホームがなければデフォルト）
    pub fn load() -> Result<Self> {
        Self::load_with_home(dirs::home_dir().as_deref())
    }

    pub fn load_with_home(home: Option<&Path>) -> Result<Self> {
        match home {
            Some(home) => Self::load_from(&Self::path_in(home)),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ReportError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(Self::path_in(&home))
    }

    fn path_in(home: &Path) -> PathBuf {
        home.join(".config").join("autoed-report").join("config.json")
    }

    /// データベースファイルのパスを解決（ディレクトリなら database_file を付ける）
    pub fn resolve_database_path(&self, input: &Path) -> PathBuf {
        if input.is_dir() {
            input.join(&self.database_file)
        } else {
            input.to_path_buf()
        }
    }

    /// 表示するパイプライン一覧
    pub fn manifest_for(&self, database: &Database) -> PipelineManifest {
        match &self.pipelines {
            Some(names) if !names.is_empty() => PipelineManifest::new(names.iter().cloned()),
            _ => PipelineManifest::discover(database),
        }
    }
}

/// データベースを読み込む
pub fn load_database(path: &Path) -> Result<Database> {
    if !path.exists() {
        return Err(ReportError::DatabaseNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    Ok(Database::from_json_str(&content)?)
}
