//! JSONデータベースの型定義
//!
//! autoed_database.json の構造:
//! - Database: データセットパス → DatasetRecord（記述順を保持）
//! - DatasetRecord: パイプライン名 → PipelineResult + beam/spots画像
//! - PipelineManifest: 表示するパイプライン名の一覧

use crate::error::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// 氷の検出専用パイプライン名
pub const ICE_PIPELINE: &str = "ice";

/// 型が合わず読めなかったパイプライン結果のステータス
pub const INVALID_RESULT_STATUS: &str = "invalid_result";

const BEAM_IMAGE_KEY: &str = "beam_image";
const SPOTS_IMAGE_KEY: &str = "spots_image";
const TITLE_KEY: &str = "title";

/// パイプラインの実行ステータス
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    Ok,
    ProcessError,
    NoData,
    /// 上記以外（`parse_error` や null、文字列でない値を含む）
    Unrecognized(String),
}

impl RunStatus {
    pub fn as_str(&self) -> &str {
        match self {
            RunStatus::Ok => "OK",
            RunStatus::ProcessError => "process_error",
            RunStatus::NoData => "no_data",
            RunStatus::Unrecognized(raw) => raw,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, RunStatus::Ok)
    }
}

impl Default for RunStatus {
    fn default() -> Self {
        RunStatus::Unrecognized(String::new())
    }
}

impl From<Option<String>> for RunStatus {
    fn from(value: Option<String>) -> Self {
        match value.as_deref() {
            Some("OK") => RunStatus::Ok,
            Some("process_error") => RunStatus::ProcessError,
            Some("no_data") => RunStatus::NoData,
            Some(other) => RunStatus::Unrecognized(other.to_string()),
            None => RunStatus::default(),
        }
    }
}

impl From<&str> for RunStatus {
    fn from(value: &str) -> Self {
        RunStatus::from(Some(value.to_string()))
    }
}

impl Serialize for RunStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RunStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let status = match Value::deserialize(deserializer)? {
            Value::String(s) => RunStatus::from(Some(s)),
            Value::Null => RunStatus::default(),
            other => RunStatus::Unrecognized(other.to_string()),
        };
        Ok(status)
    }
}

/// 1パイプラインの処理結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineResult {
    /// 列見出しになるパイプライン名
    pub title: Option<String>,
    pub status: RunStatus,
    pub tooltip: Option<String>,
    /// xia2レポートへのリンク
    pub link: Option<String>,
    /// [a, b, c, alpha, beta, gamma]
    pub unit_cell: Option<Vec<f64>>,
    pub space_group: Option<String>,
    pub indexed: Option<u64>,
    pub total_spots: Option<u64>,
    pub warnings: Option<Value>,
}

impl PipelineResult {
    /// JSONの値から読み込む
    ///
    /// 型の合わないフィールドがあっても失敗せず、title だけを残した
    /// `invalid_result` ステータスの結果になる。
    pub fn from_value(value: &Value) -> Self {
        PipelineResult::deserialize(value).unwrap_or_else(|_| PipelineResult {
            title: value.get(TITLE_KEY).and_then(Value::as_str).map(str::to_string),
            status: RunStatus::Unrecognized(INVALID_RESULT_STATUS.to_string()),
            ..Default::default()
        })
    }

    /// 6要素そろった格子定数のみ返す
    pub fn cell(&self) -> Option<[f64; 6]> {
        let values = self.unit_cell.as_deref()?;
        <[f64; 6]>::try_from(values).ok()
    }

    /// indexed / total_spots（どちらか欠損、または total_spots = 0 なら None）
    pub fn indexed_fraction(&self) -> Option<f64> {
        match (self.indexed, self.total_spots) {
            (Some(indexed), Some(total)) if total > 0 => Some(indexed as f64 / total as f64),
            _ => None,
        }
    }
}

/// 1データセット分のレコード
///
/// JSON上は画像パスとパイプライン結果が同じオブジェクトに並ぶ。
/// `title` を持つオブジェクトだけをパイプライン結果として読み、他は捨てる。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub struct DatasetRecord {
    pub beam_image: Option<String>,
    pub spots_image: Option<String>,
    pub(crate) pipelines: IndexMap<String, PipelineResult>,
}

impl DatasetRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// パイプライン結果を追加（同名は位置を保ったまま上書き）
    pub fn insert_pipeline(&mut self, name: impl Into<String>, result: PipelineResult) {
        self.pipelines.insert(name.into(), result);
    }

    pub fn with_pipeline(mut self, name: impl Into<String>, result: PipelineResult) -> Self {
        self.insert_pipeline(name, result);
        self
    }

    pub fn pipeline(&self, name: &str) -> Option<&PipelineResult> {
        self.pipelines.get(name)
    }

    /// 記述順のパイプライン結果
    pub fn pipelines(&self) -> impl Iterator<Item = (&str, &PipelineResult)> {
        self.pipelines.iter().map(|(n, r)| (n.as_str(), r))
    }
}

fn image_path(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_string)
}

impl From<Value> for DatasetRecord {
    fn from(value: Value) -> Self {
        let Value::Object(members) = value else {
            return DatasetRecord::new();
        };

        let mut record = DatasetRecord {
            beam_image: image_path(members.get(BEAM_IMAGE_KEY)),
            spots_image: image_path(members.get(SPOTS_IMAGE_KEY)),
            ..Default::default()
        };
        for (key, member) in &members {
            if key == BEAM_IMAGE_KEY || key == SPOTS_IMAGE_KEY {
                continue;
            }
            if member.get(TITLE_KEY).is_some() {
                record.insert_pipeline(key.as_str(), PipelineResult::from_value(member));
            }
        }
        record
    }
}

impl From<DatasetRecord> for Value {
    fn from(record: DatasetRecord) -> Self {
        let mut members = serde_json::Map::new();
        for (name, result) in record.pipelines {
            members.insert(name, serde_json::to_value(result).unwrap_or_default());
        }
        members.insert(BEAM_IMAGE_KEY.to_string(), record.beam_image.into());
        members.insert(SPOTS_IMAGE_KEY.to_string(), record.spots_image.into());
        Value::Object(members)
    }
}

/// データセットパス → レコードのマップ（記述順を保持）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Database {
    entries: IndexMap<String, DatasetRecord>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    /// JSON文字列から読み込み
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// データセットを追加（既存キーは位置を保ったまま上書き）
    pub fn insert(&mut self, path: impl Into<String>, record: DatasetRecord) {
        self.entries.insert(path.into(), record);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 記述順のインデックスでエントリを取得
    pub fn entry(&self, index: usize) -> Option<(&str, &DatasetRecord)> {
        self.entries.get_index(index).map(|(p, r)| (p.as_str(), r))
    }

    pub fn get(&self, path: &str) -> Option<&DatasetRecord> {
        self.entries.get(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DatasetRecord)> {
        self.entries.iter().map(|(p, r)| (p.as_str(), r))
    }

    /// 記述順そのままのビュー
    pub fn written_order(&self) -> Vec<usize> {
        (0..self.entries.len()).collect()
    }
}

/// 表示するパイプラインの一覧（重複なし、順序あり）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PipelineManifest {
    names: Vec<String>,
}

impl PipelineManifest {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut manifest = Self::default();
        for name in names {
            manifest.push(name.into());
        }
        manifest
    }

    /// データベース全体を走査し、title を初出順に集める
    pub fn discover(database: &Database) -> Self {
        let mut manifest = Self::default();
        for (_, record) in database.iter() {
            for (_, result) in record.pipelines() {
                if let Some(title) = &result.title {
                    manifest.push(title.clone());
                }
            }
        }
        manifest
    }

    fn push(&mut self, name: String) {
        if !self.names.contains(&name) {
            self.names.push(name);
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(|s| s.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
