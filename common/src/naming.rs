//! データセット名とセッション
//!
//! データセットのパスは `.../<年>/<セッション>/.../<ファイル>` という規則で
//! 生成されている。最初の4桁の年セグメントを起点に表示名とセッションを取り出す。

use crate::model::Database;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// セレクタの「全セッション」値
pub const ALL_SESSIONS: &str = "all";

/// セッション指定時に年セグメントから読み飛ばす数（年, セッション, 中間ディレクトリ）
const SESSION_NAME_OFFSET: usize = 3;

lazy_static::lazy_static! {
    static ref YEAR_RE: Regex = Regex::new(r"^[0-9]{4}$").unwrap();
}

/// セッションフィルタ
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SessionFilter {
    #[default]
    All,
    Session(String),
}

impl SessionFilter {
    /// セレクタの値から生成（"all" は全件）
    pub fn from_value(value: &str) -> Self {
        if value == ALL_SESSIONS {
            SessionFilter::All
        } else {
            SessionFilter::Session(value.to_string())
        }
    }

    pub fn as_value(&self) -> &str {
        match self {
            SessionFilter::All => ALL_SESSIONS,
            SessionFilter::Session(id) => id,
        }
    }

    /// パスがこのセッションに属するか
    pub fn matches(&self, path: &str) -> bool {
        match self {
            SessionFilter::All => true,
            SessionFilter::Session(id) => session_of(path).as_deref() == Some(id.as_str()),
        }
    }
}

impl From<String> for SessionFilter {
    fn from(value: String) -> Self {
        SessionFilter::from_value(&value)
    }
}

impl From<SessionFilter> for String {
    fn from(filter: SessionFilter) -> Self {
        filter.as_value().to_string()
    }
}

/// 最初の年セグメントの位置
pub fn year_index(segments: &[&str]) -> Option<usize> {
    segments.iter().position(|s| YEAR_RE.is_match(s))
}

/// 表示用のデータセット名
///
/// 年セグメントがない場合は先頭を起点として扱う。
pub fn format_dataset_name(path: &str, filter: &SessionFilter) -> String {
    let segments: Vec<&str> = path.split('/').collect();
    let year = year_index(&segments).unwrap_or(0);

    let start = match filter {
        SessionFilter::All => year + 1,
        SessionFilter::Session(_) => year + SESSION_NAME_OFFSET,
    };
    // 最後のセグメント（ファイル名）は除く
    let end = segments.len().saturating_sub(1);

    if start >= end {
        return String::new();
    }
    segments[start..end].join("/")
}

/// `<年>/<次のセグメント>` 形式のセッションID
pub fn session_of(path: &str) -> Option<String> {
    let segments: Vec<&str> = path.split('/').collect();
    let year = year_index(&segments)?;
    let next = segments.get(year + 1)?;
    Some(format!("{}/{}", segments[year], next))
}

/// データベースに含まれるセッション一覧（初出順）
pub fn sessions(database: &Database) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for (path, _) in database.iter() {
        if let Some(session) = session_of(path) {
            if !found.contains(&session) {
                found.push(session);
            }
        }
    }
    found
}
