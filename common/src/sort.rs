//! テーブルの並べ替え
//!
//! 3種類のソート（指数付け割合・データベース順・名前順）。
//! それぞれ昇順/降順のトグルを持ち、`sort()` のたびに反転する。
//! データベース自体は変更せず、表示順のインデックス列だけを返す。

use crate::model::{Database, DatasetRecord};
use crate::naming::{format_dataset_name, SessionFilter};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// ソートの種類
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SortKey {
    /// パイプラインの indexed / total_spots
    Indexed(String),
    /// データベースに書かれた順
    Database,
    /// 表示名の自然順
    Name,
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Indexed(pipeline) => write!(f, "indexed:{}", pipeline),
            SortKey::Database => write!(f, "database"),
            SortKey::Name => write!(f, "name"),
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "database" => Ok(SortKey::Database),
            "name" => Ok(SortKey::Name),
            _ => match s.strip_prefix("indexed:") {
                Some(pipeline) if !pipeline.is_empty() => Ok(SortKey::Indexed(pipeline.to_string())),
                _ => Err(format!(
                    "unknown sort key '{}' (indexed:<pipeline>/database/name)",
                    s
                )),
            },
        }
    }
}

impl TryFrom<String> for SortKey {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SortKey> for String {
    fn from(key: SortKey) -> Self {
        key.to_string()
    }
}

/// ソート1種類分の状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortStrategy {
    key: SortKey,
    /// true のとき基本順（割合の降順 / 記述の逆順 / 名前の昇順）
    primary: bool,
}

impl SortStrategy {
    pub fn new(key: SortKey) -> Self {
        Self { key, primary: false }
    }

    pub fn key(&self) -> &SortKey {
        &self.key
    }

    /// トグルを反転して新しい並び順を返す
    ///
    /// 1回目: 割合は降順、データベース順は逆順、名前は昇順。2回目はその逆。
    pub fn sort(&mut self, database: &Database, filter: &SessionFilter) -> Vec<usize> {
        self.primary = !self.primary;
        self.ordering(database, filter)
    }

    /// 現在のトグル状態での並び順
    pub fn ordering(&self, database: &Database, filter: &SessionFilter) -> Vec<usize> {
        let mut order = primary_ordering(&self.key, database, filter);
        if !self.primary {
            order.reverse();
        }
        order
    }
}

fn primary_ordering(key: &SortKey, database: &Database, filter: &SessionFilter) -> Vec<usize> {
    let mut order = database.written_order();
    match key {
        SortKey::Indexed(pipeline) => {
            let fractions: Vec<f64> = database
                .iter()
                .map(|(_, record)| indexed_fraction(record, pipeline))
                .collect();
            order.sort_by(|&a, &b| fractions[b].total_cmp(&fractions[a]));
        }
        SortKey::Database => order.reverse(),
        SortKey::Name => {
            let names: Vec<String> = database
                .iter()
                .map(|(path, _)| format_dataset_name(path, filter))
                .collect();
            order.sort_by(|&a, &b| natural_cmp(&names[a], &names[b]));
        }
    }
    order
}

/// ソートキーになる割合（結果なし・欠損・0除算は 0）
pub fn indexed_fraction(record: &DatasetRecord, pipeline: &str) -> f64 {
    record
        .pipeline(pipeline)
        .and_then(|r| r.indexed_fraction())
        .unwrap_or(0.0)
}

fn compare_digits(a: &str, b: &str) -> Ordering {
    let a_trim = a.trim_start_matches('0');
    let b_trim = b.trim_start_matches('0');
    a_trim
        .len()
        .cmp(&b_trim.len())
        .then_with(|| a_trim.cmp(b_trim))
}

fn split_digits(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}

/// 記号・空白 < 数字 < 文字 の順、文字は大文字小文字を区別しない
fn collation_key(c: char) -> (u8, char) {
    let class = if c.is_ascii_digit() {
        1
    } else if c.is_alphanumeric() {
        2
    } else {
        0
    };
    (class, c.to_lowercase().next().unwrap_or(c))
}

/// 数値を考慮した文字列比較（"img9" < "img10", "lyso_1" < "lyso1"）
///
/// 連続する数字は数値として比べ、それ以外は1文字ずつ比べる。
/// すべて同じなら元の文字列で決める。
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let (mut left, mut right) = (a, b);

    loop {
        let (Some(l), Some(r)) = (left.chars().next(), right.chars().next()) else {
            return left.len().cmp(&right.len()).then_with(|| a.cmp(b));
        };

        let ordering = if l.is_ascii_digit() && r.is_ascii_digit() {
            let (l_digits, l_rest) = split_digits(left);
            let (r_digits, r_rest) = split_digits(right);
            left = l_rest;
            right = r_rest;
            compare_digits(l_digits, r_digits)
        } else {
            left = &left[l.len_utf8()..];
            right = &right[r.len_utf8()..];
            collation_key(l).cmp(&collation_key(r))
        };

        if ordering != Ordering::Equal {
            return ordering;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PipelineResult, RunStatus};

    fn record_with(indexed: u64, total: u64) -> DatasetRecord {
        DatasetRecord::new().with_pipeline(
            "default",
            PipelineResult {
                title: Some("default".to_string()),
                status: RunStatus::Ok,
                indexed: Some(indexed),
                total_spots: Some(total),
                ..Default::default()
            },
        )
    }

    fn completion_database() -> Database {
        let mut db = Database::new();
        db.insert("/d/2023/s/ten/f.h5", record_with(10, 100));
        db.insert("/d/2023/s/ninety/f.h5", record_with(90, 100));
        db.insert("/d/2023/s/fifty/f.h5", record_with(50, 100));
        db
    }

    #[test]
    fn test_indexed_sort_toggles() {
        let db = completion_database();
        let mut strategy = SortStrategy::new(SortKey::Indexed("default".to_string()));

        assert_eq!(strategy.sort(&db, &SessionFilter::All), vec![1, 2, 0]);
        assert_eq!(strategy.sort(&db, &SessionFilter::All), vec![0, 2, 1]);
        assert_eq!(strategy.sort(&db, &SessionFilter::All), vec![1, 2, 0]);
    }

    #[test]
    fn test_indexed_sort_missing_pipeline_counts_as_zero() {
        let mut db = completion_database();
        db.insert("/d/2023/s/none/f.h5", DatasetRecord::new());
        db.insert(
            "/d/2023/s/partial/f.h5",
            DatasetRecord::new().with_pipeline(
                "default",
                PipelineResult {
                    status: RunStatus::Ok,
                    indexed: Some(5),
                    ..Default::default()
                },
            ),
        );

        let mut strategy = SortStrategy::new(SortKey::Indexed("default".to_string()));
        // 同じ 0 同士は記述順を保つ
        assert_eq!(strategy.sort(&db, &SessionFilter::All), vec![1, 2, 0, 3, 4]);
    }

    #[test]
    fn test_indexed_sort_does_not_touch_database() {
        let db = completion_database();
        let before = db.clone();
        let mut strategy = SortStrategy::new(SortKey::Indexed("default".to_string()));
        strategy.sort(&db, &SessionFilter::All);
        assert_eq!(db, before);
    }

    #[test]
    fn test_database_sort_toggles() {
        let db = completion_database();
        let mut strategy = SortStrategy::new(SortKey::Database);
        assert_eq!(strategy.sort(&db, &SessionFilter::All), vec![2, 1, 0]);
        assert_eq!(strategy.sort(&db, &SessionFilter::All), vec![0, 1, 2]);
    }

    #[test]
    fn test_name_sort_natural_order() {
        let mut db = Database::new();
        db.insert("/d/2023/s/img10/f.h5", DatasetRecord::new());
        db.insert("/d/2023/s/img9/f.h5", DatasetRecord::new());
        db.insert("/d/2023/s/Alpha/f.h5", DatasetRecord::new());

        let mut strategy = SortStrategy::new(SortKey::Name);
        assert_eq!(strategy.sort(&db, &SessionFilter::All), vec![2, 1, 0]);
        assert_eq!(strategy.sort(&db, &SessionFilter::All), vec![0, 1, 2]);
    }

    #[test]
    fn test_natural_cmp() {
        assert_eq!(natural_cmp("img9", "img10"), Ordering::Less);
        assert_eq!(natural_cmp("img010", "img9"), Ordering::Greater);
        assert_eq!(natural_cmp("abc", "ABD"), Ordering::Less);
        assert_eq!(natural_cmp("run2/x", "run2"), Ordering::Greater);
        assert_eq!(natural_cmp("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_natural_cmp_punctuation_before_digits() {
        assert_eq!(natural_cmp("lyso_1", "lyso1"), Ordering::Less);
        assert_eq!(natural_cmp("lyso1", "lyso_1"), Ordering::Greater);
        assert_eq!(natural_cmp("run-2", "run2"), Ordering::Less);
        // 数字は文字より前
        assert_eq!(natural_cmp("x1", "xa"), Ordering::Less);
    }

    #[test]
    fn test_sort_key_parse() {
        assert_eq!("database".parse::<SortKey>(), Ok(SortKey::Database));
        assert_eq!("name".parse::<SortKey>(), Ok(SortKey::Name));
        assert_eq!(
            "indexed:ice".parse::<SortKey>(),
            Ok(SortKey::Indexed("ice".to_string()))
        );
        assert!("indexed:".parse::<SortKey>().is_err());
        assert!("size".parse::<SortKey>().is_err());
        assert_eq!(SortKey::Indexed("user".to_string()).to_string(), "indexed:user");
    }
}
