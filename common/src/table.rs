//! 結果テーブルの構築
//!
//! データベースのビュー（表示順のインデックス列）から行とセルを組み立てる。
//! 出力の `TableView` は DOM/HTML に依存しない木構造で、
//! 同じ入力からは常に同じテーブルが得られる。

use crate::format::{format_unit_cell, IndexedCell};
use crate::icon::{resolve_icon, Icon};
use crate::model::{Database, DatasetRecord, PipelineManifest};
use crate::naming::{format_dataset_name, SessionFilter};

/// パイプライン1列分のセル（アイコン + 詳細3列）
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineCell {
    pub pipeline: String,
    pub icon: Icon,
    pub indexed: IndexedCell,
    pub unit_cell: Option<String>,
    pub space_group: Option<String>,
}

/// テーブルの1行
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    /// 表示位置（1始まり）
    pub index: usize,
    /// データセットのフルパス
    pub dataset: String,
    /// 表示名
    pub name: String,
    pub beam_image: Option<String>,
    pub spots_image: Option<String>,
    pub cells: Vec<PipelineCell>,
}

/// 表示するテーブル全体
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableView {
    pub pipelines: Vec<String>,
    pub rows: Vec<TableRow>,
}

impl TableView {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// 1パイプライン分のセルを作る
pub fn render_cell(record: &DatasetRecord, pipeline: &str) -> PipelineCell {
    let result = record.pipeline(pipeline);
    let ok = result.filter(|r| r.status.is_ok());

    PipelineCell {
        pipeline: pipeline.to_string(),
        icon: resolve_icon(result, pipeline),
        indexed: IndexedCell::from_result(result),
        unit_cell: ok.and_then(|r| r.cell()).map(|cell| format_unit_cell(&cell)),
        space_group: ok.and_then(|r| r.space_group.clone()),
    }
}

/// ビューの順にテーブルを構築
///
/// `view` はデータベースの挿入順インデックス。範囲外のインデックスは無視する。
pub fn render_table(
    database: &Database,
    view: &[usize],
    manifest: &PipelineManifest,
    filter: &SessionFilter,
) -> TableView {
    let rows = view
        .iter()
        .filter_map(|&i| database.entry(i))
        .enumerate()
        .map(|(position, (path, record))| TableRow {
            index: position + 1,
            dataset: path.to_string(),
            name: format_dataset_name(path, filter),
            beam_image: record.beam_image.clone(),
            spots_image: record.spots_image.clone(),
            cells: manifest.iter().map(|p| render_cell(record, p)).collect(),
        })
        .collect();

    TableView {
        pipelines: manifest.names().to_vec(),
        rows,
    }
}
