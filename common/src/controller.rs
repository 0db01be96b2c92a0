//! レポート画面の状態管理
//!
//! データベース・パイプライン一覧・セッションフィルタ・ソート状態・列の開閉を
//! 1つのコントローラにまとめ、操作のたびにテーブルを作り直す。

use crate::columns::ColumnVisibility;
use crate::model::{Database, PipelineManifest};
use crate::naming::{sessions, SessionFilter};
use crate::sort::{SortKey, SortStrategy};
use crate::table::{render_table, TableView};

#[derive(Debug, Clone)]
pub struct ReportController {
    database: Database,
    manifest: PipelineManifest,
    filter: SessionFilter,
    strategies: Vec<SortStrategy>,
    /// 全データセットの表示順（フィルタ前）
    order: Vec<usize>,
    visibility: ColumnVisibility,
    table: TableView,
}

impl ReportController {
    pub fn new(database: Database, manifest: PipelineManifest) -> Self {
        let order = database.written_order();
        let mut controller = Self {
            database,
            manifest,
            filter: SessionFilter::All,
            strategies: Vec::new(),
            order,
            visibility: ColumnVisibility::new(),
            table: TableView::default(),
        };
        controller.refresh();
        controller
    }

    /// パイプライン一覧をデータベースから収集して生成
    pub fn with_discovered_manifest(database: Database) -> Self {
        let manifest = PipelineManifest::discover(&database);
        Self::new(database, manifest)
    }

    /// 指定のソートを実行（同じキーを続けて呼ぶと昇順/降順が入れ替わる）
    pub fn sort(&mut self, key: &SortKey) -> &TableView {
        let index = match self.strategies.iter().position(|s| s.key() == key) {
            Some(index) => index,
            None => {
                self.strategies.push(SortStrategy::new(key.clone()));
                self.strategies.len() - 1
            }
        };
        self.order = self.strategies[index].sort(&self.database, &self.filter);
        self.refresh();
        &self.table
    }

    /// セッションを切り替える（並び順は維持）
    pub fn set_session(&mut self, filter: SessionFilter) -> &TableView {
        self.filter = filter;
        self.refresh();
        &self.table
    }

    /// パイプラインの詳細列を開閉し、開いた状態なら true
    pub fn toggle_columns(&mut self, pipeline: &str) -> bool {
        self.visibility.toggle(pipeline)
    }

    pub fn table(&self) -> &TableView {
        &self.table
    }

    pub fn visibility(&self) -> &ColumnVisibility {
        &self.visibility
    }

    pub fn filter(&self) -> &SessionFilter {
        &self.filter
    }

    pub fn manifest(&self) -> &PipelineManifest {
        &self.manifest
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    /// セッションセレクタの選択肢
    pub fn sessions(&self) -> Vec<String> {
        sessions(&self.database)
    }

    fn refresh(&mut self) {
        let visible: Vec<usize> = self
            .order
            .iter()
            .copied()
            .filter(|&i| {
                self.database
                    .entry(i)
                    .map(|(path, _)| self.filter.matches(path))
                    .unwrap_or(false)
            })
            .collect();
        self.table = render_table(&self.database, &visible, &self.manifest, &self.filter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DatasetRecord, PipelineResult, RunStatus};

    fn record(indexed: u64) -> DatasetRecord {
        DatasetRecord::new().with_pipeline(
            "default",
            PipelineResult {
                title: Some("default".to_string()),
                status: RunStatus::Ok,
                indexed: Some(indexed),
                total_spots: Some(100),
                unit_cell: Some(vec![10.0, 10.0, 10.0, 90.0, 90.0, 90.0]),
                space_group: Some("P 1".to_string()),
                ..Default::default()
            },
        )
    }

    fn controller() -> ReportController {
        let mut db = Database::new();
        db.insert("/data/2023/exp1/proc/a/f.h5", record(10));
        db.insert("/data/2023/exp2/proc/b/f.h5", record(90));
        db.insert("/data/2023/exp1/proc/c/f.h5", record(50));
        ReportController::with_discovered_manifest(db)
    }

    fn names(table: &TableView) -> Vec<String> {
        table.rows.iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn test_initial_table_in_written_order() {
        let controller = controller();
        assert_eq!(
            names(controller.table()),
            vec!["exp1/proc/a", "exp2/proc/b", "exp1/proc/c"]
        );
        assert_eq!(controller.manifest().names(), &["default"]);
    }

    #[test]
    fn test_sort_by_indexed_twice() {
        let mut controller = controller();
        let key = SortKey::Indexed("default".to_string());

        let first = names(controller.sort(&key));
        assert_eq!(first, vec!["exp2/proc/b", "exp1/proc/c", "exp1/proc/a"]);

        let second = names(controller.sort(&key));
        assert_eq!(second, vec!["exp1/proc/a", "exp1/proc/c", "exp2/proc/b"]);
    }

    #[test]
    fn test_strategies_keep_separate_toggles() {
        let mut controller = controller();
        let indexed = SortKey::Indexed("default".to_string());

        controller.sort(&indexed);
        controller.sort(&SortKey::Database);
        // 別のソートを挟んでも indexed は2回目（昇順）になる
        let rows = names(controller.sort(&indexed));
        assert_eq!(rows[0], "exp1/proc/a");
    }

    #[test]
    fn test_session_filter_renumbers_rows() {
        let mut controller = controller();
        let table = controller.set_session(SessionFilter::from_value("2023/exp1"));

        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].index, 1);
        assert_eq!(table.rows[1].index, 2);
        // セッション指定時は年から3つ先の階層から表示
        assert_eq!(table.rows[0].name, "a");

        let all = controller.set_session(SessionFilter::All);
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_session_change_keeps_sort_order() {
        let mut controller = controller();
        controller.sort(&SortKey::Indexed("default".to_string()));
        let table = controller.set_session(SessionFilter::from_value("2023/exp1"));
        assert_eq!(names(table), vec!["c", "a"]);
    }

    #[test]
    fn test_toggle_columns_does_not_rebuild_table() {
        let mut controller = controller();
        let before = controller.table().clone();
        assert!(!controller.toggle_columns("default"));
        assert!(!controller.visibility().is_expanded("default"));
        assert_eq!(controller.table(), &before);
    }

    #[test]
    fn test_sessions_listed() {
        let controller = controller();
        assert_eq!(controller.sessions(), vec!["2023/exp1", "2023/exp2"]);
    }
}
