//! 列の表示状態
//!
//! - ColumnVisibility: パイプラインごとの詳細3列（割合・格子定数・空間群）の開閉
//! - ColumnResizer: データセット名列のドラッグによる幅変更

use std::collections::HashSet;

/// 列幅の下限（px）
pub const MIN_COLUMN_WIDTH: f64 = 40.0;

/// 詳細列の開閉状態（初期状態はすべて表示）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnVisibility {
    collapsed: HashSet<String>,
}

impl ColumnVisibility {
    pub fn new() -> Self {
        Self::default()
    }

    /// 詳細列が表示されているか
    pub fn is_expanded(&self, pipeline: &str) -> bool {
        !self.collapsed.contains(pipeline)
    }

    /// 3列をまとめて切り替え、切り替え後の状態を返す
    pub fn toggle(&mut self, pipeline: &str) -> bool {
        if self.collapsed.remove(pipeline) {
            true
        } else {
            self.collapsed.insert(pipeline.to_string());
            false
        }
    }
}

/// ドラッグ中の列幅
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ColumnResizer {
    resizing: bool,
    width: Option<f64>,
}

impl ColumnResizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) {
        self.resizing = true;
    }

    /// ポインタ位置と列の左端から新しい幅を計算（ドラッグ中のみ）
    pub fn drag(&mut self, pointer_x: f64, column_left: f64) -> Option<f64> {
        if !self.resizing {
            return None;
        }
        let width = (pointer_x - column_left).max(MIN_COLUMN_WIDTH);
        self.width = Some(width);
        Some(width)
    }

    pub fn end(&mut self) {
        self.resizing = false;
    }

    pub fn is_resizing(&self) -> bool {
        self.resizing
    }

    /// 最後に設定された幅
    pub fn width(&self) -> Option<f64> {
        self.width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_default_expanded() {
        let visibility = ColumnVisibility::new();
        assert!(visibility.is_expanded("default"));
    }

    #[test]
    fn test_visibility_toggle_per_pipeline() {
        let mut visibility = ColumnVisibility::new();
        assert!(!visibility.toggle("default"));
        assert!(!visibility.is_expanded("default"));
        assert!(visibility.is_expanded("ice"));

        assert!(visibility.toggle("default"));
        assert!(visibility.is_expanded("default"));
    }

    #[test]
    fn test_resizer_ignores_moves_without_press() {
        let mut resizer = ColumnResizer::new();
        assert_eq!(resizer.drag(300.0, 100.0), None);
        assert_eq!(resizer.width(), None);
    }

    #[test]
    fn test_resizer_drag_cycle() {
        let mut resizer = ColumnResizer::new();
        resizer.begin();
        assert_eq!(resizer.drag(350.0, 100.0), Some(250.0));
        assert_eq!(resizer.drag(110.0, 100.0), Some(MIN_COLUMN_WIDTH));
        resizer.end();

        assert!(!resizer.is_resizing());
        assert_eq!(resizer.drag(500.0, 100.0), None);
        assert_eq!(resizer.width(), Some(MIN_COLUMN_WIDTH));
    }
}
