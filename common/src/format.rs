//! 表示用の数値フォーマット

use crate::model::PipelineResult;

/// 割合の表示幅（"%" を除く）
pub const PERCENT_WIDTH: usize = 3;
/// 辺長の表示幅
pub const LENGTH_WIDTH: usize = 4;
/// 角度の表示幅
pub const ANGLE_WIDTH: usize = 3;

pub const UNKNOWN_PERCENT: &str = "??";
pub const UNKNOWN_PERCENT_TOOLTIP: &str = "?/?";

/// 小数点以下 `decimals` 桁に四捨五入（0.5 は 0 から遠い方へ）し、右寄せで `width` 桁にする
pub fn format_fixed(value: f64, decimals: usize, width: usize) -> String {
    let scale = 10f64.powi(decimals as i32);
    let rounded = (value * scale).round() / scale;
    format!("{:>width$.prec$}", rounded, width = width, prec = decimals)
}

/// 指数付けされたスポットの割合セル
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexedCell {
    /// OK 以外
    Blank,
    /// indexed / total_spots が欠損
    Unknown,
    Percent { percent: u64, indexed: u64, total: u64 },
}

impl IndexedCell {
    pub fn from_result(result: Option<&PipelineResult>) -> Self {
        let Some(result) = result.filter(|r| r.status.is_ok()) else {
            return IndexedCell::Blank;
        };
        match (result.indexed, result.total_spots) {
            (Some(indexed), Some(total)) if total > 0 => {
                let percent = (indexed as f64 * 100.0 / total as f64).round() as u64;
                IndexedCell::Percent { percent, indexed, total }
            }
            _ => IndexedCell::Unknown,
        }
    }

    /// 例: "45%"
    pub fn label(&self) -> String {
        match self {
            IndexedCell::Blank => String::new(),
            IndexedCell::Unknown => UNKNOWN_PERCENT.to_string(),
            IndexedCell::Percent { percent, .. } => format!("{}%", percent),
        }
    }

    /// 固定幅の表示（例: " 45%"）
    pub fn padded_label(&self) -> String {
        match self {
            IndexedCell::Blank => String::new(),
            IndexedCell::Unknown => format!("{:>width$}", UNKNOWN_PERCENT, width = PERCENT_WIDTH),
            IndexedCell::Percent { percent, .. } => {
                format!("{:>width$}%", percent, width = PERCENT_WIDTH)
            }
        }
    }

    /// 例: "450 / 1000"
    pub fn tooltip(&self) -> Option<String> {
        match self {
            IndexedCell::Blank => None,
            IndexedCell::Unknown => Some(UNKNOWN_PERCENT_TOOLTIP.to_string()),
            IndexedCell::Percent { indexed, total, .. } => Some(format!("{} / {}", indexed, total)),
        }
    }
}

/// 格子定数の表示（例: "78.9 78.9 37.1 ( 90  90 120)"）
pub fn format_unit_cell(cell: &[f64; 6]) -> String {
    format!(
        "{} {} {} ({} {} {})",
        format_fixed(cell[0], 1, LENGTH_WIDTH),
        format_fixed(cell[1], 1, LENGTH_WIDTH),
        format_fixed(cell[2], 1, LENGTH_WIDTH),
        format_fixed(cell[3], 0, ANGLE_WIDTH),
        format_fixed(cell[4], 0, ANGLE_WIDTH),
        format_fixed(cell[5], 0, ANGLE_WIDTH),
    )
}
