//! ステータスアイコンの決定
//!
//! パイプライン結果のステータスから表示するアイコン（種類・色・ツールチップ・リンク）を決める。

use crate::ice::is_ice_like;
use crate::model::{PipelineResult, RunStatus, ICE_PIPELINE};

pub const COLOR_GREEN: &str = "green";
pub const COLOR_ICE_BLUE: &str = "#4d8dff";
pub const COLOR_ERROR_RED: &str = "red";
pub const COLOR_MISSING_GRAY: &str = "#BFBFBF";
pub const COLOR_UNPARSED_GRAY: &str = "gray";

pub const MISSING_DATA_TOOLTIP: &str = "Missing data";
pub const UNPARSED_TOOLTIP: &str = "Failed to parse output";

/// アイコンの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconKind {
    MissingData,
    Check,
    Snowflake,
    Error,
    Unparsed,
    /// 何も表示しない
    Blank,
}

impl IconKind {
    /// Font Awesome のクラス
    pub fn css_class(&self) -> &'static str {
        match self {
            IconKind::MissingData => "fa-solid fa-circle-xmark",
            IconKind::Check => "fa-solid fa-square-check info",
            IconKind::Snowflake => "fa-regular fa-snowflake info",
            IconKind::Error => "fa-solid fa-triangle-exclamation info",
            IconKind::Unparsed => "fa-solid fa-circle-question",
            IconKind::Blank => "",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IconKind::MissingData => "missing-data",
            IconKind::Check => "check",
            IconKind::Snowflake => "snowflake",
            IconKind::Error => "error",
            IconKind::Unparsed => "unparsed",
            IconKind::Blank => "blank",
        }
    }
}

/// 表示用アイコン
#[derive(Debug, Clone, PartialEq)]
pub struct Icon {
    pub kind: IconKind,
    pub color: &'static str,
    pub tooltip: Option<String>,
    pub link: Option<String>,
}

impl Icon {
    fn new(kind: IconKind, color: &'static str, tooltip: Option<String>) -> Self {
        Self { kind, color, tooltip, link: None }
    }

    fn missing_data() -> Self {
        Self::new(IconKind::MissingData, COLOR_MISSING_GRAY, Some(MISSING_DATA_TOOLTIP.to_string()))
    }

    pub fn is_blank(&self) -> bool {
        self.kind == IconKind::Blank
    }
}

/// パイプライン結果からアイコンを決める
///
/// `ice` パイプラインの特別扱いは OK と process_error のときだけ。
pub fn resolve_icon(result: Option<&PipelineResult>, pipeline: &str) -> Icon {
    let Some(result) = result else {
        return Icon::missing_data();
    };
    let is_ice_pipeline = pipeline == ICE_PIPELINE;

    match &result.status {
        RunStatus::Ok if is_ice_pipeline => {
            Icon::new(IconKind::Snowflake, COLOR_ICE_BLUE, result.tooltip.clone())
        }
        RunStatus::Ok => {
            let color = match result.cell() {
                Some(cell) if is_ice_like(&cell) => COLOR_ICE_BLUE,
                _ => COLOR_GREEN,
            };
            Icon {
                kind: IconKind::Check,
                color,
                tooltip: result.tooltip.clone(),
                link: result.link.clone(),
            }
        }
        RunStatus::ProcessError if is_ice_pipeline => Icon::new(IconKind::Blank, "", None),
        RunStatus::ProcessError => {
            Icon::new(IconKind::Error, COLOR_ERROR_RED, result.tooltip.clone())
        }
        RunStatus::NoData => Icon::missing_data(),
        RunStatus::Unrecognized(_) => Icon::new(
            IconKind::Unparsed,
            COLOR_UNPARSED_GRAY,
            Some(UNPARSED_TOOLTIP.to_string()),
        ),
    }
}
