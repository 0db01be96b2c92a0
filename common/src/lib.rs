//! autoed report common library
//!
//! CLIとWeb(WASM)で共有されるデータ型とテーブル構築ロジック

pub mod model;
pub mod error;
pub mod ice;
pub mod icon;
pub mod naming;
pub mod format;
pub mod table;
pub mod html;
pub mod sort;
pub mod columns;
pub mod controller;

pub use model::{Database, DatasetRecord, PipelineManifest, PipelineResult, RunStatus, ICE_PIPELINE};
pub use error::{Error, Result};
pub use ice::is_ice_like;
pub use icon::{resolve_icon, Icon, IconKind};
pub use naming::{format_dataset_name, session_of, sessions, SessionFilter, ALL_SESSIONS};
pub use format::{format_unit_cell, IndexedCell};
pub use table::{render_table, PipelineCell, TableRow, TableView};
pub use html::{escape_html, render_html};
pub use sort::{indexed_fraction, natural_cmp, SortKey, SortStrategy};
pub use columns::{ColumnResizer, ColumnVisibility};
pub use controller::ReportController;
