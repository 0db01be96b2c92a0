//! 静的HTMLページ
//!
//! ReportController の現在のテーブルを1枚のHTMLとして書き出す。

use crate::error::Result;
use autoed_report_common::{escape_html, render_html, ReportController};
use chrono::{DateTime, Local};
use std::path::Path;

pub const DEFAULT_PAGE_FILE: &str = "report_table.html";

/// HTMLドキュメント全体を生成
pub fn render_page(controller: &ReportController, title: &str, generated_at: DateTime<Local>) -> String {
    let table = render_html(controller.table(), controller.visibility());
    let title = escape_html(title);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<link rel="stylesheet" href="report_data/styles.css">
</head>
<body>
<h1>{title}</h1>
<p class="generated">Generated {generated} / session: {session} / {rows} datasets</p>
{table}
</body>
</html>
"#,
        title = title,
        generated = generated_at.format("%Y-%m-%d %H:%M:%S"),
        session = escape_html(controller.filter().as_value()),
        rows = controller.table().len(),
        table = table,
    )
}

/// HTMLを書き出す
pub fn write_page(controller: &ReportController, title: &str, output: &Path) -> Result<()> {
    let html = render_page(controller, title, Local::now());
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(output, html)?;
    Ok(())
}
