//! TableView の HTML 出力
//!
//! 静的レポート（CLIの `html` コマンド）用。毎回テーブル全体を書き出すので、
//! 再描画しても行が重複しない。

use crate::columns::ColumnVisibility;
use crate::icon::Icon;
use crate::table::{PipelineCell, TableRow, TableView};

/// ソートボタンの表示
pub const SORT_GLYPH: &str = "&#x25B2;&#x25BC;";

/// HTML特殊文字をエスケープ
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// 固定幅表示のため空白を &nbsp; に置き換える
fn preserve_spaces(text: &str) -> String {
    escape_html(text).replace(' ', "&nbsp;")
}

fn hidden_style(expanded: bool) -> &'static str {
    if expanded {
        ""
    } else {
        " style=\"display: none\""
    }
}

fn title_attr(tooltip: Option<&str>) -> String {
    tooltip
        .map(|t| format!(" title=\"{}\"", escape_html(t)))
        .unwrap_or_default()
}

/// ステータスアイコン
pub fn render_icon(icon: &Icon) -> String {
    if icon.is_blank() {
        return String::new();
    }

    let glyph = format!(
        "<i class=\"{}\" style=\"color: {};\"{}></i>",
        icon.kind.css_class(),
        icon.color,
        title_attr(icon.tooltip.as_deref()),
    );

    match &icon.link {
        Some(link) => format!(
            "<a href=\"{}\" target=\"_blank\">{}</a>",
            escape_html(link),
            glyph
        ),
        None => glyph,
    }
}

/// beam/spots 画像へのリンク
pub fn render_image_link(location: Option<&str>) -> String {
    match location {
        Some(location) => format!(
            "<a href=\"{}\" target=\"_blank\"><i class=\"fa-solid fa-camera info\" style=\"color: #aebafb;\"></i></a>",
            escape_html(location)
        ),
        None => String::new(),
    }
}

fn render_header(table: &TableView, visibility: &ColumnVisibility) -> String {
    let mut html = String::from("<thead><tr>");
    html.push_str(&format!(
        "<th class=\"header\">#<span class=\"sort-icon\" data-sort=\"database\">{}</span></th>",
        SORT_GLYPH
    ));
    html.push_str(&format!(
        "<th class=\"header resizable\">Dataset<span class=\"sort-icon\" data-sort=\"name\">{}</span></th>",
        SORT_GLYPH
    ));
    html.push_str("<th class=\"header\">Beam</th><th class=\"header\">Spots</th>");

    for pipeline in &table.pipelines {
        let name = escape_html(pipeline);
        let hidden = hidden_style(visibility.is_expanded(pipeline));
        html.push_str(&format!(
            "<th class=\"header color_header expandable\" data-pipeline=\"{name}\">{name}</th>"
        ));
        html.push_str(&format!(
            "<th class=\"header\"{hidden}>Indexed<span class=\"sort-icon\" data-sort=\"indexed:{name}\">{SORT_GLYPH}</span></th>"
        ));
        html.push_str(&format!("<th class=\"header\"{hidden}>Unit cell</th>"));
        html.push_str(&format!("<th class=\"header\"{hidden}>Space group</th>"));
    }

    html.push_str("</tr></thead>");
    html
}

fn render_pipeline_cells(cell: &PipelineCell, visibility: &ColumnVisibility) -> String {
    let hidden = hidden_style(visibility.is_expanded(&cell.pipeline));
    let mut html = format!("<td class=\"cell\">{}</td>", render_icon(&cell.icon));

    html.push_str(&format!(
        "<td class=\"cell info\"{}{}>{}</td>",
        hidden,
        title_attr(cell.indexed.tooltip().as_deref()),
        preserve_spaces(&cell.indexed.padded_label()),
    ));
    html.push_str(&format!(
        "<td class=\"cell\"{}>{}</td>",
        hidden,
        preserve_spaces(cell.unit_cell.as_deref().unwrap_or_default()),
    ));
    html.push_str(&format!(
        "<td class=\"cell\"{}>{}</td>",
        hidden,
        escape_html(cell.space_group.as_deref().unwrap_or_default()),
    ));
    html
}

fn render_row(row: &TableRow, visibility: &ColumnVisibility) -> String {
    let mut html = format!(
        "<tr data-dataset=\"{}\"><td class=\"cell\">{}</td><td class=\"cell frozen_column_02\">{}</td>",
        escape_html(&row.dataset),
        row.index,
        escape_html(&row.name),
    );
    html.push_str(&format!(
        "<td class=\"cell\">{}</td><td class=\"cell\">{}</td>",
        render_image_link(row.beam_image.as_deref()),
        render_image_link(row.spots_image.as_deref()),
    ));
    for cell in &row.cells {
        html.push_str(&render_pipeline_cells(cell, visibility));
    }
    html.push_str("</tr>");
    html
}

/// テーブル全体を `<table>` 要素として出力
pub fn render_html(table: &TableView, visibility: &ColumnVisibility) -> String {
    let mut html = String::from("<table id=\"table\" class=\"results\">");
    html.push_str(&render_header(table, visibility));
    html.push_str("<tbody>");
    for row in &table.rows {
        html.push_str(&render_row(row, visibility));
    }
    html.push_str("</tbody></table>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::IndexedCell;
    use crate::icon::{IconKind, COLOR_GREEN};

    fn sample_table() -> TableView {
        TableView {
            pipelines: vec!["default".to_string()],
            rows: vec![TableRow {
                index: 1,
                dataset: "/data/2023/exp1/run1/a.h5".to_string(),
                name: "exp1/run1".to_string(),
                beam_image: Some("beam/a.png".to_string()),
                spots_image: None,
                cells: vec![PipelineCell {
                    pipeline: "default".to_string(),
                    icon: Icon {
                        kind: IconKind::Check,
                        color: COLOR_GREEN,
                        tooltip: Some("space group: P 1".to_string()),
                        link: Some("xia2.html".to_string()),
                    },
                    indexed: IndexedCell::Percent { percent: 45, indexed: 450, total: 1000 },
                    unit_cell: Some("78.9 78.9 37.1 ( 90  90  90)".to_string()),
                    space_group: Some("P 1".to_string()),
                }],
            }],
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<a href=\"x\">&'"), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn test_render_check_icon_with_link() {
        let html = render_html(&sample_table(), &ColumnVisibility::new());
        assert!(html.contains("<a href=\"xia2.html\" target=\"_blank\"><i class=\"fa-solid fa-square-check info\""));
        assert!(html.contains("title=\"space group: P 1\""));
        assert!(html.contains("title=\"450 / 1000\""));
        assert!(html.contains("&nbsp;45%"));
        assert!(html.contains("fa-camera"));
    }

    #[test]
    fn test_collapsed_columns_are_hidden() {
        let mut visibility = ColumnVisibility::new();
        let expanded = render_html(&sample_table(), &visibility);
        assert!(!expanded.contains("display: none"));

        visibility.toggle("default");
        let collapsed = render_html(&sample_table(), &visibility);
        // ヘッダ3列 + セル3列
        assert_eq!(collapsed.matches("display: none").count(), 6);
    }

    #[test]
    fn test_rerender_does_not_duplicate_rows() {
        let table = sample_table();
        let visibility = ColumnVisibility::new();
        let once = render_html(&table, &visibility);
        let twice = render_html(&table, &visibility);
        assert_eq!(once, twice);
        assert_eq!(twice.matches("<tr data-dataset").count(), 1);
    }

    #[test]
    fn test_blank_icon_renders_nothing() {
        let icon = Icon {
            kind: IconKind::Blank,
            color: "",
            tooltip: None,
            link: None,
        };
        assert_eq!(render_icon(&icon), "");
    }
}
