//! 結果テーブル
//!
//! ヘッダのソートボタン・パイプライン名クリックでの詳細列の開閉・
//! データセット名列のドラッグ幅変更を扱う。行はテーブルが変わるたびに作り直す。

use crate::components::status_icon::{ImageLink, StatusIcon};
use autoed_report_common::{
    ColumnResizer, ColumnVisibility, PipelineCell, SortKey, TableRow, TableView,
};
use leptos::ev;
use leptos::html::Th;
use leptos::prelude::*;

const SORT_GLYPH: &str = "\u{25B2}\u{25BC}";

/// 固定幅表示用（空白を NBSP に）
fn preserve_spaces(text: &str) -> String {
    text.replace(' ', "\u{a0}")
}

fn hidden_style(expanded: bool) -> &'static str {
    if expanded {
        ""
    } else {
        "display: none"
    }
}

/// パイプラインの詳細列の style（開閉に追従）
fn column_style(visibility: Memo<ColumnVisibility>, pipeline: String) -> Memo<&'static str> {
    Memo::new(move |_| hidden_style(visibility.with(|v| v.is_expanded(&pipeline))))
}

#[component]
fn SortButton<F>(sort_key: SortKey, on_sort: F) -> impl IntoView
where
    F: Fn(SortKey) + Copy + Send + Sync + 'static,
{
    let name = sort_key.to_string();
    view! {
        <span
            class="sort-icon"
            data-sort=name
            on:click=move |_| on_sort(sort_key.clone())
        >
            {SORT_GLYPH}
        </span>
    }
}

#[component]
pub fn ReportTable<FS, FT>(
    table: Memo<TableView>,
    visibility: Memo<ColumnVisibility>,
    on_sort: FS,
    on_toggle: FT,
) -> impl IntoView
where
    FS: Fn(SortKey) + Copy + Send + Sync + 'static,
    FT: Fn(String) + Copy + Send + Sync + 'static,
{
    let resizer = RwSignal::new(ColumnResizer::new());
    let dataset_header = NodeRef::<Th>::new();

    let move_handle = window_event_listener(ev::mousemove, move |ev| {
        if !resizer.with_untracked(|r| r.is_resizing()) {
            return;
        }
        let Some(th) = dataset_header.get_untracked() else {
            return;
        };
        let left = th.get_bounding_client_rect().left();
        resizer.update(|r| {
            r.drag(ev.client_x() as f64, left);
        });
    });
    let up_handle = window_event_listener(ev::mouseup, move |_| {
        resizer.update(|r| r.end());
    });
    on_cleanup(move || {
        move_handle.remove();
        up_handle.remove();
    });

    let dataset_style = move || {
        resizer.with(|r| r.width().map(|w| format!("width: {}px", w)).unwrap_or_default())
    };

    let pipeline_headers = move || {
        table
            .get()
            .pipelines
            .into_iter()
            .map(|pipeline| {
                let hidden = column_style(visibility, pipeline.clone());
                let toggle_name = pipeline.clone();
                let sort_key = SortKey::Indexed(pipeline.clone());
                view! {
                    <th
                        class="header color_header expandable"
                        on:click=move |_| on_toggle(toggle_name.clone())
                    >
                        {pipeline}
                    </th>
                    <th class="header" style=move || hidden.get()>
                        "Indexed"
                        <SortButton sort_key=sort_key on_sort=on_sort />
                    </th>
                    <th class="header" style=move || hidden.get()>"Unit cell"</th>
                    <th class="header" style=move || hidden.get()>"Space group"</th>
                }
            })
            .collect_view()
    };

    // 行はテーブルが変わったときだけ作り直す（列の開閉はセルの style だけ更新）
    let rows = move || {
        table
            .get()
            .rows
            .into_iter()
            .map(|row| view! { <ResultRow row=row visibility=visibility /> })
            .collect_view()
    };

    view! {
        <table id="table" class="results">
            <thead>
                <tr>
                    <th class="header">
                        "#"
                        <SortButton sort_key=SortKey::Database on_sort=on_sort />
                    </th>
                    <th class="header resizable" node_ref=dataset_header style=dataset_style>
                        "Dataset"
                        <SortButton sort_key=SortKey::Name on_sort=on_sort />
                        <div
                            class="resizer"
                            on:mousedown=move |ev| {
                                ev.prevent_default();
                                resizer.update(|r| r.begin());
                            }
                        ></div>
                    </th>
                    <th class="header">"Beam"</th>
                    <th class="header">"Spots"</th>
                    {pipeline_headers}
                </tr>
            </thead>
            <tbody>{rows}</tbody>
        </table>
    }
}

#[component]
fn ResultRow(row: TableRow, visibility: Memo<ColumnVisibility>) -> impl IntoView {
    let cells = row
        .cells
        .into_iter()
        .map(|cell| view! { <ResultCells cell=cell visibility=visibility /> })
        .collect_view();

    view! {
        <tr data-dataset=row.dataset>
            <td class="cell">{row.index}</td>
            <td class="cell frozen_column_02">{row.name}</td>
            <td class="cell"><ImageLink location=row.beam_image /></td>
            <td class="cell"><ImageLink location=row.spots_image /></td>
            {cells}
        </tr>
    }
}

/// パイプライン1つ分の4セル（アイコン + 詳細3列）
#[component]
fn ResultCells(cell: PipelineCell, visibility: Memo<ColumnVisibility>) -> impl IntoView {
    let hidden = column_style(visibility, cell.pipeline.clone());

    view! {
        <td class="cell"><StatusIcon icon=cell.icon /></td>
        <td class="cell info" style=move || hidden.get() title=cell.indexed.tooltip()>
            {preserve_spaces(&cell.indexed.padded_label())}
        </td>
        <td class="cell" style=move || hidden.get()>
            {preserve_spaces(cell.unit_cell.as_deref().unwrap_or_default())}
        </td>
        <td class="cell" style=move || hidden.get()>{cell.space_group.unwrap_or_default()}</td>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preserve_spaces() {
        assert_eq!(preserve_spaces(" 45%"), "\u{a0}45%");
        assert_eq!(preserve_spaces("no-space"), "no-space");
    }

    #[test]
    fn test_hidden_style() {
        assert_eq!(hidden_style(true), "");
        assert_eq!(hidden_style(false), "display: none");
    }

    #[test]
    fn test_column_style_follows_visibility() {
        let owner = Owner::new();
        owner.with(|| {
            let state = RwSignal::new(ColumnVisibility::new());
            let visibility = Memo::new(move |_| state.get());
            let default = column_style(visibility, "default".to_string());
            let ice = column_style(visibility, "ice".to_string());
            assert_eq!(default.get(), "");

            state.update(|v| {
                v.toggle("default");
            });
            assert_eq!(default.get(), "display: none");
            // 他のパイプラインの列はそのまま
            assert_eq!(ice.get(), "");
        });
    }
}
