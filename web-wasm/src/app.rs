//! メインアプリケーションコンポーネント

use crate::api::database::{fetch_database, DATABASE_URL};
use crate::components::{
    header::Header,
    report_table::ReportTable,
    session_select::SessionSelect,
};
use autoed_report_common::{
    ColumnVisibility, ReportController, SessionFilter, SortKey, TableView, ALL_SESSIONS,
};
use gloo::console;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 読み込み状態
#[derive(Clone, Debug, PartialEq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

#[component]
pub fn App() -> impl IntoView {
    let controller = RwSignal::new(None::<ReportController>);
    let (load_state, set_load_state) = signal(LoadState::Loading);

    spawn_local(async move {
        match fetch_database(DATABASE_URL).await {
            Ok(database) => {
                console::log!(format!("{}件のデータセットを読み込み", database.len()));
                controller.set(Some(ReportController::with_discovered_manifest(database)));
                set_load_state.set(LoadState::Ready);
            }
            Err(e) => {
                let message = format!("{:?}", e);
                console::error!(format!("データベース取得失敗: {}", message));
                set_load_state.set(LoadState::Failed(message));
            }
        }
    });

    // 画面に出す値
    let table = Memo::new(move |_| {
        controller.with(|c| c.as_ref().map(|c| c.table().clone()).unwrap_or_default())
    });
    let visibility = Memo::new(move |_| {
        controller.with(|c| {
            c.as_ref()
                .map(|c| c.visibility().clone())
                .unwrap_or_else(ColumnVisibility::new)
        })
    });
    let sessions = Memo::new(move |_| {
        controller.with(|c| c.as_ref().map(|c| c.sessions()).unwrap_or_default())
    });
    let selected_session = Memo::new(move |_| {
        controller.with(|c| {
            c.as_ref()
                .map(|c| c.filter().as_value().to_string())
                .unwrap_or_else(|| ALL_SESSIONS.to_string())
        })
    });
    let dataset_count = Memo::new(move |_| table.with(TableView::len));

    // ソートボタン
    let on_sort = move |key: SortKey| {
        controller.update(|c| {
            if let Some(c) = c {
                c.sort(&key);
            }
        });
    };

    // パイプライン名クリック
    let on_toggle = move |pipeline: String| {
        controller.update(|c| {
            if let Some(c) = c {
                c.toggle_columns(&pipeline);
            }
        });
    };

    // セッション選択
    let on_session = move |value: String| {
        controller.update(|c| {
            if let Some(c) = c {
                c.set_session(SessionFilter::from_value(&value));
            }
        });
    };

    view! {
        <div class="container">
            <Header dataset_count=dataset_count />

            {move || match load_state.get() {
                LoadState::Loading => view! {
                    <p class="text-muted">"データベースを読み込み中..."</p>
                }.into_any(),
                LoadState::Failed(message) => view! {
                    <p class="error">{format!("読み込みに失敗しました: {}", message)}</p>
                }.into_any(),
                LoadState::Ready => view! {
                    <SessionSelect
                        sessions=sessions
                        selected=selected_session
                        on_change=on_session
                    />
                    <ReportTable
                        table=table
                        visibility=visibility
                        on_sort=on_sort
                        on_toggle=on_toggle
                    />
                }.into_any(),
            }}
        </div>
    }
}
