//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header(dataset_count: Memo<usize>) -> impl IntoView {
    view! {
        <header class="header">
            <h1>"autoed processing report"</h1>
            <p class="text-muted">{move || format!("{} datasets", dataset_count.get())}</p>
        </header>
    }
}
