//! セッション選択

use autoed_report_common::ALL_SESSIONS;
use leptos::prelude::*;

#[component]
pub fn SessionSelect<F>(
    sessions: Memo<Vec<String>>,
    selected: Memo<String>,
    on_change: F,
) -> impl IntoView
where
    F: Fn(String) + Copy + Send + Sync + 'static,
{
    view! {
        <div class="form-group session-select">
            <label for="session">"Session"</label>
            <select
                id="session"
                on:change=move |ev| on_change(event_target_value(&ev))
            >
                <option value=ALL_SESSIONS selected=move || selected.get() == ALL_SESSIONS>
                    "All sessions"
                </option>
                {move || {
                    sessions
                        .get()
                        .into_iter()
                        .map(|session| {
                            let value = session.clone();
                            view! {
                                <option
                                    value=session.clone()
                                    selected=move || selected.get() == value
                                >
                                    {session.clone()}
                                </option>
                            }
                        })
                        .collect_view()
                }}
            </select>
        </div>
    }
}
