//! ステータスアイコン

use autoed_report_common::Icon;
use leptos::prelude::*;

#[component]
pub fn StatusIcon(icon: Icon) -> impl IntoView {
    if icon.is_blank() {
        return ().into_any();
    }

    let glyph = view! {
        <i
            class=icon.kind.css_class()
            style=format!("color: {};", icon.color)
            title=icon.tooltip.clone()
        ></i>
    };

    match icon.link {
        Some(link) => view! { <a href=link target="_blank">{glyph}</a> }.into_any(),
        None => glyph.into_any(),
    }
}

/// beam/spots 画像へのリンク
#[component]
pub fn ImageLink(location: Option<String>) -> impl IntoView {
    location.map(|location| {
        view! {
            <a href=location target="_blank">
                <i class="fa-solid fa-camera info" style="color: #aebafb;"></i>
            </a>
        }
    })
}
