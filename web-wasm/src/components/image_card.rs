//! プレビュー画像

use leptos::prelude::*;

#[component]
pub fn ImageCard(src: String) -> impl IntoView {
    view! {
        <div class="image-card-media">
            <img class="preview-image" src=src alt="Potato Leaf" title="Potato Leaf" />
        </div>
    }
}
