//! 判定中インジケータ

use leptos::prelude::*;

#[component]
pub fn Processing() -> impl IntoView {
    view! {
        <div class="card-detail processing">
            <div class="spinner" />
            <p class="processing-text">"Processing..."</p>
        </div>
    }
}
