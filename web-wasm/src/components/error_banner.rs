//! 送信失敗バナー

use leptos::prelude::*;

#[component]
pub fn ErrorBanner(message: String) -> impl IntoView {
    view! {
        <div class="error-banner" role="alert">
            {format!("Prediction failed: {}", message)}
        </div>
    }
}
