//! クリア・再送信ボタン

use leptos::prelude::*;

#[component]
pub fn ActionButtons<FC, FR>(
    can_retry: bool,
    on_clear: FC,
    on_retry: FR,
) -> impl IntoView
where
    FC: Fn(()) + 'static + Clone + Send + Sync,
    FR: Fn(()) + 'static + Send + Sync,
{
    view! {
        <div class="action-buttons">
            {can_retry.then(move || view! {
                <button class="btn btn-secondary" on:click=move |_| on_retry(())>
                    "Retry"
                </button>
            })}
            <button
                class="btn btn-primary clear-button"
                on:click=move |_| on_clear(())
            >
                "✕ Clear"
            </button>
        </div>
    }
}
