//! メインアプリケーションコンポーネント
//!
//! フォームの状態は `UploadForm` が一元管理し、ここでは
//! 選択 → 送信 → 完了反映 をつなぎ、`ViewModel` を描画するだけ。

use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::File;
use potato_leaf_common::{Completion, FormConfig, Panel, SubmissionTicket, UploadForm, ViewModel};
use crate::api::predict;
use crate::components::{
    action_buttons::ActionButtons,
    disease_panel::DiseasePanel,
    error_banner::ErrorBanner,
    header::Header,
    image_card::ImageCard,
    processing::Processing,
    result_table::ResultTable,
    upload_area::UploadArea,
};
use crate::preview::ObjectUrlStore;

/// フォーム状態（web_sys::File を含むのでローカル保持）
pub type FormSignal = RwSignal<UploadForm<ObjectUrlStore>, LocalStorage>;

/// メインアプリケーションコンポーネント
#[component]
pub fn App(config: FormConfig) -> impl IntoView {
    let form: FormSignal = RwSignal::new_local(UploadForm::new(ObjectUrlStore, config));

    // アンマウント時にプレビューを解放
    on_cleanup(move || {
        form.try_update(|f| f.clear());
    });

    // ファイル選択ハンドラ
    let on_select = move |file: Option<File>| {
        let ticket = form.try_update(|f| f.select(file)).flatten();
        match ticket {
            Some(ticket) => submit(form, ticket),
            None => {
                if let Some(reason) = form.with_untracked(|f| f.last_failure().map(str::to_string)) {
                    gloo::console::error!(format!("Selection rejected: {}", reason));
                }
            }
        }
    };

    // 再送信ハンドラ
    let on_retry = move |_: ()| {
        if let Some(ticket) = form.try_update(|f| f.retry()).flatten() {
            submit(form, ticket);
        }
    };

    // クリアハンドラ
    let on_clear = move |_: ()| {
        form.update(|f| f.clear());
    };

    let view_model: Memo<ViewModel<String>> = Memo::new(move |_| form.with(|f| f.view()));

    view! {
        <div class="container">
            <Header />

            <main class="main-container">
                <div class="image-card">
                    {move || {
                        let vm = view_model.get();
                        match vm.panel {
                            Panel::Picker => view! {
                                <UploadArea on_select=on_select />
                            }.into_any(),
                            Panel::Preview { preview } => view! {
                                <ImageCard src=preview />
                            }.into_any(),
                            // 送信中でも選び直せる（古い応答はトークンで捨てる）
                            Panel::Submitting { preview } => view! {
                                {preview.map(|src| view! { <ImageCard src=src /> })}
                                <Processing />
                                <UploadArea on_select=on_select />
                            }.into_any(),
                            Panel::Result(result) => view! {
                                {result.preview.map(|src| view! { <ImageCard src=src /> })}
                                <ResultTable
                                    label=result.label
                                    confidence_text=result.confidence_text
                                />
                            }.into_any(),
                        }
                    }}
                </div>

                {move || view_model.get().error_banner.map(|message| view! {
                    <ErrorBanner message=message />
                })}

                {move || {
                    let vm = view_model.get();
                    let info = match &vm.panel {
                        Panel::Result(result) => Some(result.disease_info),
                        _ => None,
                    };
                    vm.can_clear.then(|| view! {
                        <div class="result-actions">
                            {info.flatten().map(|info| view! { <DiseasePanel info=info /> })}
                            <ActionButtons
                                can_retry=vm.can_retry
                                on_clear=on_clear
                                on_retry=on_retry
                            />
                        </div>
                    })
                }}
            </main>
        </div>
    }
}

/// 判定リクエストを発行し、完了を状態へ戻す
fn submit(form: FormSignal, ticket: SubmissionTicket<File>) {
    let url = form.with_untracked(|f| f.config().predict_url());
    gloo::console::log!(format!("Uploading {} to {}", ticket.file.name(), url));

    spawn_local(async move {
        let outcome = predict::post_image(&url, &ticket.file).await;

        match form.try_update(|f| f.complete(ticket.token, outcome)) {
            Some(Completion::Applied) => {
                if let Some(prediction) = form.with_untracked(|f| f.prediction().cloned()) {
                    gloo::console::log!(format!(
                        "API Response: {} ({})",
                        prediction.label, prediction.confidence
                    ));
                }
            }
            Some(Completion::Failed(e)) => {
                gloo::console::error!(format!("Error uploading image: {}", e));
            }
            Some(Completion::Stale) | None => {
                gloo::console::log!(format!(
                    "Discarded stale response for selection #{}",
                    ticket.token.value()
                ));
            }
        }
    });
}
