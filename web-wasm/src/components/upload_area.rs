//! アップロードエリアコンポーネント
//!
//! ドラッグ&ドロップまたはクリックで画像を1枚選択する。

use leptos::html::Input;
use leptos::prelude::*;
use web_sys::{DragEvent, File, FileList, HtmlInputElement};

/// ピッカーで受け付けるMIMEタイプ
const ACCEPTED_FILES: &str = "image/*";

#[component]
pub fn UploadArea<F>(on_select: F) -> impl IntoView
where
    F: Fn(Option<File>) + 'static + Clone + Send + Sync,
{
    let (is_dragover, set_is_dragover) = signal(false);
    let input_ref = NodeRef::<Input>::new();

    let on_drop = {
        let on_select = on_select.clone();
        move |ev: DragEvent| {
            ev.prevent_default();
            set_is_dragover.set(false);

            let file = ev
                .data_transfer()
                .and_then(|dt| dt.files())
                .and_then(|files| first_image(&files));
            // 画像以外のドロップは無視（選択状態を変えない）
            if file.is_some() {
                on_select(file);
            }
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(true);
    };

    let on_dragleave = move |_: DragEvent| {
        set_is_dragover.set(false);
    };

    let on_click = move |_| {
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    let on_change = move |ev: web_sys::Event| {
        let input: HtmlInputElement = event_target(&ev);
        let file = input.files().and_then(|files| first_image(&files));
        on_select(file);
        // 同じファイルを選び直しても change が発火するように
        input.set_value("");
    };

    view! {
        <div
            class=move || {
                if is_dragover.get() {
                    "upload-area dragover"
                } else {
                    "upload-area"
                }
            }
            on:drop=on_drop
            on:dragover=on_dragover
            on:dragleave=on_dragleave
            on:click=on_click
        >
            <div class="upload-icon">"🥔"</div>
            <p>"Drag and drop an image of a potato plant leaf to process"</p>
            <p class="text-muted">"Supported: JPEG, PNG, WebP"</p>
            <input
                type="file"
                accept=ACCEPTED_FILES
                class="hidden-input"
                node_ref=input_ref
                on:change=on_change
                on:click=|ev| ev.stop_propagation()
            />
        </div>
    }
}

/// 先頭の画像ファイル（単一選択）
fn first_image(files: &FileList) -> Option<File> {
    files.get(0).filter(|file| file.type_().starts_with("image/"))
}
