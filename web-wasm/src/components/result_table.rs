//! 判定結果テーブル（ラベルと信頼度）

use leptos::prelude::*;

#[component]
pub fn ResultTable(label: String, confidence_text: String) -> impl IntoView {
    view! {
        <div class="card-detail">
            <table class="prediction-table" aria-label="prediction table">
                <thead>
                    <tr>
                        <th class="table-head">"Label:"</th>
                        <th class="table-head align-right">"Confidence:"</th>
                    </tr>
                </thead>
                <tbody>
                    <tr>
                        <td class="table-cell">{label}</td>
                        <td class="table-cell align-right">{confidence_text}</td>
                    </tr>
                </tbody>
            </table>
        </div>
    }
}
