//! 病害情報パネル

use leptos::prelude::*;
use potato_leaf_common::DiseaseInfo;

#[component]
pub fn DiseasePanel(info: &'static DiseaseInfo) -> impl IntoView {
    view! {
        <div class="card-detail disease-info">
            <h2>"Disease Information"</h2>
            {info
                .fields()
                .into_iter()
                .map(|(name, value)| {
                    view! {
                        <p>
                            <strong>{format!("{}:", name.to_uppercase())}</strong>
                            " "
                            {value}
                        </p>
                    }
                })
                .collect_view()}
        </div>
    }
}
