//! 端末向けの描画
//!
//! `ViewModel` を行単位のテキストにする。

use crate::preview::PreviewFile;
use potato_leaf_common::{disease_info, DiseaseInfo, Panel, ResultView, ViewModel};

const LABEL_WIDTH: usize = 24;
const CONFIDENCE_WIDTH: usize = 12;

pub fn render(view: &ViewModel<PreviewFile>) -> String {
    let mut lines = Vec::new();

    match &view.panel {
        Panel::Picker => {
            lines.push("Select an image of a potato plant leaf to process.".to_string());
        }
        Panel::Preview { preview } => {
            lines.push(format!("Preview: {}", preview.path.display()));
        }
        Panel::Submitting { preview } => {
            if let Some(preview) = preview {
                lines.push(format!("Preview: {}", preview.path.display()));
            }
            lines.push("Processing...".to_string());
        }
        Panel::Result(result) => render_result(result, &mut lines),
    }

    if let Some(message) = &view.error_banner {
        lines.push(String::new());
        lines.push(format!("✗ Prediction failed: {}", message));
    }

    lines.join("\n")
}

fn render_result(result: &ResultView<PreviewFile>, lines: &mut Vec<String>) {
    if let Some(preview) = &result.preview {
        lines.push(format!("Preview: {}", preview.path.display()));
        lines.push(String::new());
    }

    lines.push(format!(
        "{:<label$}{:>conf$}",
        "Label:",
        "Confidence:",
        label = LABEL_WIDTH,
        conf = CONFIDENCE_WIDTH
    ));
    lines.push(format!(
        "{:<label$}{:>conf$}",
        result.label,
        result.confidence_text,
        label = LABEL_WIDTH,
        conf = CONFIDENCE_WIDTH
    ));

    // 未登録ラベルは情報パネルを省略
    if let Some(info) = result.disease_info {
        lines.push(String::new());
        render_disease_info(info, lines);
    }
}

fn render_disease_info(info: &DiseaseInfo, lines: &mut Vec<String>) {
    lines.push("Disease Information".to_string());
    for (name, value) in info.fields() {
        lines.push(format!("{}: {}", name.to_uppercase(), value));
    }
}

/// `labels` サブコマンド用: テーブル全体
pub fn render_disease_table() -> String {
    let mut lines = Vec::new();
    for (label, info) in disease_info::entries() {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(format!("[{}]", label));
        for (name, value) in info.fields() {
            lines.push(format!("  {}: {}", name.to_uppercase(), value));
        }
    }
    lines.join("\n")
}
