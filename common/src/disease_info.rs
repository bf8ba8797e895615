//! 病害情報テーブル
//!
//! 判定サービスが返すラベルと完全一致するキーで引く静的データ。
//! サービス側のラベルが増えたらここも合わせて更新すること。

use crate::error::{Error, Result};

/// 病害情報
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiseaseInfo {
    pub symptoms: &'static str,
    pub causes: &'static str,
    pub prevention: &'static str,
    pub treatment: &'static str,
}

impl DiseaseInfo {
    /// 表示順のフィールド一覧 (名前, 本文)
    pub fn fields(&self) -> [(&'static str, &'static str); 4] {
        [
            ("symptoms", self.symptoms),
            ("causes", self.causes),
            ("prevention", self.prevention),
            ("treatment", self.treatment),
        ]
    }
}

pub const EARLY_BLIGHT: &str = "Early Blight";
pub const LATE_BLIGHT: &str = "Late Blight";
pub const HEALTHY: &str = "Healthy";

/// サービスが返しうる全ラベル
pub const LABELS: [&str; 3] = [EARLY_BLIGHT, LATE_BLIGHT, HEALTHY];

const TABLE: [(&str, DiseaseInfo); 3] = [
    (
        EARLY_BLIGHT,
        DiseaseInfo {
            symptoms: "Dark brown spots with concentric rings on older leaves.",
            causes: "Fungal infection caused by Alternaria solani.",
            prevention: "Crop rotation, disease-free seeds, proper spacing.",
            treatment: "Use fungicides like Mancozeb or Chlorothalonil.",
        },
    ),
    (
        LATE_BLIGHT,
        DiseaseInfo {
            symptoms: "Water-soaked lesions, white mold under leaves.",
            causes: "Phytophthora infestans pathogen.",
            prevention: "Avoid overhead irrigation, remove infected plants.",
            treatment: "Apply metalaxyl-based fungicides.",
        },
    ),
    (
        HEALTHY,
        DiseaseInfo {
            symptoms: "Green, firm leaves with no spots.",
            causes: "No disease detected.",
            prevention: "Maintain proper nutrition and watering.",
            treatment: "No treatment required.",
        },
    ),
];

/// ラベルから病害情報を引く（見つからなければNone）
pub fn lookup(label: &str) -> Option<&'static DiseaseInfo> {
    TABLE
        .iter()
        .find(|(key, _)| *key == label)
        .map(|(_, info)| info)
}

/// ラベルから病害情報を引く（見つからなければ `Error::UnknownLabel`）
pub fn require(label: &str) -> Result<&'static DiseaseInfo> {
    lookup(label).ok_or_else(|| Error::UnknownLabel(label.to_string()))
}

/// テーブル全体（表示順）
pub fn entries() -> impl Iterator<Item = (&'static str, &'static DiseaseInfo)> {
    TABLE.iter().map(|(label, info)| (*label, info))
}
