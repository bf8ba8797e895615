//! Potato Leaf Common Library
//!
//! CLIとWeb(WASM)で共有される状態機械・型・ユーティリティ

pub mod config;
pub mod disease_info;
pub mod error;
pub mod form;
pub mod format;
pub mod parser;
pub mod preview;
pub mod types;

pub use config::FormConfig;
pub use disease_info::DiseaseInfo;
pub use error::{Error, Result};
pub use form::{
    Completion, Panel, ResultView, SelectionToken, SubmissionTicket, UploadForm, ViewModel,
};
pub use format::format_confidence;
pub use parser::parse_predict_response;
pub use preview::PreviewStore;
pub use types::{PredictResponse, PredictionResult};
