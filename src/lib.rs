//! Potato leaf disease classifier client
//!
//! 画像を判定サービスへ送り、ラベル・信頼度・病害情報を表示する。

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod image_file;
pub mod preview;
pub mod render;
pub mod session;
