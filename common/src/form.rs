//! アップロードフォームの状態機械
//!
//! 選択 → プレビュー確保 → 送信チケット発行 → 完了反映 を1つの遷移関数で行う。
//! 送信はフロントエンド側の非同期処理で、結果は `complete` に戻す。
//!
//! 選択ごとに単調増加のトークンを振り、完了時に照合する。
//! 差し替え・クリア後に届いた古いレスポンスは `Completion::Stale` として捨てる。

use crate::config::FormConfig;
use crate::disease_info::{self, DiseaseInfo};
use crate::error::Error;
use crate::format::format_confidence;
use crate::preview::PreviewStore;
use crate::types::PredictionResult;

/// 選択トークン
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SelectionToken(u64);

impl SelectionToken {
    pub fn value(&self) -> u64 {
        self.0
    }

    fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// 送信チケット
///
/// フロントエンドはこのファイルを送信し、結果をトークンとともに `complete` に渡す。
#[derive(Debug, Clone)]
pub struct SubmissionTicket<F> {
    pub token: SelectionToken,
    pub file: F,
}

/// `complete` の結果
#[derive(Debug)]
pub enum Completion {
    /// 判定結果を反映した
    Applied,
    /// 送信失敗（状態は結果なしのまま）
    Failed(Error),
    /// 既に差し替え・クリアされた選択への応答なので捨てた
    Stale,
}

/// 表示パネル
#[derive(Debug, Clone, PartialEq)]
pub enum Panel<H> {
    /// ファイル選択欄
    Picker,
    /// プレビュー（結果なし・送信中でない）
    Preview { preview: H },
    /// 送信中
    Submitting { preview: Option<H> },
    /// 判定結果
    Result(ResultView<H>),
}

/// 判定結果の表示内容
#[derive(Debug, Clone, PartialEq)]
pub struct ResultView<H> {
    pub label: String,
    pub confidence: f64,
    pub confidence_text: String,
    /// 未登録ラベルならNone（病害情報パネルを省略する）
    pub disease_info: Option<&'static DiseaseInfo>,
    pub preview: Option<H>,
}

/// 画面全体の表示内容
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel<H> {
    pub panel: Panel<H>,
    /// `show_error_banner` が有効で、直近の送信が失敗していれば表示
    pub error_banner: Option<String>,
    pub can_retry: bool,
    /// 送信中を含め、初期状態以外ならいつでもクリアできる
    pub can_clear: bool,
}

/// アップロードフォーム
///
/// 状態はこのインスタンスだけが所有・変更する。
pub struct UploadForm<P: PreviewStore> {
    store: P,
    config: FormConfig,
    selected_file: Option<P::File>,
    preview: Option<P::Handle>,
    prediction: Option<PredictionResult>,
    last_failure: Option<String>,
    token: SelectionToken,
    in_flight: Option<SelectionToken>,
}

impl<P: PreviewStore> UploadForm<P> {
    pub fn new(store: P, config: FormConfig) -> Self {
        Self {
            store,
            config,
            selected_file: None,
            preview: None,
            prediction: None,
            last_failure: None,
            token: SelectionToken::default(),
            in_flight: None,
        }
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn store(&self) -> &P {
        &self.store
    }

    pub fn selected_file(&self) -> Option<&P::File> {
        self.selected_file.as_ref()
    }

    pub fn preview(&self) -> Option<&P::Handle> {
        self.preview.as_ref()
    }

    pub fn prediction(&self) -> Option<&PredictionResult> {
        self.prediction.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn last_failure(&self) -> Option<&str> {
        self.last_failure.as_deref()
    }

    /// 現在の選択トークン
    pub fn current_token(&self) -> SelectionToken {
        self.token
    }

    /// 初期状態かどうか
    pub fn is_initial(&self) -> bool {
        self.selected_file.is_none()
            && self.preview.is_none()
            && self.prediction.is_none()
            && self.last_failure.is_none()
            && self.in_flight.is_none()
    }

    pub fn can_retry(&self) -> bool {
        self.selected_file.is_some() && self.in_flight.is_none() && self.prediction.is_none()
    }

    pub fn can_clear(&self) -> bool {
        !self.is_initial()
    }

    /// 送信完了を反映
    ///
    /// トークンが送信中のものと一致しなければ何もしない。
    pub fn complete(
        &mut self,
        token: SelectionToken,
        outcome: crate::Result<PredictionResult>,
    ) -> Completion {
        if self.in_flight != Some(token) {
            return Completion::Stale;
        }
        self.in_flight = None;

        match outcome {
            Ok(prediction) => {
                self.prediction = Some(prediction);
                self.last_failure = None;
                Completion::Applied
            }
            Err(e) => {
                self.prediction = None;
                self.last_failure = Some(e.to_string());
                Completion::Failed(e)
            }
        }
    }

    /// 初期状態に戻す
    pub fn clear(&mut self) {
        self.reset();
    }

    /// 画面の表示内容を組み立てる
    pub fn view(&self) -> ViewModel<P::Handle> {
        let preview = self.preview.clone();

        let panel = if self.in_flight.is_some() {
            Panel::Submitting { preview }
        } else if let Some(prediction) = &self.prediction {
            Panel::Result(ResultView {
                label: prediction.label.clone(),
                confidence: prediction.confidence,
                confidence_text: format_confidence(prediction.confidence),
                disease_info: disease_info::lookup(&prediction.label),
                preview,
            })
        } else if let Some(preview) = preview {
            Panel::Preview { preview }
        } else {
            Panel::Picker
        };

        let error_banner = if self.config.show_error_banner {
            self.last_failure.clone()
        } else {
            None
        };

        ViewModel {
            panel,
            error_banner,
            can_retry: self.can_retry(),
            can_clear: self.can_clear(),
        }
    }

    fn reset(&mut self) {
        self.release_preview();
        self.selected_file = None;
        self.prediction = None;
        self.last_failure = None;
        self.in_flight = None;
        self.token = self.token.next();
    }

    fn release_preview(&mut self) {
        if let Some(handle) = self.preview.take() {
            self.store.release(handle);
        }
    }
}

impl<P> UploadForm<P>
where
    P: PreviewStore,
    P::File: Clone,
{
    /// ファイル選択
    ///
    /// 以前のプレビューを解放し、結果をクリアする。ファイルがあれば
    /// プレビューを確保して送信チケットを返す。
    /// `None`（選択取り消し）は `clear` と同じ。
    pub fn select(&mut self, file: Option<P::File>) -> Option<SubmissionTicket<P::File>> {
        self.reset();
        let file = file?;

        match self.store.allocate(&file) {
            Ok(handle) => {
                self.preview = Some(handle);
                self.selected_file = Some(file.clone());
                self.in_flight = Some(self.token);
                Some(SubmissionTicket {
                    token: self.token,
                    file,
                })
            }
            Err(e) => {
                // プレビューが作れない選択は受け付けない
                self.last_failure = Some(e.to_string());
                None
            }
        }
    }

    /// 現在の選択で再送信
    pub fn retry(&mut self) -> Option<SubmissionTicket<P::File>> {
        if !self.can_retry() {
            return None;
        }
        let file = self.selected_file.clone()?;

        self.token = self.token.next();
        self.last_failure = None;
        self.in_flight = Some(self.token);
        Some(SubmissionTicket {
            token: self.token,
            file,
        })
    }
}

impl<P: PreviewStore> Drop for UploadForm<P> {
    fn drop(&mut self) {
        self.release_preview();
    }
}
