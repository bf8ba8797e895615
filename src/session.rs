//! 端末セッション
//!
//! `UploadForm` を端末から操作する。`classify` は1回の選択と送信、
//! `interactive` はメニューで 選択 / 再送信 / クリア を繰り返す。

use crate::client::PredictClient;
use crate::error::{LeafError, Result};
use crate::image_file::ImageFile;
use crate::preview::{PreviewFile, TempPreviewStore};
use crate::render::render;
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use potato_leaf_common::{
    Completion, Error, FormConfig, PredictionResult, SelectionToken, SubmissionTicket, UploadForm,
    ViewModel,
};
use std::path::Path;
use std::time::Duration;

pub struct Session {
    form: UploadForm<TempPreviewStore>,
    client: PredictClient,
    show_spinner: bool,
}

impl Session {
    pub fn new(config: FormConfig, client: PredictClient) -> Self {
        Self {
            form: UploadForm::new(TempPreviewStore::new(), config),
            client,
            show_spinner: false,
        }
    }

    /// 送信中にスピナーを出す
    pub fn with_spinner(mut self, show: bool) -> Self {
        self.show_spinner = show;
        self
    }

    pub fn form(&self) -> &UploadForm<TempPreviewStore> {
        &self.form
    }

    pub fn view(&self) -> ViewModel<PreviewFile> {
        self.form.view()
    }

    pub fn select(&mut self, image: Option<ImageFile>) -> Option<SubmissionTicket<ImageFile>> {
        let ticket = self.form.select(image);
        if ticket.is_none() {
            if let Some(reason) = self.form.last_failure() {
                tracing::warn!("selection rejected: {}", reason);
            }
        }
        ticket
    }

    pub fn retry(&mut self) -> Option<SubmissionTicket<ImageFile>> {
        self.form.retry()
    }

    pub fn clear(&mut self) {
        self.form.clear();
    }

    /// チケットの画像を送信する（状態は変えない）
    pub async fn predict(
        &self,
        ticket: &SubmissionTicket<ImageFile>,
    ) -> potato_leaf_common::Result<PredictionResult> {
        self.client.predict(&ticket.file).await
    }

    /// 送信結果を反映してログに残す
    pub fn complete(
        &mut self,
        token: SelectionToken,
        outcome: potato_leaf_common::Result<PredictionResult>,
    ) -> Completion {
        let completion = self.form.complete(token, outcome);
        match &completion {
            Completion::Applied => {
                if let Some(prediction) = self.form.prediction() {
                    tracing::info!(
                        label = %prediction.label,
                        confidence = prediction.confidence,
                        "prediction applied"
                    );
                }
            }
            Completion::Failed(e) => tracing::warn!(
                retryable = e.is_submission_failure(),
                "Error uploading image: {}",
                e
            ),
            Completion::Stale => {
                tracing::debug!(token = token.value(), "discarded stale prediction response")
            }
        }
        completion
    }

    /// 送信して結果を反映する
    pub async fn submit(&mut self, ticket: SubmissionTicket<ImageFile>) -> Completion {
        let spinner = self.show_spinner.then(processing_spinner);
        let outcome = self.predict(&ticket).await;
        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }
        self.complete(ticket.token, outcome)
    }

    /// 1枚判定する（`classify` サブコマンド）
    ///
    /// 送信失敗・プレビュー確保失敗は `LeafError::Prediction` になる。
    pub async fn classify(&mut self, image: ImageFile) -> Result<PredictionResult> {
        match self.select_and_submit(Some(image)).await {
            Some(Completion::Applied) => self
                .form
                .prediction()
                .cloned()
                .ok_or_else(|| LeafError::Prediction(Error::MalformedResponse("empty result".into()))),
            Some(Completion::Failed(e)) => Err(e.into()),
            Some(Completion::Stale) => Err(LeafError::Prediction(Error::Network(
                "response superseded".into(),
            ))),
            None => {
                let reason = self.form.last_failure().unwrap_or("selection rejected");
                Err(LeafError::Prediction(Error::Preview(reason.to_string())))
            }
        }
    }

    /// 選択して即送信（ファイルなしならクリアのみ）
    pub async fn select_and_submit(&mut self, image: Option<ImageFile>) -> Option<Completion> {
        let ticket = self.select(image)?;
        Some(self.submit(ticket).await)
    }
}

fn processing_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message("Processing...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// 対話アクション
#[derive(Debug, PartialEq, Eq)]
pub enum FormAction {
    /// 画像を選択
    Select(String),
    /// 選択取り消し（空入力）
    Cancel,
    /// 再送信
    Retry,
    /// クリア
    Clear,
    /// 終了
    Quit,
}

/// 入力文字列を操作に変換
pub fn parse_form_action(input: &str, can_retry: bool) -> FormAction {
    let trimmed = input.trim();
    match trimmed {
        "" => FormAction::Cancel,
        "r" | "R" if can_retry => FormAction::Retry,
        "c" | "C" => FormAction::Clear,
        "q" | "Q" => FormAction::Quit,
        _ => FormAction::Select(trimmed.to_string()),
    }
}

/// 対話モード
pub async fn run_interactive(session: &mut Session) -> Result<()> {
    println!("🥔 Potato Disease Classification");
    println!("endpoint: {}", session.client.url());
    println!("---");
    println!("操作: [パス]画像を選択 [Enter]選択取消 [r]再送信 [c]クリア [q]終了");
    println!("---\n");

    loop {
        println!("{}\n", render(&session.view()));

        let can_retry = session.form().can_retry();
        let prompt = if can_retry {
            "画像パス (r:再送信 c:クリア q:終了)"
        } else {
            "画像パス (c:クリア q:終了)"
        };

        let input: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| LeafError::Prompt(e.to_string()))?;

        match parse_form_action(&input, can_retry) {
            FormAction::Select(path) => match ImageFile::load(Path::new(&path)) {
                Ok(image) => {
                    if let Some(Completion::Failed(e)) = session.select_and_submit(Some(image)).await {
                        if e.is_submission_failure() {
                            println!("✗ {} (r で再送信できます)\n", e);
                        }
                    }
                }
                Err(e) => println!("✗ {}\n", e),
            },
            FormAction::Cancel => {
                session.select(None);
            }
            FormAction::Retry => {
                if let Some(ticket) = session.retry() {
                    session.submit(ticket).await;
                }
            }
            FormAction::Clear => session.clear(),
            FormAction::Quit => break,
        }
    }

    session.clear();
    Ok(())
}
