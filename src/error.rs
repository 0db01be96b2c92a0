use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("データベースが見つかりません: {0}")]
    DatabaseNotFound(String),

    #[error("出力先が見つかりません: {0}")]
    OutputDirNotFound(String),

    #[error("パイプラインが見つかりません: {0}")]
    UnknownPipeline(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Common(#[from] autoed_report_common::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;
