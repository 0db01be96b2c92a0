use autoed_report_common::SortKey;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "autoed-report")]
#[command(about = "autoed の処理結果データベースからレポートを生成", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// report.txt と report_sorted.txt を生成
    Txt {
        /// データベースファイル（またはレポートディレクトリ）
        #[arg(required = true)]
        database: PathBuf,

        /// 出力ディレクトリ
        #[arg(required = true)]
        output: PathBuf,
    },

    /// 結果テーブルの静的HTMLを生成
    Html {
        /// データベースファイル（またはレポートディレクトリ）
        #[arg(required = true)]
        database: PathBuf,

        /// 出力HTMLファイル（デフォルト: データベースと同じ場所の report_table.html）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 表示するセッション（例: 2023/cm33912-1、デフォルト: all）
        #[arg(short, long, default_value = "all")]
        session: String,

        /// ソート (indexed:<pipeline>/database/name)
        #[arg(long)]
        sort: Option<SortKey>,

        /// 詳細列を閉じるパイプライン（カンマ区切り）
        #[arg(long, value_delimiter = ',')]
        collapse: Vec<String>,
    },

    /// データベースの概要を表示
    Summary {
        /// データベースファイル（またはレポートディレクトリ）
        #[arg(required = true)]
        database: PathBuf,
    },

    /// 設定を表示/編集
    Config {
        /// 表示するパイプラインを固定（カンマ区切り）
        #[arg(long, value_delimiter = ',')]
        set_pipelines: Option<Vec<String>>,

        /// html のデフォルトソート
        #[arg(long)]
        set_default_sort: Option<SortKey>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
