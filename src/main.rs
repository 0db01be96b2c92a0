use autoed_report::{cli, config, error, report};
use autoed_report_common::{PipelineManifest, ReportController, SessionFilter};
use clap::Parser;
use cli::{Cli, Commands};
use config::{load_database, Config};
use error::{ReportError, Result};
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Txt { database, output } => {
            println!("📄 autoed-report - テキストレポート\n");

            let db_path = config.resolve_database_path(&database);
            if cli.verbose {
                println!("  データベース: {}", db_path.display());
            }
            let db = load_database(&db_path)?;
            println!("✔ {}件のデータセットを読み込み", db.len());

            if !output.is_dir() {
                return Err(ReportError::OutputDirNotFound(output.display().to_string()));
            }

            let (report_path, sorted_path) = report::generate_txt_report(&db, &output)?;
            println!("✔ 出力: {}", report_path.display());
            println!("✔ 出力: {}", sorted_path.display());
        }

        Commands::Html { database, output, session, sort, collapse } => {
            println!("🧊 autoed-report - HTMLテーブル\n");

            let db_path = config.resolve_database_path(&database);
            let db = load_database(&db_path)?;
            let manifest = config.manifest_for(&db);
            println!("✔ {}件のデータセット / {}パイプライン", db.len(), manifest.len());
            if cli.verbose {
                println!("  パイプライン: {}", manifest.names().join(", "));
            }

            let mut controller = ReportController::new(db, manifest);

            let filter = SessionFilter::from_value(&session);
            if let SessionFilter::Session(id) = &filter {
                if !controller.sessions().contains(id) {
                    eprintln!("警告: セッション '{}' のデータセットがありません", id);
                }
            }
            controller.set_session(filter);

            if let Some(key) = sort.or_else(|| config.default_sort.clone()) {
                if cli.verbose {
                    println!("  ソート: {}", key);
                }
                controller.sort(&key);
            }

            for pipeline in &collapse {
                if !controller.manifest().contains(pipeline) {
                    return Err(ReportError::UnknownPipeline(pipeline.clone()));
                }
                controller.toggle_columns(pipeline);
            }

            let output = output.unwrap_or_else(|| default_page_path(&db_path));
            report::write_page(&controller, &config.report_title, &output)?;
            println!("✔ {}行を出力: {}", controller.table().len(), output.display());
        }

        Commands::Summary { database } => {
            let db_path = config.resolve_database_path(&database);
            let db = load_database(&db_path)?;
            let manifest = config.manifest_for(&db);
            print!("{}", report::Summary::from_database(&db, &manifest));
        }

        Commands::Config { set_pipelines, set_default_sort, show } => {
            let mut config = config;
            let mut changed = false;

            if let Some(pipelines) = set_pipelines {
                let manifest = PipelineManifest::new(pipelines);
                config.pipelines = Some(manifest.names().to_vec());
                changed = true;
                println!("✔ パイプラインを設定しました");
            }

            if let Some(key) = set_default_sort {
                config.default_sort = Some(key);
                changed = true;
                println!("✔ デフォルトソートを設定しました");
            }

            if changed {
                config.save()?;
            }

            if show {
                println!("設定:");
                println!("  データベースファイル: {}", config.database_file);
                match &config.pipelines {
                    Some(p) => println!("  パイプライン: {}", p.join(", ")),
                    None => println!("  パイプライン: (データベースから収集)"),
                }
                match &config.default_sort {
                    Some(key) => println!("  デフォルトソート: {}", key),
                    None => println!("  デフォルトソート: (データベース順)"),
                }
                println!("  タイトル: {}", config.report_title);
            }
        }
    }

    Ok(())
}

fn default_page_path(db_path: &Path) -> PathBuf {
    db_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(report::page::DEFAULT_PAGE_FILE)
}
