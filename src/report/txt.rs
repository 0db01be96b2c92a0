//! テキストレポート
//!
//! データセットごとに指数付け割合が最も高いパイプラインを1行に要約し、
//! report.txt（データベース順）と report_sorted.txt（割合の降順）を書き出す。

use crate::error::Result;
use autoed_report_common::{Database, PipelineResult};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const REPORT_FILE: &str = "report.txt";
pub const SORTED_REPORT_FILE: &str = "report_sorted.txt";

/// この割合（%）以下の行は sorted から除く
const MIN_SORTED_PERCENT: f64 = 1.0e-5;
const SEPARATOR_WIDTH: usize = 130;
const ROWS_PER_BLOCK: usize = 5;

/// 1データセット分の要約
#[derive(Debug, Clone, PartialEq)]
pub struct TxtEntry {
    pub dataset: String,
    pub pipeline: String,
    pub indexed: Option<u64>,
    pub total: Option<u64>,
    pub unit_cell: Option<Vec<f64>>,
    pub space_group: Option<String>,
}

impl TxtEntry {
    fn from_result(dataset: &str, pipeline: &str, result: &PipelineResult) -> Self {
        Self {
            dataset: dataset.to_string(),
            pipeline: pipeline.to_string(),
            indexed: result.indexed,
            total: result.total_spots,
            unit_cell: result.unit_cell.clone(),
            space_group: result.space_group.clone(),
        }
    }

    /// 指数付け割合（%）、欠損時は 0
    pub fn percent(&self) -> f64 {
        match (self.indexed, self.total) {
            (Some(indexed), Some(total)) if total > 0 => 100.0 * indexed as f64 / total as f64,
            _ => 0.0,
        }
    }

    /// 1行分のテキスト（行番号の後ろ）
    pub fn format_line(&self) -> String {
        let mut line = format!("  {:>5.1} %  ", self.percent());

        match self.indexed {
            Some(n) if n > 0 => line.push_str(&format!("|  {:>6}  ", n)),
            _ => line.push_str("|  ------  "),
        }
        match self.total {
            Some(n) if n > 0 => line.push_str(&format!("|  {:>6}  ", n)),
            _ => line.push_str("|  ------  "),
        }

        match self.unit_cell.as_deref() {
            Some(u) if u.len() == 6 => {
                line.push_str(&format!("|  {:>6.1} {:>6.1} {:>6.1} ", u[0], u[1], u[2]));
                line.push_str(&format!(" {:>5.1} {:>5.1} {:>5.1}  ", u[3], u[4], u[5]));
            }
            _ => line.push_str("|    ----   ----   ----    ---   ---   ---  "),
        }

        match self.space_group.as_deref() {
            Some(sg) if !sg.is_empty() => line.push_str(&format!("| {:>10} ", sg)),
            _ => line.push_str("|       ---- "),
        }

        let base = self.dataset.rsplit('/').next().unwrap_or_default();
        line.push_str(&format!("| {} ", base));
        line
    }
}

/// データセットごとに最良のパイプラインを選ぶ（同率なら先に書かれた方）
pub fn best_entries(database: &Database) -> Vec<TxtEntry> {
    let mut entries = Vec::new();

    for (dataset, record) in database.iter() {
        let mut best: Option<TxtEntry> = None;
        for (_, result) in record.pipelines() {
            let Some(title) = result.title.as_deref() else {
                continue;
            };
            let candidate = TxtEntry::from_result(dataset, title, result);
            let better = best
                .as_ref()
                .map(|b| candidate.percent() > b.percent())
                .unwrap_or(true);
            if better {
                best = Some(candidate);
            }
        }
        if let Some(entry) = best {
            entries.push(entry);
        }
    }

    entries
}

/// 割合の降順（同率は元の順）で、ほぼ 0% の行を除いたもの
pub fn sorted_entries(entries: &[TxtEntry]) -> Vec<TxtEntry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| b.percent().total_cmp(&a.percent()));
    sorted.retain(|e| e.percent() > MIN_SORTED_PERCENT);
    sorted
}

fn header() -> String {
    let mut header = "-".repeat(SEPARATOR_WIDTH);
    header.push('\n');
    header.push_str("  N   |  Ind. %   | Indexed  |   Spots  |");
    header.push_str("                 Unit cell                 |     Group  |");
    header.push_str(" Dataset name \n");
    header
}

/// レポート本文を書き出す
pub fn write_report<W: Write>(writer: &mut W, entries: &[TxtEntry]) -> Result<()> {
    writer.write_all(header().as_bytes())?;
    for (i, entry) in entries.iter().enumerate() {
        if i % ROWS_PER_BLOCK == 0 {
            writeln!(writer, "{}", "-".repeat(SEPARATOR_WIDTH))?;
        }
        writeln!(writer, " {:04} |{}", i + 1, entry.format_line())?;
    }
    Ok(())
}

fn write_report_file(path: &Path, entries: &[TxtEntry]) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_report(&mut writer, entries)?;
    writer.flush()?;
    Ok(())
}

/// report.txt と report_sorted.txt を生成し、そのパスを返す
pub fn generate_txt_report(database: &Database, output_dir: &Path) -> Result<(PathBuf, PathBuf)> {
    let entries = best_entries(database);
    let sorted = sorted_entries(&entries);

    let report_path = output_dir.join(REPORT_FILE);
    let sorted_path = output_dir.join(SORTED_REPORT_FILE);

    write_report_file(&report_path, &entries)?;
    write_report_file(&sorted_path, &sorted)?;

    Ok((report_path, sorted_path))
}
