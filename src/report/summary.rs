//! データベースの概要

use autoed_report_common::{is_ice_like, sessions, Database, PipelineManifest, RunStatus};
use std::fmt;

/// パイプライン1つ分の集計
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineSummary {
    pub name: String,
    pub ok: usize,
    pub process_error: usize,
    pub no_data: usize,
    pub unrecognized: usize,
    /// 結果がないデータセット
    pub missing: usize,
    /// OK のうち格子定数が氷に近いもの
    pub ice_like: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub datasets: usize,
    pub sessions: Vec<String>,
    pub pipelines: Vec<PipelineSummary>,
}

impl Summary {
    pub fn from_database(database: &Database, manifest: &PipelineManifest) -> Self {
        let pipelines = manifest
            .iter()
            .map(|name| {
                let mut summary = PipelineSummary {
                    name: name.to_string(),
                    ..Default::default()
                };
                for (_, record) in database.iter() {
                    let Some(result) = record.pipeline(name) else {
                        summary.missing += 1;
                        continue;
                    };
                    match &result.status {
                        RunStatus::Ok => {
                            summary.ok += 1;
                            if result.cell().map(|c| is_ice_like(&c)).unwrap_or(false) {
                                summary.ice_like += 1;
                            }
                        }
                        RunStatus::ProcessError => summary.process_error += 1,
                        RunStatus::NoData => summary.no_data += 1,
                        RunStatus::Unrecognized(_) => summary.unrecognized += 1,
                    }
                }
                summary
            })
            .collect();

        Self {
            datasets: database.len(),
            sessions: sessions(database),
            pipelines,
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "データセット: {}", self.datasets)?;
        writeln!(f, "セッション: {}", self.sessions.len())?;
        for session in &self.sessions {
            writeln!(f, "  - {}", session)?;
        }
        writeln!(f, "パイプライン: {}", self.pipelines.len())?;
        for p in &self.pipelines {
            writeln!(
                f,
                "  {:<20} OK {:>5} (ice {:>3}) | error {:>5} | no data {:>5} | unparsed {:>5} | missing {:>5}",
                p.name, p.ok, p.ice_like, p.process_error, p.no_data, p.unrecognized, p.missing
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts() {
        let db = Database::from_json_str(
            r#"{
                "/d/2023/s1/r/a.h5": {
                    "default": {"title": "default", "status": "OK", "unit_cell": [4.4, 4.4, 7.2, 90, 90, 120]},
                    "ice": {"title": "ice", "status": "process_error"}
                },
                "/d/2023/s2/r/b.h5": {
                    "default": {"title": "default", "status": "parse_error"}
                }
            }"#,
        )
        .unwrap();
        let manifest = PipelineManifest::discover(&db);
        let summary = Summary::from_database(&db, &manifest);

        assert_eq!(summary.datasets, 2);
        assert_eq!(summary.sessions, vec!["2023/s1", "2023/s2"]);

        let default = &summary.pipelines[0];
        assert_eq!(default.ok, 1);
        assert_eq!(default.ice_like, 1);
        assert_eq!(default.unrecognized, 1);

        let ice = &summary.pipelines[1];
        assert_eq!(ice.process_error, 1);
        assert_eq!(ice.missing, 1);

        let text = summary.to_string();
        assert!(text.contains("データセット: 2"));
    }
}
