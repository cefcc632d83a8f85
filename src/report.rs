use crate::chart::{render_comparison, ComparisonFigure};
use crate::config::ReportConfig;
use crate::error::Result;
use crate::metrics::{collect_metrics, MetricSet};
use tracing::info_span;

/// Output of one report run.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub metrics: MetricSet,
    pub figure: ComparisonFigure,
}

/// Extract the six metrics and render the comparison chart.
pub fn generate_report(config: &ReportConfig) -> Result<Report> {
    let _span = info_span!("report", output = %config.output.display()).entered();

    let metrics = collect_metrics(&config.inputs)?;
    let figure = render_comparison(&metrics, &config.output)?;

    Ok(Report { metrics, figure })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::AxisScale;
    use crate::config::ReportInputs;
    use crate::error::ReportError;
    use std::path::Path;

    fn write_timing(path: &Path, seconds: &str) {
        std::fs::write(
            path,
            format!(
                "s\th:m:s\tmax_rss\tmax_vms\tmax_uss\tmax_pss\tio_in\tio_out\tmean_load\tcpu_time\n\
                 {}\t0:00:00\t10.0\t20.0\t9.0\t9.5\t0.0\t0.0\t0.0\t0.0\n",
                seconds
            ),
        )
        .unwrap();
    }

    fn write_index(path: &Path, mib: u64) {
        std::fs::File::create(path)
            .unwrap()
            .set_len(mib * 1_048_576)
            .unwrap();
    }

    fn sample_config(root: &Path) -> ReportConfig {
        write_timing(&root.join("fastseek_index.tsv"), "2.0");
        write_timing(&root.join("fastseek_search.tsv"), "0.01");
        write_timing(&root.join("samtools_index.tsv"), "5.0");
        write_timing(&root.join("samtools_search.tsv"), "3.0");
        write_index(&root.join("reads.fastq.index"), 10);
        write_index(&root.join("reads.bam.bai"), 50);

        ReportConfig {
            inputs: ReportInputs {
                fastseek_index_time: root.join("fastseek_index.tsv"),
                fastseek_search_time: root.join("fastseek_search.tsv"),
                samtools_index_time: root.join("samtools_index.tsv"),
                samtools_search_time: root.join("samtools_search.tsv"),
                fastseek_index_file: root.join("reads.fastq.index"),
                samtools_index_file: root.join("reads.bam.bai"),
            },
            output: root.join("comparison.svg"),
        }
    }

    #[test]
    fn test_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let config = sample_config(dir.path());

        let report = generate_report(&config).unwrap();

        assert_eq!(report.metrics.index_size_fastseek, 10.0);
        assert_eq!(report.metrics.index_size_samtools, 50.0);
        let scales: Vec<AxisScale> = report.figure.panels.iter().map(|p| p.scale).collect();
        assert_eq!(
            scales,
            vec![AxisScale::Linear, AxisScale::Log, AxisScale::Linear]
        );

        let svg = std::fs::read_to_string(&config.output).unwrap();
        assert!(!svg.is_empty());
        assert!(svg.contains("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        for panel in &report.figure.panels {
            for bar in &panel.bars {
                assert!(svg.contains(&bar.annotation.text));
            }
        }
    }

    #[test]
    fn test_malformed_record_produces_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let config = sample_config(dir.path());
        std::fs::write(&config.inputs.samtools_search_time, "s\th:m:s\n").unwrap();

        assert!(matches!(
            generate_report(&config),
            Err(ReportError::FormatViolation { .. })
        ));
        assert!(!config.output.exists());
    }

    #[test]
    fn test_missing_index_produces_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let config = sample_config(dir.path());
        std::fs::remove_file(&config.inputs.fastseek_index_file).unwrap();

        assert!(matches!(
            generate_report(&config),
            Err(ReportError::InputMissing { .. })
        ));
        assert!(!config.output.exists());
    }
}
