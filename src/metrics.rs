use crate::config::ReportInputs;
use crate::error::{ensure_valid_metric, Result};
use crate::size::file_size_mib;
use crate::timing::parse_elapsed_seconds;
use tracing::info;

/// The two tools being compared, in chart order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    FastSeek,
    Samtools,
}

impl Tool {
    pub fn all() -> &'static [Tool] {
        &[Tool::FastSeek, Tool::Samtools]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tool::FastSeek => "FastSeek",
            Tool::Samtools => "Samtools",
        }
    }
}

/// A measured dimension, one chart panel each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    IndexTime,
    SearchTime,
    IndexSize,
}

impl Dimension {
    /// Panel order, left to right.
    pub fn all() -> &'static [Dimension] {
        &[
            Dimension::IndexTime,
            Dimension::SearchTime,
            Dimension::IndexSize,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Dimension::IndexTime => "Indexing time",
            Dimension::SearchTime => "Search time",
            Dimension::IndexSize => "Index size",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Dimension::IndexTime | Dimension::SearchTime => "s",
            Dimension::IndexSize => "MB",
        }
    }
}

/// The six scalars behind one comparison chart. Sizes are in MiB.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricSet {
    pub index_time_fastseek: f64,
    pub index_time_samtools: f64,
    pub search_time_fastseek: f64,
    pub search_time_samtools: f64,
    pub index_size_fastseek: f64,
    pub index_size_samtools: f64,
}

impl MetricSet {
    pub fn get(&self, dimension: Dimension, tool: Tool) -> f64 {
        match (dimension, tool) {
            (Dimension::IndexTime, Tool::FastSeek) => self.index_time_fastseek,
            (Dimension::IndexTime, Tool::Samtools) => self.index_time_samtools,
            (Dimension::SearchTime, Tool::FastSeek) => self.search_time_fastseek,
            (Dimension::SearchTime, Tool::Samtools) => self.search_time_samtools,
            (Dimension::IndexSize, Tool::FastSeek) => self.index_size_fastseek,
            (Dimension::IndexSize, Tool::Samtools) => self.index_size_samtools,
        }
    }

    /// Values for one dimension in `Tool::all()` order.
    pub fn pair(&self, dimension: Dimension) -> [f64; 2] {
        [
            self.get(dimension, Tool::FastSeek),
            self.get(dimension, Tool::Samtools),
        ]
    }

    /// Every value must be finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        for &dimension in Dimension::all() {
            for &tool in Tool::all() {
                let metric = format!("{} ({})", dimension.name(), tool.name());
                ensure_valid_metric(&metric, self.get(dimension, tool))?;
            }
        }
        Ok(())
    }
}

/// Extract all six metrics from the benchmark artifacts.
pub fn collect_metrics(inputs: &ReportInputs) -> Result<MetricSet> {
    let metrics = MetricSet {
        index_time_fastseek: parse_elapsed_seconds(&inputs.fastseek_index_time)?,
        search_time_fastseek: parse_elapsed_seconds(&inputs.fastseek_search_time)?,
        index_time_samtools: parse_elapsed_seconds(&inputs.samtools_index_time)?,
        search_time_samtools: parse_elapsed_seconds(&inputs.samtools_search_time)?,
        index_size_fastseek: file_size_mib(&inputs.fastseek_index_file)?,
        index_size_samtools: file_size_mib(&inputs.samtools_index_file)?,
    };
    metrics.validate()?;

    info!(
        index_time_fastseek = metrics.index_time_fastseek,
        index_time_samtools = metrics.index_time_samtools,
        search_time_fastseek = metrics.search_time_fastseek,
        search_time_samtools = metrics.search_time_samtools,
        index_size_fastseek = metrics.index_size_fastseek,
        index_size_samtools = metrics.index_size_samtools,
        "collected benchmark metrics"
    );
    Ok(metrics)
}

fn format_ratio(numerator: f64, denominator: f64) -> String {
    if denominator > 0.0 {
        format!("{:.2}x", numerator / denominator)
    } else {
        "n/a".to_string()
    }
}

/// Print the metrics to the console
pub fn print_summary(metrics: &MetricSet) {
    println!("\n{:=<64}", "");
    println!("FastSeek vs Samtools");
    println!("{:=<64}\n", "");

    println!(
        "  {:<16} {:>14} {:>14} {:>14}",
        "Metric", "FastSeek", "Samtools", "Samtools/FS"
    );
    println!("  {:-<60}", "");

    for &dimension in Dimension::all() {
        let [fastseek, samtools] = metrics.pair(dimension);
        println!(
            "  {:<16} {:>14} {:>14} {:>14}",
            dimension.name(),
            format!("{:.2} {}", fastseek, dimension.unit()),
            format!("{:.2} {}", samtools, dimension.unit()),
            format_ratio(samtools, fastseek)
        );
    }
    println!();
}
