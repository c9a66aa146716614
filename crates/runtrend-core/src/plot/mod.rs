use crate::errors::TrendError;
use crate::render::{ChartLabels, TrendRenderer};
use crate::run::WorkflowRun;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

pub mod gnuplot;

/// Supported render targets. Anything else is rejected before any fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Svg,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self, TrendError> {
        match s {
            "png" => Ok(Self::Png),
            "svg" => Ok(Self::Svg),
            other => Err(TrendError::InvalidFormat(other.to_string())),
        }
    }

    /// File extension, which doubles as the gnuplot terminal name.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }
}

const BASE_WIDTH: f64 = 1280.0;
const MIN_WIDTH: f64 = 640.0;
const HEIGHT: u32 = 720;

/// Output width grows with the number of x categories: the base width
/// scaled by `x_count / 60`, rounded to one decimal, never below
/// [`MIN_WIDTH`].
fn chart_width(x_count: usize) -> f64 {
    let scale = (x_count as f64 / 60.0 * 10.0).round() / 10.0;
    (BASE_WIDTH * scale).max(MIN_WIDTH)
}

/// Builds the gnuplot script for a stacked-histogram trend chart reading
/// tab-separated data from `dat` and writing the image to `out`.
fn chart_script(
    labels: &ChartLabels,
    dat: &Path,
    out: &Path,
    format: OutputFormat,
    x_count: usize,
) -> String {
    format!(
        r#"set term {term} size {width},{height}
set out "{out}"

set datafile separator "\t"

set xtics rotate by -90

set title "{title}"
set xlabel "{xlabel}"
set ylabel "{ylabel}"

set style data histograms
set style histogram rowstacked
set style fill solid border lc rgb "black"

set key autotitle columnheader

plot for [col=2:*] '{dat}' using col:xtic(1)
"#,
        term = format.extension(),
        width = chart_width(x_count),
        height = HEIGHT,
        out = out.display(),
        title = labels.title,
        xlabel = labels.xlabel,
        ylabel = labels.ylabel,
        dat = dat.display(),
    )
}

/// External plotting engine: runs a script expected to produce `out`.
#[async_trait]
pub trait PlotEngine: Send + Sync {
    async fn run(&self, script: &str, out: &Path) -> Result<(), TrendError>;
}

/// Renders a trend chart for `runs` into `out` and returns the written
/// path.
///
/// The tab-separated data file and the generated script are temporary and
/// removed on every exit path. The engine writes into a staging file next
/// to `out`, which is persisted only on success, so a failed render leaves
/// no partial artifact behind.
pub async fn create_chart(
    engine: &dyn PlotEngine,
    renderer: &dyn TrendRenderer,
    runs: &mut [WorkflowRun],
    format: OutputFormat,
    out: &Path,
) -> Result<PathBuf, TrendError> {
    let table = renderer.render(runs).await?;

    let dat = tempfile::NamedTempFile::new()?;
    std::fs::write(dat.path(), table.to_tsv())?;

    let out_dir = out
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let staged = tempfile::Builder::new()
        .suffix(&format!(".{}", format.extension()))
        .tempfile_in(out_dir)?;

    let script = chart_script(
        renderer.labels(),
        dat.path(),
        staged.path(),
        format,
        table.rows.len(),
    );
    tracing::debug!(
        rows = table.rows.len(),
        series = table.header.len().saturating_sub(1),
        "rendering chart"
    );
    engine.run(&script, staged.path()).await?;

    staged
        .into_temp_path()
        .persist(out)
        .map_err(|e| TrendError::Io(e.error))?;
    Ok(out.to_path_buf())
}
