use super::PlotEngine;
use crate::errors::TrendError;
use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;

/// Shells out to the `gnuplot` binary.
pub struct Gnuplot {
    program: String,
}

impl Gnuplot {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for Gnuplot {
    fn default() -> Self {
        Self::new("gnuplot")
    }
}

#[async_trait]
impl PlotEngine for Gnuplot {
    async fn run(&self, script: &str, _out: &Path) -> Result<(), TrendError> {
        let file = tempfile::NamedTempFile::new()?;
        std::fs::write(file.path(), script)?;

        let output = Command::new(&self.program)
            .arg(file.path())
            .output()
            .await?;
        if !output.status.success() {
            return Err(TrendError::RenderEngine {
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        Ok(())
    }
}
