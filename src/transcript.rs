use anyhow::{Context, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use time::Date;
use time::macros::format_description;
use tokio::io::AsyncWriteExt;

/// The day's conversation log. Blocks are separated by a blank line.
pub struct Transcript {
    path: PathBuf,
}

impl Transcript {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn for_date(dir: &Path, date: Date) -> Result<Self> {
        let stamp = date
            .format(format_description!("[year]-[month]-[day]"))
            .context("Failed to format transcript date")?;
        Ok(Self::new(dir.join(format!("debate_{stamp}.txt"))))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn append(&self, block: &str) -> Result<()> {
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .with_context(|| format!("Failed to open transcript {}", self.path.display()))?;

        file.write_all(format!("{block}\n\n").as_bytes())
            .await
            .context("Failed to write transcript block")?;
        file.flush().await.context("Failed to flush transcript")?;

        Ok(())
    }

    pub async fn read(&self) -> Result<String> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(contents),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(String::new()),
            Err(err) => Err(err)
                .with_context(|| format!("Failed to read transcript {}", self.path.display())),
        }
    }
}
