use anyhow::{Context, Result};
use itertools::Itertools;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// Append-only record of the topics earlier runs have used, one per line.
pub struct TopicLog {
    path: PathBuf,
}

impl TopicLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn previous(&self) -> Result<Vec<String>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("Failed to read topic file {}", self.path.display())
                });
            }
        };

        Ok(contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_owned)
            .collect())
    }

    pub async fn append(&self, topic: &str) -> Result<()> {
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .with_context(|| format!("Failed to open topic file {}", self.path.display()))?;

        file.write_all(format!("{}\n", normalize_topic(topic)).as_bytes())
            .await
            .context("Failed to write topic")?;
        file.flush().await.context("Failed to flush topic file")?;

        Ok(())
    }
}

/// Squashes a model-produced topic onto a single line.
pub fn normalize_topic(raw: &str) -> String {
    raw.lines()
        .map(|line| line.split_whitespace().join(" "))
        .filter(|line| !line.is_empty())
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let topics = TopicLog::new(dir.path().join("topics.txt"));
        assert!(topics.previous().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn append_then_read_back_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let topics = TopicLog::new(dir.path().join("topics.txt"));

        topics.append("Quantum biology").await.unwrap();
        topics.append("  Urban heat islands \n").await.unwrap();

        assert_eq!(
            topics.previous().await.unwrap(),
            vec!["Quantum biology".to_string(), "Urban heat islands".to_string()]
        );
    }

    #[tokio::test]
    async fn blank_lines_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("topics.txt");
        std::fs::write(&path, "one\n\n   \ntwo\n").unwrap();

        let topics = TopicLog::new(path);
        assert_eq!(topics.previous().await.unwrap(), vec!["one", "two"]);
    }

    #[tokio::test]
    async fn multi_line_topic_is_written_as_one_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("topics.txt");
        let topics = TopicLog::new(&path);

        topics
            .append("**Topic:**\nThe ethics of\n\n  gene drives")
            .await
            .unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert_eq!(raw, "**Topic:** The ethics of gene drives\n");
    }

    #[test]
    fn normalize_keeps_single_line_untouched() {
        assert_eq!(normalize_topic("Deep sea mining"), "Deep sea mining");
        assert_eq!(normalize_topic("\n\n"), "");
    }
}
