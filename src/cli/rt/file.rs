use anyhow::anyhow;
use regman_core::FileIO;
use std::path::Path;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

#[derive(Default, Clone)]
pub struct NativeFileIO {}

#[async_trait::async_trait]
impl FileIO for NativeFileIO {
    async fn write<'a>(&'a self, path: &'a str, content: &'a [u8]) -> anyhow::Result<()> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let mut file = tokio::fs::File::create(path).await?;
        file.write_all(content)
            .await
            .map_err(|e| anyhow!("{}", e))?;
        file.flush().await?;
        log::debug!("File write: {} ... ok", path);
        Ok(())
    }

    async fn read<'a>(&'a self, path: &'a str) -> anyhow::Result<String> {
        let mut file = tokio::fs::File::open(path).await?;
        let mut buffer = Vec::new();
        file.read_to_end(&mut buffer)
            .await
            .map_err(|e| anyhow!("{}", e))?;
        log::debug!("File read: {} ... ok", path);
        Ok(String::from_utf8(buffer)?)
    }

    async fn exists<'a>(&'a self, path: &'a str) -> anyhow::Result<bool> {
        Ok(tokio::fs::try_exists(path).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_read() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("nested/dir/students.txt");
        let path = path.to_str().unwrap();
        let file_io = NativeFileIO::default();

        assert!(!file_io.exists(path).await?);
        file_io.write(path, b"Ada,s1,,\n").await?;
        assert!(file_io.exists(path).await?);
        assert_eq!(file_io.read(path).await?, "Ada,s1,,\n");

        file_io.write(path, b"").await?;
        assert_eq!(file_io.read(path).await?, "");
        Ok(())
    }

    #[tokio::test]
    async fn test_read_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        let result = NativeFileIO::default().read(path.to_str().unwrap()).await;
        assert!(result.is_err());
    }
}
