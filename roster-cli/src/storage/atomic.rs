use roster_domain::error::DomainResult;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// 先写入 `<file>.tmp`，再重命名覆盖目标文件；父目录不存在时自动创建
pub async fn write_atomically(path: &Path, contents: &[u8]) -> DomainResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let tmp = tmp_path(path);
    tokio::fs::write(&tmp, contents).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

/// 文件不存在时返回 None
pub async fn read_optional(path: &Path) -> DomainResult<Option<String>> {
    match tokio::fs::read_to_string(path).await {
        Ok(text) => Ok(Some(text)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}

pub(crate) fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_parent_dirs_and_leaves_no_tmp_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested/deeper/teams.csv");

        write_atomically(&target, b"first").await.unwrap();
        write_atomically(&target, b"second").await.unwrap();

        assert_eq!(read_optional(&target).await.unwrap().as_deref(), Some("second"));
        assert!(!tmp_path(&target).exists());
    }

    #[tokio::test]
    async fn missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_optional(&dir.path().join("absent.json")).await.unwrap().is_none());
    }

    #[test]
    fn tmp_path_appends_suffix() {
        assert_eq!(tmp_path(Path::new("data/teams.json")), PathBuf::from("data/teams.json.tmp"));
    }
}
