use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{ChapterDocument, ChapterSource, LoadError};

/// 文件系统章节来源
///
/// 从本地目录读取章节资源，命名约定与 HTTP 来源一致：
/// `{dir}/Moby{NNN}.json`
pub struct FsChapterSource {
    dir: PathBuf,
}

impl FsChapterSource {
    /// 创建新的文件系统章节来源
    ///
    /// # 参数
    /// - `dir`: 章节文件所在目录（如 `text_data/`）
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// 生成章节文件路径
    fn chapter_path(&self, number: u32) -> PathBuf {
        self.dir.join(format!("Moby{:03}.json", number))
    }
}

impl ChapterSource for FsChapterSource {
    fn fetch_chapter(&self, number: u32) -> Result<ChapterDocument, LoadError> {
        // 章节目录本身缺失属于环境配置错误，而非单章缺失
        if !self.dir.is_dir() {
            return Err(LoadError::Transport(format!(
                "章节目录不存在或不可访问: {}",
                self.dir.display()
            )));
        }

        let path = self.chapter_path(number);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(LoadError::NotFound(number));
            }
            Err(e) => {
                return Err(LoadError::Transport(format!(
                    "读取 {} 失败: {}",
                    path.display(),
                    e
                )));
            }
        };

        let text = String::from_utf8(bytes)
            .map_err(|e| LoadError::Malformed(number, e.to_string()))?;

        ChapterDocument::from_json(number, &text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_all_chapters;
    use std::io::Write;

    fn write_chapter(dir: &Path, number: u32, main_text: &str) {
        let payload = serde_json::json!({
            "main_text": main_text,
            "notes": [],
        });
        let path = dir.join(format!("Moby{:03}.json", number));
        let mut file = fs::File::create(path).unwrap();
        write!(file, "{}", payload).unwrap();
    }

    #[test]
    fn test_fetch_chapter_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        write_chapter(dir.path(), 1, "Title\npage 1\nHello.");

        let source = FsChapterSource::new(dir.path());
        let doc = source.fetch_chapter(1).unwrap();

        assert_eq!(doc.number, 1);
        assert_eq!(doc.main_text, "Title\npage 1\nHello.");
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let source = FsChapterSource::new(dir.path());

        let result = source.fetch_chapter(7);
        assert!(matches!(result, Err(LoadError::NotFound(7))));
    }

    #[test]
    fn test_missing_dir_is_transport_error() {
        let source = FsChapterSource::new("/no/such/directory");
        let result = source.fetch_chapter(1);
        assert!(matches!(result, Err(LoadError::Transport(_))));
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Moby001.json");
        fs::write(path, "{ broken").unwrap();

        let source = FsChapterSource::new(dir.path());
        let result = source.fetch_chapter(1);
        assert!(matches!(result, Err(LoadError::Malformed(1, _))));
    }

    #[test]
    fn test_load_all_with_gap() {
        let dir = tempfile::tempdir().unwrap();
        write_chapter(dir.path(), 1, "One\npage 1\nText one.");
        write_chapter(dir.path(), 3, "Three\npage 3\nText three.");

        let source = FsChapterSource::new(dir.path());
        let (chapters, report) = load_all_chapters(&source, 3).unwrap();

        let numbers: Vec<u32> = chapters.iter().map(|c| c.number).collect();
        assert_eq!(numbers, vec![1, 3]);
        assert_eq!(report.failed_chapters, vec![2]);
    }
}
