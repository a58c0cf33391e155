use reqwest::blocking::Client;

use super::{ChapterDocument, ChapterSource, LoadError};

/// HTTP 章节来源
///
/// 通过 HTTP 获取静态章节资源，资源路径由固定模板生成：
/// `{base_url}/Moby{NNN}.json`，NNN 为零填充的 3 位章节编号
pub struct HttpChapterSource {
    client: Client,
    base_url: String,
}

impl HttpChapterSource {
    /// 创建新的 HTTP 章节来源
    ///
    /// # 参数
    /// - `base_url`: 章节资源所在的基础 URL（如 `http://localhost:8000/text_data`）
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// 生成章节资源 URL
    fn chapter_url(&self, number: u32) -> String {
        format!("{}/Moby{:03}.json", self.base_url, number)
    }
}

impl ChapterSource for HttpChapterSource {
    fn fetch_chapter(&self, number: u32) -> Result<ChapterDocument, LoadError> {
        let url = self.chapter_url(number);

        // 请求本身无法发出（连接被拒、跨域限制等）属于传输失败
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| LoadError::Transport(e.to_string()))?;

        // 正常收到响应但资源不存在，按单章缺失处理
        if !response.status().is_success() {
            return Err(LoadError::NotFound(number));
        }

        let body = response
            .text()
            .map_err(|e| LoadError::Transport(e.to_string()))?;

        ChapterDocument::from_json(number, &body)
    }
}
