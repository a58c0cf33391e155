use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// 子模块声明
pub mod fs_source;
pub mod http_source;

/// 加载错误
///
/// 区分三类失败：单章资源缺失（非致命）、传输失败（环境配置错误）、
/// 章节文档格式错误（按单章缺失处理）
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("章节资源不存在: 第 {0} 章")]
    NotFound(u32),
    #[error("传输失败: {0}")]
    Transport(String),
    #[error("章节文档格式错误 (第 {0} 章): {1}")]
    Malformed(u32, String),
}

/// 脚注记录
///
/// 字段名与章节资源的 JSON 字段保持一致
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Footnote {
    /// 脚注编号
    pub n: u32,
    /// 脚注 HTML 内容
    pub note_html: String,
}

/// 章节资源的 JSON 结构
///
/// main_text 为正文，notes 为脚注列表
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ChapterPayload {
    pub main_text: String,
    pub notes: Vec<Footnote>,
}

/// 章节文档
///
/// 一个章节资源加载完成后的不可变记录
#[derive(Debug, Clone)]
pub struct ChapterDocument {
    /// 章节编号（从 1 开始）
    pub number: u32,
    /// 章节正文
    pub main_text: String,
    /// 脚注列表
    pub notes: Vec<Footnote>,
}

impl ChapterDocument {
    /// 从 JSON 文本解析章节文档
    ///
    /// 缺少必需字段或 JSON 非法时返回 Malformed，
    /// 由批量加载器按单章缺失处理
    ///
    /// # 参数
    /// - `number`: 章节编号
    /// - `json`: 章节资源的 JSON 文本
    ///
    /// # 返回
    /// 解析后的章节文档
    pub fn from_json(number: u32, json: &str) -> Result<Self, LoadError> {
        let payload: ChapterPayload = serde_json::from_str(json)
            .map_err(|e| LoadError::Malformed(number, e.to_string()))?;

        Ok(Self {
            number,
            main_text: payload.main_text,
            notes: payload.notes,
        })
    }
}

/// ChapterSource trait
///
/// 所有章节来源必须实现此 trait
pub trait ChapterSource {
    /// 获取指定编号的章节文档
    ///
    /// # 参数
    /// - `number`: 章节编号（从 1 开始）
    ///
    /// # 返回
    /// 章节文档；资源缺失返回 NotFound，请求无法发出返回 Transport
    fn fetch_chapter(&self, number: u32) -> Result<ChapterDocument, LoadError>;
}

/// 加载报告
///
/// 一次批量加载的统计信息
#[derive(Debug, Clone)]
pub struct LoadReport {
    /// 尝试加载的章节总数
    pub attempted: u32,
    /// 成功加载的章节数
    pub loaded: usize,
    /// 加载失败的章节编号
    pub failed_chapters: Vec<u32>,
    /// 开始时间
    pub started_at: DateTime<Utc>,
    /// 结束时间
    pub finished_at: DateTime<Utc>,
}

/// 加载全部章节
///
/// 按章节编号升序逐一获取，每章只尝试一次，不重试。
/// 单章缺失或格式错误记录后跳过，不中断整体加载；
/// 仅当本次运行的首个失败即为传输失败时，判定为环境配置错误
/// （内容被以 file:// 方式直接打开等），输出修复提示并立即终止。
///
/// # 参数
/// - `source`: 章节来源
/// - `total`: 章节总数
///
/// # 返回
/// 成功加载的章节列表（升序，缺失章节直接不在列表中）与加载报告
pub fn load_all_chapters<S: ChapterSource>(
    source: &S,
    total: u32,
) -> Result<(Vec<ChapterDocument>, LoadReport), LoadError> {
    let started_at = Utc::now();
    let mut chapters = Vec::new();
    let mut failed_chapters: Vec<u32> = Vec::new();

    for number in 1..=total {
        match source.fetch_chapter(number) {
            Ok(doc) => chapters.push(doc),
            Err(LoadError::Transport(msg)) if failed_chapters.is_empty() => {
                // 首个失败即传输失败：请求根本无法发出，继续尝试剩余章节没有意义
                eprintln!("无法发起章节请求: {}", msg);
                eprintln!(
                    "请通过本地 HTTP 服务访问阅读内容（如 python3 server.py 或 npx http-server），\
                     不要直接以 file:// 方式打开页面"
                );
                return Err(LoadError::Transport(msg));
            }
            Err(e) => {
                eprintln!("加载第 {} 章失败: {}", number, e);
                failed_chapters.push(number);
            }
        }
    }

    let report = LoadReport {
        attempted: total,
        loaded: chapters.len(),
        failed_chapters,
        started_at,
        finished_at: Utc::now(),
    };

    Ok((chapters, report))
}
