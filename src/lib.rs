// Moby Reader 核心库
// 加载分章 JSON 资源，依据页码标记重建分页视图，并提供章节/页面导航

pub mod annotation;
pub mod loader;
pub mod paginator;
pub mod reader;


// 重新导出主要类型
pub use annotation::AnnotationProcessor;
pub use loader::fs_source::FsChapterSource;
pub use loader::http_source::HttpChapterSource;
pub use loader::{
    load_all_chapters, ChapterDocument, ChapterSource, Footnote, LoadError, LoadReport,
};
pub use paginator::{paginate, FootnoteTable, Page, PageSplitter};
pub use reader::{ChapterEntry, ReaderSession, RenderedPage};

/// 全书章节总数
pub const TOTAL_CHAPTERS: u32 = 136;

/// 打开整本书
///
/// 加载全部章节、完成分页并创建阅读会话。
/// 单个章节加载失败不影响整体流程；仅环境配置错误会中止
///
/// # 参数
/// - `source`: 章节来源
///
/// # 返回
/// 定位在第一页的阅读会话
pub fn open_book<S: ChapterSource>(source: &S) -> Result<ReaderSession, LoadError> {
    open_book_with_total(source, TOTAL_CHAPTERS)
}

/// 打开指定章节总数的书
///
/// # 参数
/// - `source`: 章节来源
/// - `total`: 章节总数
pub fn open_book_with_total<S: ChapterSource>(
    source: &S,
    total: u32,
) -> Result<ReaderSession, LoadError> {
    // 1. 加载章节
    let (chapters, report) = load_all_chapters(source, total)?;
    println!("已加载 {} / {} 章", report.loaded, report.attempted);

    // 2. 分页
    let pages = paginate(&chapters);
    println!("已解析 {} 页", pages.len());

    // 3. 创建阅读会话
    Ok(ReaderSession::new(pages))
}
