use std::collections::HashMap;
use std::sync::Arc;

use crate::loader::ChapterDocument;

// 子模块声明
pub mod page_splitter;

pub use page_splitter::PageSplitter;

/// 脚注表
///
/// 单个章节内脚注编号到脚注 HTML 内容的映射
pub type FootnoteTable = HashMap<u32, String>;

/// 页面
///
/// 分页后的最小阅读单元。页码为原文标注页码，可能重复或跳号，
/// 页面顺序只由章节加载顺序和标记出现顺序决定
#[derive(Debug, Clone)]
pub struct Page {
    /// 章节编号
    pub chapter_number: u32,
    /// 章节标题
    pub chapter_title: String,
    /// 页码（原文标注）
    pub page_number: u32,
    /// 页面正文（已去除首尾空白，保证非空）
    pub body_text: String,
    /// 所属章节的脚注表（同章各页共享同一份，不复制）
    pub footnotes: Arc<FootnoteTable>,
}

/// 将章节集合分页
///
/// 纯函数：按输入顺序逐章处理，输出全部页面的有序列表。
/// 结果只取决于输入内容，与加载时的网络完成顺序无关
///
/// # 参数
/// - `chapters`: 已加载的章节列表
///
/// # 返回
/// 页面列表（章节顺序 + 章节内标记出现顺序）
pub fn paginate(chapters: &[ChapterDocument]) -> Vec<Page> {
    let splitter = PageSplitter::new();
    let mut pages = Vec::new();

    for chapter in chapters {
        pages.extend(splitter.split_chapter(chapter));
    }

    pages
}
