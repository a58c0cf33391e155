use std::sync::Arc;

use regex::Regex;

use super::{FootnoteTable, Page};
use crate::loader::{ChapterDocument, Footnote};

/// 页面分割器
///
/// 依据正文中的页码标记（字面 "page" + 空白 + 十进制页码）
/// 将章节正文切分为页面
pub struct PageSplitter {
    /// 页码标记匹配模式
    marker_regex: Regex,
}

impl PageSplitter {
    /// 创建新的页面分割器实例
    pub fn new() -> Self {
        let marker_regex = Regex::new(r"page\s+(\d+)").unwrap();
        Self { marker_regex }
    }

    /// 构建章节脚注表
    ///
    /// 重复编号时后写覆盖先写
    pub fn build_footnote_table(&self, notes: &[Footnote]) -> FootnoteTable {
        let mut table = FootnoteTable::new();
        for note in notes {
            table.insert(note.n, note.note_html.clone());
        }
        table
    }

    /// 提取章节标题
    ///
    /// 取第一个页码标记之前的全部文本（去除首尾空白）；
    /// 无标记时返回空字符串
    pub fn extract_title(&self, text: &str) -> String {
        match self.marker_regex.find(text) {
            Some(m) => text[..m.start()].trim().to_string(),
            None => String::new(),
        }
    }

    /// 分割单个章节为页面
    ///
    /// 遍历正文中的每个页码标记，标记之后到下一个标记之前的文本
    /// 构成一个候选页面；去除首尾空白后为空的候选页面直接丢弃
    ///
    /// # 参数
    /// - `chapter`: 章节文档
    ///
    /// # 返回
    /// 页面列表（按标记出现顺序，不按页码重排）
    pub fn split_chapter(&self, chapter: &ChapterDocument) -> Vec<Page> {
        let text = &chapter.main_text;
        let title = self.extract_title(text);
        let footnotes = Arc::new(self.build_footnote_table(&chapter.notes));

        // 1. 收集全部页码标记及其位置
        let markers: Vec<(u32, usize, usize)> = self
            .marker_regex
            .captures_iter(text)
            .filter_map(|caps| {
                let m = caps.get(0)?;
                let number = caps.get(1)?.as_str().parse::<u32>().ok()?;
                Some((number, m.start(), m.end()))
            })
            .collect();

        // 2. 逐个标记截取页面正文
        let mut pages = Vec::new();
        for (i, &(page_number, _, body_start)) in markers.iter().enumerate() {
            let body_end = markers.get(i + 1).map(|m| m.1).unwrap_or(text.len());
            let body = text[body_start..body_end].trim();

            // 只含空白的页面不构成内容单元，直接丢弃
            if body.is_empty() {
                continue;
            }

            pages.push(Page {
                chapter_number: chapter.number,
                chapter_title: title.clone(),
                page_number,
                body_text: body.to_string(),
                footnotes: Arc::clone(&footnotes),
            });
        }

        pages
    }
}

impl Default for PageSplitter {
    fn default() -> Self {
        Self::new()
    }
}
