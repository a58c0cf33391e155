use serde::{Deserialize, Serialize};

use crate::annotation::AnnotationProcessor;
use crate::paginator::Page;

/// 章节目录项
///
/// 供章节选择列表使用的展示数据
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChapterEntry {
    /// 章节编号
    pub number: u32,
    /// 展示标题（完整标题的首行）
    pub title: String,
}

/// 渲染页面
///
/// 提供给外部渲染层的当前页数据。渲染层负责展示与事件接线，
/// 本结构只携带数据
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RenderedPage {
    /// 章节编号
    pub chapter_number: u32,
    /// 章节标题
    pub chapter_title: String,
    /// 页码（原文标注）
    pub page_number: u32,
    /// 注释标记解析后的正文 HTML
    pub body_html: String,
}

/// 阅读会话
///
/// 持有分页结果与当前页索引。索引只由导航操作写入，
/// 始终保持在有效范围内
pub struct ReaderSession {
    /// 全书页面（构建后不再变化）
    pages: Vec<Page>,
    /// 当前页索引
    current_index: usize,
    /// 注释处理器
    annotations: AnnotationProcessor,
}

impl ReaderSession {
    /// 创建新的阅读会话，定位在第一页
    pub fn new(pages: Vec<Page>) -> Self {
        Self {
            pages,
            current_index: 0,
            annotations: AnnotationProcessor::new(),
        }
    }

    /// 获取当前页
    pub fn current_page(&self) -> Option<&Page> {
        self.pages.get(self.current_index)
    }

    /// 当前页索引
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// 页面总数
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// 会话是否为空（一页都没有）
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// 是否位于第一页
    pub fn is_first_page(&self) -> bool {
        self.current_index == 0
    }

    /// 是否位于最后一页
    pub fn is_last_page(&self) -> bool {
        self.pages.is_empty() || self.current_index == self.pages.len() - 1
    }

    /// 前进一页
    ///
    /// 已在最后一页时不做任何操作
    ///
    /// # 返回
    /// 是否发生了移动
    pub fn next_page(&mut self) -> bool {
        if self.current_index + 1 < self.pages.len() {
            self.current_index += 1;
            true
        } else {
            false
        }
    }

    /// 后退一页
    ///
    /// 已在第一页时不做任何操作
    ///
    /// # 返回
    /// 是否发生了移动
    pub fn prev_page(&mut self) -> bool {
        if self.current_index > 0 {
            self.current_index -= 1;
            true
        } else {
            false
        }
    }

    /// 跳转到指定章节的第一个页面
    ///
    /// # 参数
    /// - `chapter_number`: 章节编号
    ///
    /// # 返回
    /// 找到目标返回 true；否则当前位置保持不变并返回 false
    pub fn go_to_chapter(&mut self, chapter_number: u32) -> bool {
        match self
            .pages
            .iter()
            .position(|p| p.chapter_number == chapter_number)
        {
            Some(index) => {
                self.current_index = index;
                true
            }
            None => false,
        }
    }

    /// 跳转到指定页码的第一个页面
    ///
    /// 页码为原文标注页码，可能在多个章节中重复，取最先出现者
    ///
    /// # 参数
    /// - `page_number`: 页码
    ///
    /// # 返回
    /// 找到目标返回 true；否则当前位置保持不变并返回 false
    pub fn jump_to_page(&mut self, page_number: u32) -> bool {
        match self.pages.iter().position(|p| p.page_number == page_number) {
            Some(index) => {
                self.current_index = index;
                true
            }
            None => false,
        }
    }

    /// 当前章节编号
    pub fn current_chapter(&self) -> Option<u32> {
        self.current_page().map(|p| p.chapter_number)
    }

    /// 章节目录
    ///
    /// 按页面顺序收集去重后的章节列表，展示标题取完整标题的首行
    pub fn chapter_list(&self) -> Vec<ChapterEntry> {
        let mut entries: Vec<ChapterEntry> = Vec::new();

        for page in &self.pages {
            if entries.iter().any(|e| e.number == page.chapter_number) {
                continue;
            }
            let title = page.chapter_title.lines().next().unwrap_or("").to_string();
            entries.push(ChapterEntry {
                number: page.chapter_number,
                title,
            });
        }

        entries
    }

    /// 查询当前页的脚注内容
    ///
    /// 渲染层据此展示脚注弹层；定位逻辑完全由渲染层负责
    ///
    /// # 参数
    /// - `note_id`: 脚注编号
    ///
    /// # 返回
    /// 当前页脚注表中的 HTML 内容；编号不存在时返回 None
    pub fn footnote_html(&self, note_id: u32) -> Option<&str> {
        self.current_page()
            .and_then(|p| p.footnotes.get(&note_id))
            .map(|s| s.as_str())
    }

    /// 渲染当前页
    ///
    /// 对当前页正文做注释标记解析，输出渲染层所需的全部数据
    pub fn render_current(&self) -> Option<RenderedPage> {
        let page = self.current_page()?;

        Some(RenderedPage {
            chapter_number: page.chapter_number,
            chapter_title: page.chapter_title.clone(),
            page_number: page.page_number,
            body_html: self.annotations.resolve(&page.body_text, &page.footnotes),
        })
    }
}
