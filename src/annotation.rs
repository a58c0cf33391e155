use regex::{Captures, Regex};

use crate::paginator::FootnoteTable;

/// 注释处理器
///
/// 将页面正文中的行内脚注标记（紧贴词尾的 `[^编号]`）替换为
/// 可点击的引用片段；编号不在脚注表中的标记原样保留
pub struct AnnotationProcessor {
    /// 标记匹配模式：词 + 紧随其后的 [^数字]
    marker_regex: Regex,
}

impl AnnotationProcessor {
    /// 创建新的注释处理器实例
    pub fn new() -> Self {
        let marker_regex = Regex::new(r"(\S+?)\[\^(\d+)\]").unwrap();
        Self { marker_regex }
    }

    /// 解析正文中的脚注标记
    ///
    /// 从左到右、不重叠地匹配。编号存在于脚注表时，词与标记整体
    /// 替换为带 data-note 属性的 span（词内容做 HTML 转义，标记本身
    /// 不再出现）；编号不存在时该处文本逐字节保持不变。
    /// 匹配之外的文本全部原样保留，已解析过的输出再次处理不会变化
    ///
    /// # 参数
    /// - `text`: 页面正文
    /// - `notes`: 所属章节的脚注表
    ///
    /// # 返回
    /// 可交给渲染层的 HTML 文本
    pub fn resolve(&self, text: &str, notes: &FootnoteTable) -> String {
        self.marker_regex
            .replace_all(text, |caps: &Captures| {
                let word = &caps[1];
                let note_id: u32 = match caps[2].parse() {
                    Ok(id) => id,
                    Err(_) => return caps[0].to_string(),
                };

                if notes.contains_key(&note_id) {
                    format!(
                        "<span class=\"annotated\" data-note=\"{}\">{}</span>",
                        note_id,
                        html_escape::encode_text(word)
                    )
                } else {
                    // 孤立标记：脚注表中无对应编号，按字面保留
                    caps[0].to_string()
                }
            })
            .to_string()
    }
}

impl Default for AnnotationProcessor {
    fn default() -> Self {
        Self::new()
    }
}
