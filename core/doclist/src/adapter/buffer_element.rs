//! メモリ上の表示要素
//!
//! DOM の代わりに内容とフラグを保持する。親レイアウト（CLI など）が
//! item_html() で `<li>` として取り出して配置する。

use std::collections::BTreeSet;
use std::sync::Mutex;

use anyhow::Result;

use crate::ports::outbound::Element;

struct BufferState {
    content: String,
    flags: BTreeSet<String>,
}

/// 内容とフラグを持つだけの要素実装
pub struct BufferElement {
    state: Mutex<BufferState>,
}

impl BufferElement {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(BufferState {
                content: String::new(),
                flags: BTreeSet::new(),
            }),
        }
    }

    /// 現在の内容
    pub fn content(&self) -> String {
        self.lock().content.clone()
    }

    pub fn has_flag(&self, name: &str) -> bool {
        self.lock().flags.contains(name)
    }

    /// `<li>` 1 行として整形する（フラグは class 属性になる）
    pub fn item_html(&self) -> String {
        let state = self.lock();
        let classes = state.flags.iter().cloned().collect::<Vec<_>>().join(" ");
        if classes.is_empty() {
            format!("<li>{}</li>", state.content)
        } else {
            format!(r#"<li class="{}">{}</li>"#, classes, state.content)
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BufferState> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Default for BufferElement {
    fn default() -> Self {
        Self::new()
    }
}

impl Element for BufferElement {
    fn replace_content(&self, markup: &str) -> Result<()> {
        self.lock().content = markup.to_string();
        Ok(())
    }

    fn set_flag(&self, name: &str, on: bool) -> Result<()> {
        let mut state = self.lock();
        if on {
            state.flags.insert(name.to_string());
        } else {
            state.flags.remove(name);
        }
        Ok(())
    }
}
