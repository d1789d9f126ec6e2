//! AtomicBool による InterruptChecker 実装
//!
//! CLI はシグナルハンドラからフラグを立て、store は反映前にここを確認する。

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::ports::outbound::InterruptChecker;

/// 共有フラグを確認するだけの InterruptChecker
pub struct FlagInterrupt {
    flag: Arc<AtomicBool>,
}

impl FlagInterrupt {
    pub fn new() -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
        }
    }

    /// シグナルハンドラ等へ渡す共有フラグ
    pub fn flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.flag)
    }
}

impl Default for FlagInterrupt {
    fn default() -> Self {
        Self::new()
    }
}

impl InterruptChecker for FlagInterrupt {
    fn is_interrupted(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}
