//! UI 能力接口
//!
//! 请求层不直接操作终端，只依赖注入的 `Notifier` / `Navigator`，
//! 加载状态通过进程级 `LoadingFlag` 暴露给任意渲染方

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{info, warn};

/// 用户提示能力
pub trait Notifier: Send + Sync {
    /// 显示错误提示
    fn error(&self, message: &str);
    /// 显示成功提示
    fn success(&self, message: &str);
}

/// 页面跳转能力
pub trait Navigator: Send + Sync {
    /// 跳转到登录入口
    fn redirect_to_login(&self);
}

/// 终端提示实现
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn error(&self, message: &str) {
        warn!("❌ {}", message);
    }

    fn success(&self, message: &str) {
        info!("✅ {}", message);
    }
}

/// 终端跳转实现
///
/// 终端里没有页面可跳，只负责提示；真正回到登录菜单由 App 根据
/// Unauthenticated 错误驱动
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn redirect_to_login(&self) {
        info!("↩️ 返回登录入口");
    }
}

/// 进程级加载标志
///
/// 请求进行中为 true，任何退出路径（成功/失败/panic）都会复位
#[derive(Clone, Default)]
pub struct LoadingFlag(Arc<AtomicBool>);

impl LoadingFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前是否有请求进行中
    pub fn is_loading(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// 置位并返回守卫，守卫释放时自动复位
    pub fn begin(&self) -> LoadingGuard {
        self.0.store(true, Ordering::SeqCst);
        LoadingGuard(self.0.clone())
    }
}

/// 加载标志守卫
pub struct LoadingGuard(Arc<AtomicBool>);

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{catch_unwind, AssertUnwindSafe};

    #[test]
    fn test_loading_flag_lifecycle() {
        let flag = LoadingFlag::new();
        assert!(!flag.is_loading());

        let guard = flag.begin();
        assert!(flag.is_loading());

        drop(guard);
        assert!(!flag.is_loading());
    }

    #[test]
    fn test_loading_flag_released_on_panic() {
        let flag = LoadingFlag::new();

        let result = catch_unwind(AssertUnwindSafe(|| {
            let _guard = flag.begin();
            panic!("请求中途崩溃");
        }));

        assert!(result.is_err());
        assert!(!flag.is_loading());
    }
}
