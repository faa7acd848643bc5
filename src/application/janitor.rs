//! Resource Janitor - 单次运行的中间产物登记表
//!
//! 每个创建文件的步骤在写文件之前登记路径，运行结束时（成功、失败或 panic）
//! 由 `CleanupGuard` 统一删除。登记表按运行创建，不是进程级全局状态。

use dashmap::DashMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::domain::audio::ClipRole;

/// 清理结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    /// 删除成功的文件数
    pub removed: usize,
    /// 本来就不存在的文件数
    pub missing: usize,
    /// 删除失败的文件数（已记录日志）
    pub failed: usize,
}

impl CleanupReport {
    pub fn attempted(&self) -> usize {
        self.removed + self.missing + self.failed
    }
}

/// 中间产物登记表
///
/// 并发登记安全（DashMap）
#[derive(Debug, Default)]
pub struct ResourceJanitor {
    /// path -> role
    artifacts: DashMap<PathBuf, ClipRole>,
}

impl ResourceJanitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记一个中间产物；最终输出不会被登记
    ///
    /// 返回是否登记成功
    pub fn track(&self, path: impl Into<PathBuf>, role: ClipRole) -> bool {
        if !role.is_intermediate() {
            return false;
        }
        let path = path.into();
        tracing::trace!(path = %path.display(), role = %role, "Artifact tracked");
        self.artifacts.insert(path, role);
        true
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    /// 删除所有已登记的文件
    ///
    /// 每个路径只尝试一次（删除前先从登记表移除），文件不存在视为成功，
    /// 从不返回错误
    pub fn cleanup(&self) -> CleanupReport {
        let paths: Vec<PathBuf> = self.artifacts.iter().map(|e| e.key().clone()).collect();
        let mut report = CleanupReport::default();

        for path in paths {
            if self.artifacts.remove(&path).is_none() {
                continue;
            }
            match std::fs::remove_file(&path) {
                Ok(()) => report.removed += 1,
                Err(e) if e.kind() == ErrorKind::NotFound => report.missing += 1,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to remove artifact");
                    report.failed += 1;
                }
            }
        }

        if report.attempted() > 0 {
            tracing::debug!(
                removed = report.removed,
                missing = report.missing,
                failed = report.failed,
                "Artifacts cleaned up"
            );
        }
        report
    }

    /// 作用域守卫：离开作用域时清理
    pub fn guard(&self) -> CleanupGuard<'_> {
        CleanupGuard { janitor: self }
    }
}

/// 离开作用域时执行 `cleanup()`，覆盖提前返回与 panic
pub struct CleanupGuard<'a> {
    janitor: &'a ResourceJanitor,
}

impl Drop for CleanupGuard<'_> {
    fn drop(&mut self) {
        self.janitor.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cleanup_removes_tracked_files() {
        let dir = tempdir().unwrap();
        let janitor = ResourceJanitor::new();
        for i in 0..3 {
            let path = dir.path().join(format!("clip-{}.mp3", i));
            std::fs::write(&path, b"data").unwrap();
            assert!(janitor.track(&path, ClipRole::EnhancedSpeech));
        }

        let report = janitor.cleanup();
        assert_eq!(report.removed, 3);
        assert!(janitor.is_empty());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_missing_file_is_noop() {
        let dir = tempdir().unwrap();
        let janitor = ResourceJanitor::new();
        janitor.track(dir.path().join("never-created.mp3"), ClipRole::RawSpeech);

        let report = janitor.cleanup();
        assert_eq!(report, CleanupReport { removed: 0, missing: 1, failed: 0 });
    }

    #[test]
    fn test_each_path_attempted_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("silence.mp3");
        std::fs::write(&path, b"data").unwrap();

        let janitor = ResourceJanitor::new();
        janitor.track(&path, ClipRole::Silence);
        janitor.track(&path, ClipRole::Silence);

        assert_eq!(janitor.cleanup().attempted(), 1);
        assert_eq!(janitor.cleanup().attempted(), 0);
    }

    #[test]
    fn test_final_output_never_tracked() {
        let janitor = ResourceJanitor::new();
        assert!(!janitor.track("/tmp/final.mp3", ClipRole::Final));
        assert!(janitor.is_empty());
    }

    #[test]
    fn test_guard_cleans_on_drop() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("raw.mp3");
        std::fs::write(&path, b"data").unwrap();

        let janitor = ResourceJanitor::new();
        {
            let _guard = janitor.guard();
            janitor.track(&path, ClipRole::RawSpeech);
        }
        assert!(!path.exists());
    }

    #[test]
    fn test_concurrent_tracking() {
        let janitor = std::sync::Arc::new(ResourceJanitor::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let janitor = janitor.clone();
                std::thread::spawn(move || {
                    janitor.track(format!("/tmp/narrator-test-{}.mp3", i), ClipRole::RawSpeech);
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(janitor.len(), 8);
    }
}
