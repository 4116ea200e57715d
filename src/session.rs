//! 用户会话管理
//!
//! `Session` 是当前登录用户的认证与身份信息；
//! `SessionStore` 负责把它持久化到本地 TOML 文件（登录写入、退出清空），
//! 程序启动时从文件恢复

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AppResult, StorageError};

/// 当前用户会话
///
/// 不变式：`token` 为空时不得发起除登录/注册以外的请求
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
}

impl Session {
    /// 是否已登录
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// 清空所有字段
    pub fn clear(&mut self) {
        *self = Session::default();
    }
}

/// 会话持久化存储
pub struct SessionStore {
    path: PathBuf,
    session: Mutex<Session>,
}

impl SessionStore {
    /// 从文件加载会话，文件不存在时返回空会话
    pub fn load(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();
        let session = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| StorageError::ReadFailed {
                path: path.display().to_string(),
                source: e,
            })?;
            toml::from_str(&content).map_err(|e| StorageError::ParseFailed {
                path: path.display().to_string(),
                source: e,
            })?
        } else {
            Session::default()
        };

        debug!("会话已加载: {} (已登录: {})", path.display(), session.is_authenticated());

        Ok(Self {
            path,
            session: Mutex::new(session),
        })
    }

    /// 当前 token（未登录时为 None）
    pub fn token(&self) -> Option<String> {
        self.lock().token.clone()
    }

    /// 当前会话的快照
    pub fn snapshot(&self) -> Session {
        self.lock().clone()
    }

    /// 登录成功后写入会话并持久化
    pub fn set_login(&self, token: String, user_id: String, user_email: String) -> AppResult<()> {
        {
            let mut session = self.lock();
            session.token = Some(token);
            session.user_id = Some(user_id);
            session.user_email = Some(user_email);
        }
        self.save()
    }

    /// 清空会话并持久化（退出登录）
    pub fn clear(&self) -> AppResult<()> {
        self.lock().clear();
        self.save()
    }

    /// 会话文件路径
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> AppResult<()> {
        let session = self.snapshot();
        let content =
            toml::to_string(&session).map_err(|e| StorageError::SerializeFailed { source: e })?;
        fs::write(&self.path, content).map_err(|e| StorageError::WriteFailed {
            path: self.path.display().to_string(),
            source: e,
        })?;
        debug!("会话已保存: {}", self.path.display());
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        // 单任务顺序使用，锁只会在持有者 panic 时中毒
        self.session.lock().expect("会话锁已中毒")
    }
}
