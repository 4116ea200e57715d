//! # AI Interview Client
//!
//! AI 面试服务的终端客户端
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 数据层（Models）
//! - `models/` - 响应包、面试记录、聊天消息等 serde 类型
//!
//! ### ② 会话层（Session）
//! - `session/` - `Session` 值与 TOML 文件持久化的 `SessionStore`
//!
//! ### ③ 请求层（Api）
//! - `api/request` - 统一的请求核心：认证头、响应包解包、错误映射
//! - `api/user` / `api/meeting` - 各接口的类型化封装
//!
//! ### ④ 流程层（Workflow）
//! - `workflow/interview_flow` - 面试会话状态机
//!   （Idle → AwaitingResume → Active → Idle）
//! - 只依赖 `InterviewApi` 能力，不持有传输资源
//!
//! ### ⑤ 编排层（App）
//! - `app` - 终端交互循环，驱动请求层与流程层
//!
//! UI 副作用（提示、跳转、加载指示）通过 `ui` 模块的能力接口注入，
//! 核心逻辑不依赖具体终端实现

pub mod api;
pub mod app;
pub mod codes;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod session;
pub mod ui;
pub mod workflow;

// 重新导出常用类型
pub use api::{ApiClient, LoginData};
pub use app::App;
pub use config::Config;
pub use error::{ApiError, AppError, AppResult, InterviewError, ValidationError};
pub use models::{ChatMessage, Meeting, MeetingUpdate, ResponseEnvelope, Speaker};
pub use session::{Session, SessionStore};
pub use ui::{LoadingFlag, Navigator, Notifier};
pub use workflow::{InterviewApi, InterviewFlow, InterviewState, AI_GREETING};
