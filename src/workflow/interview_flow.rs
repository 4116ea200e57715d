//! 面试会话流程 - 流程层
//!
//! 核心职责：管理一场 AI 面试的完整生命周期
//!
//! 状态流转：
//! Idle → open_interview → AwaitingResume（无简历）或 Active（有简历）
//! AwaitingResume → submit_resume → Active
//! 任意状态 → close_interview → Idle
//!
//! 流程层不持有传输资源，只依赖 `InterviewApi` 能力

use tracing::{debug, info};

use crate::error::{AppResult, ValidationError};
use crate::models::chat::ChatMessage;
use crate::models::meeting::Meeting;

/// AI 面试官的开场白
pub const AI_GREETING: &str = "你好，我是AI面试官。请开始你的面试。";

/// 面试流程所需的后端能力
///
/// 请求层实现它，测试用桩实现替代
#[allow(async_fn_in_trait)]
pub trait InterviewApi {
    /// 按 id 查询面试记录
    async fn get_meeting(&self, meeting_id: u64) -> AppResult<Meeting>;
    /// 上传简历
    async fn upload_resume(&self, meeting_id: u64, resume: &str) -> AppResult<()>;
    /// 提交回答并取得 AI 回复
    async fn send_answer(&self, meeting_id: u64, answer: &str) -> AppResult<String>;
}

impl<A: InterviewApi> InterviewApi for &A {
    async fn get_meeting(&self, meeting_id: u64) -> AppResult<Meeting> {
        (**self).get_meeting(meeting_id).await
    }

    async fn upload_resume(&self, meeting_id: u64, resume: &str) -> AppResult<()> {
        (**self).upload_resume(meeting_id, resume).await
    }

    async fn send_answer(&self, meeting_id: u64, answer: &str) -> AppResult<String> {
        (**self).send_answer(meeting_id, answer).await
    }
}

/// 面试会话状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterviewState {
    /// 无进行中的面试
    Idle,
    /// 等待上传简历
    AwaitingResume,
    /// 面试进行中
    Active,
}

impl InterviewState {
    pub fn name(self) -> &'static str {
        match self {
            InterviewState::Idle => "idle",
            InterviewState::AwaitingResume => "awaiting_resume",
            InterviewState::Active => "active",
        }
    }
}

/// 面试会话流程
///
/// 同一实例同时只有一场活动面试；消息列表在会话生命周期内只追加，
/// 操作全部 `&mut self` 顺序执行，转写即按时间排列
pub struct InterviewFlow<A: InterviewApi> {
    api: A,
    state: InterviewState,
    active_meeting_id: Option<u64>,
    messages: Vec<ChatMessage>,
}

impl<A: InterviewApi> InterviewFlow<A> {
    /// 创建新的面试流程
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: InterviewState::Idle,
            active_meeting_id: None,
            messages: Vec::new(),
        }
    }

    pub fn state(&self) -> InterviewState {
        self.state
    }

    pub fn active_meeting_id(&self) -> Option<u64> {
        self.active_meeting_id
    }

    /// 会话转写（按时间顺序）
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// 打开一场面试
    ///
    /// 查询面试记录后按是否已有简历分流：
    /// 无简历 → AwaitingResume，转写保持为空（简历提示由调用方展示）；
    /// 有简历 → Active 并追加开场白。
    /// 查询失败保持 Idle，错误原样上抛，不重试
    pub async fn open_interview(&mut self, meeting_id: u64) -> AppResult<InterviewState> {
        if self.state != InterviewState::Idle {
            return Err(crate::error::AppError::invalid_state(
                "open_interview",
                self.state.name(),
            ));
        }

        let meeting = self.api.get_meeting(meeting_id).await?;

        self.active_meeting_id = Some(meeting_id);
        if meeting.has_resume() {
            self.state = InterviewState::Active;
            self.messages.push(ChatMessage::ai(AI_GREETING));
            info!("🎤 面试 #{} 开始", meeting_id);
        } else {
            self.state = InterviewState::AwaitingResume;
            debug!("面试 #{} 未上传简历，等待简历", meeting_id);
        }

        Ok(self.state)
    }

    /// 上传简历并开始面试
    ///
    /// 仅在 AwaitingResume 状态下合法；空白内容本地拒绝，不发网络请求
    pub async fn submit_resume(&mut self, text: &str) -> AppResult<()> {
        if self.state != InterviewState::AwaitingResume {
            return Err(crate::error::AppError::invalid_state(
                "submit_resume",
                self.state.name(),
            ));
        }

        let resume = text.trim();
        if resume.is_empty() {
            return Err(ValidationError::EmptyResume.into());
        }

        let meeting_id = self.require_meeting_id("submit_resume")?;
        self.api.upload_resume(meeting_id, resume).await?;

        self.state = InterviewState::Active;
        self.messages.push(ChatMessage::ai(AI_GREETING));
        info!("🎤 面试 #{} 开始", meeting_id);

        Ok(())
    }

    /// 提交一轮回答
    ///
    /// 仅在 Active 状态下合法；用户消息在请求发出前先入转写，
    /// 请求失败不回滚，错误原样上抛
    pub async fn submit_answer(&mut self, text: &str) -> AppResult<String> {
        if self.state != InterviewState::Active {
            return Err(crate::error::AppError::invalid_state(
                "submit_answer",
                self.state.name(),
            ));
        }

        let answer = text.trim().to_string();
        if answer.is_empty() {
            return Err(ValidationError::EmptyAnswer.into());
        }

        let meeting_id = self.require_meeting_id("submit_answer")?;

        self.messages.push(ChatMessage::user(answer.as_str()));
        let reply = self.api.send_answer(meeting_id, &answer).await?;
        self.messages.push(ChatMessage::ai(reply.clone()));

        Ok(reply)
    }

    /// 关闭面试
    ///
    /// 任意状态下都合法，可重复调用
    pub fn close_interview(&mut self) {
        if let Some(meeting_id) = self.active_meeting_id {
            debug!("面试 #{} 已关闭", meeting_id);
        }
        self.messages.clear();
        self.active_meeting_id = None;
        self.state = InterviewState::Idle;
    }

    /// 拆出底层能力对象
    pub fn into_api(self) -> A {
        self.api
    }

    fn require_meeting_id(&self, operation: &'static str) -> AppResult<u64> {
        self.active_meeting_id
            .ok_or_else(|| crate::error::AppError::invalid_state(operation, self.state.name()))
    }
}
