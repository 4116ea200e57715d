//! 面试聊天消息

use serde::{Deserialize, Serialize};

/// 消息发送方
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    /// 应聘者（本机用户）
    User,
    /// AI 面试官
    Ai,
}

impl Speaker {
    /// 终端显示用的名称
    pub fn label(self) -> &'static str {
        match self {
            Speaker::User => "你",
            Speaker::Ai => "AI面试官",
        }
    }
}

/// 一条聊天消息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub speaker: Speaker,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
        }
    }

    pub fn ai(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Ai,
            text: text.into(),
        }
    }
}
