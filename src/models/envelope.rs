//! 统一响应包
//!
//! 后端所有接口都返回 `{code, msg, data}` 三段式结构

use serde::{Deserialize, Serialize};

use crate::codes;

/// 统一响应包
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// 业务状态码，1000 表示成功
    pub code: i64,
    #[serde(default)]
    pub msg: String,
    /// 业务数据，失败或无数据时缺省
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl ResponseEnvelope {
    /// 业务是否成功（与 HTTP 状态码无关）
    pub fn is_success(&self) -> bool {
        self.code == codes::CODE_SUCCESS
    }

    /// 非空的 msg
    pub fn message(&self) -> Option<&str> {
        if self.msg.trim().is_empty() {
            None
        } else {
            Some(self.msg.as_str())
        }
    }
}
