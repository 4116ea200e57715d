//! 面试记录数据结构
//!
//! 记录归后端所有，客户端只持有临时副本

use chrono::TimeZone;
use serde::{Deserialize, Serialize};

/// 面试记录
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Meeting {
    /// 后端 ORM 可能以大写 ID 序列化
    #[serde(alias = "ID")]
    pub id: u64,

    #[serde(default)]
    pub user_id: u64,

    /// 候选人
    pub candidate: String,

    /// 职位
    pub position: String,

    /// 职位描述
    #[serde(default)]
    pub job_description: String,

    /// 面试时间（毫秒时间戳）
    #[serde(default)]
    pub time: i64,

    /// 面试状态
    #[serde(default)]
    pub status: String,

    /// 备注
    #[serde(default)]
    pub remark: String,

    /// 简历内容，未上传时缺省
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume: Option<String>,

    /// 面试记录（后端随面试进行填写）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interview_record: Option<String>,

    /// 面试总结
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interview_summary: Option<String>,
}

impl Meeting {
    /// 是否已上传简历
    ///
    /// 后端对空字符串和缺省字段都视为"未上传"
    pub fn has_resume(&self) -> bool {
        self.resume
            .as_deref()
            .map(|r| !r.trim().is_empty())
            .unwrap_or(false)
    }

    /// 面试时间的本地化显示
    pub fn time_display(&self) -> String {
        chrono::Local
            .timestamp_millis_opt(self.time)
            .single()
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| self.time.to_string())
    }
}

impl std::fmt::Display for Meeting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[#{}] {} - {} ({}) {}",
            self.id,
            self.candidate,
            self.position,
            self.status,
            self.time_display()
        )
    }
}

/// 更新面试的请求体
#[derive(Debug, Clone, Serialize)]
pub struct MeetingUpdate {
    pub id: u64,
    pub candidate: String,
    pub position: String,
    pub job_description: String,
    pub status: String,
    pub remark: String,
}

impl MeetingUpdate {
    /// 以现有记录为底稿构造更新请求
    pub fn from_meeting(meeting: &Meeting) -> Self {
        Self {
            id: meeting.id,
            candidate: meeting.candidate.clone(),
            position: meeting.position.clone(),
            job_description: meeting.job_description.clone(),
            status: meeting.status.clone(),
            remark: meeting.remark.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_backend_record() {
        // 后端 gorm 模型的典型输出：大写 ID，无 resume 字段
        let json = r#"{
            "ID": 42,
            "user_id": 7,
            "candidate": "张三",
            "position": "Rust工程师",
            "job_description": "负责后端服务开发",
            "time": 1722950400000,
            "status": "进行中",
            "remark": ""
        }"#;

        let meeting: Meeting = serde_json::from_str(json).unwrap();
        assert_eq!(meeting.id, 42);
        assert_eq!(meeting.candidate, "张三");
        assert!(!meeting.has_resume());
    }

    #[test]
    fn test_has_resume_treats_empty_as_missing() {
        let mut meeting = Meeting {
            resume: None,
            ..Default::default()
        };
        assert!(!meeting.has_resume());

        // Go 侧空字符串同样表示未上传
        meeting.resume = Some(String::new());
        assert!(!meeting.has_resume());

        meeting.resume = Some("  ".into());
        assert!(!meeting.has_resume());

        meeting.resume = Some("三年 Rust 开发经验".into());
        assert!(meeting.has_resume());
    }
}
