//! 面试管理接口
//!
//! 对请求层的类型化封装，一个方法对应一个后端操作；
//! 创建/更新/删除/上传简历后端不回传数据

use reqwest::Method;
use serde::Deserialize;
use serde_json::json;

use crate::api::request::ApiClient;
use crate::error::AppResult;
use crate::models::meeting::{Meeting, MeetingUpdate};
use crate::workflow::interview_flow::InterviewApi;

/// AI 面试接口返回的数据
#[derive(Debug, Clone, Deserialize)]
struct AnswerData {
    #[serde(default)]
    reply: String,
}

impl ApiClient {
    /// 创建面试
    ///
    /// 时间取当前时刻，状态固定为"进行中"
    pub async fn create_meeting(
        &self,
        candidate: &str,
        position: &str,
        job_description: &str,
    ) -> AppResult<()> {
        let payload = json!({
            "candidate": candidate,
            "position": position,
            "job_description": job_description,
            "time": chrono::Utc::now().timestamp_millis(),
            "status": "进行中",
            "remark": "",
        });

        self.request::<()>("/meeting", Method::POST, Some(payload))
            .await?;
        self.notifier().success("面试创建成功");
        Ok(())
    }

    /// 更新面试
    pub async fn update_meeting(&self, update: &MeetingUpdate) -> AppResult<()> {
        let payload = serde_json::to_value(update)?;

        self.request::<()>("/meeting", Method::PUT, Some(payload))
            .await?;
        self.notifier().success("面试更新成功");
        Ok(())
    }

    /// 按 id 查询面试（含简历字段）
    pub async fn get_meeting(&self, meeting_id: u64) -> AppResult<Meeting> {
        self.request(&format!("/meeting?id={}", meeting_id), Method::GET, None)
            .await
    }

    /// 删除面试
    pub async fn delete_meeting(&self, meeting_id: u64) -> AppResult<()> {
        self.request::<()>(&format!("/meeting?id={}", meeting_id), Method::DELETE, None)
            .await?;
        self.notifier().success("面试删除成功");
        Ok(())
    }

    /// 查询当前用户的全部面试
    pub async fn list_meetings(&self) -> AppResult<Vec<Meeting>> {
        self.request("/meeting/list", Method::GET, None).await
    }

    /// 上传简历
    pub async fn upload_resume(&self, meeting_id: u64, resume: &str) -> AppResult<()> {
        self.request::<()>(
            "/meeting/upload_resume",
            Method::POST,
            Some(json!({ "meeting_id": meeting_id, "resume": resume })),
        )
        .await?;

        self.notifier().success("简历上传成功");
        Ok(())
    }

    /// 提交一轮回答，返回 AI 面试官的回复
    pub async fn send_answer(&self, meeting_id: u64, answer: &str) -> AppResult<String> {
        let data: AnswerData = self
            .request(
                "/meeting/ai_interview",
                Method::POST,
                Some(json!({ "meeting_id": meeting_id, "answer": answer })),
            )
            .await?;

        Ok(data.reply)
    }
}

// 面试流程层只依赖这三个能力
impl InterviewApi for ApiClient {
    async fn get_meeting(&self, meeting_id: u64) -> AppResult<Meeting> {
        ApiClient::get_meeting(self, meeting_id).await
    }

    async fn upload_resume(&self, meeting_id: u64, resume: &str) -> AppResult<()> {
        ApiClient::upload_resume(self, meeting_id, resume).await
    }

    async fn send_answer(&self, meeting_id: u64, answer: &str) -> AppResult<String> {
        ApiClient::send_answer(self, meeting_id, answer).await
    }
}
