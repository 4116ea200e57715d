//! 面试会话流程的状态机测试
//!
//! 用桩实现替代请求层，验证状态流转、转写顺序与本地校验

use std::sync::Mutex;

use ai_interview_client::{
    AppError, AppResult, InterviewApi, InterviewError, InterviewFlow, InterviewState, Meeting,
    Speaker, ValidationError, AI_GREETING,
};

/// 可编程的后端桩
struct StubApi {
    /// None 表示查询失败
    meeting: Option<Meeting>,
    reply: String,
    fail_answer: bool,
    uploads: Mutex<Vec<(u64, String)>>,
    answers: Mutex<Vec<(u64, String)>>,
}

impl StubApi {
    fn with_meeting(meeting: Meeting) -> Self {
        Self {
            meeting: Some(meeting),
            reply: "ok".to_string(),
            fail_answer: false,
            uploads: Mutex::new(Vec::new()),
            answers: Mutex::new(Vec::new()),
        }
    }

    fn failing_get() -> Self {
        Self {
            meeting: None,
            reply: String::new(),
            fail_answer: false,
            uploads: Mutex::new(Vec::new()),
            answers: Mutex::new(Vec::new()),
        }
    }
}

impl InterviewApi for StubApi {
    async fn get_meeting(&self, _meeting_id: u64) -> AppResult<Meeting> {
        match &self.meeting {
            Some(meeting) => Ok(meeting.clone()),
            None => Err(AppError::application(2503, "面试记录不存在")),
        }
    }

    async fn upload_resume(&self, meeting_id: u64, resume: &str) -> AppResult<()> {
        self.uploads
            .lock()
            .unwrap()
            .push((meeting_id, resume.to_string()));
        Ok(())
    }

    async fn send_answer(&self, meeting_id: u64, answer: &str) -> AppResult<String> {
        self.answers
            .lock()
            .unwrap()
            .push((meeting_id, answer.to_string()));
        if self.fail_answer {
            return Err(AppError::application(4001, "服务繁忙"));
        }
        Ok(self.reply.clone())
    }
}

fn meeting(resume: Option<&str>) -> Meeting {
    Meeting {
        id: 1,
        candidate: "张三".into(),
        position: "Rust工程师".into(),
        status: "进行中".into(),
        resume: resume.map(str::to_string),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_open_interview_without_resume_awaits_upload() {
    let mut flow = InterviewFlow::new(StubApi::with_meeting(meeting(None)));

    let state = flow.open_interview(1).await.unwrap();

    assert_eq!(state, InterviewState::AwaitingResume);
    assert_eq!(flow.active_meeting_id(), Some(1));
    // 简历提示不进转写
    assert!(flow.messages().is_empty());
}

#[tokio::test]
async fn test_open_interview_with_empty_resume_awaits_upload() {
    // 后端空字符串同样表示未上传
    let mut flow = InterviewFlow::new(StubApi::with_meeting(meeting(Some(""))));

    let state = flow.open_interview(1).await.unwrap();

    assert_eq!(state, InterviewState::AwaitingResume);
    assert!(flow.messages().is_empty());
}

#[tokio::test]
async fn test_open_interview_with_resume_starts_active() {
    let mut flow = InterviewFlow::new(StubApi::with_meeting(meeting(Some("三年开发经验"))));

    let state = flow.open_interview(1).await.unwrap();

    assert_eq!(state, InterviewState::Active);
    assert_eq!(flow.messages().len(), 1);
    assert_eq!(flow.messages()[0].speaker, Speaker::Ai);
    assert_eq!(flow.messages()[0].text, AI_GREETING);
}

#[tokio::test]
async fn test_open_interview_fetch_failure_stays_idle() {
    let mut flow = InterviewFlow::new(StubApi::failing_get());

    let err = flow.open_interview(1).await.unwrap_err();

    assert_eq!(err.application_code(), Some(2503));
    assert_eq!(flow.state(), InterviewState::Idle);
    assert_eq!(flow.active_meeting_id(), None);
    assert!(flow.messages().is_empty());
}

#[tokio::test]
async fn test_open_interview_twice_is_invalid() {
    let mut flow = InterviewFlow::new(StubApi::with_meeting(meeting(Some("简历"))));
    flow.open_interview(1).await.unwrap();

    let err = flow.open_interview(2).await.unwrap_err();

    assert!(matches!(
        err,
        AppError::Interview(InterviewError::InvalidState { .. })
    ));
    // 第一场面试不受影响
    assert_eq!(flow.active_meeting_id(), Some(1));
}

#[tokio::test]
async fn test_submit_resume_rejects_blank_input_locally() {
    let api = StubApi::with_meeting(meeting(None));
    let mut flow = InterviewFlow::new(api);
    flow.open_interview(1).await.unwrap();

    for blank in ["", "   ", "\n\t"] {
        let err = flow.submit_resume(blank).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::EmptyResume)
        ));
    }

    // 状态未变，且没有任何网络调用
    assert_eq!(flow.state(), InterviewState::AwaitingResume);
}

#[tokio::test]
async fn test_submit_resume_transitions_to_active_with_greeting() {
    let mut flow = InterviewFlow::new(StubApi::with_meeting(meeting(None)));
    flow.open_interview(1).await.unwrap();

    flow.submit_resume("三年 Rust 后端经验").await.unwrap();

    assert_eq!(flow.state(), InterviewState::Active);
    assert_eq!(flow.messages().len(), 1);
    assert_eq!(flow.messages()[0].text, AI_GREETING);
}

#[tokio::test]
async fn test_submit_resume_outside_awaiting_state_is_invalid() {
    let mut flow = InterviewFlow::new(StubApi::with_meeting(meeting(Some("简历"))));

    // Idle 下不合法
    let err = flow.submit_resume("内容").await.unwrap_err();
    assert!(matches!(
        err,
        AppError::Interview(InterviewError::InvalidState { .. })
    ));

    // Active 下同样不合法
    flow.open_interview(1).await.unwrap();
    let err = flow.submit_resume("内容").await.unwrap_err();
    assert!(matches!(
        err,
        AppError::Interview(InterviewError::InvalidState { .. })
    ));
}

#[tokio::test]
async fn test_submit_answer_appends_user_then_ai_in_order() {
    let mut flow = InterviewFlow::new(StubApi::with_meeting(meeting(Some("简历"))));
    flow.open_interview(1).await.unwrap();

    let reply = flow.submit_answer("hi").await.unwrap();

    assert_eq!(reply, "ok");
    let messages = flow.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0].speaker, Speaker::Ai); // 开场白
    assert_eq!(messages[1].speaker, Speaker::User);
    assert_eq!(messages[1].text, "hi");
    assert_eq!(messages[2].speaker, Speaker::Ai);
    assert_eq!(messages[2].text, "ok");
}

#[tokio::test]
async fn test_submit_answer_failure_keeps_user_message() {
    let mut api = StubApi::with_meeting(meeting(Some("简历")));
    api.fail_answer = true;
    let mut flow = InterviewFlow::new(api);
    flow.open_interview(1).await.unwrap();

    let err = flow.submit_answer("我的回答").await.unwrap_err();

    assert_eq!(err.application_code(), Some(4001));
    // 乐观追加的用户消息不回滚
    let messages = flow.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].speaker, Speaker::User);
    assert_eq!(messages[1].text, "我的回答");
}

#[tokio::test]
async fn test_submit_answer_rejects_blank_input_locally() {
    let mut flow = InterviewFlow::new(StubApi::with_meeting(meeting(Some("简历"))));
    flow.open_interview(1).await.unwrap();

    let err = flow.submit_answer("   ").await.unwrap_err();

    assert!(matches!(
        err,
        AppError::Validation(ValidationError::EmptyAnswer)
    ));
    // 空回答不进转写
    assert_eq!(flow.messages().len(), 1);
}

#[tokio::test]
async fn test_submit_answer_outside_active_state_is_invalid() {
    let mut flow = InterviewFlow::new(StubApi::with_meeting(meeting(None)));

    let err = flow.submit_answer("hi").await.unwrap_err();
    assert!(matches!(
        err,
        AppError::Interview(InterviewError::InvalidState { .. })
    ));

    flow.open_interview(1).await.unwrap();
    let err = flow.submit_answer("hi").await.unwrap_err();
    assert!(matches!(
        err,
        AppError::Interview(InterviewError::InvalidState { .. })
    ));
}

#[tokio::test]
async fn test_close_interview_resets_and_is_idempotent() {
    let mut flow = InterviewFlow::new(StubApi::with_meeting(meeting(Some("简历"))));
    flow.open_interview(1).await.unwrap();
    flow.submit_answer("hi").await.unwrap();

    flow.close_interview();
    assert_eq!(flow.state(), InterviewState::Idle);
    assert_eq!(flow.active_meeting_id(), None);
    assert!(flow.messages().is_empty());

    // 连续调用两次也安全
    flow.close_interview();
    assert_eq!(flow.state(), InterviewState::Idle);

    // 关闭后可以再开一场
    let state = flow.open_interview(1).await.unwrap();
    assert_eq!(state, InterviewState::Active);
    assert_eq!(flow.messages().len(), 1);
}

#[tokio::test]
async fn test_resume_upload_carries_active_meeting_id() {
    let mut flow = InterviewFlow::new(StubApi::with_meeting(meeting(None)));
    flow.open_interview(42).await.unwrap();
    flow.submit_resume("简历正文").await.unwrap();

    // 桩会记录上传参数，从流程里取回验证
    let api = flow.into_api();
    let uploads = api.uploads.lock().unwrap();
    assert_eq!(uploads.as_slice(), &[(42, "简历正文".to_string())]);
}
