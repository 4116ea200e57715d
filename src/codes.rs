//! 后端业务状态码
//!
//! 与服务端约定的 code 常量，以及 msg 为空时的兜底文案

use phf::phf_map;

/// 成功
pub const CODE_SUCCESS: i64 = 1000;

// 认证模块
pub const CODE_INVALID_PARAMS: i64 = 2001;
pub const CODE_USER_EXIST: i64 = 2002;
pub const CODE_USER_NOT_EXIST: i64 = 2003;
pub const CODE_INVALID_PASSWORD: i64 = 2004;
pub const CODE_NOT_LOGIN: i64 = 2005;
pub const CODE_INVALID_TOKEN: i64 = 2011;

// 面试模块
pub const CODE_CREATE_MEETING_FAIL: i64 = 2501;
pub const CODE_UPDATE_MEETING_FAIL: i64 = 2502;
pub const CODE_MEETING_NOT_EXIST: i64 = 2503;
pub const CODE_RESUME_NOT_EXIST: i64 = 2504;
pub const CODE_INTERVIEW_ENDED: i64 = 2505;
pub const CODE_INTERVIEW_ROUND_LIMIT: i64 = 2506;

// 其他
pub const CODE_SERVER_BUSY: i64 = 4001;
pub const CODE_RECORD_NOT_FOUND: i64 = 5001;
pub const CODE_RATE_LIMIT_EXCEEDED: i64 = 6001;

/// 已知状态码的兜底文案
static CODE_MESSAGES: phf::Map<i64, &'static str> = phf_map! {
    1000i64 => "success",
    2001i64 => "请求参数错误",
    2002i64 => "用户名已存在",
    2003i64 => "用户不存在",
    2004i64 => "用户名或密码错误",
    2005i64 => "用户未登录",
    2011i64 => "无效的Token",
    2501i64 => "创建面试失败",
    2502i64 => "更新面试失败",
    2503i64 => "面试记录不存在",
    2504i64 => "简历不存在",
    2505i64 => "面试已结束",
    2506i64 => "面试已达到最大轮数限制",
    4001i64 => "服务繁忙",
    5001i64 => "未查询到该记录",
    6001i64 => "操作频率过快 ,请稍后再试",
};

/// 查询已知状态码的文案
pub fn message_for(code: i64) -> Option<&'static str> {
    CODE_MESSAGES.get(&code).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_for_known_codes() {
        assert_eq!(message_for(CODE_SUCCESS), Some("success"));
        assert_eq!(message_for(CODE_MEETING_NOT_EXIST), Some("面试记录不存在"));
        assert_eq!(message_for(CODE_INTERVIEW_ENDED), Some("面试已结束"));
    }

    #[test]
    fn test_message_for_unknown_code() {
        assert_eq!(message_for(999999), None);
    }
}
