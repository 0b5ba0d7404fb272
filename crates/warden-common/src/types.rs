//! Wire types shared between the admin backend and its clients.

use serde::{Deserialize, Serialize};

use crate::AdminError;

/// Captcha challenge returned to the client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckCodeResponse {
    /// Base64-encoded challenge image (data URI)
    pub check_code: String,

    /// Cache key the client echoes back on login
    pub check_code_key: String,
}

/// Login form submitted by the client
///
/// Missing fields deserialize as empty strings so validation can report
/// them as the fixed error conditions instead of a decode failure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginRequest {
    pub account: String,
    /// Already encoded by the client; compared verbatim
    pub password: String,
    pub check_code: String,
    pub check_code_key: String,
}

/// Response envelope: `code` is 1 on success and 0 on failure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: u8,
    pub msg: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub const SUCCESS: u8 = 1;
    pub const FAILURE: u8 = 0;

    pub fn success(data: T) -> Self {
        Self {
            code: Self::SUCCESS,
            msg: None,
            data: Some(data),
        }
    }

    pub fn empty() -> Self {
        Self {
            code: Self::SUCCESS,
            msg: None,
            data: None,
        }
    }

    pub fn failure(msg: impl Into<String>) -> Self {
        Self {
            code: Self::FAILURE,
            msg: Some(msg.into()),
            data: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == Self::SUCCESS
    }
}

impl From<&AdminError> for ApiResponse<()> {
    fn from(err: &AdminError) -> Self {
        Self::failure(err.client_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_uses_camel_case_and_defaults() {
        let req: LoginRequest =
            serde_json::from_str(r#"{"account":"admin","checkCode":"7","checkCodeKey":"k"}"#)
                .unwrap();
        assert_eq!(req.account, "admin");
        assert_eq!(req.password, "");
        assert_eq!(req.check_code, "7");
        assert_eq!(req.check_code_key, "k");
    }

    #[test]
    fn test_check_code_response_field_names() {
        let resp = CheckCodeResponse {
            check_code: "data:image/svg+xml;base64,AAAA".to_string(),
            check_code_key: "key".to_string(),
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["checkCode"], "data:image/svg+xml;base64,AAAA");
        assert_eq!(json["checkCodeKey"], "key");
    }

    #[test]
    fn test_failure_envelope_from_error() {
        let resp: ApiResponse<()> = (&AdminError::Captcha).into();
        assert!(!resp.is_success());
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["code"], 0);
        assert_eq!(json["msg"], "Captcha error");
        assert!(json["data"].is_null());
    }
}
