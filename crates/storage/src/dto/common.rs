use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Response envelope every endpoint speaks. Error responses reuse the same
/// shape with `success: false` and only the message fields populated, so the
/// client can decode any body into `ApiResponse<T>`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Per-field validation messages, present on schema-validation failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    /// Diagnostic detail accompanying an internal error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            errors: None,
            error: None,
        }
    }

    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::success(data)
        }
    }
}

impl ApiResponse<()> {
    /// Success envelope carrying only a message, for operations with no
    /// payload to return.
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
            errors: None,
            error: None,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
    /// Sort key ("oldest", "teamName"); unset means newest first.
    #[serde(default)]
    pub sort: Option<String>,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    10
}

impl PaginationParams {
    pub fn validate(&self) -> Result<(), String> {
        if self.page < 1 {
            return Err("page must be >= 1".to_string());
        }
        if self.limit < 1 || self.limit > 100 {
            return Err("limit must be between 1 and 100".to_string());
        }
        Ok(())
    }

    /// Row offset for the requested page, widened so the largest page
    /// number stays within range.
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_starts_at_zero() {
        let params = PaginationParams {
            page: 1,
            limit: 10,
            sort: None,
        };
        assert_eq!(params.offset(), 0);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_offset_advances_by_limit() {
        let params = PaginationParams {
            page: 3,
            limit: 25,
            sort: None,
        };
        assert_eq!(params.offset(), 50);
    }

    #[test]
    fn test_offset_handles_maximum_page() {
        let params = PaginationParams {
            page: u32::MAX,
            limit: 100,
            sort: None,
        };
        assert_eq!(params.offset(), 429_496_729_400);
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let zero_page = PaginationParams {
            page: 0,
            limit: 10,
            sort: None,
        };
        assert!(zero_page.validate().is_err());

        let oversized = PaginationParams {
            page: 1,
            limit: 101,
            sort: None,
        };
        assert!(oversized.validate().is_err());
    }

    #[test]
    fn test_envelope_skips_empty_fields() {
        let body = serde_json::to_value(ApiResponse::success(5)).unwrap();
        assert_eq!(body, serde_json::json!({ "success": true, "data": 5 }));
    }

    #[test]
    fn test_envelope_decodes_error_body() {
        let body = r#"{"success":false,"message":"Competition not found"}"#;
        let parsed: ApiResponse<i32> = serde_json::from_str(body).unwrap();
        assert!(!parsed.success);
        assert_eq!(parsed.data, None);
        assert_eq!(parsed.message.as_deref(), Some("Competition not found"));
    }
}
