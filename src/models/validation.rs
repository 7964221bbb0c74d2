use serde::{Deserialize, Serialize};

/// One failed field rule, in the shape the API returns under `errors`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub msg: String,
    pub param: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}

impl FieldError {
    pub fn body(param: &str, msg: impl Into<String>, value: Option<serde_json::Value>) -> Self {
        Self {
            msg: msg.into(),
            param: param.to_string(),
            location: "body".to_string(),
            value,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ValidationErrorBody {
    pub errors: Vec<FieldError>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
