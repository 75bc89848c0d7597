use serde::{Deserialize, Serialize};

/// Successful `action=parse` answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseResponse {
    pub parse: ParsedPage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedPage {
    pub title: String,
    pub text: PageText,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageText {
    /// Rendered article HTML.
    #[serde(rename = "*")]
    pub content: String,
}

/// The API reports failures such as a missing page with HTTP 200 and this body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub info: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ApiEnvelope {
    Parsed(ParseResponse),
    Failed(ApiErrorResponse),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_parse_envelope() {
        let body = r#"{"parse":{"title":"Heat (1995 film)","pageid":1,"text":{"*":"<p>hi</p>"}}}"#;
        let env: ApiEnvelope = serde_json::from_str(body).unwrap();
        match env {
            ApiEnvelope::Parsed(resp) => {
                assert_eq!(resp.parse.title, "Heat (1995 film)");
                assert_eq!(resp.parse.text.content, "<p>hi</p>");
            }
            other => panic!("expected parse envelope, got {other:?}"),
        }
    }

    #[test]
    fn decodes_error_envelope() {
        let body = r#"{"error":{"code":"missingtitle","info":"The page you specified doesn't exist.","*":"See docs"}}"#;
        let env: ApiEnvelope = serde_json::from_str(body).unwrap();
        assert!(matches!(env, ApiEnvelope::Failed(ref e) if e.error.code == "missingtitle"));
    }

    #[test]
    fn rejects_other_shapes() {
        assert!(serde_json::from_str::<ApiEnvelope>(r#"{"batchcomplete":""}"#).is_err());
        assert!(serde_json::from_str::<ApiEnvelope>(r#"{"parse":{"title":"x"}}"#).is_err());
    }
}
