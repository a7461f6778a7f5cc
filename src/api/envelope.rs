use serde::Serialize;

/// JSON body shared by every `/api/products` response.
///
/// `data` and `message` are left out of the JSON when absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Envelope<()> {
    /// A successful reply carrying only a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn omits_absent_fields() {
        let body = serde_json::to_value(Envelope::success(vec![1, 2])).unwrap();
        assert_eq!(body, json!({ "success": true, "data": [1, 2] }));

        let body = serde_json::to_value(Envelope::failure("Product not found")).unwrap();
        assert_eq!(body, json!({ "success": false, "message": "Product not found" }));
    }

    #[test]
    fn data_and_message_together() {
        let body = serde_json::to_value(Envelope::success("x").with_message("done")).unwrap();
        assert_eq!(body, json!({ "success": true, "data": "x", "message": "done" }));
    }
}
