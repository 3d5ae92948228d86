use serde::{Deserialize, Serialize};

/// Structured outcome of one invocation, handed back to whatever triggered it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunResponse {
    pub status_code: u16,
    pub body: String,
}

impl RunResponse {
    #[must_use]
    pub fn ok(body: impl Into<String>) -> Self {
        Self { status_code: 200, body: body.into() }
    }

    #[must_use]
    pub fn failure(body: impl Into<String>) -> Self {
        Self { status_code: 500, body: body.into() }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status_code == 200
    }
}
