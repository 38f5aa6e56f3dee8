use std::sync::Arc;

use poem_openapi::{
    OpenApi,
    payload::{Json, PlainText},
};

use crate::presentation::http::{
    endpoints::root::{ApiState, EndpointsTags},
    responses::SessionStatusDto,
};

#[derive(Clone)]
pub struct HealthEndpoints {
    state: Arc<ApiState>,
}

impl HealthEndpoints {
    pub fn new(state: Arc<ApiState>) -> Self {
        Self { state }
    }
}

#[OpenApi]
impl HealthEndpoints {
    #[oai(path = "/health", method = "get", tag = EndpointsTags::Health)]
    pub async fn health(&self) -> PlainText<&'static str> {
        PlainText("OK")
    }

    /// Connection state of the WhatsApp Web session.
    #[oai(path = "/session", method = "get", tag = EndpointsTags::Health)]
    pub async fn session(&self) -> Json<SessionStatusDto> {
        match self.state.session.is_connected().await {
            Ok(connected) => Json(SessionStatusDto {
                connected,
                error: None,
            }),
            Err(err) => Json(SessionStatusDto {
                connected: false,
                error: Some(err.to_string()),
            }),
        }
    }
}
