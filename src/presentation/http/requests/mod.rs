use poem_openapi::Object;

/// Message event as posted by the WhatsApp Web sidecar.
#[derive(Object, Debug, Clone)]
#[oai(rename_all = "camelCase")]
pub struct InboundMessageDto {
    pub from: String,
    pub id: String,
    #[oai(rename = "type", validator(min_length = 1))]
    pub message_type: String,
    pub body: Option<String>,
    pub mimetype: Option<String>,
    pub filename: Option<String>,
    pub caption: Option<String>,
    #[oai(default)]
    pub timestamp: i64,
    #[oai(default)]
    pub from_me: bool,
    #[oai(default)]
    pub is_group_msg: bool,
}
