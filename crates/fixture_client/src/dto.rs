use serde::{Deserialize, Serialize};

/// Identity payload of the user-info endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfoDto {
    pub username: String,
    #[serde(default)]
    pub groups: Vec<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub display_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct HelloRequest<'a> {
    pub whom: &'a str,
}

/// `whom` is serialized as `null` when the message goes to everybody.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct MessageRequest<'a> {
    pub whom: Option<&'a str>,
    pub what: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ReplyResponse {
    pub whom: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LogoutResponse {
    #[serde(default)]
    pub logout_url: Option<String>,
}
