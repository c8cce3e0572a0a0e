use serde::Serialize;

/// Builds the Tag Manager UI link for a container's workspaces.
pub fn tag_manager_url(account_id: &str, container_id: &str) -> String {
    format!(
        "https://tagmanager.google.com/#/container/accounts/{account_id}/containers/{container_id}/workspaces?apiLink=container"
    )
}

/// The container an export was taken from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    pub account_id: String,
    pub container_id: String,
    pub name: String,
    pub public_id: String,
    /// Ordered usage contexts, e.g. `["WEB"]` or `["ANDROID", "IOS"]`.
    pub usage_context: Vec<String>,
    pub fingerprint: String,
    tag_manager_url: String,
}

impl Container {
    pub fn new(
        account_id: String,
        container_id: String,
        name: String,
        public_id: String,
        usage_context: Vec<String>,
        fingerprint: String,
    ) -> Self {
        let tag_manager_url = tag_manager_url(&account_id, &container_id);
        Self {
            account_id,
            container_id,
            name,
            public_id,
            usage_context,
            fingerprint,
            tag_manager_url,
        }
    }

    /// Link to the container's workspaces in the Tag Manager UI.
    ///
    /// Always derived from `account_id` and `container_id`; any URL carried
    /// in the export is ignored.
    pub fn tag_manager_url(&self) -> &str {
        &self.tag_manager_url
    }

    pub fn has_usage_context(&self, context: &str) -> bool {
        self.usage_context
            .iter()
            .any(|c| c.eq_ignore_ascii_case(context))
    }
}

/// The exported container revision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerVersion {
    pub account_id: String,
    pub container_id: String,
    pub container_version_id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub path: Option<String>,
    pub fingerprint: String,
    /// Version link as written in the export, if present.
    pub tag_manager_url: Option<String>,
}
