use serde::{Deserialize, Serialize};

// Query parameters for slot listing
#[derive(Debug, Deserialize)]
pub struct SlotsQuery {
    #[serde(default)]
    pub date: Option<String>,
}

/// Static shop details the widget shows next to the form.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetInfo {
    pub liff_id: String,
    pub shop_phone: String,
    pub tel_link: String,
    pub shop_address: String,
    pub map_url: String,
}
