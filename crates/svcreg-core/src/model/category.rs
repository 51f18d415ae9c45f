use serde::{Deserialize, Serialize};

/// Category metadata resolved from the category store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>, icon: Option<&str>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: icon.map(str::to_string),
        }
    }
}
