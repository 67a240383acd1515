use serde::{Deserialize, Serialize};

/// One validated career profile. Built fresh by every load, never mutated
/// afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerRecord {
    /// Base name of the source file, extension stripped.
    pub id: String,
    pub title: String,
    /// Always `YYYY-MM-DD`.
    pub last_update: String,
    pub sections: Vec<Section>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub key: String,
    pub value: ItemValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub must_have: Option<bool>,
}

impl Item {
    pub fn is_required(&self) -> bool {
        self.must_have == Some(true)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemValue {
    Boolean(bool),
    Number(serde_json::Number),
    Text(String),
    List(Vec<String>),
}

/// Contact handles. Each field is a handle or local part, not a URL.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

impl Contact {
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.twitter.is_none()
            && self.linkedin.is_none()
            && self.github.is_none()
    }
}
