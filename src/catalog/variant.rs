use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier handed to the asset loader.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceRef(String);

impl ResourceRef {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceRef {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// One selectable option in a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variant {
    pub name: String,
    pub resource: ResourceRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<ResourceRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl Variant {
    #[must_use]
    pub fn new(name: impl Into<String>, resource: impl Into<ResourceRef>) -> Self {
        Self {
            name: name.into(),
            resource: resource.into(),
            thumbnail: None,
            link: None,
        }
    }

    #[must_use]
    pub fn with_thumbnail(mut self, thumbnail: impl Into<ResourceRef>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }

    /// Attach an external product link. Blank links are dropped so that a
    /// missing link is always `None`.
    #[must_use]
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = non_blank(link.into());
        self
    }
}

/// Anything with a display name the search filter can match against.
pub trait Named {
    fn name(&self) -> &str;
}

impl Named for Variant {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Raw catalog entry as written in a catalog file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct VariantRecord {
    pub name: String,
    pub resource: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

impl From<VariantRecord> for Variant {
    fn from(record: VariantRecord) -> Self {
        Self {
            name: record.name.trim().to_string(),
            resource: ResourceRef::new(record.resource.trim()),
            thumbnail: record
                .thumbnail
                .and_then(non_blank)
                .map(ResourceRef::new),
            link: record.link.and_then(non_blank),
        }
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
