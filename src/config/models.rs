// src/config/models.rs
use serde::{Deserialize, Deserializer, Serialize};
use std::iter;

/// The service catalog: every app whose endpoints are checked on a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub apps: Vec<AppDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppDescriptor {
    pub name: String,
    pub website: EndpointRef,
    #[serde(default)]
    pub services: Vec<EndpointRef>,
    #[serde(default)]
    pub indexers: Vec<EndpointRef>,
    #[serde(default)]
    pub relays: Vec<EndpointRef>,
}

impl AppDescriptor {
    /// Website first, then services, indexers and relays in declared order.
    pub fn endpoints(&self) -> impl Iterator<Item = &EndpointRef> {
        iter::once(&self.website)
            .chain(self.services.iter())
            .chain(self.indexers.iter())
            .chain(self.relays.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointRef {
    pub name: String,
    // An empty url marks an endpoint that is declared but not checked.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl EndpointRef {
    pub fn new(name: impl Into<String>, url: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            kind: kind.into(),
        }
    }

    pub fn is_checkable(&self) -> bool {
        !self.url.is_empty()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
