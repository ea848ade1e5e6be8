//! View Resource Registry
//!
//! Maps `ui://` resource URIs to fetchable view payloads. The declared MIME
//! profile is what lets hosts tell an interactive view apart from plain
//! data. Fetchers run once per resolution; nothing here caches, so content
//! is free to differ between reads.

use super::error::AppsError;
use super::models::UI_SCHEME;
use dashmap::DashMap;
use futures_util::future::BoxFuture;
use std::sync::Arc;
use url::Url;

/// Async producer of a resource's markup, invoked per resolution
pub type ResourceFetcher =
    Arc<dyn Fn() -> BoxFuture<'static, Result<String, AppsError>> + Send + Sync>;

/// Identity and MIME contract of a registered resource
#[derive(Debug, Clone)]
pub struct ResourceDescriptor {
    /// Opaque `ui://` identifier
    pub uri: String,
    /// Display name for resource listings
    pub name: String,
    /// MIME profile; interactive views carry the `mcp-app` profile
    pub mime_type: String,
}

/// Resolved resource content, ready to serialize into a `resources/read` reply
#[derive(Debug, Clone)]
pub struct ResourceContents {
    pub uri: String,
    pub mime_type: String,
    pub text: String,
}

struct RegisteredResource {
    descriptor: ResourceDescriptor,
    fetcher: ResourceFetcher,
}

/// Registry of view resources, one per server instance
#[derive(Default)]
pub struct ResourceRegistry {
    resources: DashMap<String, RegisteredResource>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self {
            resources: DashMap::new(),
        }
    }

    /// Registers a resource under its URI. Re-registering a URI replaces the
    /// earlier entry.
    pub fn register(&self, descriptor: ResourceDescriptor, fetcher: ResourceFetcher) {
        match Url::parse(&descriptor.uri) {
            Ok(parsed) if parsed.scheme() == UI_SCHEME => {}
            _ => tracing::warn!(uri = %descriptor.uri, "resource URI does not use the ui:// scheme"),
        }
        self.resources.insert(
            descriptor.uri.clone(),
            RegisteredResource {
                descriptor,
                fetcher,
            },
        );
    }

    /// Returns all registered descriptors, ordered by URI for stable listings.
    pub fn descriptors(&self) -> Vec<ResourceDescriptor> {
        let mut descriptors: Vec<ResourceDescriptor> = self
            .resources
            .iter()
            .map(|entry| entry.descriptor.clone())
            .collect();
        descriptors.sort_by(|a, b| a.uri.cmp(&b.uri));
        descriptors
    }

    /// Resolves a URI by invoking its fetcher.
    ///
    /// Fails with `AppsError::UnknownResource` if the URI was never
    /// registered.
    pub async fn resolve(&self, uri: &str) -> Result<ResourceContents, AppsError> {
        let (descriptor, fetcher) = {
            let resource = self
                .resources
                .get(uri)
                .ok_or_else(|| AppsError::UnknownResource(uri.to_string()))?;
            (resource.descriptor.clone(), resource.fetcher.clone())
        };

        let text = fetcher().await?;
        Ok(ResourceContents {
            uri: descriptor.uri,
            mime_type: descriptor.mime_type,
            text,
        })
    }
}
