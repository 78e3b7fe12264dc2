//! The token pass.
//!
//! Walks the same endpoints as the layout pass, restricted to NVM
//! attributes, and keeps one token per `(cluster, attribute)` key. A key is
//! per-endpoint until some occurrence declares it singleton; from then on it
//! is singleton everywhere and later occurrences are ignored.

use std::collections::HashSet;

use tracing::{debug, warn};
use zapc_core::utils::to_snake_case;
use zapc_core::{
    AttributeInstance, ClusterInstance, EndpointId, EndpointType, StorageOption, TypeCatalog,
};
use zapc_tables::FormatCategory;

use super::set::{STORAGE_ID_BASE, Token, TokenDefault, TokenFailure, TokenId, TokenKey, TokenSet};
use crate::config::Config;
use crate::layout::defaults::{DefaultEncoder, ValueShape};
use crate::resolve::{FormatCharacterizer, ResolveError, TypeSizeResolver};
use crate::{Error, Result};

/// Assigns persistent-storage tokens.
pub struct TokenDeduplicator<'a, C: TypeCatalog + ?Sized> {
    catalog: &'a C,
    config: &'a Config,
}

impl<'a, C: TypeCatalog + ?Sized> TokenDeduplicator<'a, C> {
    pub fn new(catalog: &'a C, config: &'a Config) -> Self {
        Self { catalog, config }
    }

    /// Build the token set.
    ///
    /// Does not fail as a whole. An attribute that cannot be sized or whose
    /// default cannot be encoded is reported in [`TokenSet::failures`] and
    /// its key is skipped on every later endpoint.
    pub fn deduplicate(&self, endpoints: &[EndpointType]) -> TokenSet {
        let resolver = TypeSizeResolver::new(self.catalog);
        let characterizer = FormatCharacterizer::new(&resolver, &self.config.format_overrides);
        let builder = TokenBuilder {
            characterizer: &characterizer,
            encoder: DefaultEncoder::new(self.config),
        };

        let mut set = TokenSet::default();
        let mut failed: HashSet<TokenKey> = HashSet::new();

        for endpoint in endpoints {
            let endpoint_id = endpoint.endpoint_id;
            set.open_endpoint(endpoint_id);

            let mut clusters: Vec<&ClusterInstance> = endpoint.clusters.iter().collect();
            clusters.sort_by_key(|c| (c.code, c.side));

            for cluster in clusters {
                let mut attributes: Vec<&AttributeInstance> = cluster
                    .attributes
                    .iter()
                    .filter(|a| a.storage == StorageOption::Nvm)
                    .collect();
                attributes.sort_by_key(|a| a.code);

                for attr in attributes {
                    let key = TokenKey::new(cluster.code, attr.code);
                    if failed.contains(&key) {
                        continue;
                    }

                    let Some(id) = set.id_of(key) else {
                        match builder.build(set.next_id(), key, endpoint_id, cluster, attr) {
                            Ok(token) => set.insert(endpoint_id, cluster, token),
                            Err(error) => {
                                warn!(
                                    endpoint = endpoint_id,
                                    %key,
                                    attribute = %attr.name,
                                    %error,
                                    "attribute gets no storage token"
                                );
                                failed.insert(key);
                                set.fail(TokenFailure {
                                    endpoint: endpoint_id,
                                    key,
                                    name: attr.name.clone(),
                                    error,
                                });
                            }
                        }
                        continue;
                    };

                    if set.get(id).is_some_and(|t| t.is_singleton) {
                        continue;
                    }
                    if attr.is_singleton {
                        debug!(endpoint = endpoint_id, %key, "token promoted to singleton");
                        set.promote(endpoint_id, cluster, id);
                    } else {
                        set.add_occurrence(endpoint_id, cluster, id);
                    }
                }
            }
        }

        debug!(
            tokens = set.len(),
            singletons = set.singleton_ids().len(),
            failures = set.failures().len(),
            max_size = set.max_size(),
            "tokens assigned"
        );
        set
    }
}

/// Sizes and encodes a token the first time its key is seen.
struct TokenBuilder<'x, 'a, 'c, C: TypeCatalog + ?Sized> {
    characterizer: &'x FormatCharacterizer<'a, 'c, C>,
    encoder: DefaultEncoder,
}

impl<C: TypeCatalog + ?Sized> TokenBuilder<'_, '_, '_, C> {
    fn build(
        &self,
        id: TokenId,
        key: TokenKey,
        endpoint_id: EndpointId,
        cluster: &ClusterInstance,
        attr: &AttributeInstance,
    ) -> Result<Token> {
        let wrap = |source: ResolveError| Error::Attribute {
            endpoint: endpoint_id,
            cluster: cluster.name.clone(),
            attribute: attr.name.clone(),
            type_name: attr.type_name.clone(),
            source,
        };

        let size = self
            .characterizer
            .storage_size(&attr.type_name, attr.max_length)
            .map_err(wrap)?
            .ok_or_else(|| wrap(ResolveError::unresolvable(&attr.type_name)))?;
        // Types without a category of their own (unknown names sized by max
        // length) fall back to their byte count.
        let category = match self.characterizer.categorize(&attr.type_name) {
            Ok(category) => category,
            Err(ResolveError::UnresolvableType(_)) => FormatCategory::for_size(size as u32),
            Err(e) => return Err(wrap(e)),
        };
        let format = self.characterizer.symbol(category, &category.to_string());
        let shape = ValueShape::of(self.characterizer.resolver(), &attr.type_name).map_err(wrap)?;
        let default = if size > self.encoder.inline_limit() {
            TokenDefault::Long(self.encoder.long(attr, shape, size)?)
        } else {
            TokenDefault::Inline(self.encoder.inline(attr, shape, size)?)
        };

        let storage_id = u16::try_from(id.index())
            .ok()
            .and_then(|offset| STORAGE_ID_BASE.checked_add(offset))
            .ok_or(Error::TooManyRecords {
                table: "token",
                count: id.index() + 1,
            })?;

        Ok(Token {
            id,
            key,
            storage_id,
            name: to_snake_case(&attr.name),
            type_name: attr.type_name.clone(),
            size,
            format,
            is_singleton: attr.is_singleton,
            side: attr.side,
            manufacturer_code: attr.manufacturer_code.filter(|&c| c != 0),
            default,
        })
    }
}
