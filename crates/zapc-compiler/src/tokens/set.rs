//! Token arena and partitions.
//!
//! Every token is stored once and addressed by [`TokenId`]. Partitions are
//! ordered id sets; promoting a token to singleton moves its id between
//! sets and never copies the token.

use std::fmt::{self, Write as _};

use indexmap::{IndexMap, IndexSet};
use zapc_core::{AttributeCode, ClusterCode, ClusterInstance, EndpointId, ManufacturerCode, Side};

use crate::Error;

/// First storage identifier handed out.
pub const STORAGE_ID_BASE: u16 = 0xB000;

/// Identity of a persistent attribute across endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenKey {
    pub cluster: ClusterCode,
    pub attribute: AttributeCode,
}

impl TokenKey {
    pub fn new(cluster: ClusterCode, attribute: AttributeCode) -> Self {
        Self { cluster, attribute }
    }
}

impl fmt::Display for TokenKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04X}/0x{:04X}", self.cluster, self.attribute)
    }
}

/// Position of a token in its [`TokenSet`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenId(u32);

impl TokenId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

/// Initial value of a token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenDefault {
    /// Fits the inline default slot.
    Inline(u64),
    /// Target-order bytes, as long as the token.
    Long(Vec<u8>),
}

/// One persistent-storage slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub id: TokenId,
    pub key: TokenKey,
    /// Counts up from [`STORAGE_ID_BASE`] in discovery order.
    pub storage_id: u16,
    /// Snake-case attribute name.
    pub name: String,
    pub type_name: String,
    pub size: u16,
    /// Storage format symbol: the configured override for the type's
    /// category, or the category name.
    pub format: String,
    /// Final state after all promotions.
    pub is_singleton: bool,
    pub side: Side,
    pub manufacturer_code: Option<ManufacturerCode>,
    pub default: TokenDefault,
}

/// Tokens of one cluster, split by sharing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClusterTokens {
    pub code: ClusterCode,
    pub name: String,
    pub side: Side,
    pub singletons: IndexSet<TokenId>,
    pub non_singletons: IndexSet<TokenId>,
}

impl ClusterTokens {
    fn new(cluster: &ClusterInstance) -> Self {
        Self {
            code: cluster.code,
            name: cluster.name.clone(),
            side: cluster.side,
            singletons: IndexSet::new(),
            non_singletons: IndexSet::new(),
        }
    }

    fn add(&mut self, id: TokenId, singleton: bool) {
        if singleton {
            self.singletons.insert(id);
        } else {
            self.non_singletons.insert(id);
        }
    }

    fn promote(&mut self, id: TokenId) {
        if self.non_singletons.shift_remove(&id) {
            self.singletons.insert(id);
        }
    }
}

/// Tokens one endpoint exposes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndpointTokens {
    pub endpoint_id: EndpointId,
    pub singletons: IndexSet<TokenId>,
    pub non_singletons: IndexSet<TokenId>,
    pub clusters: IndexMap<ClusterCode, ClusterTokens>,
}

impl EndpointTokens {
    fn new(endpoint_id: EndpointId) -> Self {
        Self {
            endpoint_id,
            singletons: IndexSet::new(),
            non_singletons: IndexSet::new(),
            clusters: IndexMap::new(),
        }
    }

    fn add(&mut self, cluster: &ClusterInstance, id: TokenId, singleton: bool) {
        if singleton {
            self.singletons.insert(id);
        } else {
            self.non_singletons.insert(id);
        }
        self.clusters
            .entry(cluster.code)
            .or_insert_with(|| ClusterTokens::new(cluster))
            .add(id, singleton);
    }

    fn promote(&mut self, id: TokenId) {
        if self.non_singletons.shift_remove(&id) {
            self.singletons.insert(id);
        }
        for cluster in self.clusters.values_mut() {
            cluster.promote(id);
        }
    }
}

/// An attribute that got no token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenFailure {
    pub endpoint: EndpointId,
    pub key: TokenKey,
    pub name: String,
    pub error: Error,
}

/// Result of token deduplication.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenSet {
    tokens: Vec<Token>,
    index: IndexMap<TokenKey, TokenId>,
    singletons: IndexSet<TokenId>,
    non_singletons: IndexSet<TokenId>,
    clusters: IndexMap<ClusterCode, ClusterTokens>,
    endpoints: IndexMap<EndpointId, EndpointTokens>,
    failures: Vec<TokenFailure>,
    max_size: u16,
}

impl Default for TokenSet {
    fn default() -> Self {
        Self {
            tokens: Vec::new(),
            index: IndexMap::new(),
            singletons: IndexSet::new(),
            non_singletons: IndexSet::new(),
            clusters: IndexMap::new(),
            endpoints: IndexMap::new(),
            failures: Vec::new(),
            max_size: 1,
        }
    }
}

impl TokenSet {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// All tokens in discovery order.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn get(&self, id: TokenId) -> Option<&Token> {
        self.tokens.get(id.index())
    }

    pub fn find(&self, key: TokenKey) -> Option<&Token> {
        self.index.get(&key).and_then(|&id| self.get(id))
    }

    /// Context-wide singleton ids.
    pub fn singleton_ids(&self) -> &IndexSet<TokenId> {
        &self.singletons
    }

    /// Context-wide non-singleton ids.
    pub fn non_singleton_ids(&self) -> &IndexSet<TokenId> {
        &self.non_singletons
    }

    pub fn singletons(&self) -> impl Iterator<Item = &Token> + '_ {
        self.resolve(&self.singletons)
    }

    pub fn non_singletons(&self) -> impl Iterator<Item = &Token> + '_ {
        self.resolve(&self.non_singletons)
    }

    /// Context-wide per-cluster partitions, keyed by cluster code.
    pub fn clusters(&self) -> impl Iterator<Item = &ClusterTokens> + '_ {
        self.clusters.values()
    }

    pub fn cluster(&self, code: ClusterCode) -> Option<&ClusterTokens> {
        self.clusters.get(&code)
    }

    /// Per-endpoint partitions, in endpoint order.
    pub fn endpoints(&self) -> impl Iterator<Item = &EndpointTokens> + '_ {
        self.endpoints.values()
    }

    pub fn endpoint(&self, endpoint_id: EndpointId) -> Option<&EndpointTokens> {
        self.endpoints.get(&endpoint_id)
    }

    /// Attributes that could not be tokenized.
    pub fn failures(&self) -> &[TokenFailure] {
        &self.failures
    }

    /// Largest token size; never below 1.
    pub fn max_size(&self) -> u16 {
        self.max_size
    }

    pub fn dump(&self) -> String {
        Dump(self).to_string()
    }

    fn resolve<'s>(&'s self, ids: &'s IndexSet<TokenId>) -> impl Iterator<Item = &'s Token> + 's {
        ids.iter().filter_map(|&id| self.get(id))
    }

    pub(crate) fn open_endpoint(&mut self, endpoint_id: EndpointId) {
        self.endpoints
            .entry(endpoint_id)
            .or_insert_with(|| EndpointTokens::new(endpoint_id));
    }

    pub(crate) fn id_of(&self, key: TokenKey) -> Option<TokenId> {
        self.index.get(&key).copied()
    }

    pub(crate) fn next_id(&self) -> TokenId {
        TokenId(self.tokens.len() as u32)
    }

    /// Add a token seen for the first time.
    pub(crate) fn insert(&mut self, endpoint_id: EndpointId, cluster: &ClusterInstance, token: Token) {
        let id = token.id;
        let singleton = token.is_singleton;
        self.max_size = self.max_size.max(token.size);
        self.index.insert(token.key, id);
        self.tokens.push(token);
        self.place(endpoint_id, cluster, id, singleton);
    }

    /// Record another non-singleton occurrence of a non-singleton token.
    pub(crate) fn add_occurrence(&mut self, endpoint_id: EndpointId, cluster: &ClusterInstance, id: TokenId) {
        self.place(endpoint_id, cluster, id, false);
    }

    /// Turn a non-singleton token into a singleton everywhere it was placed,
    /// then place it for the current occurrence.
    pub(crate) fn promote(&mut self, endpoint_id: EndpointId, cluster: &ClusterInstance, id: TokenId) {
        if let Some(token) = self.tokens.get_mut(id.index()) {
            token.is_singleton = true;
        }
        if self.non_singletons.shift_remove(&id) {
            self.singletons.insert(id);
        }
        for tokens in self.clusters.values_mut() {
            tokens.promote(id);
        }
        for endpoint in self.endpoints.values_mut() {
            endpoint.promote(id);
        }
        self.place(endpoint_id, cluster, id, true);
    }

    pub(crate) fn fail(&mut self, failure: TokenFailure) {
        self.failures.push(failure);
    }

    fn place(&mut self, endpoint_id: EndpointId, cluster: &ClusterInstance, id: TokenId, singleton: bool) {
        if singleton {
            self.singletons.insert(id);
        } else {
            self.non_singletons.insert(id);
        }
        self.clusters
            .entry(cluster.code)
            .or_insert_with(|| ClusterTokens::new(cluster))
            .add(id, singleton);
        self.endpoints
            .entry(endpoint_id)
            .or_insert_with(|| EndpointTokens::new(endpoint_id))
            .add(cluster, id, singleton);
    }
}

struct Dump<'a>(&'a TokenSet);

impl fmt::Display for Dump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let set = self.0;
        writeln!(f, "max_size = {}", set.max_size)?;

        if !set.tokens.is_empty() {
            f.write_str("\n[tokens]\n")?;
        }
        for t in &set.tokens {
            let sharing = if t.is_singleton { "singleton" } else { "per-endpoint" };
            write!(
                f,
                "{} = 0x{:04X} {} {} {} size {} {} {sharing} ",
                t.id, t.storage_id, t.key, t.name, t.type_name, t.size, t.format
            )?;
            match &t.default {
                TokenDefault::Inline(v) => writeln!(f, "0x{v:X}")?,
                TokenDefault::Long(bytes) => {
                    f.write_char('[')?;
                    for (i, b) in bytes.iter().enumerate() {
                        if i > 0 {
                            f.write_char(' ')?;
                        }
                        write!(f, "{b:02X}")?;
                    }
                    f.write_str("]\n")?;
                }
            }
        }

        f.write_str("\n[context]\n")?;
        partitions(f, &set.singletons, &set.non_singletons)?;
        for c in set.clusters.values() {
            write!(f, "0x{:04X} {} ({}) = ", c.code, c.name, c.side.as_str())?;
            partitions_inline(f, &c.singletons, &c.non_singletons)?;
        }

        for ep in set.endpoints.values() {
            write!(f, "\n[endpoint {}]\n", ep.endpoint_id)?;
            partitions(f, &ep.singletons, &ep.non_singletons)?;
            for c in ep.clusters.values() {
                write!(f, "0x{:04X} = ", c.code)?;
                partitions_inline(f, &c.singletons, &c.non_singletons)?;
            }
        }

        if !set.failures.is_empty() {
            f.write_str("\n[failures]\n")?;
        }
        for failure in &set.failures {
            writeln!(
                f,
                "ep {} {} {}: {}",
                failure.endpoint, failure.key, failure.name, failure.error
            )?;
        }
        Ok(())
    }
}

fn partitions(f: &mut fmt::Formatter<'_>, singletons: &IndexSet<TokenId>, others: &IndexSet<TokenId>) -> fmt::Result {
    f.write_str("singletons = ")?;
    ids(f, singletons)?;
    f.write_str("\nnon_singletons = ")?;
    ids(f, others)?;
    f.write_char('\n')
}

fn partitions_inline(
    f: &mut fmt::Formatter<'_>,
    singletons: &IndexSet<TokenId>,
    others: &IndexSet<TokenId>,
) -> fmt::Result {
    ids(f, singletons)?;
    f.write_str(" | ")?;
    ids(f, others)?;
    f.write_char('\n')
}

fn ids(f: &mut fmt::Formatter<'_>, ids: &IndexSet<TokenId>) -> fmt::Result {
    if ids.is_empty() {
        return f.write_char('-');
    }
    for (i, id) in ids.iter().enumerate() {
        if i > 0 {
            f.write_char(' ')?;
        }
        write!(f, "{id}")?;
    }
    Ok(())
}
