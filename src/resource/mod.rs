pub mod handler;

use serde::{de::DeserializeOwned, Deserialize, Serialize};

pub use handler::{routes, Resource};

/// Key type of a resource kind.
///
/// Two shapes exist: store-assigned numeric identifiers (`i64`) and
/// caller-supplied short codes (`String`).
pub trait EntityKey:
    Clone
    + Ord
    + std::hash::Hash
    + std::fmt::Display
    + Send
    + Sync
    + Serialize
    + DeserializeOwned
    + 'static
{
    /// Mint a key from a store sequence value. Caller-supplied key types
    /// return None and are never assigned by the store.
    fn from_sequence(value: i64) -> Option<Self>;
}

impl EntityKey for i64 {
    fn from_sequence(value: i64) -> Option<Self> {
        Some(value)
    }
}

impl EntityKey for String {
    fn from_sequence(_: i64) -> Option<Self> {
        None
    }
}

/// A resource kind: a flat, kind-tagged record with a surrogate key.
///
/// Implementing this trait is everything a concrete resource needs to get
/// the full list/create/get/update/delete surface; see `entities/`.
pub trait Entity:
    Clone + std::fmt::Debug + Send + Sync + Serialize + DeserializeOwned + 'static
{
    type Key: EntityKey;

    /// Query shape carrying the key on get/update/delete
    /// ([`IdQuery`] or [`CodeQuery`]).
    type KeyQuery: DeserializeOwned + Into<Self::Key> + Send;

    /// Named request parameters that fully specify a new record.
    type CreateParams: DeserializeOwned + Send;

    /// Kind tag used in routes, policy rules, and the not-found contract.
    const KIND: &'static str;

    fn from_params(params: Self::CreateParams) -> Self;

    /// The record's key, or None while the store has not assigned one.
    fn key(&self) -> Option<Self::Key>;

    fn set_key(&mut self, key: Self::Key);

    /// Overwrite every non-key field from `replacement`. The key is left
    /// untouched: a replacement body cannot move a record to a new
    /// identity.
    fn apply_update(&mut self, replacement: Self);
}

/// `?id=<key>` binding for numeric-keyed kinds
#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: i64,
}

impl From<IdQuery> for i64 {
    fn from(query: IdQuery) -> i64 {
        query.id
    }
}

/// `?code=<key>` binding for code-keyed kinds
#[derive(Debug, Deserialize)]
pub struct CodeQuery {
    pub code: String,
}

impl From<CodeQuery> for String {
    fn from(query: CodeQuery) -> String {
        query.code
    }
}
