use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::Uri,
    routing::{get, post},
    Extension, Json, Router,
};
use serde_json::{json, Value};

use super::Entity;
use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::policy::{AccessPolicy, Decision, Operation};
use crate::store::EntityStore;

/// Generic operation executor for one resource kind.
///
/// Holds the kind's injected store and the shared policy table. The route
/// handlers below are the only callers and always run the policy gate
/// before binding any input or touching the store.
pub struct Resource<E: Entity> {
    store: Arc<dyn EntityStore<E>>,
    policy: Arc<AccessPolicy>,
}

impl<E: Entity> Clone for Resource<E> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            policy: self.policy.clone(),
        }
    }
}

impl<E: Entity> Resource<E> {
    pub fn new(store: Arc<dyn EntityStore<E>>, policy: Arc<AccessPolicy>) -> Self {
        Self { store, policy }
    }

    /// Policy gate shared by all five operations.
    pub fn authorize(&self, caller: &CurrentUser, operation: Operation) -> Result<(), ApiError> {
        match self.policy.authorize(&caller.roles, E::KIND, operation) {
            Decision::Allow => Ok(()),
            Decision::Deny => {
                tracing::debug!(kind = E::KIND, %operation, "access denied");
                Err(ApiError::forbidden("Access is denied"))
            }
        }
    }

    /// Keyed lookup with the uniform miss contract.
    async fn lookup(&self, key: &E::Key) -> Result<E, ApiError> {
        self.store
            .find_by_key(key)
            .await?
            .ok_or_else(|| ApiError::entity_not_found(E::KIND, key))
    }

    pub async fn list(&self) -> Result<Vec<E>, ApiError> {
        Ok(self.store.find_all().await?)
    }

    pub async fn create(&self, params: E::CreateParams) -> Result<E, ApiError> {
        let entity = E::from_params(params);
        let saved = self.store.save(entity).await?;
        tracing::info!(kind = E::KIND, "created record");
        Ok(saved)
    }

    pub async fn get(&self, key: E::Key) -> Result<E, ApiError> {
        self.lookup(&key).await
    }

    /// Full replacement of the non-key fields of an existing record. The
    /// replacement body is never persisted when the lookup misses.
    pub async fn update(&self, key: E::Key, replacement: E) -> Result<E, ApiError> {
        let mut current = self.lookup(&key).await?;
        current.apply_update(replacement);
        Ok(self.store.save(current).await?)
    }

    pub async fn delete(&self, key: E::Key) -> Result<String, ApiError> {
        self.lookup(&key).await?;

        // A concurrent removal between the check and the act surfaces as a
        // second miss.
        if !self.store.delete(&key).await? {
            return Err(ApiError::entity_not_found(E::KIND, &key));
        }

        tracing::info!(kind = E::KIND, "deleted record");
        Ok(format!("{} with id {} deleted", E::KIND, key))
    }
}

/// Routes for one resource kind. The key travels as `?id=` for numeric
/// kinds and `?code=` for code-keyed kinds (via `E::KeyQuery`):
///
/// - `GET    /api/<Kind>/all`     list (USER)
/// - `POST   /api/<Kind>/post`    create from named parameters (ADMIN)
/// - `GET    /api/<Kind>?id=<k>`  get-by-key (USER)
/// - `PUT    /api/<Kind>?id=<k>`  full replacement update (ADMIN)
/// - `DELETE /api/<Kind>?id=<k>`  delete (ADMIN)
pub fn routes<E: Entity>(store: Arc<dyn EntityStore<E>>, policy: Arc<AccessPolicy>) -> Router {
    let resource = Resource::new(store, policy);

    Router::new()
        .route(&format!("/api/{}/all", E::KIND), get(list::<E>))
        .route(&format!("/api/{}/post", E::KIND), post(create::<E>))
        .route(
            &format!("/api/{}", E::KIND),
            get(get_one::<E>)
                .put(update::<E>)
                .delete(delete_one::<E>),
        )
        .with_state(resource)
}

// The handlers bind their own input (rather than letting extractors reject
// first) so that the policy gate runs before parameter binding: a denied
// caller gets 403 even with malformed input, and never learns whether a
// resource exists.

async fn list<E: Entity>(
    State(resource): State<Resource<E>>,
    Extension(caller): Extension<CurrentUser>,
) -> Result<Json<Vec<E>>, ApiError> {
    resource.authorize(&caller, Operation::List)?;
    Ok(Json(resource.list().await?))
}

async fn create<E: Entity>(
    State(resource): State<Resource<E>>,
    Extension(caller): Extension<CurrentUser>,
    uri: Uri,
) -> Result<Json<E>, ApiError> {
    resource.authorize(&caller, Operation::Create)?;
    let params = bind_params::<E>(&uri)?;
    Ok(Json(resource.create(params).await?))
}

async fn get_one<E: Entity>(
    State(resource): State<Resource<E>>,
    Extension(caller): Extension<CurrentUser>,
    uri: Uri,
) -> Result<Json<E>, ApiError> {
    resource.authorize(&caller, Operation::Get)?;
    let key = bind_key::<E>(&uri)?;
    Ok(Json(resource.get(key).await?))
}

async fn update<E: Entity>(
    State(resource): State<Resource<E>>,
    Extension(caller): Extension<CurrentUser>,
    uri: Uri,
    body: Bytes,
) -> Result<Json<E>, ApiError> {
    resource.authorize(&caller, Operation::Update)?;
    let key = bind_key::<E>(&uri)?;
    let replacement: E = serde_json::from_slice(&body)
        .map_err(|e| ApiError::bad_request(format!("invalid {} body: {}", E::KIND, e)))?;
    Ok(Json(resource.update(key, replacement).await?))
}

async fn delete_one<E: Entity>(
    State(resource): State<Resource<E>>,
    Extension(caller): Extension<CurrentUser>,
    uri: Uri,
) -> Result<Json<Value>, ApiError> {
    resource.authorize(&caller, Operation::Delete)?;
    let key = bind_key::<E>(&uri)?;
    let message = resource.delete(key).await?;
    Ok(Json(json!({ "message": message })))
}

/// Bind the key query parameter (`?id=` or `?code=`) for kind E.
fn bind_key<E: Entity>(uri: &Uri) -> Result<E::Key, ApiError> {
    let Query(query) = Query::<E::KeyQuery>::try_from_uri(uri)
        .map_err(|e| ApiError::bad_request(e.to_string()))?;
    Ok(query.into())
}

/// Bind the full set of named create parameters for kind E.
fn bind_params<E: Entity>(uri: &Uri) -> Result<E::CreateParams, ApiError> {
    let Query(params) = Query::<E::CreateParams>::try_from_uri(uri)
        .map_err(|e| ApiError::bad_request(e.to_string()))?;
    Ok(params)
}
