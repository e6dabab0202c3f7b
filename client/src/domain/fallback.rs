//! Remote-first read policy shared by every resource service.
//!
//! Reads try the remote once; a successful payload is mirrored locally and
//! returned, a failed one is replaced by the last mirrored copy when present.
//! The fallback deliberately upgrades failure to success so callers treat
//! results uniformly regardless of origin. Writes have no counterpart here:
//! they go to the remote or they fail.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::Envelope;
use crate::domain::mirror::LocalMirror;
use crate::domain::ports::{ApiRequest, KeyValueStore, RemoteGateway};

/// Fetch a collection from the remote, mirroring on success and serving the
/// cached copy on failure.
pub(crate) async fn read_with_fallback<T, G, S>(
    gateway: &G,
    mirror: &LocalMirror<S>,
    request: ApiRequest,
    cache_key: &str,
) -> Envelope<T>
where
    T: Serialize + DeserializeOwned,
    G: RemoteGateway + ?Sized,
    S: KeyValueStore,
{
    let endpoint = request.path.clone();
    match gateway.call(request).await {
        Envelope::Success(payload) => match serde_json::from_value::<T>(payload) {
            Ok(data) => {
                mirror.set(cache_key, &data);
                Envelope::Success(data)
            }
            Err(error) => {
                debug!(endpoint, %error, "remote payload failed to decode");
                cached_or(
                    mirror,
                    cache_key,
                    Envelope::failure(format!("malformed response payload: {error}")),
                )
            }
        },
        Envelope::Failure(message) => {
            debug!(endpoint, error = %message, "remote read failed");
            cached_or(mirror, cache_key, Envelope::Failure(message))
        }
    }
}

/// Serve the mirrored copy at `cache_key`, or the original failure when the
/// mirror has nothing for it.
fn cached_or<T, S>(mirror: &LocalMirror<S>, cache_key: &str, original: Envelope<T>) -> Envelope<T>
where
    T: DeserializeOwned,
    S: KeyValueStore,
{
    match mirror.peek::<T>(cache_key) {
        Some(cached) => {
            debug!(cache_key, "serving mirrored copy after remote failure");
            Envelope::Success(cached)
        }
        None => original,
    }
}
