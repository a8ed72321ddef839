//! Browser persistence of the auth record. Native builds keep the session in memory only.

use super::AuthRecord;

/// `localStorage` key holding the serialized [`AuthRecord`].
pub const STORAGE_KEY: &str = "munchkin_auth";

#[cfg(target_arch = "wasm32")]
fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

#[cfg(target_arch = "wasm32")]
pub fn load() -> Option<AuthRecord> {
    let raw = storage()?.get_item(STORAGE_KEY).ok()??;
    match serde_json::from_str(&raw) {
        Ok(record) => Some(record),
        Err(e) => {
            tracing::warn!("discarding unreadable stored session: {e}");
            None
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub fn save(record: &AuthRecord) {
    let Some(storage) = storage() else {
        return;
    };
    match serde_json::to_string(record) {
        Ok(raw) => {
            if storage.set_item(STORAGE_KEY, &raw).is_err() {
                tracing::warn!("could not persist session");
            }
        }
        Err(e) => tracing::warn!("could not serialize session: {e}"),
    }
}

#[cfg(target_arch = "wasm32")]
pub fn clear() {
    if let Some(storage) = storage() {
        let _ = storage.remove_item(STORAGE_KEY);
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load() -> Option<AuthRecord> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save(_record: &AuthRecord) {}

#[cfg(not(target_arch = "wasm32"))]
pub fn clear() {}
