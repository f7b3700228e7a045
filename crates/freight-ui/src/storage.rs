use freight_types::session::KeyValueStorage;

/// `window.localStorage`, the only place the back office keeps session data
/// on the client.
pub struct BrowserStorage(web_sys::Storage);

impl BrowserStorage {
    pub fn local() -> Option<Self> {
        leptos::prelude::window()
            .local_storage()
            .ok()
            .flatten()
            .map(BrowserStorage)
    }
}

impl KeyValueStorage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if self.0.set_item(key, value).is_err() {
            leptos::logging::warn!("localStorage rejected {key}");
        }
    }

    fn remove(&self, key: &str) {
        let _ = self.0.remove_item(key);
    }
}
