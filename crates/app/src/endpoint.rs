use url::Url;

use jobdeck_client::EndpointSource;
use jobdeck_storage::SettingsStore;

/// Resolves the base URL from the persisted settings store on every
/// request, so `jobdeck config --set-url` affects the next call without
/// rebuilding the client.
pub struct StoredEndpoint {
    store: SettingsStore,
}

impl StoredEndpoint {
    pub fn new(store: SettingsStore) -> Self {
        Self { store }
    }
}

impl EndpointSource for StoredEndpoint {
    fn api_url(&self) -> Url {
        self.store.api_url()
    }
}
