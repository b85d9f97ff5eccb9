use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{spotify, types::PkceToken};

pub async fn auth() {
    // Holds the PKCE verifier between opening the consent page and the
    // callback hitting the local server.
    let shared_state: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
    spotify::auth::auth(shared_state).await;
}
