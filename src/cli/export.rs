use std::fs::File;

use crate::{error, export, info, management::TokenManager, spotify, success};

pub async fn export(output: String) {
    let mut token_mgr = match TokenManager::load().await {
        Ok(manager) => manager,
        Err(e) => {
            error!(
                "Failed to load token. Please run spinctl auth\n Error: {}",
                e
            );
        }
    };

    let items = match spotify::library::get_saved_tracks(&mut token_mgr).await {
        Ok(items) => items,
        Err(e) => {
            error!("Failed to fetch saved tracks: {}", e);
        }
    };

    info!("Fetched {} saved tracks", items.len());

    let file = match File::create(&output) {
        Ok(file) => file,
        Err(e) => {
            error!("Failed to create {}: {}", output, e);
        }
    };

    if let Err(e) = export::write_csv(file, &items) {
        error!("Failed to write {}: {}", output, e);
    }

    success!("Exported {} tracks to {}", items.len(), output);
}
