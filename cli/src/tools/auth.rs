use anyhow::Result;

use crate::config::config;
use crate::token_store::TokenStore;

fn token_store() -> TokenStore {
    TokenStore::new(&config().token_path)
}

pub fn login(token: &str) -> Result<()> {
    let store = token_store();
    store.store(token)?;
    log::info!("Access token stored in {}", store.path().display());
    println!("Logged in");
    Ok(())
}

pub fn logout() -> Result<()> {
    let store = token_store();
    if store.remove()? {
        log::info!("Access token removed from {}", store.path().display());
    } else {
        log::debug!("No access token at {}", store.path().display());
    }
    println!("Logged out");
    Ok(())
}

pub fn status() -> Result<()> {
    if token_store().is_logged_in()? {
        println!("Logged in");
    } else {
        println!("Not logged in");
    }
    Ok(())
}
