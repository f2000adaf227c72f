//! Store selection and wholesale session commands.

use mm_catalog_engine::{Catalog, Result};
use tracing::info;

/// Select the active store before running another command.
pub async fn select_store(catalog: &Catalog, code: Option<&str>) -> Result<()> {
    if let Some(code) = code {
        let store = catalog.set_store(code).await?;
        info!("using store {} ({})", store.code, store.name);
    }
    Ok(())
}

/// Authenticate against the wholesale platform and report the session
/// expiry.
pub async fn login(catalog: &Catalog, username: &str, password: &str) -> Result<()> {
    let status = catalog.authenticate_b2b(username, password).await?;

    info!("authenticated as {username}");
    if let Some(expires_at) = status.expires_at {
        info!("session valid until {expires_at}");
    }

    Ok(())
}

/// Drop the wholesale token and revoke it server-side.
pub async fn logout(catalog: &Catalog) {
    if catalog.logout_b2b().await {
        info!("logged out");
    } else {
        info!("no active wholesale session");
    }
}

/// Show the wholesale authentication state; with `verify`, also check
/// the token against the platform.
pub async fn auth_status(catalog: &Catalog, verify: bool) -> Result<()> {
    let status = catalog.auth_status().await;

    if status.authenticated {
        info!("authenticated");
        if let Some(expires_at) = status.expires_at {
            info!("token expires at {expires_at}");
        }
    } else {
        info!("not authenticated");
    }

    if verify && status.authenticated {
        let profile = catalog.verify_b2b().await?;
        info!(
            "platform confirms the token: {} {} <{}>",
            profile.firstname, profile.lastname, profile.email
        );
    }

    Ok(())
}
