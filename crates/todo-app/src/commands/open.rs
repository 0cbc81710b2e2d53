//! Open command: navigate the mounted app to a location.

use tracing::info;

use super::Result;
use crate::app::MountedApp;

/// Renders the page for `location`. An unknown location renders nothing.
pub async fn execute(app: &mut MountedApp, location: &str) -> Result<()> {
    match app.navigate(location).await? {
        Some(route) => info!(route = route.name, "page rendered"),
        None => info!(location, "nothing rendered"),
    }
    Ok(())
}
