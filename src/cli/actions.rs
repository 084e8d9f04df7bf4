//! CLI actions. The terminal stands in for the view layer: a navigation is
//! resolved through the same guard the app shell would use, and a permitted
//! listing route prints the first page of students as JSON.

use crate::app::App;
use crate::router::Decision;
use crate::services::{ListParams, students::students};
use anyhow::Result;

#[derive(Debug)]
pub enum Action {
    /// Resolve a navigation and, when permitted, print the target listing.
    Open { route: String, page: u32 },
}

/// Handles `Action::Open`.
///
/// # Errors
///
/// Returns an error if navigation or the listing call fails.
pub async fn open(app: &mut App, route: &str, page: u32) -> Result<()> {
    match app.router.navigate(route, None).await? {
        Decision::Redirect(target) => {
            println!("redirected to {target}");
        }
        Decision::Proceed => {
            let listing = students(&app.api).get_all(&ListParams::page(page)).await?;
            println!("{}", serde_json::to_string_pretty(&listing)?);
        }
    }

    while let Ok(notice) = app.notices.try_recv() {
        eprintln!("{}", notice.message());
    }
    Ok(())
}
