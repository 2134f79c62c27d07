//! Admin console commands.
//!
//! Every command here needs an admin session.
//!
//! # Usage
//!
//! ```bash
//! jk-cli admin users list --search doe --page 2
//! jk-cli admin users delete 42
//! jk-cli admin coupons list
//! jk-cli admin dashboard
//! ```

use std::io::Write;

use jokroup_admin::{AdminPage, AdminResource, load_dashboard};
use jokroup_core::{Coupon, Product, User};
use jokroup_storefront::AppState;

use super::write_notice;
use crate::error::CliError;

/// Which admin table to act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Users,
    Products,
    Coupons,
}

/// Fail unless the logged-in user is an admin.
///
/// # Errors
///
/// Returns `CliError::AdminRequired` otherwise.
pub fn require_admin(state: &AppState) -> Result<(), CliError> {
    let is_admin = state
        .store()
        .with(|s| s.current_user.as_ref().is_some_and(User::is_admin));
    if is_admin {
        Ok(())
    } else {
        Err(CliError::AdminRequired)
    }
}

/// Show one page of an admin table.
///
/// # Errors
///
/// Returns error if the session is not an admin's or output fails. A failed
/// fetch is shown as the page's error state.
pub async fn list(
    state: &AppState,
    out: &mut impl Write,
    resource: Resource,
    search: Option<String>,
    page: usize,
) -> Result<(), CliError> {
    require_admin(state)?;
    let rendered = match resource {
        Resource::Users => render_page::<User>(state, search, page).await,
        Resource::Products => render_page::<Product>(state, search, page).await,
        Resource::Coupons => render_page::<Coupon>(state, search, page).await,
    };
    writeln!(out, "{rendered}")?;
    Ok(())
}

async fn render_page<T: AdminResource>(
    state: &AppState,
    search: Option<String>,
    page: usize,
) -> String {
    let mut admin_page = AdminPage::<T>::load(state).await;
    if let Some(table) = admin_page.table_mut() {
        if let Some(term) = search {
            table.set_search(term);
        }
        if !table.paginate(page) {
            tracing::debug!(page, "Requested page out of range");
        }
    }
    admin_page.render()
}

/// Delete one row.
///
/// # Errors
///
/// Returns error if the session is not an admin's, if the backend rejects
/// the delete, or if output fails.
pub async fn delete(
    state: &AppState,
    out: &mut impl Write,
    resource: Resource,
    id: &str,
) -> Result<(), CliError> {
    require_admin(state)?;
    let notice = match resource {
        Resource::Users => AdminPage::<User>::from_rows(state, Vec::new()).delete(id).await,
        Resource::Products => AdminPage::<Product>::from_rows(state, Vec::new()).delete(id).await,
        Resource::Coupons => AdminPage::<Coupon>::from_rows(state, Vec::new()).delete(id).await,
    };
    if notice.is_destructive() {
        notice.log();
        return Err(CliError::Rejected(notice.description));
    }
    write_notice(out, &notice)
}

/// Show the dashboard summary.
///
/// # Errors
///
/// Returns error if the session is not an admin's, or if nothing could be
/// loaded.
pub async fn dashboard(state: &AppState, out: &mut impl Write) -> Result<(), CliError> {
    require_admin(state)?;
    let dashboard = load_dashboard(state).await?;
    writeln!(out, "{}", dashboard.render())?;
    Ok(())
}
