//! Command implementations. Each writes its result to the given output.

pub mod account;
pub mod admin;
pub mod auth;
pub mod products;

use std::io::Write;

use jokroup_storefront::Notice;

use crate::error::CliError;

/// Write a notice as `Title: description`.
///
/// # Errors
///
/// Returns error if the output cannot be written.
pub fn write_notice(out: &mut impl Write, notice: &Notice) -> Result<(), CliError> {
    notice.log();
    writeln!(out, "{notice}")?;
    Ok(())
}
