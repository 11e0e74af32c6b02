//! Report delivery: email and vault file.

pub mod email;
pub mod vault;

pub use email::{failure_hint, report_subject, send_email, send_test_email, EmailSender};
pub use vault::{report_filename, save_to_vault, VaultWriter};
