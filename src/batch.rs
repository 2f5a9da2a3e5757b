//! One "Send" press: load inputs, then send to every contact in order.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::app::Settings;
use crate::contacts::{self, Contact, LoadError};
use crate::events::Dialogs;
use crate::sender::Sender;
use crate::template::{MessageTemplate, TemplateError};

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("Contacts file not found!")]
    ContactsMissing,
    #[error("Failed to read contacts file: {0}")]
    Contacts(#[from] LoadError),
    #[error("The contacts file has no contacts.")]
    NoContacts,
    #[error("Message file not found!")]
    TemplateMissing,
    #[error("Failed to read message file: {0}")]
    Template(#[from] TemplateError),
    #[error("The message file is empty.")]
    EmptyTemplate,
    #[error("No image selected!")]
    NoImage,
}

/// Inputs for a batch, validated in the order the user sees errors:
/// contacts, then message text, then image.
#[derive(Debug)]
pub struct Batch {
    contacts: Vec<Contact>,
    template: MessageTemplate,
    image: PathBuf,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub sent: usize,
    pub failed: usize,
}

impl Batch {
    pub fn prepare(settings: &Settings, image: Option<&Path>) -> Result<Self, BatchError> {
        if !settings.contacts_path.exists() {
            return Err(BatchError::ContactsMissing);
        }
        let contacts = contacts::load(&settings.contacts_path)?;
        if contacts.is_empty() {
            return Err(BatchError::NoContacts);
        }

        if !settings.template_path.exists() {
            return Err(BatchError::TemplateMissing);
        }
        let template = MessageTemplate::load(&settings.template_path)?;
        if template.is_empty() {
            return Err(BatchError::EmptyTemplate);
        }

        let image = image.ok_or(BatchError::NoImage)?.to_path_buf();
        Ok(Self { contacts, template, image })
    }

    /// Send to each contact in turn. A failure is shown for that contact
    /// and the loop moves on.
    pub fn run<D: Dialogs + ?Sized>(
        &self,
        placeholder: &str,
        sender: &dyn Sender,
        dialogs: &D,
    ) -> BatchReport {
        let mut report = BatchReport::default();
        for contact in &self.contacts {
            let caption = self.template.render(placeholder, &contact.name);
            match sender.send(&contact.number, &self.image, &caption) {
                Ok(()) => {
                    log::info!("sent to {} ({})", contact.name, contact.number);
                    report.sent += 1;
                }
                Err(e) => {
                    log::warn!("send to {} ({}) failed: {}", contact.name, contact.number, e);
                    report.failed += 1;
                    dialogs.show_info(
                        "Send failed",
                        &format!(
                            "Failed to send message to {} ({}): {}",
                            contact.name, contact.number, e
                        ),
                    );
                }
            }
        }
        report
    }
}

/// Run a whole batch against the dialogs. Precondition failures abort before
/// any send. Once the loop finishes the success dialog is shown regardless of
/// per-contact failures.
pub fn send_all<D: Dialogs + ?Sized>(
    settings: &Settings,
    image: Option<&Path>,
    sender: &dyn Sender,
    dialogs: &D,
) -> Option<BatchReport> {
    let batch = match Batch::prepare(settings, image) {
        Ok(batch) => batch,
        Err(e) => {
            log::warn!("batch aborted: {}", e);
            dialogs.show_error("Error", &e.to_string());
            return None;
        }
    };

    log::info!("sending to {} contacts", batch.contacts.len());
    let report = batch.run(&settings.placeholder, sender, dialogs);
    log::info!("batch finished: {} sent, {} failed", report.sent, report.failed);
    dialogs.show_info("Success", "Messages sent!");
    Some(report)
}
