// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Email capture cards.
//!
//! Unlike search, this feature fails loudly: a rejected submission raises a
//! blocking alert and puts the form back into a submittable state. A sent
//! request counts as success; the response is opaque (`no-cors`) and never
//! inspected. Once subscribed, every capture card is removed on later page
//! loads.

use super::{Page, Storage, StorageScope, Target};
use crate::config::NewsletterConfig;
use crate::error::SubmitError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A capture form at the moment of submission.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormSubmission {
    /// Id of the enclosing `.email-capture-card`.
    pub card_id: String,
    pub form_id: String,
    /// The form's `action` URL.
    pub action: String,
    pub fields: Vec<(String, String)>,
    /// Submit button text before it switched to "Sending...".
    pub button_label: String,
}

impl FormSubmission {
    /// `application/x-www-form-urlencoded` body.
    pub fn encoded_body(&self) -> String {
        self.fields
            .iter()
            .map(|(name, value)| format!("{}={}", urlencoding::encode(name), urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Sends a form to its action URL.
#[allow(async_fn_in_trait)]
pub trait FormTransport {
    async fn post(&self, action: &str, body: String) -> Result<(), SubmitError>;
}

/// An in-flight submission. The form stays disabled until it is finished.
#[must_use = "a started submission must be completed with finish_submit"]
#[derive(Debug, PartialEq, Eq)]
pub struct SubmitTicket {
    card_id: String,
    form_id: String,
    button_label: String,
}

impl SubmitTicket {
    pub fn form_id(&self) -> &str {
        &self.form_id
    }
}

#[derive(Debug, Clone)]
pub struct Newsletter {
    config: NewsletterConfig,
    storage_key: String,
    subscribed: bool,
    in_flight: HashSet<String>,
}

impl Newsletter {
    pub fn new(config: &NewsletterConfig, storage_key: &str) -> Self {
        Self {
            config: config.clone(),
            storage_key: storage_key.to_string(),
            subscribed: false,
            in_flight: HashSet::new(),
        }
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    /// Remove every capture card if the visitor already subscribed.
    pub fn init<P: Page + ?Sized, S: Storage + ?Sized>(&mut self, page: &mut P, storage: &S) -> bool {
        self.subscribed = storage.get(StorageScope::Local, &self.storage_key).as_deref() == Some("true");
        if self.subscribed {
            page.remove(&Target::all(&self.config.card_selector));
        }
        self.subscribed
    }

    /// Put the form into its sending state. `None` if this form is already
    /// being submitted.
    pub fn begin_submit<P: Page + ?Sized>(&mut self, page: &mut P, form: &FormSubmission) -> Option<SubmitTicket> {
        if !self.in_flight.insert(form.form_id.clone()) {
            return None;
        }
        let button = Target::within(&form.form_id, &self.config.button_selector);
        page.set_text(&button, &self.config.sending_label);
        page.set_disabled(&button, true);

        Some(SubmitTicket {
            card_id: form.card_id.clone(),
            form_id: form.form_id.clone(),
            button_label: form.button_label.clone(),
        })
    }

    /// Apply the outcome of a submission. Returns whether it succeeded.
    pub fn finish_submit<P: Page + ?Sized, S: Storage + ?Sized>(
        &mut self,
        page: &mut P,
        storage: &mut S,
        ticket: SubmitTicket,
        result: Result<(), SubmitError>,
    ) -> bool {
        self.in_flight.remove(&ticket.form_id);

        match result {
            Ok(()) => {
                storage.set(StorageScope::Local, &self.storage_key, "true");
                self.subscribed = true;
                page.set_class(
                    &Target::within(&ticket.card_id, &self.config.wrapper_selector),
                    &self.config.hidden_class,
                    true,
                );
                page.set_class(
                    &Target::within(&ticket.card_id, &self.config.success_selector),
                    &self.config.hidden_class,
                    false,
                );
                true
            }
            Err(err) => {
                tracing::error!(form = %ticket.form_id, error = %err, "Submission error");
                page.alert(&self.config.failure_message);
                let button = Target::within(&ticket.form_id, &self.config.button_selector);
                page.set_text(&button, &ticket.button_label);
                page.set_disabled(&button, false);
                false
            }
        }
    }

    /// Submit through `transport` and apply the outcome.
    pub async fn submit<P, S, T>(&mut self, page: &mut P, storage: &mut S, transport: &T, form: &FormSubmission) -> bool
    where
        P: Page + ?Sized,
        S: Storage + ?Sized,
        T: FormTransport,
    {
        let Some(ticket) = self.begin_submit(page, form) else {
            return false;
        };
        let result = if form.action.is_empty() {
            Err(SubmitError::MissingAction)
        } else {
            transport.post(&form.action, form.encoded_body()).await
        };
        self.finish_submit(page, storage, ticket, result)
    }
}
