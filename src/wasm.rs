// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! WebAssembly bindings.
//!
//! The browser-facing API is one object, `SiteRuntime`. The JS glue owns the
//! real DOM and the network; Rust owns every decision. Each DOM event goes
//! in through `dispatch`, and the returned commands are replayed in order:
//!
//! ```js
//! const site = new SiteRuntime(window.__siteConfig);
//! input.addEventListener('focus', () => run({ type: 'focus', pair: 'desktop' }));
//!
//! async function run(event) {
//!   const out = site.dispatch(event);
//!   apply(out.commands);
//!   if (out.fetchIndex) {
//!     try {
//!       const res = await fetch(out.fetchIndex);
//!       if (!res.ok) site.failLoad(res.status, `HTTP error! status: ${res.status}`);
//!       else site.finishLoad(await res.text());
//!     } catch (err) {
//!       site.failLoad(undefined, String(err));
//!     }
//!   }
//! }
//! ```
//!
//! Theme, banner and newsletter state go straight to `localStorage` /
//! `sessionStorage` through `js_sys::Reflect`.

use crate::config::SiteConfig;
use crate::error::{LoadError, SubmitError};
use crate::page::newsletter::SubmitTicket;
use crate::page::{CommandPage, DomCommand, Storage, StorageScope};
use crate::search::client::LoadTicket;
use crate::session::{PageEvent, SiteSession};
use js_sys::{Function, Reflect};
use serde::Serialize;
use serde_wasm_bindgen::{from_value, to_value};
use std::collections::HashMap;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = error)]
    fn console_error(message: &str);
}

/// Result of one `dispatch` call.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DispatchOutput {
    commands: Vec<DomCommand>,
    prevent_default: bool,
    /// Path to fetch; present only for the event that claimed the load.
    fetch_index: Option<String>,
    /// Form id to POST; complete with `finishSubmit`.
    submit_form: Option<String>,
}

/// `localStorage` / `sessionStorage` on the global object.
///
/// Every failure (storage disabled, quota, private mode) reads as "absent"
/// or a dropped write.
struct JsStorage;

impl JsStorage {
    fn area(scope: StorageScope) -> Option<JsValue> {
        let name = match scope {
            StorageScope::Local => "localStorage",
            StorageScope::Session => "sessionStorage",
        };
        Reflect::get(&js_sys::global(), &JsValue::from_str(name))
            .ok()
            .filter(|area| !area.is_undefined() && !area.is_null())
    }

    fn method(area: &JsValue, name: &str) -> Option<Function> {
        Reflect::get(area, &JsValue::from_str(name))
            .ok()?
            .dyn_into::<Function>()
            .ok()
    }
}

impl Storage for JsStorage {
    fn get(&self, scope: StorageScope, key: &str) -> Option<String> {
        let area = Self::area(scope)?;
        let get_item = Self::method(&area, "getItem")?;
        get_item.call1(&area, &JsValue::from_str(key)).ok()?.as_string()
    }

    fn set(&mut self, scope: StorageScope, key: &str, value: &str) {
        let Some(area) = Self::area(scope) else {
            return;
        };
        if let Some(set_item) = Self::method(&area, "setItem") {
            let _ = set_item.call2(&area, &JsValue::from_str(key), &JsValue::from_str(value));
        }
    }
}

/// One page view in the browser.
#[wasm_bindgen]
pub struct SiteRuntime {
    session: SiteSession,
    page: CommandPage,
    pending_load: Option<LoadTicket>,
    pending_submits: HashMap<String, SubmitTicket>,
}

#[wasm_bindgen]
impl SiteRuntime {
    /// Build from a config object; `undefined` means the default site.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<SiteRuntime, JsValue> {
        let config: SiteConfig = if config.is_undefined() || config.is_null() {
            SiteConfig::default()
        } else {
            from_value(config).map_err(|e| e.to_string())?
        };
        let session = SiteSession::new(config, Box::new(JsStorage)).map_err(|e| e.to_string())?;
        Ok(SiteRuntime {
            session,
            page: CommandPage::new(),
            pending_load: None,
            pending_submits: HashMap::new(),
        })
    }

    /// Route one DOM event and return `{ commands, preventDefault, fetchIndex, submitForm }`.
    #[wasm_bindgen]
    pub fn dispatch(&mut self, event: JsValue) -> Result<JsValue, JsValue> {
        let event: PageEvent = from_value(event).map_err(|e| e.to_string())?;
        let dispatch = self.session.handle(&mut self.page, event);

        let fetch_index = dispatch.load.map(|ticket| {
            self.pending_load = Some(ticket);
            self.session.client().path().to_string()
        });
        let submit_form = dispatch.submit.map(|ticket| {
            let form_id = ticket.form_id().to_string();
            self.pending_submits.insert(form_id.clone(), ticket);
            form_id
        });

        let output = DispatchOutput {
            commands: self.page.drain(),
            prevent_default: dispatch.prevent_default,
            fetch_index,
            submit_form,
        };
        to_value(&output).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Hand over the fetched `index.json` body. Returns whether search is ready.
    #[wasm_bindgen(js_name = finishLoad)]
    pub fn finish_load(&mut self, body: &str) -> Result<bool, JsValue> {
        let ticket = self.pending_load.take().ok_or("no index load in flight")?;
        let ready = self.session.finish_load(ticket, Ok(body.as_bytes().to_vec()));
        if !ready {
            self.report_load_failure();
        }
        Ok(ready)
    }

    /// Report a rejected fetch or a non-success status.
    #[wasm_bindgen(js_name = failLoad)]
    pub fn fail_load(&mut self, status: Option<u16>, reason: String) -> Result<(), JsValue> {
        let ticket = self.pending_load.take().ok_or("no index load in flight")?;
        let error = match status {
            Some(status) => LoadError::Status { status },
            None => LoadError::Network {
                path: self.session.client().path().to_string(),
                reason,
            },
        };
        self.session.finish_load(ticket, Err(error));
        self.report_load_failure();
        Ok(())
    }

    /// Report the outcome of a newsletter POST; returns the commands to apply.
    #[wasm_bindgen(js_name = finishSubmit)]
    pub fn finish_submit(&mut self, form_id: &str, error: Option<String>) -> Result<JsValue, JsValue> {
        let ticket = self
            .pending_submits
            .remove(form_id)
            .ok_or_else(|| format!("no submission in flight for form {form_id}"))?;
        let result = match error {
            None => Ok(()),
            Some(reason) => Err(SubmitError::Network {
                action: form_id.to_string(),
                reason,
            }),
        };
        self.session.finish_submit(&mut self.page, ticket, result);
        to_value(&self.page.drain()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(js_name = isReady)]
    pub fn is_ready(&self) -> bool {
        self.session.client().is_ready()
    }

    #[wasm_bindgen(js_name = loadState)]
    pub fn load_state(&self) -> Result<JsValue, JsValue> {
        to_value(&self.session.client().state()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(js_name = docCount)]
    pub fn doc_count(&self) -> usize {
        self.session.client().document_count().unwrap_or(0)
    }
}

impl SiteRuntime {
    fn report_load_failure(&self) {
        if let Some(err) = self.session.client().last_error() {
            console_error(&format!("Failed to load search index: {err}"));
        }
    }
}
