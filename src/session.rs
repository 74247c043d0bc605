// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! One page view: every interactive feature behind a single event router.
//!
//! The host forwards DOM events as [`PageEvent`]s and applies the mutations
//! they produce on its [`Page`]. Work that must finish asynchronously (the
//! index fetch, a newsletter POST) comes back as a ticket on the
//! [`Dispatch`]; the host completes it with [`SiteSession::finish_load`] or
//! [`SiteSession::finish_submit`].
//!
//! | Event                        | Handled by             |
//! |------------------------------|------------------------|
//! | `focus` / `touch` / `input`  | `ActivationController` |
//! | `keyDown` / `click`          | controller, panel      |
//! | `themeToggle` / `systemTheme`| `ThemeController`      |
//! | `mobileMenuToggle` / ...     | `MobileNav`, sidebar   |
//! | `tocLink` / `headingVisible` | `TocSpy`               |
//! | `bannerClose`                | `Banner`               |
//! | `newsletterSubmit`           | `Newsletter`           |
//! | `panel*`                     | `AskAiPanel`           |

use crate::config::{PairId, SiteConfig};
use crate::controller::{Activation, ActivationController, KeyPress};
use crate::error::{ConfigError, LoadError, SubmitError};
use crate::index::{ForwardIndex, TextIndex};
use crate::page::banner::Banner;
use crate::page::nav::{MobileNav, SidebarAccordion};
use crate::page::newsletter::{FormSubmission, FormTransport, Newsletter, SubmitTicket};
use crate::page::panel::AskAiPanel;
use crate::page::theme::ThemeController;
use crate::page::toc::TocSpy;
use crate::page::{Page, Storage};
use crate::search::client::{DocumentIndexClient, LoadTicket};
use crate::search::dispatch::QueryOutcome;
use crate::source::DocumentSource;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A DOM event, as forwarded by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum PageEvent {
    /// `DOMContentLoaded`, with the banner's `data-key` if a banner exists.
    Ready {
        #[serde(default)]
        banner_key: Option<String>,
    },
    Focus {
        pair: PairId,
    },
    Touch {
        pair: PairId,
    },
    Input {
        pair: PairId,
        value: String,
    },
    KeyDown(KeyPress),
    /// Element ids of the click target and its ancestors.
    Click {
        path: Vec<String>,
    },
    ThemeToggle,
    SystemTheme {
        dark: bool,
    },
    MobileMenuToggle,
    MobileNavLink,
    SidebarToggle {
        button_id: String,
        #[serde(default)]
        group_id: Option<String>,
    },
    TocLink {
        target_id: String,
        #[serde(default)]
        element_top: Option<f64>,
        #[serde(default)]
        scroll_y: f64,
    },
    HeadingVisible {
        id: String,
    },
    BannerClose,
    NewsletterSubmit(FormSubmission),
    PanelToggle {
        #[serde(default)]
        viewport_width: f64,
    },
    PanelClose,
    PanelExpand,
}

/// What the host must do after an event, beyond replaying page mutations.
#[must_use = "a dispatch may carry tickets that must be completed"]
#[derive(Debug, Default)]
pub struct Dispatch {
    /// Fetch the index and hand the body to `finish_load`.
    pub load: Option<LoadTicket>,
    /// Send the form and report back through `finish_submit`.
    pub submit: Option<SubmitTicket>,
    pub prevent_default: bool,
    /// Present after input on a search box.
    pub outcome: Option<QueryOutcome>,
}

impl Dispatch {
    fn prevent() -> Self {
        Self {
            prevent_default: true,
            ..Self::default()
        }
    }
}

pub struct SiteSession<I: TextIndex = ForwardIndex> {
    config: SiteConfig,
    client: Arc<DocumentIndexClient<I>>,
    controller: ActivationController,
    theme: ThemeController,
    nav: MobileNav,
    sidebar: SidebarAccordion,
    banner: Banner,
    newsletter: Newsletter,
    toc: TocSpy,
    panel: AskAiPanel,
    storage: Box<dyn Storage>,
}

impl<I: TextIndex> SiteSession<I> {
    pub fn new(config: SiteConfig, storage: Box<dyn Storage>) -> Result<Self, ConfigError> {
        config.validate()?;
        let client = Arc::new(DocumentIndexClient::from_config(&config));
        Ok(Self::with_client(config, client, storage))
    }

    /// Share an existing client, e.g. one already loaded.
    pub fn with_client(config: SiteConfig, client: Arc<DocumentIndexClient<I>>, storage: Box<dyn Storage>) -> Self {
        Self {
            controller: ActivationController::new(&config),
            theme: ThemeController::new(&config.theme, &config.storage.theme, storage.as_ref()),
            nav: MobileNav::new(&config.nav),
            sidebar: SidebarAccordion::new(&config.nav),
            banner: Banner::new(&config.banner, &config.storage.banner_prefix, None),
            newsletter: Newsletter::new(&config.newsletter, &config.storage.newsletter),
            toc: TocSpy::new(&config.toc),
            panel: AskAiPanel::new(&config.panel),
            client,
            storage,
            config,
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn client(&self) -> &Arc<DocumentIndexClient<I>> {
        &self.client
    }

    pub fn controller(&self) -> &ActivationController {
        &self.controller
    }

    pub fn theme(&self) -> &ThemeController {
        &self.theme
    }

    pub fn nav(&self) -> &MobileNav {
        &self.nav
    }

    pub fn sidebar(&self) -> &SidebarAccordion {
        &self.sidebar
    }

    pub fn banner(&self) -> &Banner {
        &self.banner
    }

    pub fn newsletter(&self) -> &Newsletter {
        &self.newsletter
    }

    pub fn toc(&self) -> &TocSpy {
        &self.toc
    }

    pub fn panel(&self) -> &AskAiPanel {
        &self.panel
    }

    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    /// Route one event.
    pub fn handle<P: Page + ?Sized>(&mut self, page: &mut P, event: PageEvent) -> Dispatch {
        tracing::trace!(?event, "page event");
        match event {
            PageEvent::Ready { banner_key } => {
                self.theme.init(page);
                self.banner = Banner::new(
                    &self.config.banner,
                    &self.config.storage.banner_prefix,
                    banner_key.as_deref(),
                );
                self.banner.init(page, self.storage.as_ref());
                self.newsletter.init(page, self.storage.as_ref());
                Dispatch::default()
            }
            PageEvent::Focus { pair } => self.activate(page, pair, Activation::Focus),
            PageEvent::Touch { pair } => self.activate(page, pair, Activation::Touch),
            PageEvent::Input { pair, value } => Dispatch {
                outcome: self.controller.on_input(&self.client, page, pair, &value),
                ..Dispatch::default()
            },
            PageEvent::KeyDown(key) => {
                let prevent = self.controller.on_key(page, &key, self.nav.is_open());
                if key.is_escape() {
                    self.panel.on_escape(page);
                }
                Dispatch {
                    prevent_default: prevent,
                    ..Dispatch::default()
                }
            }
            PageEvent::Click { path } => {
                self.controller.on_click(page, &path);
                Dispatch::default()
            }
            PageEvent::ThemeToggle => {
                self.theme.cycle(page, self.storage.as_mut());
                Dispatch::default()
            }
            PageEvent::SystemTheme { dark } => {
                self.theme.system_changed(page, dark);
                Dispatch::default()
            }
            PageEvent::MobileMenuToggle => {
                self.nav.toggle(page);
                Dispatch::default()
            }
            PageEvent::MobileNavLink => {
                self.nav.close(page);
                Dispatch::default()
            }
            PageEvent::SidebarToggle { button_id, group_id } => {
                self.sidebar.toggle(page, &button_id, group_id.as_deref());
                Dispatch::prevent()
            }
            PageEvent::TocLink {
                target_id,
                element_top,
                scroll_y,
            } => {
                self.toc.link_clicked(page, &target_id, element_top, scroll_y);
                Dispatch::prevent()
            }
            PageEvent::HeadingVisible { id } => {
                self.toc.heading_visible(page, &id);
                Dispatch::default()
            }
            PageEvent::BannerClose => {
                self.banner.close(page, self.storage.as_mut());
                Dispatch::default()
            }
            PageEvent::NewsletterSubmit(form) => Dispatch {
                submit: self.newsletter.begin_submit(page, &form),
                prevent_default: true,
                ..Dispatch::default()
            },
            PageEvent::PanelToggle { viewport_width } => {
                self.panel.toggle(page, viewport_width);
                Dispatch::prevent()
            }
            PageEvent::PanelClose => {
                self.panel.close(page);
                Dispatch::default()
            }
            PageEvent::PanelExpand => {
                self.panel.toggle_expanded(page);
                Dispatch::default()
            }
        }
    }

    fn activate<P: Page + ?Sized>(&mut self, page: &mut P, pair: PairId, how: Activation) -> Dispatch {
        Dispatch {
            load: self.controller.on_activate(&self.client, page, pair, how),
            ..Dispatch::default()
        }
    }

    /// Complete the index load started by a dispatch.
    pub fn finish_load(&self, ticket: LoadTicket, body: Result<Vec<u8>, LoadError>) -> bool {
        self.client.finish_load(ticket, body)
    }

    /// Complete the index load by fetching from `source`.
    pub async fn complete_load<S: DocumentSource>(&self, ticket: LoadTicket, source: &S) {
        self.client.run_load(ticket, source).await;
    }

    /// Complete a newsletter submission started by a dispatch.
    pub fn finish_submit<P: Page + ?Sized>(
        &mut self,
        page: &mut P,
        ticket: SubmitTicket,
        result: Result<(), SubmitError>,
    ) -> bool {
        self.newsletter
            .finish_submit(page, self.storage.as_mut(), ticket, result)
    }

    /// Submit a form end to end through `transport`.
    pub async fn submit<P: Page + ?Sized, T: FormTransport>(
        &mut self,
        page: &mut P,
        transport: &T,
        form: &FormSubmission,
    ) -> bool {
        self.newsletter
            .submit(page, self.storage.as_mut(), transport, form)
            .await
    }
}
