//! Email capture form submission.

use super::common::*;
use sitekit::page::newsletter::FormSubmission;
use sitekit::{MemoryStorage, PageEvent, SiteConfig, Storage, StorageScope, SubmitError, Target};

const KEY: &str = "hugo-newsletter-subscribed";

fn form() -> FormSubmission {
    FormSubmission {
        card_id: "capture-footer".into(),
        form_id: "capture-footer-form".into(),
        action: "https://forms.example.com/subscribe".into(),
        fields: vec![("email".into(), "reader@example.com".into())],
        button_label: "Subscribe".into(),
    }
}

fn button() -> Target {
    Target::within("capture-footer-form", "button")
}

#[test]
fn test_submit_event_disables_the_button() {
    let mut page = MemoryPage::new();
    let mut session = session();

    let dispatch = session.handle(&mut page, PageEvent::NewsletterSubmit(form()));
    assert!(dispatch.prevent_default);
    assert_eq!(dispatch.submit.as_ref().map(|t| t.form_id()), Some("capture-footer-form"));
    assert_eq!(page.text(&button()), Some("Sending..."));
    assert!(page.is_disabled(&button()));

    // A double click while in flight does not start a second request.
    let again = session.handle(&mut page, PageEvent::NewsletterSubmit(form()));
    assert!(again.submit.is_none());

    let _ = session.finish_submit(&mut page, dispatch.submit.unwrap(), Ok(()));
}

#[test]
fn test_success_swaps_in_the_thank_you() {
    let mut page = MemoryPage::new();
    let mut session = session();
    let dispatch = session.handle(&mut page, PageEvent::NewsletterSubmit(form()));

    assert!(session.finish_submit(&mut page, dispatch.submit.unwrap(), Ok(())));
    assert!(session.newsletter().is_subscribed());
    assert_eq!(session.storage().get(StorageScope::Local, KEY).as_deref(), Some("true"));
    assert!(page.has_class_on(
        &Target::within("capture-footer", ".js-email-form-wrapper"),
        "hidden"
    ));
    assert!(!page.has_class_on(
        &Target::within("capture-footer", ".js-email-success-message"),
        "hidden"
    ));
    assert!(page.alerts().is_empty());
}

#[test]
fn test_failure_alerts_and_restores_the_form() {
    let mut page = MemoryPage::new();
    let mut session = session();
    let dispatch = session.handle(&mut page, PageEvent::NewsletterSubmit(form()));

    let failure = SubmitError::Network {
        action: "https://forms.example.com/subscribe".into(),
        reason: "Failed to fetch".into(),
    };
    assert!(!session.finish_submit(&mut page, dispatch.submit.unwrap(), Err(failure)));

    assert_eq!(page.alerts(), &["Something went wrong. Please try again.".to_string()]);
    assert_eq!(page.text(&button()), Some("Subscribe"));
    assert!(!page.is_disabled(&button()));
    assert_eq!(session.storage().get(StorageScope::Local, KEY), None);

    // The form can be submitted again.
    let retry = session.handle(&mut page, PageEvent::NewsletterSubmit(form()));
    assert!(retry.submit.is_some());
    let _ = session.finish_submit(&mut page, retry.submit.unwrap(), Ok(()));
}

#[tokio::test]
async fn test_transport_receives_encoded_form() {
    let mut page = MemoryPage::new();
    let mut session = session();
    let transport = RecordingTransport::new();

    assert!(session.submit(&mut page, &transport, &form()).await);
    assert_eq!(
        transport.posts(),
        vec![(
            "https://forms.example.com/subscribe".to_string(),
            "email=reader%40example.com".to_string()
        )]
    );
}

#[tokio::test]
async fn test_rejected_transport_alerts() {
    let mut page = MemoryPage::new();
    let mut session = session();

    assert!(!session.submit(&mut page, &RecordingTransport::failing(), &form()).await);
    assert_eq!(page.alerts().len(), 1);
    assert!(!session.newsletter().is_subscribed());
}

#[tokio::test]
async fn test_form_without_action_never_posts() {
    let mut page = MemoryPage::new();
    let mut session = session();
    let transport = RecordingTransport::new();
    let form = FormSubmission {
        action: String::new(),
        ..form()
    };

    assert!(!session.submit(&mut page, &transport, &form).await);
    assert!(transport.posts().is_empty());
    assert_eq!(page.alerts().len(), 1);
}

#[test]
fn test_subscribed_visitors_never_see_cards() {
    let storage = MemoryStorage::new().with(StorageScope::Local, KEY, "true");
    let mut page = MemoryPage::new();
    let mut session = session_with(SiteConfig::default(), storage);

    let _ = session.handle(&mut page, PageEvent::Ready { banner_key: None });
    assert!(session.newsletter().is_subscribed());
    assert!(page.was_removed(&Target::all(".email-capture-card")));
}

#[test]
fn test_form_event_from_host_json() {
    let raw = r#"{
        "type": "newsletterSubmit",
        "cardId": "capture-footer",
        "formId": "capture-footer-form",
        "action": "https://forms.example.com/subscribe",
        "fields": [["email", "reader@example.com"]],
        "buttonLabel": "Subscribe"
    }"#;
    let event: PageEvent = serde_json::from_str(raw).unwrap();
    assert_eq!(event, PageEvent::NewsletterSubmit(form()));
}
