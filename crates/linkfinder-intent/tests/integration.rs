//! Integration tests for the linkfinder-intent crate.
//!
//! These drive whole sessions through the public API the way the chat UI
//! does: one `process_message` call per user message.

use std::sync::Arc;

use linkfinder_intent::{
    ActivePanel, ChatMessage, ContextUpdate, Intent, IntentRouter, Rule, Session, Technology,
    ZipCode,
};

fn session() -> Session {
    Session::new(Arc::new(IntentRouter::new().unwrap()))
}

fn zip(s: &str) -> ZipCode {
    ZipCode::parse(s).unwrap()
}

// ═══════════════════════════════════════════════════════════════════════
//  Scenarios
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn bare_zip_shows_recommendations() {
    let mut s = session();
    assert_eq!(s.process_message("78701"), Some(Rule::Zip));
    assert_eq!(s.context().zip_code(), Some(&zip("78701")));
    assert_eq!(
        serde_json::to_value(s.active_panel()).unwrap(),
        serde_json::json!({"type": "recommendations", "data": {"zipCode": "78701"}})
    );
}

#[test]
fn provider_then_comparison() {
    let mut s = session();
    assert_eq!(s.process_message("I have spectrum"), None);
    assert_eq!(s.active_panel(), &ActivePanel::Welcome);

    assert_eq!(s.process_message("compare to att"), Some(Rule::Comparison));
    assert_eq!(
        s.active_panel(),
        &ActivePanel::Comparison {
            providers: ["Spectrum".into(), "AT&T".into()]
        }
    );
    assert!(s.context().comparison_requested());
}

#[test]
fn speed_test_request() {
    let mut s = session();
    s.process_message("run a speed test");
    assert_eq!(s.active_panel(), &ActivePanel::SpeedTest);
    assert_eq!(s.context().intent(), Some(Intent::SpeedTest));
    assert_eq!(
        serde_json::to_value(s.context()).unwrap()["intent"],
        "speedtest"
    );
}

#[test]
fn street_address_lookup() {
    let mut s = session();
    s.process_message("123 Main St, Austin, TX");
    assert_eq!(
        s.active_panel(),
        &ActivePanel::AddressAvailability {
            address: Some("123 Main St, Austin, TX".into())
        }
    );
    assert!(s.context().zip_code().is_none());
}

// ═══════════════════════════════════════════════════════════════════════
//  Properties
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn first_zip_wins() {
    let mut s = session();
    s.process_message("hi there");
    assert!(s.context().zip_code().is_none());

    for message in [
        "I live near 30301",
        "actually make that 94110",
        "my zip is 10001",
        "78701",
    ] {
        s.process_message(message);
        assert_eq!(s.context().zip_code(), Some(&zip("30301")), "{message}");
    }
}

#[test]
fn mentions_only_grow() {
    let messages = [
        "fiber from att?",
        "or cable from spectrum",
        "asdkjfh",
        "78701",
        "what about starlink satellite or 5g from tmobile",
        "dsl",
        "att again",
    ];
    let mut s = session();
    let mut previous_providers: Vec<String> = Vec::new();
    let mut previous_techs: Vec<Technology> = Vec::new();

    for message in messages {
        s.process_message(message);
        let providers = s.context().mentioned_providers();
        let techs = s.context().mentioned_technologies();
        assert!(previous_providers.iter().all(|p| providers.contains(p)), "{message}");
        assert!(previous_techs.iter().all(|t| techs.contains(t)), "{message}");
        previous_providers = providers.to_vec();
        previous_techs = techs.to_vec();
    }

    assert_eq!(
        previous_providers,
        ["AT&T", "Spectrum", "T-Mobile", "Starlink"]
    );
    assert_eq!(previous_techs.len(), 5);
}

#[test]
fn zip_preempts_address() {
    let mut s = session();
    assert_eq!(
        s.process_message("123 Main St, Austin, TX 78701"),
        Some(Rule::Zip)
    );
    assert_eq!(
        s.active_panel(),
        &ActivePanel::Recommendations {
            zip_code: zip("78701")
        }
    );
}

#[test]
fn comparison_requires_two_providers() {
    let mut s = session();
    s.process_message("compare att");
    assert!(!matches!(s.active_panel(), ActivePanel::Comparison { .. }));
    assert!(!s.context().comparison_requested());

    let mut s = session();
    s.process_message("compare att and spectrum");
    assert_eq!(
        s.active_panel(),
        &ActivePanel::Comparison {
            providers: ["AT&T".into(), "Spectrum".into()]
        }
    );
}

#[test]
fn gibberish_is_a_no_op() {
    let mut s = session();
    s.process_message("I have cox");
    s.process_message("run a speed test");
    let before = s.snapshot();

    assert_eq!(s.process_message("asdkjfh"), None);

    let after = s.snapshot();
    assert_eq!(after.context, before.context);
    assert_eq!(after.active_panel, before.active_panel);
}

// ═══════════════════════════════════════════════════════════════════════
//  Session surface
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn explicit_zip_entry_then_chat() {
    let mut s = session();
    s.set_zip_code("60601").unwrap();
    assert_eq!(s.active_panel().kind(), "recommendations");

    // A later ZIP in chat neither overwrites nor preempts.
    assert_eq!(s.process_message("what about 10001 coverage"), Some(Rule::Coverage));
    assert_eq!(
        s.active_panel(),
        &ActivePanel::Coverage {
            zip_code: zip("60601")
        }
    );

    assert_eq!(s.process_message("verizon"), Some(Rule::SingleProvider));
    assert_eq!(s.go_back().kind(), "recommendations");
}

#[test]
fn transcript_replay_ignores_assistant_turns() {
    let transcript = [
        ChatMessage::assistant("Hi! What's your ZIP? For example 90210."),
        ChatMessage::user("tell me about google fiber"),
        ChatMessage::assistant("Google Fiber vs AT&T: both are great."),
        ChatMessage::user("quiz me"),
    ];
    let mut s = session();
    let rules: Vec<_> = transcript.iter().map(|m| s.ingest(m)).collect();

    assert_eq!(rules, [None, Some(Rule::ProviderDetail), None, Some(Rule::Quiz)]);
    assert!(s.context().zip_code().is_none());
    assert_eq!(s.context().mentioned_providers(), ["Google Fiber"]);
    assert_eq!(s.context().last_provider(), Some("google-fiber"));
    assert_eq!(s.context().preferred_technology(), Some(Technology::Fiber));
}

#[test]
fn manual_panel_and_context_updates() {
    let mut s = session();
    s.show_panel(ActivePanel::AddressAvailability { address: None });
    assert_eq!(s.active_panel().kind(), "addressAvailability");

    s.update_context(
        ContextUpdate::new()
            .provider("Frontier")
            .last_provider("frontier")
            .comparison_requested(true),
    );
    assert_eq!(s.context().last_provider(), Some("frontier"));
    assert!(s.context().comparison_requested());
    assert_eq!(s.go_back(), &ActivePanel::Welcome);
}

#[test]
fn sessions_share_a_router_but_not_state() {
    let router = Arc::new(IntentRouter::new().unwrap());
    let mut a = Session::new(Arc::clone(&router));
    let mut b = Session::new(router);

    a.process_message("78701");
    b.process_message("take the quiz");

    assert_ne!(a.id(), b.id());
    assert_eq!(a.active_panel().kind(), "recommendations");
    assert_eq!(b.active_panel(), &ActivePanel::Quiz);
    assert!(b.context().zip_code().is_none());
}
