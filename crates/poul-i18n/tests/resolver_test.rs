//! Resolution contract tests: fail-soft lookups, substitution, and the locale lock

use poul_common::test_utils::init_test_logging;
use poul_i18n::{
    params, resolve, resolve_detailed, Catalog, I18nManager, LocaleRequest, LocaleState, LocaleTag,
    Node, Params, SwitchPolicy,
};
use proptest::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

/// Counts warn-level events on the current thread.
struct WarnCounter(Arc<AtomicUsize>);

impl<S: Subscriber> Layer<S> for WarnCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::WARN {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

fn count_warnings<T>(f: impl FnOnce() -> T) -> (T, usize) {
    let counter = Arc::new(AtomicUsize::new(0));
    let subscriber = tracing_subscriber::registry().with(WarnCounter(Arc::clone(&counter)));
    let out = tracing::subscriber::with_default(subscriber, f);
    (out, counter.load(Ordering::SeqCst))
}

fn tournament_catalog() -> Catalog {
    Catalog::builder()
        .locale(
            "en",
            Node::group([
                ("x", Node::leaf("Ready: {{count}}")),
                ("greeting", Node::leaf("Hello {{name}}")),
                ("nav", Node::group([("home", Node::leaf("Home"))])),
            ]),
        )
        .locale(
            "fr",
            Node::group([
                ("x", Node::leaf("Prêt : {{count}}")),
                ("greeting", Node::leaf("Bonjour {{name}}")),
                ("nav", Node::group([("home", Node::leaf("Accueil"))])),
            ]),
        )
        .build()
        .unwrap()
}

#[test]
fn test_missing_path_emits_exactly_one_diagnostic() {
    let catalog = tournament_catalog();
    let (text, warnings) = count_warnings(|| resolve(&catalog, "en", "nav.rankings", None));
    assert_eq!(text, "nav.rankings");
    assert_eq!(warnings, 1);

    let (text, warnings) = count_warnings(|| resolve(&catalog, "nl", "nav.home", None));
    assert_eq!(text, "nav.home");
    assert_eq!(warnings, 1);
}

#[test]
fn test_found_path_emits_nothing() {
    let catalog = tournament_catalog();
    let (text, warnings) =
        count_warnings(|| resolve(&catalog, "en", "x", Some(&params!["count" => 3])));
    assert_eq!(text, "Ready: 3");
    assert_eq!(warnings, 0);
}

#[test]
fn test_unbound_parameter_keeps_token_and_warns() {
    let catalog = tournament_catalog();
    let (text, warnings) =
        count_warnings(|| resolve(&catalog, "en", "greeting", Some(&Params::new())));
    assert_eq!(text, "Hello {{name}}");
    assert_eq!(warnings, 1);
}

#[test]
fn test_group_path_is_not_dumped() {
    init_test_logging();
    let catalog = tournament_catalog();
    assert_eq!(resolve(&catalog, "en", "nav", None), "nav");
}

#[test]
fn test_locale_lock_regression() {
    init_test_logging();
    let catalog = Arc::new(tournament_catalog());
    let state = Arc::new(LocaleState::new(
        LocaleTag::parse("fr").unwrap(),
        SwitchPolicy::Locked,
    ));
    let manager = I18nManager::new(Arc::clone(&catalog), Arc::clone(&state));

    let before = manager.t("nav.home");
    assert_eq!(manager.set_language("en"), LocaleRequest::Locked);
    assert_eq!(state.request("en"), LocaleRequest::Locked);
    let after = manager.t("nav.home");

    assert_eq!(before, "Accueil");
    assert_eq!(after, before);
    assert_ne!(after, resolve(&catalog, "en", "nav.home", None));
}

#[test]
fn test_shipped_admin_message() {
    let manager = I18nManager::new(Catalog::builtin(), Arc::new(LocaleState::default()));
    let params = params!["teams" => 8, "games" => 12, "results" => 10];
    assert_eq!(
        manager.t_with("home.admin.successMessage", &params),
        "Base de données effacée! Supprimé 8 équipes, 12 parties, et 10 résultats."
    );
}

proptest! {
    #[test]
    fn prop_absent_paths_echo(segments in prop::collection::vec("[a-z]{1,8}", 1..5)) {
        let catalog = tournament_catalog();
        let path = format!("missing.{}", segments.join("."));
        let resolution = resolve_detailed(&catalog, "en", &path, None);
        prop_assert_eq!(&resolution.text, &path);
        prop_assert_eq!(resolution.issues.len(), 1);
    }

    #[test]
    fn prop_token_free_leaf_is_identity(text in "[^{}]*", value in any::<i64>()) {
        let catalog = Catalog::builder()
            .locale("en", Node::group([("leaf", Node::leaf(text.clone()))]))
            .build()
            .unwrap();
        prop_assert_eq!(resolve_detailed(&catalog, "en", "leaf", None).text, text.clone());
        let params = params!["count" => value];
        prop_assert_eq!(resolve_detailed(&catalog, "en", "leaf", Some(&params)).text, text);
    }

    #[test]
    fn prop_values_are_inserted_literally(value in ".*") {
        let catalog = tournament_catalog();
        let params = params!["name" => value.clone()];
        let resolution = resolve_detailed(&catalog, "en", "greeting", Some(&params));
        prop_assert_eq!(resolution.text, format!("Hello {value}"));
        prop_assert!(resolution.issues.is_empty());
    }

    #[test]
    fn prop_resolution_is_idempotent(count in any::<u32>()) {
        let catalog = tournament_catalog();
        let params = params!["count" => count];
        let first = resolve_detailed(&catalog, "fr", "x", Some(&params));
        let second = resolve_detailed(&catalog, "fr", "x", Some(&params));
        prop_assert_eq!(first, second);
    }
}
