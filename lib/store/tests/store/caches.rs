use crate::test_utils::{property, wiki, BrokenFacts, CountingFacts, FACTS};
use askql_compiler::lookup::{HierarchyLookup, RedirectLookup, RedirectTarget};
use askql_store::{HierarchyCache, RedirectCache};
use std::sync::Arc;

#[test]
fn test_hierarchy_probes_once_per_resource() {
    let facts = Arc::new(CountingFacts::with_facts(FACTS));
    let hierarchy = HierarchyCache::new(Arc::clone(&facts) as _);

    assert!(hierarchy.has_subproperty_for(&property("Located_in")));
    assert!(hierarchy.has_subproperty_for(&property("Located_in")));
    assert_eq!(facts.probes(), 1);

    assert!(!hierarchy.has_subproperty_for(&property("Population")));
    assert!(!hierarchy.has_subproperty_for(&property("Population")));
    assert_eq!(facts.probes(), 2);

    assert!(hierarchy.has_subcategory_for(&wiki("Category-3ACity")));
    assert!(!hierarchy.has_subcategory_for(&wiki("Category-3ACapital")));
    assert_eq!(facts.probes(), 4);
}

#[test]
fn test_hierarchy_keeps_properties_and_categories_apart() {
    let facts = Arc::new(CountingFacts::with_facts(FACTS));
    let hierarchy = HierarchyCache::new(Arc::clone(&facts) as _);

    assert!(hierarchy.has_subproperty_for(&property("Located_in")));
    assert!(!hierarchy.has_subcategory_for(&property("Located_in")));
    assert_eq!(facts.probes(), 2);
}

#[test]
fn test_hierarchy_invalidate_forgets_answers() {
    let facts = Arc::new(CountingFacts::with_facts(FACTS));
    let hierarchy = HierarchyCache::new(Arc::clone(&facts) as _);

    assert!(hierarchy.has_subcategory_for(&wiki("Category-3ACity")));
    hierarchy.invalidate();
    assert!(hierarchy.has_subcategory_for(&wiki("Category-3ACity")));
    assert_eq!(facts.probes(), 2);
}

#[test]
fn test_hierarchy_failures_are_not_cached() {
    let facts = Arc::new(BrokenFacts::default());
    let hierarchy = HierarchyCache::new(Arc::clone(&facts) as _);

    assert!(!hierarchy.has_subproperty_for(&property("Located_in")));
    assert!(!hierarchy.has_subproperty_for(&property("Located_in")));
    assert_eq!(facts.probes(), 2);
}

#[test]
fn test_redirect_targets() {
    let facts = Arc::new(CountingFacts::with_facts(FACTS));
    let redirects = RedirectCache::new(Arc::clone(&facts) as _);

    assert_eq!(
        redirects.target_of(&wiki("Bln")),
        RedirectTarget {
            target: wiki("Berlin"),
            existed: true
        }
    );
    assert_eq!(
        redirects.target_of(&wiki("Berlin")),
        RedirectTarget {
            target: wiki("Berlin"),
            existed: true
        }
    );
    assert_eq!(
        redirects.target_of(&wiki("Atlantis")),
        RedirectTarget {
            target: wiki("Atlantis"),
            existed: false
        }
    );
    assert_eq!(redirects.len(), 3);
}

#[test]
fn test_redirects_are_cached_until_invalidated() {
    let facts = Arc::new(CountingFacts::with_facts(FACTS));
    let redirects = RedirectCache::new(Arc::clone(&facts) as _);

    redirects.target_of(&wiki("Bln"));
    let probes = facts.probes();
    redirects.target_of(&wiki("Bln"));
    assert_eq!(facts.probes(), probes);

    redirects.invalidate();
    assert!(redirects.is_empty());
    redirects.target_of(&wiki("Bln"));
    assert_eq!(facts.probes(), 2 * probes);
}

#[test]
fn test_redirect_failures_fall_back_to_the_resource() {
    let facts = Arc::new(BrokenFacts::default());
    let redirects = RedirectCache::new(Arc::clone(&facts) as _);

    let target = redirects.target_of(&wiki("Bln"));

    assert_eq!(target.target, wiki("Bln"));
    assert!(!target.existed);
    assert!(redirects.is_empty());
    assert_eq!(facts.probes(), 1);
}
