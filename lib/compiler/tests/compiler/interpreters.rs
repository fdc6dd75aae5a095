use crate::test_utils::{StaticHierarchy, StaticRedirects, TestResult, create_builder, parse, wiki};
use askql_compiler::{CompileContext, CompilerOptions, Condition, MatchElement, SortDirection};
use askql_model::{
    Comparator, DataItem, DataItemKind, Description, NamedNode, Property, WikiPage, vocab,
};
use std::sync::Arc;

fn page_value(title: &str, comparator: Comparator) -> Description {
    Description::value(None, DataItem::Page(WikiPage::new(title, 0)), comparator)
}

#[test]
fn test_thing_is_true() {
    let mut builder = create_builder(CompilerOptions::default());
    let condition = builder.compile(&Description::Thing, &CompileContext::new("x"));
    assert_eq!(condition, Condition::new_true());
}

#[test]
fn test_class_without_categories_is_false() {
    let mut builder = create_builder(CompilerOptions::default());
    let condition = builder.compile(&Description::Class(Vec::new()), &CompileContext::result());
    assert!(condition.is_false());
}

#[test]
fn test_class_with_two_categories_is_union() {
    let mut builder = create_builder(CompilerOptions::default());
    let description = Description::class([WikiPage::category("A"), WikiPage::category("B")]);

    let condition = builder.compile(&description, &CompileContext::new("r1"));

    assert!(condition.is_safe());
    insta::assert_snapshot!(condition.pattern(), @r"
    { ?r1 rdf:type wiki:Category-3AA . }
    UNION
    { ?r1 rdf:type wiki:Category-3AB . }
    ");
}

#[test]
fn test_class_uses_subcategory_closure() {
    let hierarchy = StaticHierarchy::default().with_subcategory(wiki("Category-3ACity"));
    let mut builder =
        create_builder(CompilerOptions::default()).with_hierarchy_lookup(Arc::new(hierarchy));

    let condition = builder.compile(
        &Description::class([WikiPage::category("City")]),
        &CompileContext::result(),
    );

    assert!(condition.namespaces().contains("rdfs"));
    insta::assert_snapshot!(condition.pattern(), @"{ ?result rdf:type/rdfs:subClassOf* wiki:Category-3ACity . }");
}

#[test]
fn test_class_closure_can_be_disabled() {
    let hierarchy = StaticHierarchy::default().with_subcategory(wiki("Category-3ACity"));
    let mut builder = create_builder(CompilerOptions::default().with_subcategory_closure(false))
        .with_hierarchy_lookup(Arc::new(hierarchy));

    let condition = builder.compile(
        &Description::class([WikiPage::category("City")]),
        &CompileContext::result(),
    );

    assert!(!condition.pattern().contains("subClassOf"));
}

#[test]
fn test_page_equality_is_singleton() {
    let mut builder = create_builder(CompilerOptions::default());

    let condition = builder.compile(
        &page_value("Berlin", Comparator::Equal),
        &CompileContext::new("x"),
    );

    let Condition::Singleton(singleton) = &condition else {
        panic!("expected a singleton, got {condition:?}");
    };
    assert_eq!(singleton.match_element().turtle_name(), "wiki:Berlin");
    assert_eq!(condition.pattern(), "");
    assert!(!condition.is_safe());
}

#[test]
fn test_unknown_comparators_are_true() {
    let mut builder = create_builder(CompilerOptions::default());
    for comparator in [Comparator::In, Comparator::Phrase, Comparator::Not] {
        let condition = builder.compile(&page_value("Berlin", comparator), &CompileContext::new("x"));
        assert!(matches!(condition, Condition::True(_)), "{comparator:?}");
    }
}

#[test]
fn test_like_on_number_is_true() {
    let mut builder = create_builder(CompilerOptions::default());
    let description = Description::value(None, DataItem::Number(3.0), Comparator::Like);
    let condition = builder.compile(&description, &CompileContext::new("x"));
    assert!(matches!(condition, Condition::True(_)));
}

#[test]
fn test_invalid_uri_is_false() {
    let mut builder = create_builder(CompilerOptions::default());
    let description = Description::value(
        None,
        DataItem::Uri("not a uri".to_owned()),
        Comparator::Equal,
    );
    let condition = builder.compile(&description, &CompileContext::new("x"));
    assert!(condition.is_false());
}

#[test]
fn test_like_on_uri_ignores_case() {
    let mut builder = create_builder(CompilerOptions::default());
    let description = Description::value(
        None,
        DataItem::Uri("http://example.com/*".to_owned()),
        Comparator::NotLike,
    );
    let condition = builder.compile(&description, &CompileContext::new("x"));
    assert_eq!(
        condition.filter(),
        Some(r#"!regex( str( ?x ), "^http://example\\.com/.*$", "i" )"#)
    );
}

#[test]
fn test_like_on_page_uses_sort_key() {
    let mut builder = create_builder(CompilerOptions::default());

    let condition = builder.compile(&page_value("Ber*", Comparator::Like), &CompileContext::new("x"));

    let Condition::Singleton(singleton) = &condition else {
        panic!("expected a singleton, got {condition:?}");
    };
    assert_eq!(
        singleton.match_element(),
        &MatchElement::Variable("?x".to_owned())
    );
    assert!(condition.is_safe());
    assert_eq!(condition.pattern(), "?x swivt:wikiPageSortKey ?v1 .\n");
    assert_eq!(
        condition.weak_condition_text(),
        "FILTER( regex( ?v1, \"^Ber.*$\", \"s\" ) )\n"
    );
}

#[test]
fn test_page_comparison_uses_sort_key() {
    let mut builder = create_builder(CompilerOptions::default());

    let condition = builder.compile(
        &page_value("M", Comparator::GreaterOrEqual),
        &CompileContext::new("x"),
    );

    assert_eq!(condition.filter(), Some(r#"?xsk >= "M""#));
    assert_eq!(condition.order_by_variable(), Some("xsk"));
    assert_eq!(
        condition.weak_condition_text(),
        "?x swivt:wikiPageSortKey ?xsk .\n"
    );
}

#[test]
fn test_inverse_property_swaps_subject_and_object() {
    let mut builder = create_builder(CompilerOptions::default());
    let description = Description::some_property(
        Property::new("Capital").with_inverse(true),
        page_value("Berlin", Comparator::Equal),
    );

    let condition = builder.compile(&description, &CompileContext::new("r1"));

    assert!(condition.is_safe());
    assert!(condition.namespaces().contains("wiki"));
    assert!(condition.namespaces().contains("property"));
    assert_eq!(condition.pattern(), "wiki:Berlin property:Capital ?r1 .\n");
}

#[test]
fn test_property_with_nested_condition_is_wrapped() -> TestResult {
    let mut builder = create_builder(CompilerOptions::default());

    let condition = builder.compile(
        &parse("[[Located in::<q>[[Category:Country]]</q>]]")?,
        &CompileContext::result(),
    );

    insta::assert_snapshot!(condition.pattern(), @r"
    ?result property:Located_in ?v1 .
    { { ?v1 rdf:type wiki:Category-3ACountry . }
    }
    ");
    Ok(())
}

#[test]
fn test_false_inner_condition_is_false() {
    let mut builder = create_builder(CompilerOptions::default());
    let description = Description::some_property(
        Property::new("Located in"),
        Description::Class(Vec::new()),
    );
    let condition = builder.compile(&description, &CompileContext::result());
    assert!(condition.is_false());
}

#[test]
fn test_subproperty_closure() -> TestResult {
    let hierarchy = StaticHierarchy::default().with_subproperty(wiki("Property-3ALocated_in"));
    let mut builder =
        create_builder(CompilerOptions::default()).with_hierarchy_lookup(Arc::new(hierarchy));

    let condition = builder.compile(&parse("[[Located in::Germany]]")?, &CompileContext::result());

    assert_eq!(condition.pattern(), "?result ?sp2 wiki:Germany .\n");
    assert_eq!(
        condition.weak_conditions().get("sp2").map(String::as_str),
        Some("?sp2 rdfs:subPropertyOf* property:Located_in .\n")
    );
    assert!(condition.namespaces().contains("rdfs"));
    Ok(())
}

#[test]
fn test_no_closure_for_builtin_properties() -> TestResult {
    let hierarchy = StaticHierarchy::default()
        .with_subproperty(wiki("Property-3AInstance_of"))
        .with_subproperty(NamedNode::new_unchecked(format!("{}type", vocab::rdf::NAMESPACE)));
    let mut builder =
        create_builder(CompilerOptions::default()).with_hierarchy_lookup(Arc::new(hierarchy));

    let condition = builder.compile(&parse("[[Instance of::Germany]]")?, &CompileContext::result());

    assert_eq!(condition.pattern(), "?result rdf:type wiki:Germany .\n");
    assert!(condition.weak_conditions().is_empty());
    Ok(())
}

#[test]
fn test_redirected_value_uses_redirect_variable() -> TestResult {
    let redirects = StaticRedirects::default().with_redirect(wiki("Bln"), wiki("Berlin"));
    let mut builder =
        create_builder(CompilerOptions::default()).with_redirect_lookup(Arc::new(redirects));

    let condition = builder.build_condition(&parse("[[Capital::Bln]]")?);

    assert_eq!(condition.pattern(), "?result property:Capital ?r2 .\n");
    assert_eq!(
        condition.weak_conditions().get("r2").map(String::as_str),
        Some("?r2 ^swivt:redirectsTo? wiki:Berlin .\n")
    );
    assert!(condition.namespaces().contains("swivt"));
    Ok(())
}

#[test]
fn test_redirect_resolution_can_be_disabled() -> TestResult {
    let redirects = StaticRedirects::default().with_redirect(wiki("Bln"), wiki("Berlin"));
    let mut builder = create_builder(CompilerOptions::default().with_redirect_resolution(false))
        .with_redirect_lookup(Arc::new(redirects));

    let condition = builder.build_condition(&parse("[[Capital::Bln]]")?);

    assert_eq!(condition.pattern(), "?result property:Capital wiki:Bln .\n");
    assert!(condition.weak_conditions().is_empty());
    Ok(())
}

#[test]
fn test_redirected_standalone_value_is_filter() -> TestResult {
    let redirects = StaticRedirects::default().with_redirect(wiki("Bln"), wiki("Berlin"));
    let mut builder =
        create_builder(CompilerOptions::default()).with_redirect_lookup(Arc::new(redirects));

    let condition = builder.build_condition(&parse("[[Bln]]")?);

    assert_eq!(condition.filter(), Some("?result = ?r1"));
    Ok(())
}

#[test]
fn test_conjunction_with_false_child_is_false() {
    let unsatisfiable =
        Description::value(None, DataItem::Uri("not a uri".to_owned()), Comparator::Equal);
    let siblings = [
        Description::class([WikiPage::category("A")]),
        page_value("Berlin", Comparator::Equal),
    ];

    for position in 0..=siblings.len() {
        let mut children = siblings.to_vec();
        children.insert(position, unsatisfiable.clone());
        let mut builder = create_builder(CompilerOptions::default());
        let condition = builder.compile(&Description::and(children), &CompileContext::result());
        assert!(condition.is_false(), "false child at position {position}");
    }
}

#[test]
fn test_conjunction_of_different_singletons_is_false() {
    let mut builder = create_builder(CompilerOptions::default());
    let description = Description::and([
        page_value("Berlin", Comparator::Equal),
        page_value("Paris", Comparator::Equal),
    ]);
    assert!(builder.compile(&description, &CompileContext::result()).is_false());
}

#[test]
fn test_conjunction_of_true_children_is_true() {
    let mut builder = create_builder(CompilerOptions::default());
    let description = Description::and([Description::Thing, Description::Thing]);
    let condition = builder.compile(&description, &CompileContext::result());
    assert!(matches!(condition, Condition::True(_)));
}

#[test]
fn test_conjunction_of_filters() {
    let mut builder = create_builder(CompilerOptions::default());
    let description = Description::and([
        Description::value(None, DataItem::Number(1.0), Comparator::Greater),
        Description::value(None, DataItem::Number(5.0), Comparator::Less),
    ]);

    let condition = builder.compile(&description, &CompileContext::new("x"));

    assert_eq!(
        condition.filter(),
        Some(
            r#"?x > "1"^^<http://www.w3.org/2001/XMLSchema#double> && ?x < "5"^^<http://www.w3.org/2001/XMLSchema#double>"#
        )
    );
}

#[test]
fn test_single_child_compiles_like_the_child() {
    let child = Description::class([WikiPage::category("A")]);
    let context = CompileContext::new("x");
    let expected = create_builder(CompilerOptions::default()).compile(&child, &context);

    for description in [
        Description::Conjunction(vec![child.clone()]),
        Description::Disjunction(vec![child.clone()]),
    ] {
        let actual = create_builder(CompilerOptions::default()).compile(&description, &context);
        assert_eq!(actual, expected);
    }
}

#[test]
fn test_disjunction_with_true_child_is_true() {
    let siblings = [
        Description::class([WikiPage::category("A")]),
        page_value("Berlin", Comparator::Equal),
    ];

    for position in 0..=siblings.len() {
        let mut children = siblings.to_vec();
        children.insert(position, Description::Thing);
        let mut builder = create_builder(CompilerOptions::default());
        let condition = builder.compile(&Description::or(children), &CompileContext::result());
        assert_eq!(
            condition,
            Condition::new_true(),
            "true child at position {position}"
        );
    }
}

#[test]
fn test_disjunction_with_true_child_has_no_order_data() {
    let mut builder = create_builder(CompilerOptions::default());
    let description = Description::or([
        Description::class([WikiPage::category("A")]),
        Description::Thing,
    ]);
    let context =
        CompileContext::new("x").with_order_by_property(Some(Property::new("Located in")));

    let condition = builder.compile(&description, &context);

    assert_eq!(condition.order_by_variable(), None);
    assert!(condition.weak_conditions().is_empty());
    assert_eq!(condition, Condition::new_true());
}

#[test]
fn test_empty_disjunction_is_false() {
    let mut builder = create_builder(CompilerOptions::default());
    let condition = builder.compile(&Description::Disjunction(Vec::new()), &CompileContext::result());
    assert!(condition.is_false());
}

#[test]
fn test_disjunction_of_values_is_filter() {
    let mut builder = create_builder(CompilerOptions::default());
    let description = Description::or([
        page_value("Berlin", Comparator::Equal),
        page_value("Paris", Comparator::Equal),
    ]);

    let condition = builder.compile(&description, &CompileContext::new("x"));

    assert_eq!(condition.filter(), Some("?x = wiki:Berlin || ?x = wiki:Paris"));
    assert!(condition.namespaces().contains("wiki"));
}

#[test]
fn test_disjunction_of_pattern_and_filter_renames_join_variable() {
    let mut builder = create_builder(CompilerOptions::default());
    let description = Description::or([
        Description::class([WikiPage::category("A")]),
        page_value("Paris", Comparator::Equal),
    ]);

    let condition = builder.compile(&description, &CompileContext::new("x"));

    assert!(!condition.is_safe());
    insta::assert_snapshot!(condition.pattern(), @r"
    OPTIONAL { {
    { ?v1 rdf:type wiki:Category-3AA . }
    }
    }
     FILTER( ?x = wiki:Paris || ?x = ?v1 )
    ");
}

#[test]
fn test_disjunction_splices_weak_condition_of_singleton() {
    let mut builder = create_builder(CompilerOptions::default());
    let description = Description::or([
        page_value("Ber*", Comparator::Like),
        Description::class([WikiPage::category("A")]),
    ]);

    let condition = builder.compile(&description, &CompileContext::new("x"));

    assert!(condition.weak_conditions().is_empty());
    insta::assert_snapshot!(condition.pattern(), @r#"
    {
    ?x swivt:wikiPageSortKey ?v1 .
    FILTER( regex( ?v1, "^Ber.*$", "s" ) )
    }
    UNION
    {
    { ?x rdf:type wiki:Category-3AA . }
    }
    "#);
}

#[test]
fn test_disjunction_keeps_further_weak_conditions_of_singleton() {
    let mut builder = create_builder(CompilerOptions::default());
    let description = Description::or([
        Description::and([
            page_value("Ber*", Comparator::Like),
            page_value("*lin", Comparator::Like),
        ]),
        Description::class([WikiPage::category("A")]),
    ]);

    let condition = builder.compile(&description, &CompileContext::new("x"));

    assert_eq!(
        condition.weak_conditions().get("v2").map(String::as_str),
        Some("FILTER( regex( ?v2, \"^.*lin$\", \"s\" ) )\n")
    );
    assert_eq!(condition.weak_conditions().len(), 1);
    insta::assert_snapshot!(condition.pattern(), @r#"
    {
    ?x swivt:wikiPageSortKey ?v1 .
    ?x swivt:wikiPageSortKey ?v2 .
    FILTER( regex( ?v1, "^Ber.*$", "s" ) )
    }
    UNION
    {
    { ?x rdf:type wiki:Category-3AA . }
    }
    "#);
}

#[test]
fn test_sort_key_property_records_order_variable() -> TestResult {
    let options = CompilerOptions::default().with_sort_key("Population", SortDirection::Desc);
    let mut builder = create_builder(options);

    let condition = builder.build_condition(&parse("[[Population::+]]")?);

    assert_eq!(
        condition.order_variables().get("Population").map(String::as_str),
        Some("v1")
    );
    assert_eq!(condition.pattern(), "?result property:Population ?v1 .\n");
    Ok(())
}

#[test]
fn test_missing_sort_key_adds_optional_block() -> TestResult {
    let options = CompilerOptions::default().with_sort_key("Population", SortDirection::Desc);
    let mut builder = create_builder(options);

    let condition = builder.build_condition(&parse("[[Category:City]]")?);

    assert_eq!(
        condition.order_variables().get("Population").map(String::as_str),
        Some("v1")
    );
    assert_eq!(
        condition.weak_conditions().get("v1").map(String::as_str),
        Some("OPTIONAL { ?result property:Population ?v1 .\n}\n")
    );
    Ok(())
}

#[test]
fn test_result_sort_key_orders_by_page_sort_key() -> TestResult {
    let options = CompilerOptions::default().with_sort_key("", SortDirection::Asc);
    let mut builder = create_builder(options);

    let condition = builder.build_condition(&parse("[[Category:City]]")?);

    assert_eq!(
        condition.order_variables().get("").map(String::as_str),
        Some("resultsk")
    );
    assert_eq!(
        condition.weak_conditions().get("resultsk").map(String::as_str),
        Some("?result swivt:wikiPageSortKey ?resultsk .\n")
    );
    Ok(())
}

#[test]
fn test_build_condition_resets_variables() -> TestResult {
    let mut builder = create_builder(CompilerOptions::default());
    let description = parse("[[Located in::Germany]]")?;

    let first = builder.build_condition(&description);
    let second = builder.build_condition(&description);

    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_time_values_are_compared_through_helper() {
    let mut builder = create_builder(CompilerOptions::default());
    let property = Property::new("Founded").with_kind(DataItemKind::Time);
    let description = Description::some_property(
        property.clone(),
        Description::value(
            Some(property),
            DataItem::parse(DataItemKind::Time, "1900").unwrap(),
            Comparator::GreaterOrEqual,
        ),
    );

    let condition = builder.compile(&description, &CompileContext::result());

    assert!(condition.pattern().starts_with("?result property:Founded-23aux ?v1 .\n"));
    assert!(condition.pattern().contains("FILTER( ?v1 >= \""));
}
