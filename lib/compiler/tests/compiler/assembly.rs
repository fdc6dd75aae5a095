use crate::test_utils::{
    StaticRedirects, TestResult, assert_valid_sparql, compile_query, create_builder, wiki,
};
use askql_compiler::{CompilerOptions, QueryOptions, SortDirection, SparqlQuery};
use std::sync::Arc;

#[test]
fn test_select_with_property_filter() -> TestResult {
    let query = compile_query(
        CompilerOptions::default(),
        None,
        "[[Population::>1000]]",
        &QueryOptions::default(),
    )?;

    assert_valid_sparql(&query);
    insta::assert_snapshot!(query, @r#"
    PREFIX property: <http://example.org/id/Property-3A>
    SELECT DISTINCT ?result WHERE {
    ?result property:Population ?v1 .
    FILTER( ?v1 >= "1000"^^<http://www.w3.org/2001/XMLSchema#double> )
    }
    "#);
    Ok(())
}

#[test]
fn test_select_everything_binds_result() -> TestResult {
    let query = compile_query(
        CompilerOptions::default(),
        None,
        "[[+]]",
        &QueryOptions::default(),
    )?;

    assert_valid_sparql(&query);
    insta::assert_snapshot!(query, @r"
    PREFIX swivt: <http://semantic-mediawiki.org/swivt/1.0#>
    SELECT DISTINCT ?result WHERE {
    ?result swivt:page ?url .
    }
    ");
    Ok(())
}

#[test]
fn test_order_limit_and_offset() -> TestResult {
    let options = CompilerOptions::default()
        .with_sort_key("Population", SortDirection::Desc)
        .with_sort_key("", SortDirection::Asc);
    let query = compile_query(
        options,
        None,
        "[[Category:City]]",
        &QueryOptions::default().with_limit(Some(10)).with_offset(20),
    )?;

    assert_valid_sparql(&query);
    insta::assert_snapshot!(query, @r"
    PREFIX property: <http://example.org/id/Property-3A>
    PREFIX rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#>
    PREFIX swivt: <http://semantic-mediawiki.org/swivt/1.0#>
    PREFIX wiki: <http://example.org/id/>
    SELECT DISTINCT ?result WHERE {
    { ?result rdf:type wiki:Category-3ACity . }
    OPTIONAL { ?result property:Population ?v1 .
    }
    ?result swivt:wikiPageSortKey ?resultsk .
    }
    ORDER BY DESC(?v1) ASC(?resultsk)
    LIMIT 10
    OFFSET 20
    ");
    Ok(())
}

#[test]
fn test_count_ignores_order_and_limit() -> TestResult {
    let options = CompilerOptions::default().with_sort_key("", SortDirection::Asc);
    let query = compile_query(
        options,
        None,
        "[[Category:City]]",
        &QueryOptions::default().with_limit(Some(10)).with_count(true),
    )?;

    assert_valid_sparql(&query);
    let text = query.text().unwrap_or_default();
    assert!(text.contains("SELECT (COUNT(DISTINCT ?result) AS ?count) WHERE {"));
    assert!(!text.contains("ORDER BY"));
    assert!(!text.contains("LIMIT"));
    Ok(())
}

#[test]
fn test_false_condition_is_empty() -> TestResult {
    let query = compile_query(
        CompilerOptions::default(),
        None,
        "[[Berlin]] [[Paris]]",
        &QueryOptions::default(),
    )?;
    assert_eq!(query, SparqlQuery::Empty);
    assert_eq!(query.text(), None);
    Ok(())
}

#[test]
fn test_single_page_is_constant() -> TestResult {
    let query = compile_query(
        CompilerOptions::default(),
        None,
        "[[Berlin]]",
        &QueryOptions::default(),
    )?;
    assert_eq!(query, SparqlQuery::Constant("wiki:Berlin".to_owned()));
    Ok(())
}

#[test]
fn test_single_page_with_condition_is_ask() -> TestResult {
    let query = compile_query(
        CompilerOptions::default(),
        None,
        "[[Berlin]] [[>M]]",
        &QueryOptions::default(),
    )?;

    assert_valid_sparql(&query);
    insta::assert_snapshot!(query, @r#"
    PREFIX swivt: <http://semantic-mediawiki.org/swivt/1.0#>
    PREFIX wiki: <http://example.org/id/>
    ASK {
    FILTER( ?resultsk >= "M" )
    wiki:Berlin swivt:wikiPageSortKey ?resultsk .
    }
    "#);
    Ok(())
}

#[test]
fn test_redirects_are_valid_sparql() -> TestResult {
    let redirects = StaticRedirects::default().with_redirect(wiki("Bln"), wiki("Berlin"));
    let builder = create_builder(CompilerOptions::default()).with_redirect_lookup(Arc::new(redirects));
    let query = compile_query(
        CompilerOptions::default(),
        Some(builder),
        "[[Capital::Bln]]",
        &QueryOptions::default(),
    )?;

    assert_valid_sparql(&query);
    insta::assert_snapshot!(query, @r"
    PREFIX property: <http://example.org/id/Property-3A>
    PREFIX swivt: <http://semantic-mediawiki.org/swivt/1.0#>
    PREFIX wiki: <http://example.org/id/>
    SELECT DISTINCT ?result WHERE {
    ?result property:Capital ?r2 .
    ?r2 ^swivt:redirectsTo? wiki:Berlin .
    }
    ");
    Ok(())
}

#[test]
fn test_complex_queries_are_valid_sparql() -> TestResult {
    let options = CompilerOptions::default()
        .with_sort_key("Located in", SortDirection::Asc)
        .with_sort_key("Name", SortDirection::Desc);
    for query in [
        "[[Category:City]] OR [[Paris]]",
        "[[~Ber*]] OR [[Category:City]] OR [[Rome]]",
        "[[Located in.Population::>>1000]]",
        "[[-Capital::<q>[[Category:Country]] [[Name::~Ger*]]</q>]]",
        "[[Homepage::~http://example.org/*]]",
        "[[Help:+]] OR [[:+]]",
        "[[Category:City]] [[Name::!Berlin||Paris]]",
        "[[Located in::+]] [[Population::<<5]]",
    ] {
        let assembled = compile_query(options.clone(), None, query, &QueryOptions::default())?;
        assert_valid_sparql(&assembled);
    }
    Ok(())
}
