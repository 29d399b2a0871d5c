//! Architecture contract tests.

mod support;

use support::architecture::find_lines_containing;

#[test]
fn domain_has_no_framework_or_outer_layer_imports() {
    let hits = find_lines_containing(
        "src/domain",
        &[
            "crate::adapter",
            "crate::infrastructure",
            "crate::application",
            "crate::port",
            "tokio::",
            "reqwest::",
            "diesel::",
            "scraper::",
        ],
    );

    assert!(
        hits.is_empty(),
        "found forbidden imports in domain layer: {hits:#?}"
    );
}

#[test]
fn ports_do_not_depend_on_implementations() {
    let hits = find_lines_containing(
        "src/port",
        &[
            "crate::adapter",
            "crate::infrastructure",
            "crate::application",
            "reqwest::",
            "diesel::",
        ],
    );

    assert!(
        hits.is_empty(),
        "found implementation imports in ports: {hits:#?}"
    );
}

#[test]
fn application_does_not_reach_into_drivers() {
    let hits = find_lines_containing(
        "src/application",
        &["crate::infrastructure", "reqwest::", "diesel::", "clap::"],
    );

    assert!(
        hits.is_empty(),
        "found driver imports in application layer: {hits:#?}"
    );
}
