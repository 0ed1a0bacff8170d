//! Qualified injection through `as_qualifying_instance`.

use anyhow::{Result, anyhow, ensure};
use fixture_inject::{InjectError, Injectable, inject};
use rstest::{fixture, rstest};

#[derive(Debug, Default, Injectable)]
struct Caches {
    #[injectable(inject)]
    default_cache: Option<String>,
    #[injectable(inject, qualifier = "fast")]
    fast_cache: Option<String>,
    #[injectable(inject, qualifier = "fast", qualifier = "local")]
    local_cache: Option<String>,
    #[injectable(qualifier = "fast")]
    unmarked: Option<String>,
    plain: Option<String>,
}

#[fixture]
fn caches() -> Caches {
    Caches::default()
}

#[rstest]
fn unqualified_request_matches_default_members(mut caches: Caches) -> Result<()> {
    inject("d")
        .as_qualifying_instance(Vec::<String>::new())
        .into(&mut caches)?;
    ensure!(caches.default_cache.as_deref() == Some("d"), "default not set");
    ensure!(caches.fast_cache.is_none(), "qualified member set");
    Ok(())
}

#[rstest]
fn explicit_default_qualifier_matches_unqualified_members(mut caches: Caches) -> Result<()> {
    inject("d")
        .as_qualifying_instance(["default"])
        .into(&mut caches)?;
    ensure!(caches.default_cache.as_deref() == Some("d"), "default not set");
    Ok(())
}

#[rstest]
fn qualifier_sets_must_be_equal(mut caches: Caches) -> Result<()> {
    inject("f").as_qualifying_instance(["fast"]).into(&mut caches)?;
    ensure!(caches.fast_cache.as_deref() == Some("f"), "fast not set");
    ensure!(caches.local_cache.is_none(), "superset member matched");
    ensure!(caches.unmarked.is_none(), "member without inject marker matched");
    Ok(())
}

#[rstest]
fn qualifier_order_is_irrelevant(mut caches: Caches) -> Result<()> {
    let count = inject("l")
        .as_qualifying_instance(["local", "fast", "local"])
        .into_all(&mut caches)?;
    ensure!(count == 1, "unexpected count {count}");
    ensure!(caches.local_cache.as_deref() == Some("l"), "local not set");
    Ok(())
}

#[rstest]
fn unknown_qualifier_raises_no_match(mut caches: Caches) -> Result<()> {
    let Err(err) = inject("x").as_qualifying_instance(["slow"]).into(&mut caches) else {
        return Err(anyhow!("expected NoMatchFound"));
    };
    ensure!(
        matches!(err, InjectError::NoMatchFound { ref strategy, .. } if strategy.contains("slow")),
        "unexpected error: {err}"
    );
    ensure!(caches.plain.is_none(), "plain member modified");
    Ok(())
}

#[rstest]
fn structural_check_still_applies(mut caches: Caches) {
    let result = inject(5).as_qualifying_instance(["fast"]).into(&mut caches);
    assert!(matches!(result, Err(InjectError::NoMatchFound { .. })));
}
