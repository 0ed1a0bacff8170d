use fixture_inject as fixtures;
use fixtures::{Injectable, inject};

/// Verifies that `#[injectable(crate = "...")]` is honoured by generated
/// code when the runtime crate is reached through another name.
#[derive(Default, Injectable)]
#[injectable(crate = "fixtures")]
struct Aliased {
    name: Option<String>,
}

fn main() {
    let mut aliased = Aliased::default();
    let _: fixtures::InjectResult<()> = inject("alias").into(&mut aliased);
}
