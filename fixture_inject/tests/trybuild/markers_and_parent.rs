use fixture_inject::{Injectable, inject};

#[derive(Default, Injectable)]
struct Base {
    #[injectable(resource(name = "db", mapped_name = "primary", lookup = "java:/db"))]
    database: Option<String>,
}

#[derive(Default, Injectable)]
struct Subject {
    #[injectable(parent)]
    base: Base,
    #[injectable(inject, qualifier = "fast", qualifier = "local")]
    cache: Option<String>,
    #[injectable(config_property(name = "port", default = "80"))]
    port: i32,
    #[injectable(skip)]
    ignored: Vec<String>,
}

fn main() -> Result<(), fixture_inject::InjectError> {
    let mut subject = Subject::default();
    let partial = inject("jdbc:h2:mem")
        .as_resource()
        .by_name("db")
        .by_mapped_name("primary")
        .into(&mut subject);
    assert!(partial.is_err());
    inject("c")
        .as_qualifying_instance(["local", "fast"])
        .into(&mut subject)?;
    inject(None::<String>)
        .as_config_property("port")
        .into(&mut subject)?;
    assert_eq!(subject.port, 80);
    assert_eq!(subject.cache.as_deref(), Some("c"));
    assert!(subject.ignored.is_empty());
    assert!(subject.base.database.is_none());
    Ok(())
}
