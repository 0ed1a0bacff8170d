//! Configuration property injection through `as_config_property`.
//!
//! Covers marker defaults, text auto-conversion into primitive members,
//! all-match assignment, and property lookup in a `figment` source.

use anyhow::{Result, anyhow, ensure};
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use fixture_inject::{AssignError, ConversionError, InjectError, Injectable, inject};
use rstest::{fixture, rstest};
use test_helpers::figment::{InjectResultExt, with_jail};

#[derive(Debug, Default, Injectable)]
struct Server {
    #[injectable(config_property(name = "server.port", default = "8080"))]
    port: i32,
    #[injectable(config_property(name = "server.host", default = "localhost"))]
    host: Option<String>,
    #[injectable(config_property(name = "server.debug"))]
    debug: Option<bool>,
    #[injectable(config_property(name = "server.initial"))]
    initial: char,
    #[injectable(config_property(name = "server.workers"))]
    workers: i16,
    other_port: i32,
}

#[fixture]
fn server() -> Server {
    Server::default()
}

#[rstest]
fn null_uses_the_marker_default(mut server: Server) -> Result<()> {
    inject(None::<String>)
        .as_config_property("server.port")
        .into(&mut server)?;
    ensure!(server.port == 8080, "default not converted: {}", server.port);
    inject(None::<String>)
        .as_config_property("server.host")
        .into(&mut server)?;
    ensure!(server.host.as_deref() == Some("localhost"), "default not applied");
    Ok(())
}

#[rstest]
fn text_is_converted_for_primitive_members(mut server: Server) -> Result<()> {
    inject("123")
        .as_config_property("server.port")
        .into(&mut server)?;
    ensure!(server.port == 123, "port not converted");
    ensure!(server.other_port == 0, "unmarked member modified");
    inject("true")
        .as_config_property("server.debug")
        .into(&mut server)?;
    ensure!(server.debug == Some(true), "debug not converted");
    inject("xyz")
        .as_config_property("server.initial")
        .into(&mut server)?;
    ensure!(server.initial == 'x', "char takes the first character");
    Ok(())
}

#[rstest]
fn typed_values_bypass_conversion(mut server: Server) -> Result<()> {
    inject(9_i16)
        .as_config_property("server.workers")
        .into(&mut server)?;
    ensure!(server.workers == 9, "workers not assigned");
    Ok(())
}

#[rstest]
fn malformed_text_is_a_conversion_error(mut server: Server) -> Result<()> {
    let Err(err) = inject("eighty")
        .as_config_property("server.port")
        .into(&mut server)
    else {
        return Err(anyhow!("expected a conversion error"));
    };
    ensure!(
        matches!(
            err,
            InjectError::Conversion {
                member: "port",
                source: ConversionError::Malformed { .. },
                ..
            }
        ),
        "unexpected error: {err}"
    );
    Ok(())
}

#[rstest]
fn empty_text_for_char_is_rejected(mut server: Server) {
    let result = inject("")
        .as_config_property("server.initial")
        .into(&mut server);
    assert!(matches!(
        result,
        Err(InjectError::Conversion {
            source: ConversionError::EmptyChar,
            ..
        })
    ));
}

#[rstest]
fn null_without_default_cannot_fill_a_primitive(mut server: Server) {
    let result = inject(None::<String>)
        .as_config_property("server.workers")
        .into(&mut server);
    assert!(matches!(
        result,
        Err(InjectError::Assignment {
            source: AssignError::NullNotAllowed(_),
            ..
        })
    ));
}

#[rstest]
fn unknown_property_raises_no_match(mut server: Server) {
    let result = inject("1")
        .as_config_property("server.timeout")
        .into(&mut server);
    assert!(matches!(result, Err(InjectError::NoMatchFound { .. })));
}

#[derive(Debug, Default, Injectable)]
struct Limits {
    #[injectable(config_property(name = "limit"))]
    soft: i32,
    #[injectable(config_property(name = "limit"))]
    hard: i8,
    #[injectable(config_property(name = "limit.unused"))]
    spare: i32,
}

#[rstest]
fn into_all_fills_every_member_sharing_the_property() -> Result<()> {
    let mut limits = Limits::default();
    let count = inject("100")
        .as_config_property("limit")
        .into_all(&mut limits)?;
    ensure!(count == 2, "expected both limit members, got {count}");
    ensure!(limits.soft == 100 && limits.hard == 100, "limits not converted");
    ensure!(limits.spare == 0, "other property modified");
    Ok(())
}

#[rstest]
fn into_all_stops_at_the_first_failure_and_keeps_earlier_assignments() -> Result<()> {
    let mut limits = Limits::default();
    let Err(err) = inject("300")
        .as_config_property("limit")
        .into_all(&mut limits)
    else {
        return Err(anyhow!("300 must overflow the i8 member"));
    };
    ensure!(
        matches!(
            err,
            InjectError::Conversion {
                owner: "Limits",
                member: "hard",
                source: ConversionError::Malformed { .. },
            }
        ),
        "unexpected error: {err}"
    );
    ensure!(limits.soft == 300, "earlier assignment rolled back: {}", limits.soft);
    ensure!(limits.hard == 0, "failing member modified");
    Ok(())
}

#[rstest]
fn configuration_source_sits_between_value_and_default() -> Result<()> {
    with_jail(|jail| {
        jail.create_file(
            "server.toml",
            r#"
            [server]
            port = 9090
            debug = true
            "#,
        )?;
        let figment = Figment::from(Toml::file("server.toml"));
        let mut server = Server::default();

        inject(None::<String>)
            .as_config_property("server.port")
            .with_source(&figment)
            .into(&mut server)
            .into_jail_result()?;
        inject("7070")
            .as_config_property("server.port")
            .with_source(&figment)
            .into(&mut server)
            .into_jail_result()?;
        let explicit_port = server.port;

        inject(None::<String>)
            .as_config_property("server.host")
            .with_source(&figment)
            .into(&mut server)
            .into_jail_result()?;
        inject(None::<bool>)
            .as_config_property("server.debug")
            .with_source(&figment)
            .into(&mut server)
            .into_jail_result()?;
        Ok((explicit_port, server))
    })
    .and_then(|(explicit_port, server)| {
        ensure!(explicit_port == 7070, "explicit value must win");
        ensure!(
            server.host.as_deref() == Some("localhost"),
            "missing key must fall back to the default"
        );
        ensure!(server.debug == Some(true), "source value not converted");
        Ok(())
    })
}

#[rstest]
fn configuration_source_reads_environment() -> Result<()> {
    let port = with_jail(|jail| {
        jail.set_env("APP_SERVER__PORT", "6060");
        let figment = Figment::from(Env::prefixed("APP_").split("__"));
        let mut server = Server::default();
        inject(None::<String>)
            .as_config_property("server.port")
            .with_source(&figment)
            .into(&mut server)
            .into_jail_result()?;
        Ok(server.port)
    })?;
    ensure!(port == 6060, "environment value not used: {port}");
    Ok(())
}

#[rstest]
fn non_scalar_configuration_is_an_error() -> Result<()> {
    let outcome = with_jail(|jail| {
        jail.create_file("server.toml", "[server]\nport = [1, 2]\n")?;
        let figment = Figment::from(Toml::file("server.toml"));
        let mut server = Server::default();
        Ok(inject(None::<String>)
            .as_config_property("server.port")
            .with_source(&figment)
            .into(&mut server))
    })?;
    let Err(err) = outcome else {
        return Err(anyhow!("expected a configuration error"));
    };
    ensure!(
        matches!(err, InjectError::ConfigSource { ref key, .. } if key == "server.port"),
        "unexpected error: {err}"
    );
    Ok(())
}
