//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use tracing_subscriber::EnvFilter;
use wiring::{ClassCatalog, ClassDecl, MethodSignature, ParamSpec};

pub const CASE_SENSITIVE: &str = "Fixtures::CaseSensitiveClass";
pub const NAMED_ARGUMENTS: &str = "Fixtures::NamedArgumentsDummy";
pub const SCALAR_SETTER: &str = "Fixtures::ScalarSetter";
pub const PARENT_NOT_EXISTS: &str = "Fixtures::ParentNotExists";
pub const LOGGER: &str = "Fixtures::Logger";
pub const MAILER: &str = "Fixtures::Mailer";

/// Install a test subscriber once. Filter with `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Class signatures used across the integration tests.
pub fn fixtures() -> ClassCatalog {
    let mut catalog = ClassCatalog::new();

    catalog
        .declare(ClassDecl::new(CASE_SENSITIVE).with_constructor(vec![ParamSpec::new("identifier")]))
        .unwrap();

    catalog
        .declare(
            ClassDecl::new(NAMED_ARGUMENTS)
                .with_constructor(vec![
                    ParamSpec::typed("c", CASE_SENSITIVE),
                    ParamSpec::new("apiKey"),
                    ParamSpec::new("hostName"),
                ])
                .with_method(MethodSignature::new("setApiKey", vec![ParamSpec::new("apiKey")]))
                .with_method(MethodSignature::new(
                    "setSensitiveClass",
                    vec![ParamSpec::typed("c", CASE_SENSITIVE)],
                )),
        )
        .unwrap();

    catalog
        .declare(
            ClassDecl::new(SCALAR_SETTER).with_method(
                MethodSignature::new("setDefaultLocale", vec![ParamSpec::new("defaultLocale")])
                    .required(),
            ),
        )
        .unwrap();

    catalog
        .declare(ClassDecl::new(PARENT_NOT_EXISTS).extends("NotExists"))
        .unwrap();

    catalog.declare(ClassDecl::new(LOGGER)).unwrap();

    catalog
        .declare(
            ClassDecl::new(MAILER)
                .with_constructor(vec![
                    ParamSpec::typed("logger", LOGGER),
                    ParamSpec::typed("locale", "string"),
                    ParamSpec::typed("retries", "int"),
                ])
                .with_method(
                    MethodSignature::new("setLogger", vec![ParamSpec::typed("logger", LOGGER)])
                        .required(),
                ),
        )
        .unwrap();

    catalog
}
