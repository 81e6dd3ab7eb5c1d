//! Unit tests for the protodial-registry crate.


mod method_ref_tests {
    use rstest::rstest;

    use crate::method_ref::{MethodRef, lower_first_char};

    #[rstest]
    #[case("SayHello", "sayHello")]
    #[case("X", "x")]
    #[case("", "")]
    #[case("already", "already")]
    #[case("ÉtéPlan", "étéPlan")]
    fn lowercases_only_the_first_character(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(lower_first_char(input), expected);
    }

    #[rstest]
    #[case("HelloService.SayHello", "HelloService", "sayHello")]
    #[case("HelloService", "HelloService", "")]
    #[case("A.B.C", "A", "b.C")]
    #[case(".Method", "", "method")]
    fn splits_on_first_separator(
        #[case] raw: &str,
        #[case] service: &str,
        #[case] method: &str,
    ) {
        let reference = MethodRef::parse(raw);
        assert_eq!(reference.raw(), raw);
        assert_eq!(reference.service_name(), service);
        assert_eq!(reference.method_name(), method);
    }

    #[test]
    fn displays_raw_reference() {
        assert_eq!(MethodRef::parse("Nope.Thing").to_string(), "Nope.Thing");
    }
}

mod registry_tests {
    use std::path::Path;

    use rstest::rstest;

    use super::support::{fixture_path, load_fixture, vendor_dir};
    use crate::{MethodRef, RegistryError, ServiceRegistry};

    #[test]
    fn indexes_services_by_package() {
        let registry = load_fixture("greet.proto");
        let packages: Vec<_> = registry.packages().collect();
        assert_eq!(packages, vec!["greet"]);

        let entry = registry
            .find_service(&MethodRef::parse("HelloService.SayHello"))
            .expect("service should resolve");
        assert_eq!(entry.full_name(), "greet.HelloService");
        let methods: Vec<_> = entry.method_names().collect();
        assert_eq!(methods, vec!["chatter", "ping", "sayHello"]);
    }

    #[test]
    fn first_package_in_lexicographic_order_wins() {
        let registry =
            ServiceRegistry::load(&fixture_path("shadow.proto"), &[vendor_dir()]).expect("load");
        let packages: Vec<_> = registry.packages().collect();
        assert_eq!(packages, vec!["alpha", "zeta"]);

        let entry = registry
            .find_service(&MethodRef::parse("HelloService.SayHello"))
            .expect("service should resolve");
        assert_eq!(entry.full_name(), "alpha.HelloService");
    }

    #[test]
    fn missing_definition_reports_path_as_given() {
        let error = ServiceRegistry::load(Path::new("./nonexistent.proto"), &[])
            .expect_err("load should fail");
        assert!(matches!(error, RegistryError::DefinitionNotFound { .. }));
        assert_eq!(error.to_string(), "./nonexistent.proto does not exist");
    }

    #[test]
    fn unresolved_import_is_invalid() {
        let path = fixture_path("shadow.proto");
        let error = ServiceRegistry::load(&path, &[]).expect_err("load should fail");
        let RegistryError::DefinitionInvalid { message, .. } = &error else {
            panic!("expected DefinitionInvalid, got {error:?}");
        };
        assert!(!message.is_empty());
        assert!(
            error
                .to_string()
                .starts_with(&format!("failed to load {}: ", path.display()))
        );
    }

    #[test]
    fn undefined_type_is_invalid() {
        let error =
            ServiceRegistry::load(&fixture_path("broken.proto"), &[]).expect_err("load should fail");
        assert!(matches!(error, RegistryError::DefinitionInvalid { .. }));
    }

    #[rstest]
    #[case("Nope.Thing")]
    #[case("helloService.SayHello")]
    #[case("")]
    fn unknown_services_are_not_found(#[case] raw: &str) {
        let registry = load_fixture("greet.proto");
        let error = registry
            .find_service(&MethodRef::parse(raw))
            .expect_err("service should not resolve");
        assert!(matches!(error, RegistryError::ServiceNotFound { .. }));
        assert_eq!(error.to_string(), format!("could not find {raw}"));
    }
}

mod client_tests {
    use rstest::rstest;

    use protodial_config::CredentialMode;

    use super::support::{block_on, load_fixture};
    use crate::{MethodRef, RegistryError, endpoint_uri};

    #[rstest]
    #[case("localhost:50051", CredentialMode::Insecure, "http://localhost:50051")]
    #[case("localhost:50051", CredentialMode::Tls, "https://localhost:50051")]
    #[case("http://10.0.0.1:80", CredentialMode::Tls, "http://10.0.0.1:80")]
    fn endpoint_uri_adds_missing_scheme(
        #[case] endpoint: &str,
        #[case] credentials: CredentialMode,
        #[case] expected: &str,
    ) {
        assert_eq!(endpoint_uri(endpoint, credentials), expected);
    }

    #[rstest]
    #[case("SayHello", "greet.HelloService.SayHello", "/greet.HelloService/SayHello")]
    #[case("sayHello", "greet.HelloService.SayHello", "/greet.HelloService/SayHello")]
    #[case("Ping", "greet.HelloService.Ping", "/greet.HelloService/Ping")]
    fn resolves_unary_methods(#[case] method: &str, #[case] full_name: &str, #[case] path: &str) {
        let registry = load_fixture("greet.proto");
        let reference = MethodRef::parse(&format!("HelloService.{method}"));
        let resolved = block_on(async {
            let entry = registry.find_service(&reference)?;
            let client = entry.connect("127.0.0.1:1", CredentialMode::Insecure)?;
            client.method(&reference)
        })
        .expect("method should resolve");
        assert_eq!(resolved.full_name(), full_name);
        assert_eq!(resolved.path(), path);
    }

    #[rstest]
    #[case("HelloService.Missing")]
    #[case("HelloService")]
    fn unknown_methods_are_not_found(#[case] raw: &str) {
        let registry = load_fixture("greet.proto");
        let reference = MethodRef::parse(raw);
        let error = block_on(async {
            let entry = registry.find_service(&reference)?;
            let client = entry.connect("127.0.0.1:1", CredentialMode::Insecure)?;
            client.method(&reference)
        })
        .expect_err("method should not resolve");
        assert!(matches!(error, RegistryError::MethodNotFound { .. }));
        assert_eq!(error.to_string(), format!("could not find {raw}"));
    }

    #[test]
    fn streaming_methods_are_rejected() {
        let registry = load_fixture("greet.proto");
        let reference = MethodRef::parse("HelloService.Chatter");
        let error = block_on(async {
            let entry = registry.find_service(&reference)?;
            let client = entry.connect("127.0.0.1:1", CredentialMode::Insecure)?;
            client.method(&reference)
        })
        .expect_err("streaming method should be rejected");
        assert_eq!(
            error.to_string(),
            "HelloService.Chatter is a streaming method; only unary calls are supported"
        );
    }

    #[rstest]
    #[case("exa mple:80")]
    #[case(":80")]
    fn malformed_endpoints_are_rejected(#[case] endpoint: &str) {
        let registry = load_fixture("greet.proto");
        let reference = MethodRef::parse("HelloService.SayHello");
        let error = block_on(async {
            let entry = registry.find_service(&reference)?;
            entry.connect(endpoint, CredentialMode::Insecure).map(|_| ())
        })
        .expect_err("endpoint should be rejected");
        assert!(matches!(error, RegistryError::InvalidEndpoint { .. }));
        assert!(
            error
                .to_string()
                .starts_with(&format!("invalid endpoint {endpoint}: "))
        );
    }
}
