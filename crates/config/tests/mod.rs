//! Configuration loading and validation tests.

mod network_type_tests {
    use bazaar_config::NetworkType;
    use std::str::FromStr;

    #[test]
    fn test_network_type_parsing() {
        assert_eq!(NetworkType::from_str("mainnet").unwrap(), NetworkType::MainNet);
        assert_eq!(NetworkType::from_str("TEST").unwrap(), NetworkType::TestNet);
        assert_eq!(NetworkType::from_str("devnet").unwrap(), NetworkType::Private);
        assert!(NetworkType::from_str("moonnet").is_err());
    }

    #[test]
    fn test_network_type_display_roundtrip() {
        for network in [NetworkType::MainNet, NetworkType::TestNet, NetworkType::Private] {
            let parsed = NetworkType::from_str(&network.to_string()).unwrap();
            assert_eq!(parsed, network);
        }
        assert_eq!(NetworkType::default(), NetworkType::TestNet);
    }
}

mod bazaar_config_tests {
    use bazaar_config::{BazaarConfig, ConfigError, NetworkType, DEFAULT_DECIMALS, WORD_REGISTRY_ADDRESS};
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = BazaarConfig::default();
        assert_eq!(config.word_registry_address, WORD_REGISTRY_ADDRESS);
        assert_eq!(config.default_decimals, DEFAULT_DECIMALS);
        assert!(config.deploy_options.is_empty());
        config.validate().unwrap();
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config = BazaarConfig::from_toml_str(
            r#"
network = "MainNet"
word_registry_address = "ct_registry"

[deploy_options]
gas = 25000
"#,
        )
        .unwrap();

        assert_eq!(config.network, NetworkType::MainNet);
        assert_eq!(config.word_registry_address, "ct_registry");
        assert_eq!(config.default_decimals, DEFAULT_DECIMALS);
        assert_eq!(config.deploy_options["gas"], 25000);
    }

    #[test]
    fn test_invalid_registry_address_rejected() {
        let err = BazaarConfig::from_toml_str(r#"word_registry_address = "ak_notacontract""#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = BazaarConfig::default()
            .with_word_registry_address("ct_")
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_excessive_decimals_rejected() {
        let err = BazaarConfig::from_toml_str("default_decimals = 500").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = BazaarConfig::from_toml_str("network = [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "word_registry_address = \"ct_fromfile\"").unwrap();
        writeln!(file, "default_decimals = 8").unwrap();

        let config = BazaarConfig::load(file.path()).unwrap();
        assert_eq!(config.word_registry_address, "ct_fromfile");
        assert_eq!(config.default_decimals, 8);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = BazaarConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_builder_helpers() {
        let config = BazaarConfig::default()
            .with_word_registry_address("ct_other")
            .with_deploy_option("fee", 1_000u64);
        assert_eq!(config.word_registry_address, "ct_other");
        assert_eq!(config.deploy_options["fee"], 1000);
    }
}
