//! Integration tests for the `SITEMEND_*` environment variable mapping.

use figment::{
    Figment, Jail,
    providers::{Env, Serialized},
};
use mend_config::MendConfig;
use mend_core::enums::Platform;

#[test]
fn platform_selector_from_env() {
    Jail::expect_with(|jail| {
        jail.set_env("SITEMEND_PLATFORM", "wordpress");

        let config: MendConfig = Figment::from(Serialized::defaults(MendConfig::default()))
            .merge(Env::prefixed("SITEMEND_").split("__"))
            .extract()?;

        assert_eq!(config.platform, Platform::Wordpress);
        Ok(())
    });
}

#[test]
fn full_env_provider_chain() {
    Jail::expect_with(|jail| {
        jail.set_env("SITEMEND_PLATFORM", "sanity");
        jail.set_env("SITEMEND_SANITY__PROJECT_ID", "jail-project");
        jail.set_env("SITEMEND_SANITY__DATASET", "jail-dataset");
        jail.set_env("SITEMEND_SANITY__TOKEN", "sk-jail");
        jail.set_env("SITEMEND_WORDPRESS__BASE_URL", "https://jail.acme.dev");
        jail.set_env("SITEMEND_WORDPRESS__USERNAME", "jail-user");
        jail.set_env("SITEMEND_WORDPRESS__APP_PASSWORD", "jail-pass");
        jail.set_env("SITEMEND_GENERAL__HTTP_TIMEOUT_SECS", "5");
        jail.set_env("SITEMEND_GENERAL__DEFAULT_LIMIT", "42");

        let config: MendConfig = Figment::from(Serialized::defaults(MendConfig::default()))
            .merge(Env::prefixed("SITEMEND_").split("__"))
            .extract()?;

        assert_eq!(config.sanity.project_id, "jail-project");
        assert_eq!(config.sanity.dataset, "jail-dataset");
        assert_eq!(config.sanity.token, "sk-jail");
        assert!(config.sanity.is_configured());

        assert_eq!(config.wordpress.base_url, "https://jail.acme.dev");
        assert_eq!(config.wordpress.username, "jail-user");
        assert!(config.wordpress.is_configured());

        assert_eq!(config.general.http_timeout_secs, 5);
        assert_eq!(config.general.default_limit, 42);
        Ok(())
    });
}

#[test]
fn invalid_platform_value_is_an_error() {
    Jail::expect_with(|jail| {
        jail.set_env("SITEMEND_PLATFORM", "wix");

        let result: Result<MendConfig, _> =
            Figment::from(Serialized::defaults(MendConfig::default()))
                .merge(Env::prefixed("SITEMEND_").split("__"))
                .extract();

        assert!(result.is_err(), "unknown platform should fail extraction");
        Ok(())
    });
}
