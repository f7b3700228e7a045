#![allow(non_snake_case)]

#[cfg(feature = "ssr")]
mod config {
    use std::net::{AddrParseError, IpAddr, SocketAddr};

    use freight_store::AuthSettings;
    use serde::Deserialize;

    #[derive(Deserialize, Clone, Debug, Default)]
    #[serde(default)]
    pub struct Config {
        pub server: ServerConfig,
        pub auth: AuthConfig,
        pub store: StoreConfig,
    }

    #[derive(Deserialize, Clone, Debug)]
    #[serde(default)]
    pub struct ServerConfig {
        pub bind: String,
        pub port: u16,
    }

    impl ServerConfig {
        pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
            let ip: IpAddr = self.bind.trim().parse()?;
            Ok(SocketAddr::new(ip, self.port))
        }
    }

    impl Default for ServerConfig {
        fn default() -> Self {
            Self {
                bind: "0.0.0.0".into(),
                port: 3000,
            }
        }
    }

    /// Bootstrap administrator plus the login policy handed to the store.
    #[derive(Deserialize, Clone, Debug)]
    #[serde(default)]
    pub struct AuthConfig {
        pub admin_username: String,
        pub admin_email: String,
        pub admin_password: String,
        #[serde(flatten)]
        pub policy: AuthSettings,
    }

    impl Default for AuthConfig {
        fn default() -> Self {
            Self {
                admin_username: "admin".into(),
                admin_email: "admin@example.com".into(),
                admin_password: "change-me-on-first-run".into(),
                policy: AuthSettings::default(),
            }
        }
    }

    #[derive(Deserialize, Clone, Debug)]
    #[serde(default)]
    pub struct StoreConfig {
        pub seed_demo_data: bool,
    }

    impl Default for StoreConfig {
        fn default() -> Self {
            Self { seed_demo_data: true }
        }
    }

    pub fn load(path: &str) -> Config {
        match std::fs::read_to_string(path) {
            Ok(contents) => parse(&contents).unwrap_or_else(|e| {
                tracing::warn!("failed to parse config {path}: {e}, using defaults");
                Config::default()
            }),
            Err(e) => {
                tracing::warn!("failed to read config {path}: {e}, using defaults");
                Config::default()
            }
        }
    }

    pub fn parse(contents: &str) -> Result<Config, toml::de::Error> {
        toml::from_str(contents)
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn example_config_parses() {
            let config = parse(include_str!("../../../config.example.toml")).unwrap();
            assert_eq!(config.server.port, 3000);
            assert_eq!(config.auth.admin_username, "admin");
            assert_eq!(config.auth.policy.max_login_attempts, 3);
            assert!(config.store.seed_demo_data);
        }

        #[test]
        fn server_section_becomes_socket_address() {
            let config = parse("[server]\nbind = \"127.0.0.1\"\nport = 8088\n").unwrap();
            assert_eq!(config.server.socket_addr().unwrap().to_string(), "127.0.0.1:8088");

            let bad = parse("[server]\nbind = \"localhost\"\n").unwrap();
            assert!(bad.server.socket_addr().is_err());
        }

        #[test]
        fn missing_sections_use_defaults() {
            let config = parse("[auth]\nlockout_minutes = 5\n").unwrap();
            assert_eq!(config.server.bind, "0.0.0.0");
            assert_eq!(config.auth.policy.lockout_minutes, 5);
            assert_eq!(config.auth.policy.session_ttl_minutes, 720);
            assert_eq!(config.auth.admin_email, "admin@example.com");
        }
    }
}

#[cfg(feature = "ssr")]
fn config_path() -> String {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            if let Some(path) = args.next() {
                return path;
            }
        }
    }
    "config.example.toml".into()
}

/// Creates the administrator account and, when enabled, the demo records.
#[cfg(feature = "ssr")]
async fn prepare_store(appConfig: &config::Config) -> freight_store::Store {
    let auth = &appConfig.auth;
    let store = freight_store::Store::new(auth.policy.clone());

    if let Err(e) = store
        .bootstrap_admin(&auth.admin_username, &auth.admin_email, &auth.admin_password)
        .await
    {
        tracing::error!("could not create admin account: {e}");
    }
    if appConfig.store.seed_demo_data {
        if let Err(e) = store.seed_demo().await {
            tracing::warn!("demo data not loaded: {e}");
        }
    }
    store
}

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() {
    use axum::Router;
    use freight_api::middleware::auth::{require_page_auth, AppState};
    use freight_ui::{shell, App};
    use leptos::prelude::*;
    use leptos_axum::{generate_route_list, LeptosRoutes};
    use tower_http::trace::TraceLayer;
    use tracing_subscriber::{fmt, EnvFilter};

    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let configPath = config_path();
    let appConfig = config::load(&configPath);
    let store = prepare_store(&appConfig).await;
    let appState = AppState { store: store.clone() };

    let mut leptosOptions = get_configuration(None)
        .expect("failed to load Leptos configuration")
        .leptos_options;
    match appConfig.server.socket_addr() {
        Ok(addr) => leptosOptions.site_addr = addr,
        Err(e) => tracing::warn!(
            "invalid bind address {}: {e}, keeping {}",
            appConfig.server.bind,
            leptosOptions.site_addr
        ),
    }
    let addr = leptosOptions.site_addr;

    // Server functions reach the store through context; the REST router
    // carries it as axum state.
    let provideStore = move || provide_context(store.clone());
    let renderShell = {
        let options = leptosOptions.clone();
        move || shell(options.clone())
    };

    let app = Router::new()
        .leptos_routes_with_context(&leptosOptions, generate_route_list(App), provideStore, renderShell)
        .fallback(leptos_axum::file_and_error_handler(shell))
        .with_state(leptosOptions)
        .merge(freight_api::api_router(appState.clone()))
        .layer(axum::middleware::from_fn_with_state(appState, require_page_auth))
        .layer(TraceLayer::new_for_http());

    tracing::info!("freight console on http://{addr} (config: {configPath})");
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => panic!("cannot bind {addr}: {e}"),
    };
    if let Err(e) = axum::serve(listener, app.into_make_service()).await {
        tracing::error!("server stopped: {e}");
    }
}

#[cfg(not(feature = "ssr"))]
fn main() {}
