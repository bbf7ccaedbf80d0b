// src/config.rs

use std::{env, net::SocketAddr, path::PathBuf, str::FromStr, sync::Arc, time::Duration};

use anyhow::{anyhow, Context};
use rust_decimal::Decimal;
use sqlx::postgres::PgPoolOptions;

use crate::{
    common::money::ExchangeRate,
    db::{MemoryStore, PgStore, PurchaseStore},
    services::{
        mail_service::Recipients, DocumentService, MailService, NegotiationService, PurchaseOrderService,
        PurchaseRequestService,
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres { url: String, max_connections: u32 },
    /// Sem banco: tudo em memória, perdido ao reiniciar
    Memory,
}

/// Configuração lida do ambiente (e do `.env`, se existir).
#[derive(Debug, Clone)]
pub struct Settings {
    pub store: StoreBackend,
    pub bind_addr: SocketAddr,
    pub exchange_rate: ExchangeRate,
    pub font_dir: PathBuf,
    pub font_family: String,
    pub organization: Option<String>,
    pub recipients: Recipients,
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("{} has an invalid value '{}': {}", key, raw, e)),
        None => Ok(default),
    }
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok().filter(|v| !v.trim().is_empty()))
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let store = match lookup("PURCHASE_STORE").as_deref() {
            Some("memory") => StoreBackend::Memory,
            Some("postgres") | None => StoreBackend::Postgres {
                url: lookup("DATABASE_URL").context("DATABASE_URL must be set")?,
                max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 5)?,
            },
            Some(other) => return Err(anyhow!("PURCHASE_STORE must be 'postgres' or 'memory', got '{}'", other)),
        };

        let rate: Decimal = parse_or(&lookup, "USD_TO_INR_RATE", Decimal::from(ExchangeRate::DEFAULT_INR_PER_USD))?;
        let exchange_rate = ExchangeRate::new(rate).context("USD_TO_INR_RATE must be greater than zero")?;

        Ok(Self {
            store,
            bind_addr: parse_or(&lookup, "BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 3000)))?,
            exchange_rate,
            font_dir: lookup("PDF_FONT_DIR").map_or_else(|| PathBuf::from("./fonts"), PathBuf::from),
            font_family: lookup("PDF_FONT_FAMILY").unwrap_or_else(|| "Roboto".to_string()),
            organization: lookup("ORGANIZATION_NAME"),
            recipients: Recipients {
                ld: lookup("LD_EMAIL").unwrap_or_else(|| "ld@example.com".to_string()),
                vendor: lookup("VENDOR_EMAIL").unwrap_or_else(|| "vendor@example.com".to_string()),
                scheduler: lookup("SCHEDULER_EMAIL").unwrap_or_else(|| "scheduler@example.com".to_string()),
            },
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub purchase_request_service: PurchaseRequestService,
    pub negotiation_service: NegotiationService,
    pub purchase_order_service: PurchaseOrderService,
    pub document_service: DocumentService,
    pub mail_service: MailService,
}

impl AppState {
    /// Monta o gráfico de dependências sobre o armazenamento escolhido.
    pub fn new(settings: &Settings, store: Arc<dyn PurchaseStore>) -> Self {
        Self {
            purchase_request_service: PurchaseRequestService::new(store.clone()),
            negotiation_service: NegotiationService::new(store.clone(), settings.exchange_rate),
            purchase_order_service: PurchaseOrderService::new(store, settings.exchange_rate),
            document_service: DocumentService::new(
                settings.font_dir.clone(),
                settings.font_family.clone(),
                settings.organization.clone(),
            ),
            mail_service: MailService::new(settings.recipients.clone(), settings.organization.clone()),
        }
    }
}

/// Conecta ao banco e roda as migrações, ou sobe o armazenamento em memória.
pub async fn connect_store(backend: &StoreBackend) -> anyhow::Result<Arc<dyn PurchaseStore>> {
    match backend {
        StoreBackend::Postgres { url, max_connections } => {
            let pool = PgPoolOptions::new()
                .max_connections(*max_connections)
                .acquire_timeout(Duration::from_secs(3))
                .connect(url)
                .await
                .context("Failed to connect to the database")?;
            tracing::info!("✅ Database connection established");

            sqlx::migrate!()
                .run(&pool)
                .await
                .context("Failed to run database migrations")?;
            tracing::info!("✅ Database migrations applied");

            Ok(Arc::new(PgStore::new(pool)))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; data is lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> anyhow::Result<Settings> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply() {
        let settings = settings(&[("DATABASE_URL", "postgres://localhost/purchase")]).unwrap();

        assert_eq!(
            settings.store,
            StoreBackend::Postgres {
                url: "postgres://localhost/purchase".into(),
                max_connections: 5
            }
        );
        assert_eq!(settings.bind_addr.to_string(), "0.0.0.0:3000");
        assert_eq!(settings.exchange_rate, ExchangeRate::default());
        assert_eq!(settings.font_dir, PathBuf::from("./fonts"));
        assert_eq!(settings.font_family, "Roboto");
        assert_eq!(settings.organization, None);
    }

    #[test]
    fn database_url_required_for_postgres() {
        assert!(settings(&[]).is_err());
        let memory = settings(&[("PURCHASE_STORE", "memory")]).unwrap();
        assert_eq!(memory.store, StoreBackend::Memory);
        assert!(settings(&[("PURCHASE_STORE", "sqlite")]).is_err());
    }

    #[test]
    fn overrides_are_parsed() {
        let settings = settings(&[
            ("PURCHASE_STORE", "memory"),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("USD_TO_INR_RATE", "84.5"),
            ("ORGANIZATION_NAME", "Acme Corporation"),
            ("LD_EMAIL", "learning@acme.test"),
        ])
        .unwrap();

        assert_eq!(settings.bind_addr.port(), 8080);
        assert_eq!(settings.exchange_rate.inr_per_usd(), Decimal::new(845, 1));
        assert_eq!(settings.organization.as_deref(), Some("Acme Corporation"));
        assert_eq!(settings.recipients.ld, "learning@acme.test");
        assert_eq!(settings.recipients.vendor, "vendor@example.com");
    }

    #[test]
    fn invalid_values_fail() {
        assert!(settings(&[("PURCHASE_STORE", "memory"), ("USD_TO_INR_RATE", "0")]).is_err());
        assert!(settings(&[("PURCHASE_STORE", "memory"), ("USD_TO_INR_RATE", "abc")]).is_err());
        assert!(settings(&[("DATABASE_URL", "postgres://x"), ("DATABASE_MAX_CONNECTIONS", "-1")]).is_err());
    }
}
