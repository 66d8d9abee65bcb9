use serde::{Deserialize, Serialize};

use crate::catalog::ServiceCatalog;
use crate::error::{AcError, Result};
use crate::text::extract_hashtag;
use crate::types::BusinessContext;
use tracing::debug;

/// Business name used when neither a hashtag nor any default is available.
pub const FALLBACK_BUSINESS: &str = "mi_negocio";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutocitaConfig {
    pub backend: BackendConfig,
    pub business: BusinessContext,
    /// `DEFAULT_NEGOCIO_NAME`: tenant label when the message carries no hashtag.
    pub default_business: Option<String>,
    pub phone: PhoneConfig,
    pub catalog: ServiceCatalog,
    /// Enables the per-sender menu → service → date → time conversation.
    pub guided_flow: bool,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub url: Option<String>,
    pub anon_key: Option<String>,
    /// Shared secret sent as `p_secret` on every RPC.
    pub api_secret: String,
    pub enable_outbound: bool,
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhoneConfig {
    /// Digits prepended to WhatsApp ids that do not already start with them.
    pub country_code: Option<String>,
}

impl PhoneConfig {
    /// `+<digits>` form of a WhatsApp id, empty when the id is unknown.
    pub fn normalize(&self, wa_id: &str) -> String {
        let digits: String = wa_id.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return String::new();
        }
        match self.country_code.as_deref() {
            Some(cc) if !digits.starts_with(cc) => format!("+{cc}{digits}"),
            _ => format!("+{digits}"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for AutocitaConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig {
                url: None,
                anon_key: None,
                api_secret: String::new(),
                enable_outbound: false,
                timeout_ms: 8_000,
            },
            business: BusinessContext::default(),
            default_business: None,
            phone: PhoneConfig::default(),
            catalog: ServiceCatalog::default(),
            guided_flow: false,
            server: ServerConfig {
                host: "0.0.0.0".into(),
                port: 3000,
            },
        }
    }
}

impl AutocitaConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut cfg = Self::default();

        cfg.backend.url = get("SUPABASE_URL").map(|u| u.trim_end_matches('/').to_string());
        cfg.backend.anon_key = get("SUPABASE_ANON_KEY");
        cfg.backend.api_secret = get("BUSINESS_API_SECRET").unwrap_or_default();
        cfg.backend.enable_outbound = match get("ENABLE_OUTBOUND") {
            Some(v) => parse_bool("ENABLE_OUTBOUND", &v)?,
            None => true,
        };
        if let Some(v) = get("RPC_TIMEOUT_MS") {
            cfg.backend.timeout_ms = v
                .parse()
                .map_err(|_| AcError::invalid_config("RPC_TIMEOUT_MS", format!("not a number: {v}")))?;
        }

        let b = &mut cfg.business;
        let fields: [(&str, &mut String); 6] = [
            ("BUSINESS_NAME", &mut b.name),
            ("BUSINESS_LOCATION", &mut b.location),
            ("BUSINESS_HOURS", &mut b.hours),
            ("BUSINESS_PHONE", &mut b.phone),
            ("BUSINESS_BRANCH", &mut b.branch),
            ("BUSINESS_HASHTAG", &mut b.hashtag),
        ];
        for (key, slot) in fields {
            if let Some(v) = get(key) {
                *slot = v;
            }
        }

        cfg.default_business = get("DEFAULT_NEGOCIO_NAME");
        cfg.phone.country_code = get("PHONE_COUNTRY_CODE")
            .map(|cc| cc.trim_start_matches('+').to_string());
        if let Some(spec) = get("SERVICE_CATALOG") {
            cfg.catalog = ServiceCatalog::parse(&spec)?;
        }
        if let Some(v) = get("GUIDED_FLOW") {
            cfg.guided_flow = parse_bool("GUIDED_FLOW", &v)?;
        }

        if let Some(host) = get("HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = get("PORT") {
            cfg.server.port = port
                .parse()
                .map_err(|_| AcError::invalid_config("PORT", format!("not a port: {port}")))?;
        }

        cfg.validate()?;
        debug!(
            outbound = cfg.backend.enable_outbound,
            guided_flow = cfg.guided_flow,
            services = cfg.catalog.len(),
            "configuration loaded"
        );
        Ok(cfg)
    }

    /// Outbound calls need both the store URL and its key.
    pub fn validate(&self) -> Result<()> {
        if self.backend.enable_outbound {
            if self.backend.url.is_none() {
                return Err(AcError::MissingConfig("SUPABASE_URL".into()));
            }
            if self.backend.anon_key.is_none() {
                return Err(AcError::MissingConfig("SUPABASE_ANON_KEY".into()));
            }
        }
        Ok(())
    }

    /// Tenant label for a message: its first hashtag, else the configured defaults.
    pub fn business_name_for(&self, raw_body: &str) -> String {
        extract_hashtag(raw_body)
            .or_else(|| self.default_business.clone())
            .or_else(|| Some(self.business.hashtag.clone()).filter(|h| !h.is_empty()))
            .unwrap_or_else(|| FALLBACK_BUSINESS.to_string())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        other => Err(AcError::invalid_config(key, format!("not a boolean: {other}"))),
    }
}
