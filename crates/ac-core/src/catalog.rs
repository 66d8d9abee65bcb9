//! Service catalog offered by the guided flow and the price list.

use serde::{Deserialize, Serialize};

use crate::error::{AcError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceItem {
    pub name: String,
    pub price: f64,
}

impl ServiceItem {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self { name: name.into(), price }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCatalog {
    items: Vec<ServiceItem>,
}

impl ServiceCatalog {
    pub fn new(items: Vec<ServiceItem>) -> Self {
        Self { items }
    }

    /// Parse `Name:price;Name:price`. Blank entries are skipped.
    pub fn parse(spec: &str) -> Result<Self> {
        let mut items = Vec::new();
        for entry in spec.split(';').map(str::trim).filter(|e| !e.is_empty()) {
            let (name, price) = entry
                .rsplit_once(':')
                .ok_or_else(|| AcError::invalid_config("SERVICE_CATALOG", format!("missing price in '{entry}'")))?;
            let price: f64 = price
                .trim()
                .parse()
                .ok()
                .filter(|p: &f64| p.is_finite() && *p >= 0.0)
                .ok_or_else(|| AcError::invalid_config("SERVICE_CATALOG", format!("bad price in '{entry}'")))?;
            let name = name.trim();
            if name.is_empty() {
                return Err(AcError::invalid_config("SERVICE_CATALOG", format!("empty name in '{entry}'")));
            }
            items.push(ServiceItem::new(name, price));
        }
        if items.is_empty() {
            return Err(AcError::invalid_config("SERVICE_CATALOG", "no services"));
        }
        Ok(Self { items })
    }

    pub fn items(&self) -> &[ServiceItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 1-based lookup, as the user types it.
    pub fn get(&self, choice: usize) -> Option<&ServiceItem> {
        choice.checked_sub(1).and_then(|i| self.items.get(i))
    }

    /// Bulleted price list: `• Barba — $120`.
    pub fn price_list(&self) -> String {
        self.items
            .iter()
            .map(|s| format!("• {} — ${}", s.name, format_price(s.price)))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Numbered menu: `1) Barba — $120`.
    pub fn numbered_menu(&self) -> String {
        self.items
            .iter()
            .enumerate()
            .map(|(i, s)| format!("{}) {} — ${}", i + 1, s.name, format_price(s.price)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for ServiceCatalog {
    fn default() -> Self {
        Self::new(vec![
            ServiceItem::new("Corte clásico", 150.0),
            ServiceItem::new("Corte + Barba", 220.0),
            ServiceItem::new("Barba", 120.0),
        ])
    }
}

/// Whole prices without decimals, fractional ones with two.
pub fn format_price(price: f64) -> String {
    if price.fract() == 0.0 {
        format!("{}", price as i64)
    } else {
        format!("{:.2}", price)
    }
}
