use serde::{Deserialize, Serialize};

pub const DEFAULT_BRAND_NAME: &str = "BLUE STAR Trading & Co.";
const DEFAULT_COMPANY_ADDRESS: &str = "Haldia Dock Complex, Purba Medinipur, West Bengal 721604";
const DEFAULT_COMPANY_PHONE: &str = "+91 98300 00000";
const DEFAULT_COMPANY_EMAIL: &str = "contact@bluestar-trading.in";

/// Company identity shown in the header, footer, contact block and printouts.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Branding {
    pub brand_name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            brand_name: DEFAULT_BRAND_NAME.to_string(),
            address: DEFAULT_COMPANY_ADDRESS.to_string(),
            phone: DEFAULT_COMPANY_PHONE.to_string(),
            email: DEFAULT_COMPANY_EMAIL.to_string(),
        }
    }
}

fn pick(value: Option<&'static str>, fallback: &str) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

impl Branding {
    /// Reads `FREIGHT_*` variables baked in at compile time.
    pub fn from_build_env() -> Self {
        Self {
            brand_name: pick(option_env!("FREIGHT_BRAND_NAME"), DEFAULT_BRAND_NAME),
            address: pick(option_env!("FREIGHT_COMPANY_ADDRESS"), DEFAULT_COMPANY_ADDRESS),
            phone: pick(option_env!("FREIGHT_COMPANY_PHONE"), DEFAULT_COMPANY_PHONE),
            email: pick(option_env!("FREIGHT_COMPANY_EMAIL"), DEFAULT_COMPANY_EMAIL),
        }
    }

    /// First two words of the brand, rendered bold in the logo.
    pub fn logo_primary(&self) -> String {
        let words: Vec<&str> = self.brand_name.split_whitespace().take(2).collect();
        if words.is_empty() {
            "BLUE STAR".to_string()
        } else {
            words.join(" ")
        }
    }

    /// Remainder of the brand after the first two words.
    pub fn logo_secondary(&self) -> String {
        let rest: Vec<&str> = self.brand_name.split_whitespace().skip(2).collect();
        if rest.is_empty() {
            "Trading & Co.".to_string()
        } else {
            rest.join(" ")
        }
    }

    pub fn short_name(&self) -> String {
        self.logo_primary()
    }

    pub fn copyright(&self, year: i32) -> String {
        format!("\u{a9} {year} {} All Rights Reserved.", self.brand_name)
    }
}
