use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use freight_types::{Driver, Enquiry, Item, Party, PriceOverride, User, Vehicle, Voucher};
use serde::Deserialize;
use tokio::sync::RwLock;

/// Login and session policy. Missing keys fall back to the defaults.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    pub default_password: String,
    pub session_ttl_minutes: i64,
    pub max_login_attempts: u32,
    pub lockout_minutes: i64,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            default_password: "ChangeMe@123".into(),
            session_ttl_minutes: 720,
            max_login_attempts: 3,
            lockout_minutes: 15,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct UserRecord {
    pub user: User,
    pub password_hash: String,
    pub failed_attempts: u32,
    pub locked_until: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug)]
pub(crate) struct Session {
    pub user_id: u64,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub(crate) struct Ids {
    pub user: u64,
    pub party: u64,
    pub item: u64,
    pub price: u64,
    pub driver: u64,
    pub vehicle: u64,
    pub voucher: u64,
    pub line: u64,
    pub enquiry: u64,
}

pub(crate) fn next_id(counter: &mut u64) -> u64 {
    *counter += 1;
    *counter
}

/// First `PREFIX-NNNN` code from `start` upwards that `taken` does not claim.
pub(crate) fn free_code(prefix: &str, start: u64, taken: impl Fn(&str) -> bool) -> String {
    let mut n = start;
    loop {
        let code = format!("{prefix}-{n:04}");
        if !taken(&code) {
            return code;
        }
        n += 1;
    }
}

#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub ids: Ids,
    pub users: BTreeMap<u64, UserRecord>,
    pub sessions: HashMap<String, Session>,
    pub parties: BTreeMap<u64, Party>,
    pub items: BTreeMap<u64, Item>,
    pub overrides: Vec<PriceOverride>,
    pub drivers: BTreeMap<u64, Driver>,
    pub vehicles: BTreeMap<u64, Vehicle>,
    pub vouchers: BTreeMap<u64, Voucher>,
    /// Vouchers whose stock movement has already been booked.
    pub stock_applied: HashSet<u64>,
    pub enquiries: Vec<Enquiry>,
}

/// Shared handle to every record the back office manages.
///
/// Cloning is cheap; all clones see the same tables.
#[derive(Clone, Debug)]
pub struct Store {
    pub(crate) tables: Arc<RwLock<Tables>>,
    pub(crate) settings: Arc<AuthSettings>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new(AuthSettings::default())
    }
}

impl Store {
    pub fn new(settings: AuthSettings) -> Self {
        Self {
            tables: Arc::new(RwLock::new(Tables::default())),
            settings: Arc::new(settings),
        }
    }

    pub fn settings(&self) -> &AuthSettings {
        &self.settings
    }
}
