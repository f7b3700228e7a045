use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{DateTime, Duration, Utc};
use freight_types::{
    AuthSession, ChangePasswordRequest, LoginRequest, NewUser, SessionUser, User, UserRole,
};
use rand::thread_rng;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::store::{next_id, Session, Store, UserRecord};

const BAD_CREDENTIALS: &str = "Invalid username or password";

/// Hashing and verification run on the blocking pool.
async fn hash_password(password: &str) -> StoreResult<String> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(thread_rng());
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| StoreError::Hash(e.to_string()))
    })
    .await
    .map_err(|e| StoreError::Hash(e.to_string()))?
}

async fn verify_password(password: &str, hash: &str) -> bool {
    let password = password.to_string();
    let hash = hash.to_string();
    let outcome = tokio::task::spawn_blocking(move || match PasswordHash::new(&hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            warn!("stored password hash is unreadable: {e}");
            false
        }
    })
    .await;
    match outcome {
        Ok(valid) => valid,
        Err(e) => {
            warn!("password verification task failed: {e}");
            false
        }
    }
}

fn ensure_unlocked(record: &UserRecord, now: DateTime<Utc>) -> StoreResult<()> {
    match record.locked_until.filter(|until| *until > now) {
        Some(until) => {
            let waitMinutes = (until - now).num_minutes() + 1;
            Err(StoreError::Locked(format!(
                "Account locked. Try again in {waitMinutes} minutes."
            )))
        }
        None => Ok(()),
    }
}

impl Store {
    /// Registers a staff account with the configured default password.
    /// The account must change it on first login.
    pub async fn create_user(&self, request: NewUser) -> StoreResult<User> {
        request.validate()?;
        let hash = hash_password(&self.settings.default_password).await?;
        self.insert_user(request, hash, true).await
    }

    /// Ensures an admin account exists; an existing one is left untouched.
    pub async fn bootstrap_admin(&self, username: &str, email: &str, password: &str) -> StoreResult<User> {
        if let Some(existing) = self.find_user(username).await {
            debug!("admin account {username} already present");
            return Ok(existing);
        }
        let request = NewUser {
            username: username.to_string(),
            email: email.to_string(),
            full_name: Some("Administrator".into()),
            phone_number: None,
            role: UserRole::Admin,
        };
        request.validate()?;
        let hash = hash_password(password).await?;
        let user = self.insert_user(request, hash, false).await?;
        info!("bootstrapped admin account {}", user.username);
        Ok(user)
    }

    async fn insert_user(&self, request: NewUser, passwordHash: String, mustChange: bool) -> StoreResult<User> {
        let mut tables = self.tables.write().await;
        let username = request.username.trim().to_string();
        let email = request.email.trim().to_lowercase();
        if tables
            .users
            .values()
            .any(|r| r.user.username.eq_ignore_ascii_case(&username))
        {
            return Err(StoreError::Conflict(format!("Username {username} is already taken")));
        }
        if tables.users.values().any(|r| r.user.email == email) {
            return Err(StoreError::Conflict(format!("Email {email} is already registered")));
        }

        let now = Utc::now();
        let user = User {
            id: next_id(&mut tables.ids.user),
            username,
            email,
            full_name: request.full_name,
            phone_number: request.phone_number,
            role: request.role,
            active: true,
            password_change_required: mustChange,
            last_login: None,
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(
            user.id,
            UserRecord {
                user: user.clone(),
                password_hash: passwordHash,
                failed_attempts: 0,
                locked_until: None,
            },
        );
        info!("created user {} ({})", user.username, user.role);
        Ok(user)
    }

    async fn find_user(&self, username: &str) -> Option<User> {
        let tables = self.tables.read().await;
        tables
            .users
            .values()
            .find(|r| r.user.username.eq_ignore_ascii_case(username.trim()))
            .map(|r| r.user.clone())
    }

    async fn find_record(&self, username: &str) -> Option<UserRecord> {
        let tables = self.tables.read().await;
        tables
            .users
            .values()
            .find(|r| r.user.username.eq_ignore_ascii_case(username.trim()))
            .cloned()
    }

    pub async fn login(&self, request: &LoginRequest) -> StoreResult<AuthSession> {
        let Some(record) = self.find_record(&request.username).await else {
            warn!("login for unknown username {}", request.username);
            return Err(StoreError::Unauthorized(BAD_CREDENTIALS.into()));
        };
        let userId = record.user.id;
        let now = Utc::now();

        ensure_unlocked(&record, now)?;

        // hashing runs outside the lock
        if !verify_password(&request.password, &record.password_hash).await {
            return Err(self.record_failure(userId, now, BAD_CREDENTIALS).await);
        }

        if !record.user.active {
            return Err(StoreError::Forbidden("User account is deactivated".into()));
        }

        let mut tables = self.tables.write().await;
        let Some(entry) = tables.users.get_mut(&userId) else {
            return Err(StoreError::Unauthorized(BAD_CREDENTIALS.into()));
        };
        entry.failed_attempts = 0;
        entry.locked_until = None;
        entry.user.last_login = Some(now);
        if entry.user.password_change_required {
            info!("{} must change password before signing in", entry.user.username);
            return Err(StoreError::PasswordChangeRequired);
        }
        let user = SessionUser::from(&entry.user);

        let before = tables.sessions.len();
        tables.sessions.retain(|_, s| s.expires_at > now);
        let pruned = before - tables.sessions.len();
        if pruned > 0 {
            debug!("pruned {pruned} expired sessions");
        }

        let token = Uuid::new_v4().to_string();
        tables.sessions.insert(
            token.clone(),
            Session {
                user_id: userId,
                expires_at: now + Duration::minutes(self.settings.session_ttl_minutes),
            },
        );
        info!("session opened for {}", user.username);
        Ok(AuthSession { token, user })
    }

    /// Counts a wrong password against the account and locks it once the
    /// configured number of attempts is reached. Returns the error to report.
    async fn record_failure(&self, userId: u64, now: DateTime<Utc>, message: &str) -> StoreError {
        let maxAttempts = self.settings.max_login_attempts;
        let lockoutMinutes = self.settings.lockout_minutes;
        let mut tables = self.tables.write().await;
        let Some(entry) = tables.users.get_mut(&userId) else {
            return StoreError::Unauthorized(BAD_CREDENTIALS.into());
        };
        entry.failed_attempts += 1;
        warn!(
            "wrong password for {} (attempt {})",
            entry.user.username, entry.failed_attempts
        );
        if entry.failed_attempts >= maxAttempts {
            entry.failed_attempts = 0;
            entry.locked_until = Some(now + Duration::minutes(lockoutMinutes));
            warn!("locked {} for {lockoutMinutes} minutes", entry.user.username);
            return StoreError::Locked(format!(
                "Account locked due to too many failed attempts. Try again in {lockoutMinutes} minutes."
            ));
        }
        StoreError::Unauthorized(message.into())
    }

    /// Returns whether a session was actually revoked.
    pub async fn logout(&self, token: &str) -> bool {
        let removed = self.tables.write().await.sessions.remove(token).is_some();
        if removed {
            debug!("session revoked");
        }
        removed
    }

    /// Resolves a session token to its active user.
    pub async fn authenticate(&self, token: &str) -> StoreResult<User> {
        let now = Utc::now();
        let mut tables = self.tables.write().await;
        let Some(session) = tables.sessions.get(token).cloned() else {
            return Err(StoreError::Unauthorized("Not authenticated".into()));
        };
        if session.expires_at <= now {
            tables.sessions.remove(token);
            return Err(StoreError::Unauthorized("Session expired".into()));
        }
        match tables.users.get(&session.user_id) {
            Some(r) if r.user.active => Ok(r.user.clone()),
            _ => {
                tables.sessions.remove(token);
                Err(StoreError::Unauthorized("Not authenticated".into()))
            }
        }
    }

    pub async fn change_password(&self, request: &ChangePasswordRequest) -> StoreResult<()> {
        request.validate()?;
        let Some(record) = self.find_record(&request.username).await else {
            return Err(StoreError::Unauthorized(BAD_CREDENTIALS.into()));
        };
        let now = Utc::now();
        ensure_unlocked(&record, now)?;
        if !verify_password(&request.old_password, &record.password_hash).await {
            return Err(self
                .record_failure(record.user.id, now, "Current password is incorrect")
                .await);
        }
        let hash = hash_password(&request.new_password).await?;

        let mut tables = self.tables.write().await;
        let userId = record.user.id;
        let Some(entry) = tables.users.get_mut(&userId) else {
            return Err(StoreError::not_found("user", userId));
        };
        entry.password_hash = hash;
        entry.user.password_change_required = false;
        entry.failed_attempts = 0;
        entry.locked_until = None;
        entry.user.updated_at = now;
        tables.sessions.retain(|_, s| s.user_id != userId);
        info!("password changed for {}", record.user.username);
        Ok(())
    }

    pub async fn list_users(&self) -> Vec<User> {
        let tables = self.tables.read().await;
        tables.users.values().map(|r| r.user.clone()).collect()
    }

    pub async fn get_user(&self, id: u64) -> StoreResult<User> {
        let tables = self.tables.read().await;
        tables
            .users
            .get(&id)
            .map(|r| r.user.clone())
            .ok_or_else(|| StoreError::not_found("user", id))
    }

    /// Activates or deactivates an account. Deactivation revokes its sessions.
    pub async fn set_user_active(&self, actor: &User, id: u64, active: bool) -> StoreResult<User> {
        if !active && actor.id == id {
            return Err(StoreError::Forbidden("You cannot deactivate your own account".into()));
        }
        let mut tables = self.tables.write().await;
        let Some(entry) = tables.users.get_mut(&id) else {
            return Err(StoreError::not_found("user", id));
        };
        entry.user.active = active;
        entry.user.updated_at = Utc::now();
        let user = entry.user.clone();
        if !active {
            tables.sessions.retain(|_, s| s.user_id != id);
        }
        info!(
            "{} {} user {}",
            actor.username,
            if active { "activated" } else { "deactivated" },
            user.username
        );
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::AuthSettings;

    fn login(username: &str, password: &str) -> LoginRequest {
        LoginRequest {
            username: username.into(),
            password: password.into(),
        }
    }

    fn staff(username: &str) -> NewUser {
        NewUser {
            username: username.into(),
            email: format!("{username}@depot.in"),
            full_name: None,
            phone_number: None,
            role: UserRole::Manager,
        }
    }

    async fn store_with_admin() -> (Store, User) {
        let store = Store::new(AuthSettings::default());
        let admin = store
            .bootstrap_admin("admin", "admin@depot.in", "Admin@2026")
            .await
            .unwrap();
        (store, admin)
    }

    #[tokio::test]
    async fn login_opens_session_and_logout_revokes_it() {
        let (store, admin) = store_with_admin().await;
        let session = store.login(&login("admin", "Admin@2026")).await.unwrap();
        assert_eq!(session.user.id, admin.id);

        let resolved = store.authenticate(&session.token).await.unwrap();
        assert_eq!(resolved.username, "admin");
        assert!(resolved.last_login.is_some());

        assert!(store.logout(&session.token).await);
        assert!(matches!(
            store.authenticate(&session.token).await,
            Err(StoreError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn third_failure_locks_the_account() {
        let (store, _) = store_with_admin().await;
        for _ in 0..2 {
            assert!(matches!(
                store.login(&login("admin", "wrong")).await,
                Err(StoreError::Unauthorized(_))
            ));
        }
        assert!(matches!(
            store.login(&login("admin", "wrong")).await,
            Err(StoreError::Locked(_))
        ));
        // correct password is refused while locked
        assert!(matches!(
            store.login(&login("admin", "Admin@2026")).await,
            Err(StoreError::Locked(_))
        ));
    }

    #[tokio::test]
    async fn locked_account_cannot_change_password() {
        let (store, _) = store_with_admin().await;
        for _ in 0..3 {
            let _ = store.login(&login("admin", "wrong")).await;
        }
        let change = |old: &str| ChangePasswordRequest {
            username: "admin".into(),
            old_password: old.into(),
            new_password: "Taken-Over-99".into(),
        };
        assert!(matches!(
            store.change_password(&change("guess-1")).await,
            Err(StoreError::Locked(_))
        ));
        assert!(matches!(
            store.change_password(&change("Admin@2026")).await,
            Err(StoreError::Locked(_))
        ));
        assert!(matches!(
            store.login(&login("admin", "Admin@2026")).await,
            Err(StoreError::Locked(_))
        ));
    }

    #[tokio::test]
    async fn wrong_current_password_counts_towards_lockout() {
        let (store, _) = store_with_admin().await;
        let change = |old: &str| ChangePasswordRequest {
            username: "admin".into(),
            old_password: old.into(),
            new_password: "Taken-Over-99".into(),
        };
        for _ in 0..2 {
            assert!(matches!(
                store.change_password(&change("guess")).await,
                Err(StoreError::Unauthorized(_))
            ));
        }
        assert!(matches!(
            store.change_password(&change("guess")).await,
            Err(StoreError::Locked(_))
        ));
        assert!(matches!(
            store.login(&login("admin", "Admin@2026")).await,
            Err(StoreError::Locked(_))
        ));
    }

    #[tokio::test]
    async fn login_prunes_expired_sessions() {
        let (store, admin) = store_with_admin().await;
        {
            let mut tables = store.tables.write().await;
            tables.sessions.insert(
                "stale".into(),
                Session {
                    user_id: admin.id,
                    expires_at: Utc::now() - Duration::minutes(1),
                },
            );
        }
        let session = store.login(&login("admin", "Admin@2026")).await.unwrap();
        let tables = store.tables.read().await;
        assert!(!tables.sessions.contains_key("stale"));
        assert!(tables.sessions.contains_key(&session.token));
    }

    #[tokio::test]
    async fn new_staff_must_change_default_password() {
        let (store, _) = store_with_admin().await;
        let user = store.create_user(staff("ravi")).await.unwrap();
        assert!(user.password_change_required);

        assert!(matches!(
            store.login(&login("ravi", "ChangeMe@123")).await,
            Err(StoreError::PasswordChangeRequired)
        ));

        store
            .change_password(&ChangePasswordRequest {
                username: "ravi".into(),
                old_password: "ChangeMe@123".into(),
                new_password: "Depot-Gate-42".into(),
            })
            .await
            .unwrap();

        let session = store.login(&login("ravi", "Depot-Gate-42")).await.unwrap();
        assert_eq!(session.user.username, "ravi");
    }

    #[tokio::test]
    async fn duplicate_username_conflicts() {
        let (store, _) = store_with_admin().await;
        store.create_user(staff("ravi")).await.unwrap();
        let mut again = staff("RAVI");
        again.email = "other@depot.in".into();
        assert!(matches!(store.create_user(again).await, Err(StoreError::Conflict(_))));
    }

    #[tokio::test]
    async fn deactivation_rules() {
        let (store, admin) = store_with_admin().await;
        assert!(matches!(
            store.set_user_active(&admin, admin.id, false).await,
            Err(StoreError::Forbidden(_))
        ));

        let other = store.create_user(staff("mita")).await.unwrap();
        let updated = store.set_user_active(&admin, other.id, false).await.unwrap();
        assert!(!updated.active);
        assert_eq!(updated.status_label(), "DEACTIVATED");

        let updated = store.set_user_active(&admin, other.id, true).await.unwrap();
        assert!(updated.active);
    }

    #[tokio::test]
    async fn deactivated_account_cannot_sign_in() {
        let (store, admin) = store_with_admin().await;
        let user = store.create_user(staff("joy")).await.unwrap();
        store
            .change_password(&ChangePasswordRequest {
                username: "joy".into(),
                old_password: "ChangeMe@123".into(),
                new_password: "Joy-Route-77".into(),
            })
            .await
            .unwrap();
        store.set_user_active(&admin, user.id, false).await.unwrap();
        assert!(matches!(
            store.login(&login("joy", "Joy-Route-77")).await,
            Err(StoreError::Forbidden(_))
        ));
    }
}
