// src/auth/service.rs

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use super::jwt::{Claims, JwtKeys};
use super::models::{
    AuthResponse, LoginRequest, RegisterRequest, Role, UpdateSettingsRequest, User,
    UserWithPassword,
};
use super::password::{hash_password, verify_password};
use crate::config::AuthConfig;
use crate::error::{PortalError, PortalResult};
use crate::validation;

const USER_COLUMNS: &str = "id, name, email, role, date";

pub struct AuthService {
    db: SqlitePool,
    keys: JwtKeys,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(db: SqlitePool, config: &AuthConfig) -> Self {
        Self {
            db,
            keys: JwtKeys::new(config),
            bcrypt_cost: config.bcrypt_cost,
        }
    }

    pub async fn register(&self, req: RegisterRequest) -> PortalResult<AuthResponse> {
        let name = validation::required(&req.name, "Name is required")?;
        let email = validation::email(&req.email)?;
        validation::password(&req.password)?;

        if self.email_exists(&email).await? {
            return Err(PortalError::conflict("User already exists"));
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            name,
            email,
            role: Role::User,
            date: Utc::now(),
        };
        let password_hash = hash_password(&req.password, self.bcrypt_cost)?;

        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password_hash, role, date)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&password_hash)
        .bind(user.role)
        .bind(user.date)
        .execute(&self.db)
        .await
        .map_err(unique_email_conflict)?;

        info!("Registered user {} ({})", user.id, user.email);

        let token = self.keys.create_token(&user)?;
        Ok(AuthResponse { token })
    }

    pub async fn login(&self, req: LoginRequest) -> PortalResult<AuthResponse> {
        let email = req.email.trim().to_lowercase();
        let user = self
            .get_user_by_email(&email)
            .await?
            .ok_or_else(|| PortalError::unauthorized("Invalid credentials"))?;

        if !verify_password(&req.password, &user.password_hash)? {
            return Err(PortalError::unauthorized("Invalid credentials"));
        }

        let token = self.keys.create_token(&user.into())?;
        Ok(AuthResponse { token })
    }

    pub fn verify_token(&self, token: &str) -> PortalResult<Claims> {
        self.keys.verify_token(token)
    }

    pub async fn find_user(&self, user_id: &str) -> PortalResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(user)
    }

    pub async fn current_user(&self, user_id: &str) -> PortalResult<User> {
        self.find_user(user_id)
            .await?
            .ok_or_else(|| PortalError::not_found("User not found"))
    }

    /// All accounts, oldest registration first.
    pub async fn list_users(&self) -> PortalResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY date ASC, id ASC"
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(users)
    }

    pub async fn update_settings(
        &self,
        user_id: &str,
        req: UpdateSettingsRequest,
    ) -> PortalResult<User> {
        let user = self
            .get_user_by_id(user_id)
            .await?
            .ok_or_else(|| PortalError::not_found("User not found"))?;

        let name = match req.name {
            Some(ref n) => validation::required(n, "Name is required")?,
            None => user.name.clone(),
        };

        let email = match req.email {
            Some(ref e) => {
                let email = validation::email(e)?;
                if email != user.email && self.email_exists(&email).await? {
                    return Err(PortalError::conflict("Email already in use"));
                }
                email
            }
            None => user.email.clone(),
        };

        let password_hash = match req.new_password {
            Some(ref new_password) => {
                let current = req.current_password.as_deref().unwrap_or_default();
                if !verify_password(current, &user.password_hash)? {
                    return Err(PortalError::unauthorized("Current password is incorrect"));
                }
                validation::password(new_password)?;
                hash_password(new_password, self.bcrypt_cost)?
            }
            None => user.password_hash.clone(),
        };

        sqlx::query("UPDATE users SET name = ?, email = ?, password_hash = ? WHERE id = ?")
            .bind(&name)
            .bind(&email)
            .bind(&password_hash)
            .bind(user_id)
            .execute(&self.db)
            .await
            .map_err(unique_email_conflict)?;

        info!("Updated settings for user {}", user_id);
        self.current_user(user_id).await
    }

    /// Grant or revoke the admin role on behalf of an administrator.
    pub async fn set_role(&self, actor: &User, target_id: &str, role: Role) -> PortalResult<User> {
        if !actor.is_admin() {
            return Err(PortalError::forbidden("Admin access required"));
        }
        if actor.id == target_id && role != Role::Admin {
            return Err(PortalError::validation("You cannot remove your own admin rights"));
        }

        let updated = self.write_role(target_id, role).await?;
        info!("{} set role of {} to {}", actor.id, target_id, role);
        Ok(updated)
    }

    /// Role change without an acting administrator, used by the CLI bootstrap.
    pub async fn set_role_by_email(&self, email: &str, role: Role) -> PortalResult<User> {
        let email = email.trim().to_lowercase();
        let user = self
            .get_user_by_email(&email)
            .await?
            .ok_or_else(|| PortalError::not_found(format!("No user with email {email}")))?;

        self.write_role(&user.id, role).await
    }

    async fn write_role(&self, user_id: &str, role: Role) -> PortalResult<User> {
        let result = sqlx::query("UPDATE users SET role = ? WHERE id = ?")
            .bind(role)
            .bind(user_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(PortalError::not_found("User not found"));
        }

        self.current_user(user_id).await
    }

    async fn get_user_by_email(&self, email: &str) -> PortalResult<Option<UserWithPassword>> {
        let user = sqlx::query_as::<_, UserWithPassword>(
            "SELECT id, name, email, password_hash, role, date FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;

        Ok(user)
    }

    async fn get_user_by_id(&self, user_id: &str) -> PortalResult<Option<UserWithPassword>> {
        let user = sqlx::query_as::<_, UserWithPassword>(
            "SELECT id, name, email, password_hash, role, date FROM users WHERE id = ?",
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(user)
    }

    async fn email_exists(&self, email: &str) -> PortalResult<bool> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE email = ?")
            .bind(email)
            .fetch_one(&self.db)
            .await?;

        Ok(count.0 > 0)
    }
}

// Two concurrent registrations can both pass the existence check
fn unique_email_conflict(err: sqlx::Error) -> PortalError {
    let err = PortalError::from(err);
    if err.is_unique_violation() {
        PortalError::conflict("User already exists")
    } else {
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PortalConfig;
    use crate::db;

    async fn service() -> AuthService {
        let config = PortalConfig::for_tests();
        let pool = db::init(&config.database).await.unwrap();
        AuthService::new(pool, &config.auth)
    }

    fn register_req(name: &str, email: &str) -> RegisterRequest {
        RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: "secret123".to_string(),
        }
    }

    async fn register(service: &AuthService, name: &str, email: &str) -> User {
        let auth = service.register(register_req(name, email)).await.unwrap();
        let claims = service.verify_token(&auth.token).unwrap();
        service.current_user(&claims.sub).await.unwrap()
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let service = service().await;
        let user = register(&service, "Yassine", "Yassine@ENSA.ma").await;

        assert_eq!(user.email, "yassine@ensa.ma");
        assert_eq!(user.role, Role::User);

        let auth = service
            .login(LoginRequest {
                email: "yassine@ensa.ma".to_string(),
                password: "secret123".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(service.verify_token(&auth.token).unwrap().sub, user.id);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let service = service().await;
        register(&service, "A", "dup@ensa.ma").await;

        let err = service.register(register_req("B", "DUP@ensa.ma")).await.unwrap_err();
        assert!(matches!(err, PortalError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_login_errors_do_not_reveal_which_field() {
        let service = service().await;
        register(&service, "A", "a@ensa.ma").await;

        let unknown = service
            .login(LoginRequest { email: "nobody@ensa.ma".into(), password: "secret123".into() })
            .await
            .unwrap_err();
        let wrong = service
            .login(LoginRequest { email: "a@ensa.ma".into(), password: "nope-nope".into() })
            .await
            .unwrap_err();

        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[tokio::test]
    async fn test_admin_cannot_demote_self() {
        let service = service().await;
        let user = register(&service, "Admin", "admin@ensa.ma").await;
        let admin = service.set_role_by_email("admin@ensa.ma", Role::Admin).await.unwrap();
        assert_eq!(admin.id, user.id);

        let err = service.set_role(&admin, &admin.id, Role::User).await.unwrap_err();
        assert!(matches!(err, PortalError::Validation(_)));
    }

    #[tokio::test]
    async fn test_non_admin_cannot_promote() {
        let service = service().await;
        let a = register(&service, "A", "a@ensa.ma").await;
        let b = register(&service, "B", "b@ensa.ma").await;

        let err = service.set_role(&a, &b.id, Role::Admin).await.unwrap_err();
        assert!(matches!(err, PortalError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_promote_unknown_user() {
        let service = service().await;
        register(&service, "Admin", "admin@ensa.ma").await;
        let admin = service.set_role_by_email("admin@ensa.ma", Role::Admin).await.unwrap();

        let err = service.set_role(&admin, "missing", Role::Admin).await.unwrap_err();
        assert!(matches!(err, PortalError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_change_password_requires_current() {
        let service = service().await;
        let user = register(&service, "A", "a@ensa.ma").await;

        let err = service
            .update_settings(
                &user.id,
                UpdateSettingsRequest {
                    current_password: Some("wrong-one".into()),
                    new_password: Some("brand-new".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, PortalError::Unauthorized(_)));

        service
            .update_settings(
                &user.id,
                UpdateSettingsRequest {
                    name: Some("  Amine ".into()),
                    current_password: Some("secret123".into()),
                    new_password: Some("brand-new".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let auth = service
            .login(LoginRequest { email: "a@ensa.ma".into(), password: "brand-new".into() })
            .await
            .unwrap();
        let me = service
            .current_user(&service.verify_token(&auth.token).unwrap().sub)
            .await
            .unwrap();
        assert_eq!(me.name, "Amine");
    }

    #[tokio::test]
    async fn test_list_users_oldest_first() {
        let service = service().await;
        let first = register(&service, "First", "first@ensa.ma").await;
        let second = register(&service, "Second", "second@ensa.ma").await;

        let users = service.list_users().await.unwrap();
        assert_eq!(users.len(), 2);
        assert!(users[0].date <= users[1].date);
        let ids: Vec<_> = users.iter().map(|u| u.id.as_str()).collect();
        assert!(ids.contains(&first.id.as_str()) && ids.contains(&second.id.as_str()));
    }
}
