//! Staff user repository for database operations
//!
//! Account management for the admin panel. Passwords are argon2-hashed
//! before they reach the database, logins are unique, and a user can never
//! delete the account they are logged in as.

use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use crate::auth::hash_password;
use crate::error::{RepositoryError, is_unique_violation};
use crate::models::staff_user::{self, Entity as StaffUser};

const DUPLICATE_LOGIN: &str = "A user with this login already exists";

/// Fields required to create a staff account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub surname: String,
    pub name: String,
    pub patronymic: Option<String>,
    pub login: String,
    pub password: String,
    pub position: String,
}

/// Fields accepted by an account update. A present password is re-hashed
/// and bumps the password change date.
#[derive(Debug, Clone)]
pub struct UserUpdate {
    pub surname: String,
    pub name: String,
    pub patronymic: Option<String>,
    pub login: String,
    pub password: Option<String>,
    pub position: String,
}

/// Repository for staff user database operations
#[derive(Debug, Clone)]
pub struct UserRepository {
    /// Database connection pool
    pub db: Arc<DatabaseConnection>,
}

impl UserRepository {
    /// Creates a new UserRepository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Lists all staff accounts ordered by id.
    pub async fn list_all(&self) -> Result<Vec<staff_user::Model>, RepositoryError> {
        let users = StaffUser::find()
            .order_by_asc(staff_user::Column::Id)
            .all(&*self.db)
            .await?;
        Ok(users)
    }

    /// Finds a user by id
    pub async fn find_by_id(&self, id: i32) -> Result<Option<staff_user::Model>, RepositoryError> {
        let user = StaffUser::find_by_id(id).one(&*self.db).await?;
        Ok(user)
    }

    /// Finds a user by their unique login
    pub async fn find_by_login(
        &self,
        login: &str,
    ) -> Result<Option<staff_user::Model>, RepositoryError> {
        let user = StaffUser::find()
            .filter(staff_user::Column::Login.eq(login))
            .one(&*self.db)
            .await?;
        Ok(user)
    }

    /// Number of staff accounts, used by stats and startup seeding.
    pub async fn count(&self) -> Result<u64, RepositoryError> {
        use sea_orm::PaginatorTrait;
        let count = StaffUser::find().count(&*self.db).await?;
        Ok(count)
    }

    /// Creates a staff account. Duplicate logins fail with Conflict and
    /// leave the table unchanged.
    pub async fn create(&self, input: NewUser) -> Result<staff_user::Model, RepositoryError> {
        for (field, value) in [
            ("surname", &input.surname),
            ("name", &input.name),
            ("login", &input.login),
            ("password", &input.password),
            ("position", &input.position),
        ] {
            if value.trim().is_empty() {
                return Err(RepositoryError::validation(format!(
                    "{} is required",
                    field
                )));
            }
        }

        let hash = hash_password(&input.password)
            .map_err(|err| DbErr::Custom(format!("password hashing failed: {}", err)))?;

        let result = staff_user::ActiveModel {
            id: NotSet,
            surname: Set(input.surname),
            name: Set(input.name),
            patronymic: Set(input.patronymic),
            login: Set(input.login),
            password: Set(hash),
            position: Set(input.position),
            last_success_login: Set(None),
            last_failed_login: Set(None),
            password_change_date: Set(Utc::now().into()),
        }
        .insert(&*self.db)
        .await;

        match result {
            Ok(user) => {
                tracing::info!(user_id = user.id, login = %user.login, "Created staff account");
                Ok(user)
            }
            Err(err) if is_unique_violation(&err) => {
                Err(RepositoryError::conflict(DUPLICATE_LOGIN))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Updates a staff account; NotFound for unknown ids, Conflict when the
    /// new login collides with another account.
    pub async fn update(
        &self,
        id: i32,
        input: UserUpdate,
    ) -> Result<staff_user::Model, RepositoryError> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found(format!("User {} not found", id)))?;

        let mut active: staff_user::ActiveModel = existing.into();
        active.surname = Set(input.surname);
        active.name = Set(input.name);
        active.patronymic = Set(input.patronymic);
        active.login = Set(input.login);
        active.position = Set(input.position);
        if let Some(password) = input.password.filter(|p| !p.trim().is_empty()) {
            let hash = hash_password(&password)
                .map_err(|err| DbErr::Custom(format!("password hashing failed: {}", err)))?;
            active.password = Set(hash);
            active.password_change_date = Set(Utc::now().into());
        }

        match active.update(&*self.db).await {
            Ok(user) => Ok(user),
            Err(err) if is_unique_violation(&err) => {
                Err(RepositoryError::conflict(DUPLICATE_LOGIN))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Deletes a staff account. Deleting the account you are logged in as
    /// is rejected.
    pub async fn delete(&self, id: i32, current_user_id: i32) -> Result<(), RepositoryError> {
        if id == current_user_id {
            return Err(RepositoryError::validation(
                "You cannot delete your own account",
            ));
        }

        let result = StaffUser::delete_by_id(id).exec(&*self.db).await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::not_found(format!("User {} not found", id)));
        }
        tracing::info!(user_id = id, "Deleted staff account");
        Ok(())
    }

    /// Replaces a user's password hash and bumps the change date.
    pub async fn set_password(&self, id: i32, new_password: &str) -> Result<(), RepositoryError> {
        if new_password.trim().is_empty() {
            return Err(RepositoryError::validation("new password is required"));
        }

        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found(format!("User {} not found", id)))?;

        let hash = hash_password(new_password)
            .map_err(|err| DbErr::Custom(format!("password hashing failed: {}", err)))?;

        let mut active: staff_user::ActiveModel = existing.into();
        active.password = Set(hash);
        active.password_change_date = Set(Utc::now().into());
        active.update(&*self.db).await?;
        Ok(())
    }

    /// Stamps the last successful login time.
    pub async fn record_login_success(&self, id: i32) -> Result<(), RepositoryError> {
        self.stamp_login(id, true).await
    }

    /// Stamps the last failed login time.
    pub async fn record_login_failure(&self, id: i32) -> Result<(), RepositoryError> {
        self.stamp_login(id, false).await
    }

    async fn stamp_login(&self, id: i32, success: bool) -> Result<(), RepositoryError> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(());
        };
        let mut active: staff_user::ActiveModel = existing.into();
        if success {
            active.last_success_login = Set(Some(Utc::now().into()));
        } else {
            active.last_failed_login = Set(Some(Utc::now().into()));
        }
        active.update(&*self.db).await?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::auth::verify_password;
    use crate::repositories::room::tests::setup_db;

    pub(crate) fn new_user(login: &str) -> NewUser {
        NewUser {
            surname: "Petrov".to_string(),
            name: "Petr".to_string(),
            patronymic: None,
            login: login.to_string(),
            password: "secret123".to_string(),
            position: "manager".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_hashes_password() {
        let db = setup_db().await;
        let repo = UserRepository::new(db);

        let user = repo.create(new_user("petrov")).await.unwrap();
        assert_ne!(user.password, "secret123");
        assert!(verify_password("secret123", &user.password));
    }

    #[tokio::test]
    async fn test_duplicate_login_conflicts_and_inserts_nothing() {
        let db = setup_db().await;
        let repo = UserRepository::new(db);

        repo.create(new_user("petrov")).await.unwrap();
        let before = repo.count().await.unwrap();

        let err = repo.create(new_user("petrov")).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
        assert_eq!(repo.count().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_create_requires_all_fields() {
        let db = setup_db().await;
        let repo = UserRepository::new(db);

        let mut input = new_user("petrov");
        input.position = String::new();
        let err = repo.create(input).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_without_password_keeps_hash() {
        let db = setup_db().await;
        let repo = UserRepository::new(db);

        let user = repo.create(new_user("petrov")).await.unwrap();
        let updated = repo
            .update(
                user.id,
                UserUpdate {
                    surname: "Sidorov".to_string(),
                    name: user.name.clone(),
                    patronymic: None,
                    login: user.login.clone(),
                    password: None,
                    position: "reception".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.surname, "Sidorov");
        assert_eq!(updated.password, user.password);
        assert_eq!(updated.password_change_date, user.password_change_date);
    }

    #[tokio::test]
    async fn test_update_with_password_rehashes() {
        let db = setup_db().await;
        let repo = UserRepository::new(db);

        let user = repo.create(new_user("petrov")).await.unwrap();
        let updated = repo
            .update(
                user.id,
                UserUpdate {
                    surname: user.surname.clone(),
                    name: user.name.clone(),
                    patronymic: None,
                    login: user.login.clone(),
                    password: Some("newpass456".to_string()),
                    position: user.position.clone(),
                },
            )
            .await
            .unwrap();

        assert!(verify_password("newpass456", &updated.password));
        assert!(updated.password_change_date > user.password_change_date);
    }

    #[tokio::test]
    async fn test_self_delete_is_rejected() {
        let db = setup_db().await;
        let repo = UserRepository::new(db);

        let user = repo.create(new_user("petrov")).await.unwrap();
        let err = repo.delete(user.id, user.id).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Validation(_)));

        // account still queryable
        assert!(repo.find_by_id(user.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_other_account() {
        let db = setup_db().await;
        let repo = UserRepository::new(db);

        let admin = repo.create(new_user("admin")).await.unwrap();
        let other = repo.create(new_user("petrov")).await.unwrap();

        repo.delete(other.id, admin.id).await.unwrap();
        assert!(repo.find_by_id(other.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_password() {
        let db = setup_db().await;
        let repo = UserRepository::new(db);

        let user = repo.create(new_user("petrov")).await.unwrap();
        repo.set_password(user.id, "changed789").await.unwrap();

        let reloaded = repo.find_by_id(user.id).await.unwrap().unwrap();
        assert!(verify_password("changed789", &reloaded.password));
    }

    #[tokio::test]
    async fn test_login_stamps() {
        let db = setup_db().await;
        let repo = UserRepository::new(db);

        let user = repo.create(new_user("petrov")).await.unwrap();
        assert!(user.last_success_login.is_none());

        repo.record_login_success(user.id).await.unwrap();
        repo.record_login_failure(user.id).await.unwrap();

        let reloaded = repo.find_by_id(user.id).await.unwrap().unwrap();
        assert!(reloaded.last_success_login.is_some());
        assert!(reloaded.last_failed_login.is_some());
    }
}
