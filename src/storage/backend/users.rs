use sea_orm::ActiveValue::Set;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use tracing::info;

use super::converters::{model_to_user, user_to_active_model};
use super::{SeaOrmStorage, is_unique_violation, retry};
use crate::errors::{QrmaticError, Result};
use crate::storage::User;

use migration::entities::user;

impl SeaOrmStorage {
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let db = &self.db;

        let model = retry::with_retry("find_user_by_email", self.retry_config, || async {
            user::Entity::find()
                .filter(user::Column::Email.eq(email))
                .one(db)
                .await
        })
        .await
        .map_err(|e| QrmaticError::database_operation(format!("Failed to load user: {}", e)))?;

        Ok(model.map(model_to_user))
    }

    pub async fn insert_user(&self, user: &User) -> Result<()> {
        let result = user::Entity::insert(user_to_active_model(user))
            .exec_without_returning(&self.db)
            .await;

        match result {
            Ok(_) => {
                info!("User created: {}", user.email);
                Ok(())
            }
            Err(e) if is_unique_violation(&e) => Err(QrmaticError::conflict(format!(
                "A user with email {} already exists",
                user.email
            ))),
            Err(e) => Err(QrmaticError::database_operation(format!(
                "Failed to create user: {}",
                e
            ))),
        }
    }

    /// 返回是否找到并更新了该用户
    pub async fn update_password_hash(&self, email: &str, password_hash: &str) -> Result<bool> {
        let result = user::Entity::update_many()
            .set(user::ActiveModel {
                password_hash: Set(password_hash.to_string()),
                ..Default::default()
            })
            .filter(user::Column::Email.eq(email))
            .exec(&self.db)
            .await
            .map_err(|e| QrmaticError::database_operation(format!("Failed to update password: {}", e)))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        let models = user::Entity::find()
            .order_by_asc(user::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| QrmaticError::database_operation(format!("Failed to list users: {}", e)))?;

        Ok(models.into_iter().map(model_to_user).collect())
    }
}
