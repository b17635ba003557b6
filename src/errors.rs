use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum QrmaticError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    Validation(String),
    NotFound(String),
    Unauthorized(String),
    Conflict(String),
    Render(String),
    Config(String),
    FileOperation(String),
    Serialization(String),
}

impl QrmaticError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            QrmaticError::DatabaseConfig(_) => "E001",
            QrmaticError::DatabaseConnection(_) => "E002",
            QrmaticError::DatabaseOperation(_) => "E003",
            QrmaticError::Validation(_) => "E004",
            QrmaticError::NotFound(_) => "E005",
            QrmaticError::Unauthorized(_) => "E006",
            QrmaticError::Conflict(_) => "E007",
            QrmaticError::Render(_) => "E008",
            QrmaticError::Config(_) => "E009",
            QrmaticError::FileOperation(_) => "E010",
            QrmaticError::Serialization(_) => "E011",
        }
    }

    /// Numeric form of `code()`, used in JSON responses.
    pub fn numeric_code(&self) -> i32 {
        self.code()[1..].parse().unwrap_or(0)
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            QrmaticError::DatabaseConfig(_) => "Database Configuration Error",
            QrmaticError::DatabaseConnection(_) => "Database Connection Error",
            QrmaticError::DatabaseOperation(_) => "Database Operation Error",
            QrmaticError::Validation(_) => "Validation Error",
            QrmaticError::NotFound(_) => "Resource Not Found",
            QrmaticError::Unauthorized(_) => "Unauthorized",
            QrmaticError::Conflict(_) => "Conflict",
            QrmaticError::Render(_) => "Render Error",
            QrmaticError::Config(_) => "Configuration Error",
            QrmaticError::FileOperation(_) => "File Operation Error",
            QrmaticError::Serialization(_) => "Serialization Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            QrmaticError::DatabaseConfig(msg)
            | QrmaticError::DatabaseConnection(msg)
            | QrmaticError::DatabaseOperation(msg)
            | QrmaticError::Validation(msg)
            | QrmaticError::NotFound(msg)
            | QrmaticError::Unauthorized(msg)
            | QrmaticError::Conflict(msg)
            | QrmaticError::Render(msg)
            | QrmaticError::Config(msg)
            | QrmaticError::FileOperation(msg)
            | QrmaticError::Serialization(msg) => msg,
        }
    }

    pub fn http_status(&self) -> StatusCode {
        match self {
            QrmaticError::Validation(_) => StatusCode::BAD_REQUEST,
            QrmaticError::NotFound(_) => StatusCode::NOT_FOUND,
            QrmaticError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            QrmaticError::Conflict(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 格式化为彩色输出（用于 CLI 模式）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for QrmaticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for QrmaticError {}

// 便捷的构造函数
impl QrmaticError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        QrmaticError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        QrmaticError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        QrmaticError::DatabaseOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        QrmaticError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        QrmaticError::NotFound(msg.into())
    }

    pub fn unauthorized<T: Into<String>>(msg: T) -> Self {
        QrmaticError::Unauthorized(msg.into())
    }

    pub fn conflict<T: Into<String>>(msg: T) -> Self {
        QrmaticError::Conflict(msg.into())
    }

    pub fn render<T: Into<String>>(msg: T) -> Self {
        QrmaticError::Render(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        QrmaticError::Config(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        QrmaticError::FileOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        QrmaticError::Serialization(msg.into())
    }
}

impl From<sea_orm::DbErr> for QrmaticError {
    fn from(err: sea_orm::DbErr) -> Self {
        QrmaticError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for QrmaticError {
    fn from(err: std::io::Error) -> Self {
        QrmaticError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for QrmaticError {
    fn from(err: serde_json::Error) -> Self {
        QrmaticError::Serialization(err.to_string())
    }
}

impl From<argon2::password_hash::Error> for QrmaticError {
    fn from(err: argon2::password_hash::Error) -> Self {
        QrmaticError::Validation(format!("password hash error: {}", err))
    }
}

impl From<jsonwebtoken::errors::Error> for QrmaticError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        QrmaticError::Unauthorized(format!("invalid session: {}", err))
    }
}

impl From<config::ConfigError> for QrmaticError {
    fn from(err: config::ConfigError) -> Self {
        QrmaticError::Config(err.to_string())
    }
}

impl From<qrcode::types::QrError> for QrmaticError {
    fn from(err: qrcode::types::QrError) -> Self {
        QrmaticError::Render(err.to_string())
    }
}

impl From<image::ImageError> for QrmaticError {
    fn from(err: image::ImageError) -> Self {
        QrmaticError::Render(err.to_string())
    }
}

impl From<askama::Error> for QrmaticError {
    fn from(err: askama::Error) -> Self {
        QrmaticError::Render(format!("template error: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, QrmaticError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_and_status() {
        let err = QrmaticError::not_found("QR code not found");
        assert_eq!(err.code(), "E005");
        assert_eq!(err.numeric_code(), 5);
        assert_eq!(err.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "QR code not found");
        assert_eq!(
            err.to_string(),
            "Resource Not Found: QR code not found"
        );
    }

    #[test]
    fn test_db_err_conversion() {
        let err: QrmaticError = sea_orm::DbErr::Custom("boom".into()).into();
        assert!(matches!(err, QrmaticError::DatabaseOperation(_)));
        assert_eq!(err.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
