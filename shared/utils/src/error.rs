use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum PartlinkError {
    #[error("Supplier unreachable: {supplier} - {message}")]
    SupplierUnreachable { supplier: String, message: String },

    #[error("All supplier APIs failed. Please try again later.")]
    AllSuppliersUnreachable,

    #[error("Part {part_number} not found from any suppliers")]
    PartNotFound { part_number: String },

    #[error("No parser registered for supplier: {supplier}")]
    ParserMissing { supplier: String },

    #[error("Malformed payload from {supplier}: {message}")]
    MalformedPayload { supplier: String, message: String },

    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl PartlinkError {
    pub fn supplier_unreachable(supplier: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SupplierUnreachable {
            supplier: supplier.into(),
            message: message.into(),
        }
    }

    pub fn part_not_found(part_number: impl Into<String>) -> Self {
        Self::PartNotFound {
            part_number: part_number.into(),
        }
    }

    pub fn parser_missing(supplier: impl Into<String>) -> Self {
        Self::ParserMissing {
            supplier: supplier.into(),
        }
    }

    pub fn malformed_payload(supplier: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedPayload {
            supplier: supplier.into(),
            message: message.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::SupplierUnreachable { .. } => "SUPPLIER_UNREACHABLE",
            Self::AllSuppliersUnreachable => "ALL_SUPPLIERS_UNREACHABLE",
            Self::PartNotFound { .. } => "PART_NOT_FOUND",
            Self::ParserMissing { .. } => "PARSER_MISSING",
            Self::MalformedPayload { .. } => "MALFORMED_SUPPLIER_PAYLOAD",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Configuration { .. } => "CONFIGURATION_ERROR",
            Self::Internal { .. } => "INTERNAL_SERVER_ERROR",
        }
    }

    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::SupplierUnreachable { .. } => 502,
            Self::AllSuppliersUnreachable => 503,
            Self::PartNotFound { .. } => 404,
            Self::ParserMissing { .. } => 502,
            Self::MalformedPayload { .. } => 500,
            Self::Validation { .. } => 400,
            Self::Configuration { .. } => 500,
            Self::Internal { .. } => 500,
        }
    }

    /// Whether the message may be shown to API callers as-is.
    pub fn is_client_visible(&self) -> bool {
        !matches!(
            self,
            Self::MalformedPayload { .. } | Self::Configuration { .. } | Self::Internal { .. }
        )
    }
}

pub type PartlinkResult<T> = Result<T, PartlinkError>;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl From<PartlinkError> for ErrorResponse {
    fn from(error: PartlinkError) -> Self {
        let message = if error.is_client_visible() {
            error.to_string()
        } else {
            "Internal server error".to_string()
        };

        Self {
            error: message.clone(),
            code: error.error_code().to_string(),
            message,
            details: None,
        }
    }
}
