use thiserror::Error;

/// How an error should be presented to the person at the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Input rejected locally, nothing was sent.
    Validation,
    /// The backend answered with `success: false`.
    Rejected,
    /// Transport, decode, or actor plumbing failure.
    Transport,
}

/// Errors raised while talking to the backend over HTTP.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Transport(String),
    #[error("Could not decode response: {0}")]
    Decode(String),
    #[error("Backend answered {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Invalid backend address: {0}")]
    InvalidUrl(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

/// Errors from the sale builder and its service.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SaleError {
    #[error("Select a client")]
    NoCustomerSelected,
    #[error("Select a product")]
    NoProductSelected,
    #[error("Enter a valid quantity: {0}")]
    InvalidQuantity(String),
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: i64, available: u32 },
    #[error("Add at least one product")]
    EmptySale,
    #[error("Unknown client: {0}")]
    UnknownCustomer(String),
    #[error("Unknown product: {0}")]
    UnknownProduct(String),
    #[error("Line not found: {0}")]
    LineNotFound(u64),
    #[error("Sale rejected: {0}")]
    Rejected(String),
    #[error(transparent)]
    Backend(#[from] ApiError),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl SaleError {
    pub fn class(&self) -> ErrorClass {
        match self {
            SaleError::Rejected(_) => ErrorClass::Rejected,
            SaleError::Backend(_) | SaleError::ActorCommunicationError(_) => ErrorClass::Transport,
            _ => ErrorClass::Validation,
        }
    }
}

/// Errors from client/product registration and removal.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RegistryError {
    #[error("Invalid form: {0}")]
    Validation(String),
    #[error("Request rejected: {0}")]
    Rejected(String),
    #[error(transparent)]
    Backend(#[from] ApiError),
    #[error("Could not write file: {0}")]
    Io(String),
}

impl RegistryError {
    pub fn class(&self) -> ErrorClass {
        match self {
            RegistryError::Validation(_) => ErrorClass::Validation,
            RegistryError::Rejected(_) => ErrorClass::Rejected,
            RegistryError::Backend(_) | RegistryError::Io(_) => ErrorClass::Transport,
        }
    }
}
