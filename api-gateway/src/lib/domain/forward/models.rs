use axum::body::Bytes;
use axum::http::HeaderValue;

/// Public routes and the authority endpoint each one is relayed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Register,
    Login,
    Protected,
    ListRecords,
    AddRecord,
    RemoveRecord,
    Health,
}

/// HTTP method used towards the authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Delete,
}

impl Route {
    /// Authority path for this route.
    pub fn upstream_path(&self) -> &'static str {
        match self {
            Route::Register => "/auth/register",
            Route::Login => "/auth/login",
            Route::Protected => "/auth/protected",
            Route::ListRecords | Route::AddRecord | Route::RemoveRecord => "/auth/records",
            Route::Health => "/auth/health",
        }
    }

    pub fn verb(&self) -> Verb {
        match self {
            Route::Register | Route::Login | Route::AddRecord => Verb::Post,
            Route::Protected | Route::ListRecords | Route::Health => Verb::Get,
            Route::RemoveRecord => Verb::Delete,
        }
    }

    /// Whether the gateway itself insists on an `Authorization` header.
    pub fn requires_token(&self) -> bool {
        matches!(
            self,
            Route::Protected | Route::ListRecords | Route::AddRecord | Route::RemoveRecord
        )
    }
}

/// Client request as relayed to the authority.
///
/// Header values are kept byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamRequest {
    pub route: Route,
    pub authorization: Option<HeaderValue>,
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

/// Authority answer, relayed to the client unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}
