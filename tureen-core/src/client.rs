//! Typed HTTP client for the tureen API.
//!
//! Thin request/response wrappers over reqwest with bearer-token auth.
//! No caching and no automatic retries: every failure surfaces once as an
//! `ApiError` and retry is the caller's decision. The one piece of logic
//! beyond plumbing is the alias-search short-circuit: a blank query returns
//! an empty result set without issuing any request.

use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::filters::{NearbySearchRequest, NearbySearchResponse};
use crate::types::{
    AliasHit, AliasResponse, AuthResponse, CategoryResponse, CreateAliasRequest,
    CreateCategoryRequest, CreateDishRequest, CreateIngredientRequest,
    CreateMenuCategoryRequest, CreateRestaurantRequest, DishDetailResponse,
    DishIngredientLink, DishResponse, IngredientResponse, LoginRequest,
    MenuCategoryResponse, RestaurantResponse, SetDishIngredientsRequest, SignupRequest,
    UpdateDishRequest,
};

/// Error body returned by the API on failure.
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Deserialize)]
struct PingBody {
    message: String,
}

pub struct ApiClient {
    inner: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a client for the given base URL (e.g. `http://localhost:3000`).
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let parsed = reqwest::Url::parse(base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if !parsed.has_host() {
            return Err(ApiError::InvalidUrl(format!("no host in {}", base_url)));
        }

        Ok(Self {
            inner: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Set the bearer token used for authenticated calls.
    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn token(&self) -> Result<&str, ApiError> {
        self.token.as_deref().ok_or(ApiError::NotAuthenticated)
    }

    /// Map a non-success response to `ApiError::Api`, extracting the
    /// server's error message when the body carries one.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().to_string();
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string(),
        };
        tracing::debug!(url, status = status.as_u16(), %message, "api request failed");
        Err(ApiError::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// Sign up a new user and keep the returned session token.
    pub async fn signup(&mut self, username: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let response = self
            .inner
            .post(self.url("/api/auth/signup"))
            .json(&SignupRequest {
                username: username.to_string(),
                password: password.to_string(),
            })
            .send()
            .await?;
        let auth: AuthResponse = Self::check(response).await?.json().await?;
        self.token = Some(auth.token.clone());
        Ok(auth)
    }

    /// Log in and keep the returned session token.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let response = self
            .inner
            .post(self.url("/api/auth/login"))
            .json(&LoginRequest {
                username: username.to_string(),
                password: password.to_string(),
            })
            .send()
            .await?;
        let auth: AuthResponse = Self::check(response).await?.json().await?;
        self.token = Some(auth.token.clone());
        Ok(auth)
    }

    /// Liveness probe; requires no token.
    pub async fn unauthed_ping(&self) -> Result<String, ApiError> {
        let response = self
            .inner
            .get(self.url("/api/test/unauthed-ping"))
            .send()
            .await?;
        let body: PingBody = Self::check(response).await?.json().await?;
        Ok(body.message)
    }

    /// Authenticated smoke test.
    pub async fn ping(&self) -> Result<String, ApiError> {
        let response = self
            .inner
            .get(self.url("/api/test/ping"))
            .bearer_auth(self.token()?)
            .send()
            .await?;
        Ok(Self::check(response).await?.text().await?)
    }

    /// Search ingredient aliases by display-name prefix.
    ///
    /// A blank or whitespace-only query resolves to `Ok(vec![])` without
    /// issuing a request, so callers can invoke this on every keystroke.
    pub async fn search_ingredients(
        &self,
        query: &str,
        limit: Option<i64>,
    ) -> Result<Vec<AliasHit>, ApiError> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let mut request = self
            .inner
            .get(self.url("/api/ingredients/search"))
            .bearer_auth(self.token()?)
            .query(&[("q", query)]);
        if let Some(limit) = limit {
            request = request.query(&[("limit", limit)]);
        }

        let response = request.send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn create_ingredient(
        &self,
        request: &CreateIngredientRequest,
    ) -> Result<IngredientResponse, ApiError> {
        let response = self
            .inner
            .post(self.url("/api/ingredients"))
            .bearer_auth(self.token()?)
            .json(request)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn create_alias(
        &self,
        canonical_ingredient_id: Uuid,
        display_name: &str,
    ) -> Result<AliasResponse, ApiError> {
        let response = self
            .inner
            .post(self.url(&format!(
                "/api/ingredients/{}/aliases",
                canonical_ingredient_id
            )))
            .bearer_auth(self.token()?)
            .json(&CreateAliasRequest {
                display_name: display_name.to_string(),
            })
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn list_categories(&self) -> Result<Vec<CategoryResponse>, ApiError> {
        let response = self
            .inner
            .get(self.url("/api/categories"))
            .bearer_auth(self.token()?)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn create_category(
        &self,
        request: &CreateCategoryRequest,
    ) -> Result<CategoryResponse, ApiError> {
        let response = self
            .inner
            .post(self.url("/api/categories"))
            .bearer_auth(self.token()?)
            .json(request)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn create_restaurant(
        &self,
        request: &CreateRestaurantRequest,
    ) -> Result<RestaurantResponse, ApiError> {
        let response = self
            .inner
            .post(self.url("/api/restaurants"))
            .bearer_auth(self.token()?)
            .json(request)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn create_menu_category(
        &self,
        restaurant_id: Uuid,
        request: &CreateMenuCategoryRequest,
    ) -> Result<MenuCategoryResponse, ApiError> {
        let response = self
            .inner
            .post(self.url(&format!(
                "/api/restaurants/{}/menu-categories",
                restaurant_id
            )))
            .bearer_auth(self.token()?)
            .json(request)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn create_dish(&self, request: &CreateDishRequest) -> Result<DishResponse, ApiError> {
        let response = self
            .inner
            .post(self.url("/api/dishes"))
            .bearer_auth(self.token()?)
            .json(request)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn update_dish(
        &self,
        dish_id: Uuid,
        request: &UpdateDishRequest,
    ) -> Result<DishResponse, ApiError> {
        let response = self
            .inner
            .patch(self.url(&format!("/api/dishes/{}", dish_id)))
            .bearer_auth(self.token()?)
            .json(request)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Fetch a dish with its derived attributes and current ingredient
    /// links. This is the read-back consumers use after a link write; the
    /// write itself never returns the derived output.
    pub async fn get_dish(&self, dish_id: Uuid) -> Result<DishDetailResponse, ApiError> {
        let response = self
            .inner
            .get(self.url(&format!("/api/dishes/{}", dish_id)))
            .bearer_auth(self.token()?)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn get_dish_ingredients(
        &self,
        dish_id: Uuid,
    ) -> Result<Vec<DishIngredientLink>, ApiError> {
        let response = self
            .inner
            .get(self.url(&format!("/api/dishes/{}/ingredients", dish_id)))
            .bearer_auth(self.token()?)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Replace a dish's ingredient link set. This is the only link write
    /// the API exposes: no add-one/remove-one primitives exist, so the
    /// stored set always converges to the submitted selection.
    pub async fn set_dish_ingredients(
        &self,
        dish_id: Uuid,
        request: &SetDishIngredientsRequest,
    ) -> Result<(), ApiError> {
        let response = self
            .inner
            .put(self.url(&format!("/api/dishes/{}/ingredients", dish_id)))
            .bearer_auth(self.token()?)
            .json(request)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    pub async fn search_nearby(
        &self,
        request: &NearbySearchRequest,
    ) -> Result<NearbySearchResponse, ApiError> {
        let response = self
            .inner
            .post(self.url("/api/restaurants/search"))
            .bearer_auth(self.token()?)
            .json(request)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_base_url() {
        assert!(matches!(
            ApiClient::new("not a url"),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_trims_trailing_slash() {
        let client = ApiClient::new("http://localhost:3000/").unwrap();
        assert_eq!(client.url("/api/test/ping"), "http://localhost:3000/api/test/ping");
    }

    #[tokio::test]
    async fn test_blank_search_issues_no_request() {
        // The base URL is unroutable; any issued request would error.
        let mut client = ApiClient::new("http://127.0.0.1:9").unwrap();
        client.set_token("token".to_string());

        assert_eq!(client.search_ingredients("", None).await.unwrap(), vec![]);
        assert_eq!(
            client.search_ingredients("   ", Some(5)).await.unwrap(),
            vec![]
        );
    }

    #[tokio::test]
    async fn test_check_maps_error_body() {
        let response: reqwest::Response = http::Response::builder()
            .status(404)
            .body(r#"{"error": "Dish not found"}"#)
            .unwrap()
            .into();
        match ApiClient::check(response).await {
            Err(ApiError::Api { status, message }) => {
                assert_eq!(status, 404);
                assert_eq!(message, "Dish not found");
            }
            other => panic!("expected ApiError::Api, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_check_falls_back_to_canonical_reason() {
        let response: reqwest::Response = http::Response::builder()
            .status(502)
            .body("upstream said no")
            .unwrap()
            .into();
        match ApiClient::check(response).await {
            Err(ApiError::Api { status, message }) => {
                assert_eq!(status, 502);
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("expected ApiError::Api, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_authenticated_calls_require_token() {
        let client = ApiClient::new("http://127.0.0.1:9").unwrap();
        assert!(matches!(
            client.search_ingredients("chee", None).await,
            Err(ApiError::NotAuthenticated)
        ));
        assert!(matches!(client.ping().await, Err(ApiError::NotAuthenticated)));
    }
}
