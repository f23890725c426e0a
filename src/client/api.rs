/**
 * Board API Client
 *
 * Async HTTP client for the `/api/v1` surface. Every response is decoded
 * from the `{ status, message, data }` envelope; an unsuccessful status
 * becomes `ClientError::Api` carrying the server's message, so it can be
 * shown to the user unchanged.
 */

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::client::error::ClientError;
use crate::shared::api::{
    AuthResponse, CreateBoardRequest, CreateListRequest, CreateTaskRequest, CurrentUserResponse,
    LoginRequest, MoveTasksRequest, RegisterRequest,
};
use crate::shared::board::{Board, BoardView, Task, TaskList, TaskStatus, UserSummary};
use crate::shared::config::AppConfig;
use crate::shared::ordering::TaskMove;
use crate::shared::ApiResponse;

/// HTTP client for one board server
#[derive(Debug, Clone)]
pub struct BoardClient {
    http: Client,
    config: AppConfig,
    token: Option<String>,
}

impl BoardClient {
    pub fn new(config: AppConfig) -> Self {
        Self {
            http: Client::new(),
            config,
            token: None,
        }
    }

    /// Client for `server_url`, validating the URL
    pub fn connect(server_url: impl Into<String>) -> Result<Self, ClientError> {
        let config = AppConfig::builder().server_url(server_url).build()?;
        Ok(Self::new(config))
    }

    /// Use `token` as bearer token on every request
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    fn request(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.config.api_url(path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request and unwrap the response envelope
    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<ApiResponse<T>, ClientError> {
        let response = checked(builder.send().await?).await?;
        Ok(response.json::<ApiResponse<T>>().await?)
    }

    async fn send_data<T: DeserializeOwned>(&self, builder: RequestBuilder, path: &str) -> Result<T, ClientError> {
        self.send::<T>(builder)
            .await?
            .data
            .ok_or_else(|| ClientError::MissingData(path.to_string()))
    }

    async fn authenticate<B: serde::Serialize>(&mut self, path: &str, body: &B) -> Result<AuthResponse, ClientError> {
        let response = checked(self.request(reqwest::Method::POST, path).json(body).send().await?).await?;
        let auth: AuthResponse = response.json().await?;
        self.token = Some(auth.token.clone());
        Ok(auth)
    }

    /// Register and keep the returned token
    pub async fn register(&mut self, name: &str, email: &str, password: &str) -> Result<AuthResponse, ClientError> {
        let body = RegisterRequest {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        };
        self.authenticate("/register", &body).await
    }

    /// Log in and keep the returned token
    pub async fn login(&mut self, email: &str, password: &str) -> Result<AuthResponse, ClientError> {
        let body = LoginRequest {
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        };
        self.authenticate("/login", &body).await
    }

    /// Forget the token
    pub async fn logout(&mut self) -> Result<(), ClientError> {
        self.send::<serde_json::Value>(self.request(reqwest::Method::POST, "/logout"))
            .await?;
        self.token = None;
        Ok(())
    }

    pub async fn current_user(&self) -> Result<UserSummary, ClientError> {
        let response = checked(self.request(reqwest::Method::GET, "/current-user").send().await?).await?;
        let body: CurrentUserResponse = response.json().await?;
        Ok(body.user)
    }

    pub async fn boards(&self) -> Result<Vec<Board>, ClientError> {
        self.send_data(self.request(reqwest::Method::GET, "/boards"), "/boards")
            .await
    }

    /// Full board state: lists with their tasks, both ordered by position
    pub async fn board(&self, id: Uuid) -> Result<BoardView, ClientError> {
        let path = format!("/boards/{}", id);
        self.send_data(self.request(reqwest::Method::GET, &path), &path)
            .await
    }

    pub async fn create_board(&self, title: &str, description: &str) -> Result<Board, ClientError> {
        let body = CreateBoardRequest {
            title: Some(title.to_string()),
            description: Some(description.to_string()),
        };
        self.send_data(self.request(reqwest::Method::POST, "/boards").json(&body), "/boards")
            .await
    }

    pub async fn create_list(&self, board_id: Uuid, title: &str) -> Result<TaskList, ClientError> {
        let body = CreateListRequest {
            title: Some(title.to_string()),
            board_id: Some(board_id),
        };
        self.send_data(self.request(reqwest::Method::POST, "/lists").json(&body), "/lists")
            .await
    }

    pub async fn create_task(&self, list_id: Uuid, title: &str, status: TaskStatus) -> Result<Task, ClientError> {
        let body = CreateTaskRequest {
            title: Some(title.to_string()),
            list: Some(list_id),
            status: Some(status),
            ..Default::default()
        };
        self.send_data(self.request(reqwest::Method::POST, "/tasks").json(&body), "/tasks")
            .await
    }

    /// Submit a batch move, returning the moved tasks
    pub async fn move_tasks(&self, moves: &[TaskMove]) -> Result<Vec<Task>, ClientError> {
        let body = MoveTasksRequest::from_moves(moves);
        self.send_data(
            self.request(reqwest::Method::PUT, "/tasks/move").json(&body),
            "/tasks/move",
        )
        .await
    }

    pub async fn delete_task(&self, id: Uuid) -> Result<(), ClientError> {
        let path = format!("/tasks/{}", id);
        self.send::<serde_json::Value>(self.request(reqwest::Method::DELETE, &path))
            .await?;
        Ok(())
    }
}

/// Turn a non-2xx response into `ClientError::Api`
async fn checked(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = match response.json::<ApiResponse<serde_json::Value>>().await {
        Ok(body) => body.message.unwrap_or_else(|| status.to_string()),
        Err(_) => status.to_string(),
    };
    tracing::warn!("API request failed ({}): {}", status.as_u16(), message);
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}
