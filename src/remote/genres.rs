use super::{ApiResult, Client};

impl Client {
    /// Lists every genre label the server knows about.
    pub async fn get_genres(&self) -> ApiResult<Vec<String>> {
        self.get_json("/api/genres").await
    }
}
