#[async_trait::async_trait]
pub trait LogoResolver: Send + Sync {
    /// Resource path of the company's logo. Never fails: falls back to the default asset.
    async fn resolve(&self, company_name: &str) -> String;
}
