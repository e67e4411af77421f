use crate::model::Article;
use async_trait::async_trait;
use serde_json::json;
use wal::dispatch::unknown_method;
use wal::{
    redirect_to_route, render_view, AppError, Controller, EntityManager, PgExecutor, Reply, RequestContext,
    RouteParams, SortDirection, ValueMap,
};

const PAGE_SIZE: u64 = 10;

/// Row offset of a 1-based page; page 0 is treated as the first page.
fn page_offset(page: u64) -> Result<u64, AppError> {
    page.saturating_sub(1)
        .checked_mul(PAGE_SIZE)
        .filter(|n| *n <= i64::MAX as u64)
        .ok_or_else(|| AppError::BadRequest(format!("page out of range: {}", page)))
}

pub struct MainController {
    pub title: String,
}

#[async_trait]
impl Controller for MainController {
    fn methods(&self) -> &'static [&'static str] {
        &["home", "contact"]
    }

    async fn invoke(&self, method: &str, _params: &RouteParams, request: &RequestContext) -> Result<Reply, AppError> {
        match method {
            "home" => Ok(render_view(
                "main/home",
                json!({ "title": self.title, "state": request.query.get("state") }),
            )),
            // Sending the message is left to a mail collaborator; the page only acknowledges it.
            "contact" => Ok(redirect_to_route("/", &[("state", "success")])),
            other => Err(unknown_method("MainController", other)),
        }
    }
}

pub struct ArticleController {
    pub articles: EntityManager<Article, PgExecutor>,
}

impl ArticleController {
    async fn list(&self, request: &RequestContext) -> Result<Reply, AppError> {
        let page: u64 = match request.query.get("page") {
            Some(p) => p.parse().map_err(|_| AppError::BadRequest(format!("invalid page: {}", p)))?,
            None => 1,
        };
        let offset = page_offset(page)?;
        let articles = self
            .articles
            .find_by(ValueMap::new(), &[("id", SortDirection::Desc)], Some(PAGE_SIZE), Some(offset))
            .await?;
        Ok(render_view("article/list", json!({ "articles": articles, "page": page })))
    }

    async fn show(&self, params: &RouteParams) -> Result<Reply, AppError> {
        let id: i64 = params.parse("id")?;
        let article = self.articles.find(id).await?;
        Ok(render_view("article/show", json!({ "article": article })))
    }

    async fn add(&self, request: &RequestContext) -> Result<Reply, AppError> {
        if !request.is_post() {
            return Ok(render_view("article/add", json!({})));
        }
        let article = Article {
            id: None,
            title: request.form_field("title")?.to_string(),
            description: request.form_field("description")?.to_string(),
            content: request.form_field("content")?.to_string(),
        };
        self.articles.add(&article).await?;
        tracing::info!(title = %article.title, "article created");
        Ok(redirect_to_route("/blog", &[]))
    }

    async fn remove(&self, params: &RouteParams, request: &RequestContext) -> Result<Reply, AppError> {
        if !request.is_post() {
            return Err(AppError::BadRequest("delete requires POST".into()));
        }
        let article = self.articles.find(params.parse::<i64>("id")?).await?;
        self.articles.delete(&article).await?;
        Ok(redirect_to_route("/blog", &[("state", "deleted")]))
    }
}

#[async_trait]
impl Controller for ArticleController {
    fn methods(&self) -> &'static [&'static str] {
        &["list", "show", "add", "remove"]
    }

    async fn invoke(&self, method: &str, params: &RouteParams, request: &RequestContext) -> Result<Reply, AppError> {
        match method {
            "list" => self.list(request).await,
            "show" => self.show(params).await,
            "add" => self.add(request).await,
            "remove" => self.remove(params, request).await,
            other => Err(unknown_method("ArticleController", other)),
        }
    }
}
