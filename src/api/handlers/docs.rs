/*
 * Responsibility
 * - GET /api/docs: Swagger UI page
 * - GET /static/masterblog.json: API description it renders
 * - both are static files embedded at build time, not generated from the routes
 */
use axum::{
    http::header,
    response::{Html, IntoResponse},
};

const SWAGGER_UI_PAGE: &str = include_str!("../../../static/swagger-ui.html");
const API_DESCRIPTION: &str = include_str!("../../../static/masterblog.json");

pub const API_DESCRIPTION_PATH: &str = "/static/masterblog.json";

pub async fn swagger_ui() -> Html<&'static str> {
    Html(SWAGGER_UI_PAGE)
}

pub async fn api_description() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], API_DESCRIPTION)
}
