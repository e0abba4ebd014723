/*
 * Responsibility
 * - GET /: index.html を minijinja で描画
 * - GET /static/main.js: ページが使うスクリプト
 * - template / script は build 時に埋め込む
 */
use std::sync::Arc;

use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse},
};
use minijinja::Environment;
use serde::Serialize;

use crate::{config::Config, error::PageError};

const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");
const MAIN_SCRIPT: &str = include_str!("../static/main.js");

const APP_NAME: &str = "Masterblog";

#[derive(Serialize)]
struct IndexContext<'a> {
    app_name: &'a str,
    api_base_url: &'a str,
}

pub fn render_index(api_base_url: &str) -> Result<String, PageError> {
    let mut env = Environment::new();
    env.add_template("index.html", INDEX_TEMPLATE)?;

    let rendered = env.get_template("index.html")?.render(IndexContext {
        app_name: APP_NAME,
        api_base_url,
    })?;
    Ok(rendered)
}

pub async fn index(State(config): State<Arc<Config>>) -> Result<Html<String>, PageError> {
    render_index(&config.api_base_url).map(Html)
}

pub async fn main_script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        MAIN_SCRIPT,
    )
}
