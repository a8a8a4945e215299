#![allow(dead_code)]
use checkin_glados::Config;
use mockito::{Matcher, Mock, ServerGuard};

pub const COOKIE: &str = "koa:sess=eyJ1c2VySWQiOjF9; koa:sess.sig=abc";
pub const TOKEN: &str = "pushplus-token";
pub const USER_AGENT: &str = "Mozilla/4.0 (compatible; MSIE 7.0; Windows NT 6.0)";

/// A config pointing both services at the given mock servers.
pub fn config_for(glados: &ServerGuard, pushplus: &ServerGuard) -> Config {
    Config::default()
        .with_glados_base_url(glados.url())
        .with_pushplus_base_url(pushplus.url())
        .with_run_context("https://github.com", "someone/checkin")
}

pub async fn mock_checkin(server: &mut ServerGuard, body: &str) -> Mock {
    let referer = format!("{}/console/checkin", server.url());
    server
        .mock("POST", "/api/user/checkin")
        .match_header("cookie", COOKIE)
        .match_header("referer", referer.as_str())
        .match_header("user-agent", USER_AGENT)
        .match_header("content-type", "application/json")
        .match_body(Matcher::Exact(r#"{"token":"glados.one"}"#.to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

pub async fn mock_status(server: &mut ServerGuard, body: &str) -> Mock {
    let referer = format!("{}/console/checkin", server.url());
    server
        .mock("GET", "/api/user/status")
        .match_header("cookie", COOKIE)
        .match_header("referer", referer.as_str())
        .match_header("user-agent", USER_AGENT)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}
