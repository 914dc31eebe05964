//! Page-fetching commands: component, doc, install, get.

use anyhow::Result;
use uidocs_core::{FetchOptions, FetchService};

use crate::output::{print_failure, print_result};

pub async fn fetch_component(
    service: &FetchService,
    name: &str,
    options: FetchOptions,
    json: bool,
) -> Result<()> {
    match service.fetch_component(name, options).await {
        Ok(result) => print_result(&result, json),
        Err(err) => print_failure(err, json),
    }
}

pub async fn fetch_doc(
    service: &FetchService,
    path: &str,
    options: FetchOptions,
    json: bool,
) -> Result<()> {
    match service.fetch_doc(path, options).await {
        Ok(result) => print_result(&result, json),
        Err(err) => print_failure(err, json),
    }
}

pub async fn fetch_install(
    service: &FetchService,
    framework: Option<&str>,
    options: FetchOptions,
    json: bool,
) -> Result<()> {
    match service.fetch_install_guide(framework, options).await {
        Ok(result) => print_result(&result, json),
        Err(err) => print_failure(err, json),
    }
}

pub async fn fetch_url(
    service: &FetchService,
    url: &str,
    options: FetchOptions,
    json: bool,
) -> Result<()> {
    match service.fetch_url(url, options).await {
        Ok(result) => print_result(&result, json),
        Err(err) => print_failure(err, json),
    }
}
