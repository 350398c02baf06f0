//! Fetches external assets and reports the outcome back to the configurator.
//!
//! Only availability is tracked; the bytes themselves are not decoded.

use mirror_core::error::ConfigError;
use mirror_core::{Configurator, LoadTicket};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

async fn fetch_ok(path: &str) -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp = JsFuture::from(window.fetch_with_str(path))
        .await
        .map_err(|e| anyhow::anyhow!("fetch {path}: {:?}", e))?;
    let resp: web::Response = resp
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("fetch {path}: not a Response: {:?}", e))?;
    if !resp.ok() {
        anyhow::bail!("fetch {path}: HTTP {}", resp.status());
    }
    Ok(())
}

pub fn start_load(state: Rc<RefCell<Configurator>>, ticket: LoadTicket) {
    let path = ticket.asset.path();
    log::info!("[assets] loading {path}");
    spawn_local(async move {
        let result = match fetch_ok(path).await {
            Ok(()) => {
                log::info!("[assets] ready {path}");
                Ok(())
            }
            Err(e) => {
                log::warn!("[assets] {e:#}");
                Err(ConfigError::AssetUnavailable(ticket.asset))
            }
        };
        state.borrow_mut().resolve_asset(ticket, result);
    });
}
