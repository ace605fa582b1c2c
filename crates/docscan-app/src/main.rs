// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Docscan — photograph pages and save them as one PDF.
//
// Entry point. Initialises logging and backend services, then launches the
// Dioxus UI.

mod pages;
mod services;

use dioxus::prelude::*;

use pages::scanner::Scanner;
use services::app_services::AppServices;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Docscan starting");

    dioxus::launch(app);
}

/// Root component.
fn app() -> Element {
    let svc = use_hook(|| {
        let svc = AppServices::init();
        tracing::info!(data_dir = %svc.data_dir().display(), "backend services initialised");
        svc
    });

    use_context_provider(|| svc.clone());

    rsx! {
        div { class: "app-container",
            style: "min-height: 100vh; font-family: system-ui, -apple-system, sans-serif; background: #fafafa;",
            Scanner {}
        }
    }
}
